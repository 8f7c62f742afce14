use serde_json::Value;

use crate::error::CliError;

/// Render a command result as JSON on stdout.
pub fn render(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
