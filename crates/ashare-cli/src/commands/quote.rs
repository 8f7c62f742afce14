use ashare_core::UnifiedSource;
use serde_json::Value;

use crate::cli::QuoteArgs;
use crate::error::CliError;

pub async fn run(args: &QuoteArgs, unified: &UnifiedSource) -> Result<Value, CliError> {
    match unified.get_realtime_price(&args.symbol).await? {
        Some(quote) => Ok(serde_json::to_value(quote)?),
        None => Err(CliError::NoData(format!(
            "no source produced a realtime quote for {}",
            args.symbol.trim()
        ))),
    }
}
