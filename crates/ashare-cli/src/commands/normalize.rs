use ashare_core::{Market, Symbol, UnifiedSource};
use serde::Serialize;
use serde_json::Value;

use crate::cli::NormalizeArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct NormalizedSymbol {
    input: String,
    symbol: Symbol,
    market: Market,
}

pub fn run(args: &NormalizeArgs) -> Result<Value, CliError> {
    let normalized = args
        .symbols
        .iter()
        .map(|raw| {
            let symbol = UnifiedSource::normalize_symbol(raw)?;
            Ok(NormalizedSymbol {
                input: raw.clone(),
                market: symbol.market(),
                symbol,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(serde_json::to_value(normalized)?)
}
