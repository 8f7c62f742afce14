use ashare_core::UnifiedSource;
use serde_json::Value;

use crate::cli::StatsArgs;
use crate::error::CliError;

/// Fetch a quote per symbol, then report the accumulated counters. Symbols
/// that resolve to nothing still show up in the counters as errors.
pub async fn run(args: &StatsArgs, unified: &UnifiedSource) -> Result<Value, CliError> {
    for symbol in &args.symbols {
        if unified.get_realtime_price(symbol).await?.is_none() {
            log::warn!("no realtime quote for {}", symbol.trim());
        }
    }

    Ok(serde_json::to_value(unified.usage_stats())?)
}
