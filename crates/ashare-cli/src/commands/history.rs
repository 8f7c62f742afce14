use ashare_core::UnifiedSource;
use serde_json::Value;

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(args: &HistoryArgs, unified: &UnifiedSource) -> Result<Value, CliError> {
    let series = unified
        .get_history_data(&args.symbol, &args.start, args.end.as_deref(), args.period)
        .await?;

    match series {
        Some(series) => Ok(serde_json::to_value(series)?),
        None => Err(CliError::NoData(format!(
            "no source produced {} history for {}",
            args.period,
            args.symbol.trim()
        ))),
    }
}
