use ashare_core::{ProviderId, UnifiedSource};
use serde::Serialize;
use serde_json::Value;

use crate::cli::SourcesArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SourceStatus {
    source: ProviderId,
    available: bool,
    /// Probe result; absent unless `--probe` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    reachable: Option<bool>,
}

pub async fn run(args: &SourcesArgs, unified: &UnifiedSource) -> Result<Value, CliError> {
    let availability = unified.source_availability();
    let probed = if args.probe {
        Some(unified.test_all_sources().await)
    } else {
        None
    };

    let statuses: Vec<SourceStatus> = availability
        .into_iter()
        .map(|(source, available)| SourceStatus {
            source,
            available,
            reachable: probed
                .as_ref()
                .and_then(|results| results.get(&source).copied()),
        })
        .collect();

    Ok(serde_json::to_value(statuses)?)
}
