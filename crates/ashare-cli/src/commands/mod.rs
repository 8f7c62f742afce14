mod history;
mod normalize;
mod quote;
mod sources;
mod stats;

use ashare_core::{UnifiedSource, UnifiedSourceConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = UnifiedSourceConfig {
        timeout_ms: cli.timeout_ms,
        enable_cache: !cli.no_cache,
        ..UnifiedSourceConfig::default()
    };
    let unified = UnifiedSource::new(config);

    match &cli.command {
        Command::Quote(args) => quote::run(args, &unified).await,
        Command::History(args) => history::run(args, &unified).await,
        Command::Sources(args) => sources::run(args, &unified).await,
        Command::Stats(args) => stats::run(args, &unified).await,
        Command::Normalize(args) => normalize::run(args),
    }
}
