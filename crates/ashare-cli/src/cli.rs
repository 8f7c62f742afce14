//! CLI argument definitions.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch the current quote for a symbol |
//! | `history` | Fetch historical OHLCV bars |
//! | `sources` | List data sources and their availability |
//! | `stats` | Fetch quotes and report usage counters |
//! | `normalize` | Normalize raw symbols without fetching |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--no-cache` | `false` | Disable the in-memory TTL cache |
//!
//! # Examples
//!
//! ```bash
//! # Fetch a quote
//! ashare quote 000001
//!
//! # Daily bars for January
//! ashare history 600000 --start 2024-01-01 --end 2024-01-31 --pretty
//!
//! # Probe every source
//! ashare sources --probe
//! ```

use ashare_core::Period;
use clap::{Args, Parser, Subcommand};

/// Unified China A-share market data CLI.
///
/// Resolves quotes and historical bars across several public data sources
/// with automatic failover and short-lived caching.
#[derive(Debug, Parser)]
#[command(
    name = "ashare",
    author,
    version,
    about = "Unified China A-share market data CLI"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Disable the in-memory TTL cache for this invocation.
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current quote for one symbol.
    ///
    /// Accepts any form the normalizer accepts: `000001`, `SZ000001`,
    /// `600000.SH`, or a short code like `1`.
    Quote(QuoteArgs),

    /// Fetch historical OHLCV bars for a date range.
    History(HistoryArgs),

    /// List data sources and their availability.
    Sources(SourcesArgs),

    /// Fetch quotes for the given symbols, then report usage counters.
    Stats(StatsArgs),

    /// Normalize raw symbols without touching any source.
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Market symbol in any accepted form.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Market symbol in any accepted form.
    pub symbol: String,

    /// Range start, `YYYY-MM-DD`.
    #[arg(long)]
    pub start: String,

    /// Range end, `YYYY-MM-DD`; defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Bar period: daily, weekly, or monthly.
    #[arg(long, default_value = "daily")]
    pub period: Period,
}

#[derive(Debug, Args)]
pub struct SourcesArgs {
    /// Probe each source with a known-good request instead of only
    /// reporting configured availability.
    #[arg(long, default_value_t = false)]
    pub probe: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Symbols to fetch before the counters are reported.
    #[arg(num_args = 0..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// One or more raw symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_history_with_defaults() {
        let cli = Cli::parse_from(["ashare", "history", "600000", "--start", "2024-01-01"]);
        let Command::History(args) = cli.command else {
            panic!("expected history command");
        };
        assert_eq!(args.period, Period::Daily);
        assert!(args.end.is_none());
        assert_eq!(cli.timeout_ms, 10_000);
    }
}
