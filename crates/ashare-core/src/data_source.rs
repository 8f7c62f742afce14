//! Source adapter contract.
//!
//! Every upstream integration implements [`DataSource`]. Adapters never
//! surface errors: parse and transport failures are logged locally and
//! collapse to `None`, which lets the façade move on to the next source
//! without per-adapter error plumbing. The only caller-visible errors in
//! this crate are input-validation errors raised before any adapter runs.

use std::future::Future;
use std::pin::Pin;

use crate::{BarSeries, Period, ProviderId, RealtimeQuote, Symbol, TradeDate, ValidationError};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Validated parameters for one historical-bars fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub start: TradeDate,
    pub end: TradeDate,
    pub period: Period,
}

impl HistoryRequest {
    pub fn new(
        symbol: Symbol,
        start: TradeDate,
        end: TradeDate,
        period: Period,
    ) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self {
            symbol,
            start,
            end,
            period,
        })
    }
}

/// Contract implemented by every upstream quote/bar source.
///
/// Implementations are stateless service objects: per-call they own nothing
/// beyond their configuration (endpoint URLs, timeout, transport handle) and
/// must be `Send + Sync` so the façade can be shared across tasks.
pub trait DataSource: Send + Sync {
    /// Unique source identifier, recorded in quotes and usage stats.
    fn id(&self) -> ProviderId;

    /// Whether the source initialized with everything it needs.
    ///
    /// Fixed at construction; unavailable sources are skipped by the façade
    /// without counting as a failed attempt.
    fn is_available(&self) -> bool;

    /// Fetch a realtime quote. `None` means this source has no usable data
    /// right now, for whatever reason.
    fn realtime<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, Option<RealtimeQuote>>;

    /// Fetch historical bars for the requested range.
    fn history<'a>(&'a self, req: &'a HistoryRequest) -> BoxFuture<'a, Option<BarSeries>>;

    /// Round-trip a known-good request to verify the upstream is reachable.
    fn test_connection<'a>(&'a self) -> BoxFuture<'a, bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_request_rejects_inverted_range() {
        let symbol = Symbol::parse("000001").expect("valid symbol");
        let start = TradeDate::parse("2024-02-01").expect("valid date");
        let end = TradeDate::parse("2024-01-01").expect("valid date");

        let err = HistoryRequest::new(symbol, start, end, Period::Daily).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }
}
