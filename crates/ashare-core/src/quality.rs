//! Acceptance predicates applied to fetched payloads.
//!
//! The façade stops iterating sources at the first payload these accept;
//! everything else, including payloads an adapter produced without erroring,
//! is treated as a failed attempt. Column-level integrity (OHLC bounds,
//! required fields) is enforced by the domain constructors, so the gate only
//! has to judge whether the payload is worth returning.

use crate::{BarSeries, RealtimeQuote};

/// A realtime quote is acceptable when it carries a usable price.
pub fn acceptable_realtime(quote: &RealtimeQuote) -> bool {
    quote.price.is_finite() && quote.price > 0.0
}

/// A historical series is acceptable when it has at least one bar.
pub fn acceptable_history(series: &BarSeries) -> bool {
    !series.is_empty()
}
