//! Canonical domain types for A-share market data.
//!
//! All types validate their invariants at construction time: a [`Symbol`] is
//! always 6 ASCII digits, a [`Bar`] always has `low <= open,close <= high`,
//! and a [`BarSeries`] is always sorted ascending with unique dates.

mod models;
mod period;
mod symbol;
mod timestamp;
mod trade_date;

pub use models::{Bar, BarSeries, RealtimeQuote};
pub use period::Period;
pub use symbol::{Market, Symbol};
pub use timestamp::UtcDateTime;
pub use trade_date::TradeDate;
