use thiserror::Error;

/// Caller-input validation errors exposed by `ashare-core`.
///
/// These are the only errors surfaced to callers of the façade; every
/// data-unavailability outcome is a `None` value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol must be numeric after removing market affixes: '{value}'")]
    SymbolNotNumeric { value: String },
    #[error("symbol has {len} digits, expected at most 6: '{value}'")]
    SymbolTooLong { value: String, len: usize },

    #[error("invalid trade date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid period '{value}', expected one of daily, weekly, monthly")]
    InvalidPeriod { value: String },
    #[error("invalid source '{value}', expected one of abu, ashare")]
    InvalidSource { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
}
