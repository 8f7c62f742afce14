use serde::{Deserialize, Serialize};

use crate::{Period, ProviderId, Symbol, TradeDate, UtcDateTime, ValidationError};

/// Current-moment price snapshot for one security.
///
/// `change` and `change_percent` are always recomputed from `price` and
/// `prev_close`; upstream-reported change fields are ignored. A-share prices
/// quote in fen, so both derived fields round to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeQuote {
    pub symbol: Symbol,
    pub name: String,
    pub price: f64,
    pub prev_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub amount: f64,
    pub fetched_at: UtcDateTime,
    pub source: ProviderId,
}

impl RealtimeQuote {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        price: f64,
        prev_close: f64,
        open: f64,
        high: f64,
        low: f64,
        volume: u64,
        amount: f64,
        fetched_at: UtcDateTime,
        source: ProviderId,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_non_negative("prev_close", prev_close)?;
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("amount", amount)?;

        let change = round2(price - prev_close);
        let change_percent = if prev_close > 0.0 {
            round2((price - prev_close) / prev_close * 100.0)
        } else {
            0.0
        };

        Ok(Self {
            symbol,
            name: name.into(),
            price,
            prev_close,
            change,
            change_percent,
            open,
            high,
            low,
            volume,
            amount,
            fetched_at,
            source,
        })
    }
}

/// One period's OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Turnover in CNY; absent on venues that do not report it.
    pub amount: Option<f64>,
}

impl Bar {
    pub fn new(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        amount: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        if let Some(amount) = amount {
            validate_non_negative("amount", amount)?;
        }

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            amount,
        })
    }
}

/// Ordered bar series for one symbol and period.
///
/// Construction sorts ascending by trade date and drops duplicate dates, so
/// every series handed out by this crate satisfies the ordering invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub period: Period,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, period: Period, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self {
            symbol,
            period,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
