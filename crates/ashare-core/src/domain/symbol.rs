use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const SYMBOL_LEN: usize = 6;

/// Listing venue derived from a symbol's leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Shanghai,
    Shenzhen,
}

/// Normalized 6-digit A-share security identifier.
///
/// The market is derived, never stored: `6xxxxx` lists in Shanghai,
/// everything else in Shenzhen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a raw market identifier.
    ///
    /// Accepts bare codes (`"600000"`), short codes (`"1"` becomes
    /// `"000001"`), and codes carrying a market affix (`"SZ000001"`,
    /// `"600000.SH"`). Normalization is idempotent.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let mut cleaned = input.trim().to_ascii_uppercase();

        for prefix in ["SZ", "SH"] {
            if let Some(rest) = cleaned.strip_prefix(prefix) {
                cleaned = rest.to_owned();
                break;
            }
        }
        for suffix in [".SZ", ".SH"] {
            if let Some(rest) = cleaned.strip_suffix(suffix) {
                cleaned = rest.to_owned();
                break;
            }
        }

        if cleaned.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if !cleaned.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::SymbolNotNumeric {
                value: input.trim().to_owned(),
            });
        }
        if cleaned.len() > SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                value: input.trim().to_owned(),
                len: cleaned.len(),
            });
        }

        Ok(Self(format!("{cleaned:0>6}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn market(&self) -> Market {
        if self.0.starts_with('6') {
            Market::Shanghai
        } else {
            Market::Shenzhen
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
