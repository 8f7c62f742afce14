use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical adapter identifiers used in quotes, stats, and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Abu,
    Ashare,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Abu, Self::Ashare];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abu => "abu",
            Self::Ashare => "ashare",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abu" => Ok(Self::Abu),
            "ashare" => Ok(Self::Ashare),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}
