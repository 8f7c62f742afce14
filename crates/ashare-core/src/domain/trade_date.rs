use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");
const COMPACT_DATE: &[FormatItem<'_>] = format_description!("[year][month][day]");

/// Calendar date of a trading session, parsed and rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.trim().to_owned(),
            })
    }

    /// Today's date in UTC, used when a caller omits the range end.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("TradeDate must be ISO formattable")
    }

    /// `YYYYMMDD` form used by the netease history endpoint.
    pub fn format_compact(self) -> String {
        self.0
            .format(COMPACT_DATE)
            .expect("TradeDate must be compact formattable")
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let date = TradeDate::parse("2024-01-15").expect("must parse");
        assert_eq!(date.format_iso(), "2024-01-15");
        assert_eq!(date.format_compact(), "20240115");
    }

    #[test]
    fn rejects_malformed_date() {
        let err = TradeDate::parse("2024/01/15").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradeDate::parse("2024-01-15").expect("parse");
        let later = TradeDate::parse("2024-02-01").expect("parse");
        assert!(earlier < later);
    }
}
