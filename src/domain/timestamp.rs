use chrono::{Local, NaiveDateTime};
use std::fmt;

const FORMAT: &str = "%Y%m%d_%H%M%S";

/// Backup timestamp in `YYYYMMDD_HHMMSS` form.
///
/// The fixed-width layout makes lexical order equal chronological order,
/// so the derived `Ord` can be used to sort backup branches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Capture the current local time
    pub fn now() -> Self {
        Timestamp(Local::now().format(FORMAT).to_string())
    }

    /// Parse a `YYYYMMDD_HHMMSS` string, rejecting anything that is not a real date and time
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != 15 {
            return None;
        }
        NaiveDateTime::parse_from_str(value, FORMAT)
            .ok()
            .map(|_| Timestamp(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
