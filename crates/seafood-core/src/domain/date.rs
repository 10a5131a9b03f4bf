//! Strictly validated `dd/mm/yyyy` transaction dates.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

use crate::error::EntityError;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// A transaction date as entered by the user, guaranteed to be a real day.
///
/// The original text is kept for display; comparisons use the calendar day,
/// so `"1/2/2024"` and `"01/02/2024"` are equal.
#[derive(Debug, Clone)]
pub struct TransactionDate {
    text: String,
    day: NaiveDate,
}

impl TransactionDate {
    /// Parses `value` as `dd/mm/yyyy`.
    ///
    /// Parsing is strict: only digits and `/` are accepted, and out-of-range
    /// days or months (`31/02/2024`, `01/13/2024`) are rejected rather than
    /// rolled over into the next month or year.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] for anything that is not a real
    /// calendar day in that format.
    pub fn parse(value: &str) -> Result<Self, EntityError> {
        let invalid = || EntityError::InvalidDate {
            value: value.to_string(),
        };

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit() || b == b'/') {
            return Err(invalid());
        }
        let day = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;

        Ok(Self {
            text: value.to_string(),
            day,
        })
    }

    /// The text exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The calendar day.
    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

impl PartialEq for TransactionDate {
    fn eq(&self, other: &Self) -> bool {
        self.day == other.day
    }
}

impl Eq for TransactionDate {}

impl Hash for TransactionDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day.hash(state);
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
