//! Report inputs and the matching rule each one applies.

use std::fmt;
use std::marker::PhantomData;

use crate::domain::customer::Customer;
use crate::domain::date::TransactionDate;
use crate::domain::seafood::Seafood;
use crate::domain::transaction::{ExportSeafood, ImportSeafood};
use crate::error::EntityError;

/// Tolerance for unit price comparison.
const PRICE_EPSILON: f64 = 1e-9;

/// Records that can be searched by name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Records that carry a transaction date and a unit price.
pub trait Traded {
    fn date(&self) -> &TransactionDate;
    fn unit_price(&self) -> Option<f64>;
}

impl Named for Seafood {
    fn name(&self) -> &str {
        Seafood::name(self)
    }
}

impl Named for Customer {
    fn name(&self) -> &str {
        Customer::name(self)
    }
}

impl Traded for ImportSeafood {
    fn date(&self) -> &TransactionDate {
        ImportSeafood::date(self)
    }

    fn unit_price(&self) -> Option<f64> {
        ImportSeafood::unit_price(self)
    }
}

impl Traded for ExportSeafood {
    fn date(&self) -> &TransactionDate {
        ExportSeafood::date(self)
    }

    fn unit_price(&self) -> Option<f64> {
        ExportSeafood::unit_price(self)
    }
}

/// Case-insensitive substring match on the record name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery<T> {
    needle: String,
    lowered: String,
    _subject: PhantomData<fn(&T)>,
}

impl<T: Named> NameQuery<T> {
    pub fn new(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let lowered = needle.to_lowercase();
        Self {
            needle,
            lowered,
            _subject: PhantomData,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, subject: &T) -> bool {
        subject.name().to_lowercase().contains(&self.lowered)
    }
}

impl<T> fmt::Display for NameQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.needle)
    }
}

/// Transactions on exactly one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateQuery<T> {
    date: TransactionDate,
    _subject: PhantomData<fn(&T)>,
}

impl<T: Traded> DateQuery<T> {
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] if `value` is not a real
    /// `dd/mm/yyyy` day.
    pub fn parse(value: &str) -> Result<Self, EntityError> {
        Ok(Self {
            date: TransactionDate::parse(value)?,
            _subject: PhantomData,
        })
    }

    pub fn date(&self) -> &TransactionDate {
        &self.date
    }

    pub fn matches(&self, subject: &T) -> bool {
        subject.date() == &self.date
    }
}

impl<T> fmt::Display for DateQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.date, f)
    }
}

/// Transactions at one unit price.  Records with no unit price never match.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery<T> {
    price: f64,
    _subject: PhantomData<fn(&T)>,
}

impl<T: Traded> PriceQuery<T> {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            _subject: PhantomData,
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn matches(&self, subject: &T) -> bool {
        subject
            .unit_price()
            .is_some_and(|p| (p - self.price).abs() < PRICE_EPSILON)
    }
}

impl<T> fmt::Display for PriceQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.price)
    }
}
