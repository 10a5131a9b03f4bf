//! Error type shared by every entity constructor and accessor.

use thiserror::Error;

/// Errors raised synchronously by entity construction and derived-attribute
/// access.
///
/// None of these are retried internally; the caller translates them into
/// user-facing validation messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityError {
    /// A supplied identifier has no parsable numeric component, or does not
    /// carry the prefix of the entity type it was given to.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A transaction date failed strict `dd/mm/yyyy` parsing.
    #[error("invalid date {value:?}: expected a real calendar day as dd/mm/yyyy")]
    InvalidDate { value: String },

    /// The cached previous value of a derived attribute was requested before
    /// any prior value existed.
    #[error("no cached value for derived attribute `{0}`")]
    CacheMiss(&'static str),

    /// The counter of an entity type is at `u64::MAX` and cannot issue a
    /// fresh identifier without wrapping.
    #[error("identifier space exhausted for {0}")]
    IdSpaceExhausted(&'static str),
}
