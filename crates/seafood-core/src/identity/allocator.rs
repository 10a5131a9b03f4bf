//! Thread-safe identifier allocator for one entity type.
//!
//! # Two ways an identifier enters the system
//!
//! - **Fresh entry** – a user creates a record in a form.  The allocator bumps
//!   its counter and formats the new value (`C07`, `C11`, or a bare `42`).
//! - **Rehydration** – a record is read back from storage with its identifier
//!   already assigned.  The allocator parses the numeric part and raises its
//!   counter to at least that value, so later fresh identifiers cannot collide
//!   with stored ones.
//!
//! Bulk reloads additionally call [`IdAllocator::synchronize`] with the
//! largest identifier of the batch *before* any record of the batch is built.
//!
//! # Thread safety
//!
//! The counter is an `AtomicU64`.  Fresh allocation uses `fetch_update` with
//! a checked increment and registration uses `fetch_max`, both single
//! indivisible read-modify-write steps, so concurrent callers on one allocator
//! never receive the same identifier and the counter never moves backwards.
//! A counter at `u64::MAX` refuses fresh allocation instead of wrapping.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::error::EntityError;

/// How identifiers of one entity type look on the outside.
pub trait IdFormat {
    /// The identifier type handed to callers.
    type Id: Clone + fmt::Debug + PartialEq;

    /// Extracts the numeric counter value from an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if the identifier has no
    /// parsable numeric component.
    fn parse(&self, id: &Self::Id) -> Result<u64, EntityError>;

    /// Formats a counter value as an identifier.
    fn format(&self, value: u64) -> Self::Id;
}

/// Plain integer identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Numeric;

impl IdFormat for Numeric {
    type Id = u64;

    fn parse(&self, id: &u64) -> Result<u64, EntityError> {
        Ok(*id)
    }

    fn format(&self, value: u64) -> u64 {
        value
    }
}

/// Text identifiers made of one prefix letter and the counter value.
///
/// Values below 10 are zero-padded to two digits (`C01` … `C09`); larger
/// values are written as-is (`C10`, `C123`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefixed {
    prefix: char,
}

impl Prefixed {
    /// Creates a format with the given prefix letter.
    pub const fn new(prefix: char) -> Self {
        Self { prefix }
    }

    /// Returns the prefix letter.
    pub fn prefix(&self) -> char {
        self.prefix
    }
}

impl IdFormat for Prefixed {
    type Id = String;

    /// Accepts only the spelling [`format`](IdFormat::format) produces, so
    /// `C1` and `C007` are rejected and each value has one identifier.
    fn parse(&self, id: &String) -> Result<u64, EntityError> {
        id.strip_prefix(self.prefix)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .filter(|value| self.format(*value) == *id)
            .ok_or_else(|| EntityError::InvalidIdentifier(id.clone()))
    }

    fn format(&self, value: u64) -> String {
        format!("{}{:02}", self.prefix, value)
    }
}

/// A monotonically non-decreasing identifier counter for one entity type.
///
/// The counter starts at 0, so the first fresh identifier has value 1.
///
/// # Examples
///
/// ```rust
/// use seafood_core::identity::{IdAllocator, Prefixed};
///
/// let customers = IdAllocator::new("Customer", Prefixed::new('C'));
/// assert_eq!(customers.allocate(None).unwrap(), "C01");
///
/// // A record read from storage pushes the counter forward.
/// customers.allocate(Some("C11".to_string())).unwrap();
/// assert_eq!(customers.allocate(None).unwrap(), "C12");
/// ```
pub struct IdAllocator<F: IdFormat> {
    /// Entity type name, used in log output.
    kind: &'static str,
    format: F,
    /// Highest counter value issued or observed so far.
    counter: AtomicU64,
}

impl<F: IdFormat> IdAllocator<F> {
    /// Creates an allocator whose counter starts at 0.
    pub fn new(kind: &'static str, format: F) -> Self {
        Self {
            kind,
            format,
            counter: AtomicU64::new(0),
        }
    }

    /// Issues a fresh identifier, or registers a supplied one.
    ///
    /// - `None`: increments the counter and returns the formatted new value.
    /// - `Some(id)`: parses the numeric part of `id`, raises the counter to
    ///   at least that value and returns `id` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if a supplied identifier
    /// cannot be parsed.  The counter is left untouched in that case.
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if a fresh identifier is
    /// requested while the counter is at `u64::MAX`.
    pub fn allocate(&self, supplied: Option<F::Id>) -> Result<F::Id, EntityError> {
        match supplied {
            None => self.next(),
            Some(id) => {
                self.register(&id)?;
                Ok(id)
            }
        }
    }

    fn next(&self) -> Result<F::Id, EntityError> {
        // `fetch_update` returns the value *before* the update.
        let previous = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| v.checked_add(1))
            .map_err(|_| {
                warn!("{}: identifier space exhausted", self.kind);
                EntityError::IdSpaceExhausted(self.kind)
            })?;
        Ok(self.format.format(previous + 1))
    }

    /// Raises the counter to the numeric value of `id` if it is larger.
    ///
    /// Returns the parsed numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `id` cannot be parsed.
    pub fn register(&self, id: &F::Id) -> Result<u64, EntityError> {
        let value = self.parse_logged(id)?;
        self.advance_to(value);
        Ok(value)
    }

    /// Synchronization hook for bulk reloads.
    ///
    /// Advances the counter to `max(counter, max)` when `max` is present.
    /// `min` is accepted for symmetry with the storage layer but never lowers
    /// the counter.  Both absent is a no-op.
    ///
    /// Must run before any record of the batch that produced `max` is
    /// rehydrated.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `max` cannot be parsed.
    pub fn synchronize(&self, min: Option<&F::Id>, max: Option<&F::Id>) -> Result<(), EntityError> {
        let Some(max) = max else {
            if let Some(min) = min {
                debug!("{}: synchronize ignored min {min:?} without max", self.kind);
            }
            return Ok(());
        };
        let value = self.parse_logged(max)?;
        self.advance_to(value);
        Ok(())
    }

    /// Returns the current counter value without incrementing.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Returns the entity type name this allocator serves.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the identifier format.
    pub fn id_format(&self) -> &F {
        &self.format
    }

    fn parse_logged(&self, id: &F::Id) -> Result<u64, EntityError> {
        self.format.parse(id).map_err(|e| {
            warn!("{}: rejected identifier {id:?}", self.kind);
            e
        })
    }

    fn advance_to(&self, value: u64) {
        let previous = self.counter.fetch_max(value, Ordering::Relaxed);
        if value > previous {
            debug!("{}: id counter advanced {previous} -> {value}", self.kind);
        }
    }
}

impl<F: IdFormat + fmt::Debug> fmt::Debug for IdAllocator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdAllocator")
            .field("kind", &self.kind)
            .field("format", &self.format)
            .field("counter", &self.current())
            .finish()
    }
}
