//! Derived attribute engine with one level of history.
//!
//! A derived attribute is a numeric field that callers never set directly.
//! Its owner recomputes it from the source fields whenever one of them
//! changes:
//!
//! ```text
//! set_quantity(5.0) ──► recompute(quantity, unit_price)
//!                            │
//!                            ├─ a source is unset → nothing changes
//!                            └─ both set → previous := current
//!                                          current  := quantity × unit_price
//! ```
//!
//! Every derived attribute in SeafoodMan (order row price, import / export
//! total) is a quantity multiplied by a unit price.

use crate::error::EntityError;

/// The value of a computed field plus the value it held before the most
/// recent recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedAttribute {
    /// Attribute name, reported in [`EntityError::CacheMiss`].
    name: &'static str,
    /// `None` until the first successful recomputation.
    current: Option<f64>,
    /// What `current` held just before the last recomputation.
    previous: Option<f64>,
}

impl DerivedAttribute {
    /// Creates an attribute that has never been computed.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            previous: None,
        }
    }

    /// Recomputes the value as `quantity × unit_price`.
    ///
    /// If either source is unset the attribute is left exactly as it was and
    /// `false` is returned.  Records may legitimately exist with unset
    /// amounts while a user is still filling in a form.
    ///
    /// Otherwise the current value moves into the history slot, the new
    /// product becomes current, and `true` is returned.
    pub fn recompute(&mut self, quantity: Option<f64>, unit_price: Option<f64>) -> bool {
        let (Some(quantity), Some(unit_price)) = (quantity, unit_price) else {
            return false;
        };
        self.previous = self.current;
        self.current = Some(quantity * unit_price);
        true
    }

    /// Reads the attribute.
    ///
    /// - `use_cache == false`: the current value, or `0.0` if never computed.
    /// - `use_cache == true`: the value held before the last recomputation.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::CacheMiss`] when `use_cache` is set and no
    /// prior value exists, i.e. fewer than two successful recomputations have
    /// happened.
    pub fn get(&self, use_cache: bool) -> Result<f64, EntityError> {
        if use_cache {
            self.previous.ok_or(EntityError::CacheMiss(self.name))
        } else {
            Ok(self.value())
        }
    }

    /// The current value, or `0.0` if never computed.
    pub fn value(&self) -> f64 {
        self.current.unwrap_or(0.0)
    }

    /// `true` once a recomputation has succeeded.
    pub fn is_computed(&self) -> bool {
        self.current.is_some()
    }

    /// The attribute name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
