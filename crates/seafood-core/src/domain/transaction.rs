//! Import and export transactions.
//!
//! Both kinds record a quantity of one seafood item traded with one customer
//! at a unit price on a given day.  The `total` (quantity × unit price) is a
//! derived attribute.  Imports additionally record how the goods were
//! preserved.
//!
//! Dates are validated before an identifier is drawn, so a rejected date
//! never consumes one.

use std::fmt;
use std::sync::Arc;

use crate::derived::DerivedAttribute;
use crate::domain::catalog::Preserver;
use crate::domain::customer::Customer;
use crate::domain::date::TransactionDate;
use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::seafood::Seafood;
use crate::domain::NumericId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Numeric};

/// User-supplied fields shared by imports and exports.
#[derive(Debug, Clone)]
pub struct TradeDetails {
    pub seafood: Arc<Seafood>,
    pub customer: Arc<Customer>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    /// `dd/mm/yyyy`.
    pub date: String,
}

/// The validated common part of a transaction.
#[derive(Debug, Clone)]
struct Trade {
    seafood: Arc<Seafood>,
    customer: Arc<Customer>,
    quantity: Option<f64>,
    unit_price: Option<f64>,
    date: TransactionDate,
    total: DerivedAttribute,
}

impl Trade {
    fn validate(details: TradeDetails) -> Result<Self, EntityError> {
        let date = TransactionDate::parse(&details.date)?;
        let mut trade = Self {
            seafood: details.seafood,
            customer: details.customer,
            quantity: details.quantity,
            unit_price: details.unit_price,
            date,
            total: DerivedAttribute::new("total"),
        };
        trade.update_total();
        Ok(trade)
    }

    fn update_total(&mut self) {
        self.total.recompute(self.quantity, self.unit_price);
    }

    fn fmt_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seafood({}), Customer({})", self.seafood.id(), self.customer.id())?;
        if let Some(quantity) = self.quantity {
            write!(f, ", {quantity}kg")?;
        }
        if let Some(unit_price) = self.unit_price {
            write!(f, ", {unit_price}/kg")?;
        }
        write!(f, ", {}, {}", self.date, self.total.value())
    }
}

/// Generates the accessors and setters shared by both transaction kinds.
macro_rules! trade_accessors {
    ($ty:ident) => {
        impl $ty {
            pub fn id(&self) -> NumericId {
                self.id
            }

            pub fn seafood(&self) -> &Arc<Seafood> {
                &self.trade.seafood
            }

            pub fn customer(&self) -> &Arc<Customer> {
                &self.trade.customer
            }

            pub fn quantity(&self) -> Option<f64> {
                self.trade.quantity
            }

            pub fn unit_price(&self) -> Option<f64> {
                self.trade.unit_price
            }

            pub fn date(&self) -> &TransactionDate {
                &self.trade.date
            }

            /// The derived total; `0.0` until quantity and unit price are set.
            pub fn total(&self) -> f64 {
                self.trade.total.value()
            }

            /// The derived total, current or cached.
            ///
            /// # Errors
            ///
            /// Returns [`EntityError::CacheMiss`] if `use_cache` is set and no
            /// prior total exists.
            pub fn total_with_cache(&self, use_cache: bool) -> Result<f64, EntityError> {
                self.trade.total.get(use_cache)
            }

            pub fn set_seafood(&mut self, seafood: Arc<Seafood>) {
                self.trade.seafood = seafood;
            }

            pub fn set_customer(&mut self, customer: Arc<Customer>) {
                self.trade.customer = customer;
            }

            pub fn set_quantity(&mut self, quantity: Option<f64>) {
                self.trade.quantity = quantity;
                self.trade.update_total();
            }

            pub fn set_unit_price(&mut self, unit_price: Option<f64>) {
                self.trade.unit_price = unit_price;
                self.trade.update_total();
            }

            /// Replaces the date.
            ///
            /// # Errors
            ///
            /// Returns [`EntityError::InvalidDate`] and keeps the old date if
            /// `value` is not a real `dd/mm/yyyy` day.
            pub fn set_date(&mut self, value: &str) -> Result<(), EntityError> {
                self.trade.date = TransactionDate::parse(value)?;
                Ok(())
            }
        }

        impl Entity for $ty {
            type Format = Numeric;
            const KIND: &'static str = stringify!($ty);

            fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
                Self::sequence(allocators)
            }

            fn id(&self) -> &NumericId {
                &self.id
            }
        }

        identity_by_id!($ty);
    };
}

// ── ImportSeafood ─────────────────────────────────────────────────────────────

/// Seafood bought from a seller.
#[derive(Debug, Clone)]
pub struct ImportSeafood {
    id: NumericId,
    preserver: Arc<Preserver>,
    trade: Trade,
}

impl ImportSeafood {
    /// Records a new import from form input.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] if the date is malformed.  No
    /// identifier is consumed in that case.
    pub fn new(
        allocators: &EntityAllocators,
        preserver: Arc<Preserver>,
        details: TradeDetails,
    ) -> Result<Self, EntityError> {
        Self::init(allocators, None, preserver, details)
    }

    /// Rebuilds a stored import.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] if the stored date is malformed.
    pub fn restore(
        allocators: &EntityAllocators,
        id: NumericId,
        preserver: Arc<Preserver>,
        details: TradeDetails,
    ) -> Result<Self, EntityError> {
        Self::init(allocators, Some(id), preserver, details)
    }

    fn init(
        allocators: &EntityAllocators,
        id: Option<NumericId>,
        preserver: Arc<Preserver>,
        details: TradeDetails,
    ) -> Result<Self, EntityError> {
        let trade = Trade::validate(details)?;
        let id = Self::sequence(allocators).allocate(id)?;
        Ok(Self { id, preserver, trade })
    }

    fn sequence(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
        &allocators.imports
    }

    pub fn preserver(&self) -> &Arc<Preserver> {
        &self.preserver
    }

    pub fn set_preserver(&mut self, preserver: Arc<Preserver>) {
        self.preserver = preserver;
    }
}

trade_accessors!(ImportSeafood);

impl fmt::Display for ImportSeafood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Import({}, ", self.id)?;
        self.trade.fmt_fields(f)?;
        write!(f, ", {})", self.preserver)
    }
}

// ── ExportSeafood ─────────────────────────────────────────────────────────────

/// Seafood sold to a purchaser.
#[derive(Debug, Clone)]
pub struct ExportSeafood {
    id: NumericId,
    trade: Trade,
}

impl ExportSeafood {
    /// Records a new export from form input.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] if the date is malformed.  No
    /// identifier is consumed in that case.
    pub fn new(allocators: &EntityAllocators, details: TradeDetails) -> Result<Self, EntityError> {
        Self::init(allocators, None, details)
    }

    /// Rebuilds a stored export.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDate`] if the stored date is malformed.
    pub fn restore(
        allocators: &EntityAllocators,
        id: NumericId,
        details: TradeDetails,
    ) -> Result<Self, EntityError> {
        Self::init(allocators, Some(id), details)
    }

    fn init(
        allocators: &EntityAllocators,
        id: Option<NumericId>,
        details: TradeDetails,
    ) -> Result<Self, EntityError> {
        let trade = Trade::validate(details)?;
        let id = Self::sequence(allocators).allocate(id)?;
        Ok(Self { id, trade })
    }

    fn sequence(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
        &allocators.exports
    }
}

trade_accessors!(ExportSeafood);

impl fmt::Display for ExportSeafood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Export({}, ", self.id)?;
        self.trade.fmt_fields(f)?;
        f.write_str(")")
    }
}
