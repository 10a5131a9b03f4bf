//! # seafood-core
//!
//! Domain entities for the SeafoodMan seafood trading application, together
//! with the two mechanisms every entity shares:
//!
//! - **`identity`** – Per-type identifier allocators.  An allocator hands out
//!   fresh identifiers for user-entered records (`C01`, `C02`, … or plain
//!   integers) and absorbs identifiers read back from storage so that the next
//!   fresh identifier is always larger than anything seen before.
//!
//! - **`derived`** – The derived attribute engine.  Order rows and import /
//!   export transactions carry a computed amount (quantity × unit price) that
//!   is recomputed on every source change and remembers its previous value.
//!
//! - **`domain`** – The entities themselves: seafood, customers, order rows
//!   and tables, bills, and import / export transactions.
//!
//! - **`reports`** – Query entities that filter a candidate set supplied by
//!   the caller and keep a derived result count.
//!
//! This crate performs no I/O.  Loading records from storage is the job of the
//! caller (see the `seafood-manager` crate), which drives the allocator
//! synchronization hook before rehydrating each batch.

pub mod derived;
pub mod domain;
pub mod error;
pub mod identity;
pub mod reports;

// Re-export the most-used types at the crate root so callers can write
// `seafood_core::Customer` instead of `seafood_core::domain::customer::Customer`.
pub use derived::DerivedAttribute;
pub use domain::{
    bill::SeafoodBill,
    catalog::{Country, Preserver, SeafoodType},
    customer::{Customer, CustomerFields, CustomerRole},
    date::TransactionDate,
    entity::{Entity, EntityId},
    order::{OrderRow, OrderTable},
    seafood::{Origin, Seafood, SeafoodFields},
    transaction::{ExportSeafood, ImportSeafood, TradeDetails},
};
pub use error::EntityError;
pub use identity::{EntityAllocators, IdAllocator, IdFormat, IdPrefixes, Numeric, Prefixed};
pub use reports::{DateQuery, NameQuery, PriceQuery, Report, ReportQuery};
