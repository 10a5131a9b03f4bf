//! Catalog entities: small named lookup records with numeric identifiers.
//!
//! Countries, seafood types and preservers all have the same shape (an
//! identifier and a name) and differ only in which allocator they draw from.

use std::fmt;

use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::NumericId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Numeric};

macro_rules! catalog_entity {
    ($(#[$meta:meta])* $name:ident, $field:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: NumericId,
            name: String,
        }

        impl $name {
            /// Creates a new record with a fresh identifier.
            ///
            /// # Errors
            ///
            /// Returns [`EntityError::IdSpaceExhausted`] if the sequence has
            /// no identifier left.
            pub fn new(allocators: &EntityAllocators, name: impl Into<String>) -> Result<Self, EntityError> {
                Self::init(allocators, None, name.into())
            }

            /// Rebuilds a stored record and registers its identifier.
            ///
            /// # Errors
            ///
            /// Never fails for numeric identifiers; the `Result` keeps the
            /// signature uniform with [`new`](Self::new).
            pub fn restore(
                allocators: &EntityAllocators,
                id: NumericId,
                name: impl Into<String>,
            ) -> Result<Self, EntityError> {
                Self::init(allocators, Some(id), name.into())
            }

            fn init(
                allocators: &EntityAllocators,
                id: Option<NumericId>,
                name: String,
            ) -> Result<Self, EntityError> {
                let id = allocators.$field.allocate(id)?;
                Ok(Self { id, name })
            }

            pub fn id(&self) -> NumericId {
                self.id
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn set_name(&mut self, name: impl Into<String>) {
                self.name = name.into();
            }
        }

        impl Entity for $name {
            type Format = Numeric;
            const KIND: &'static str = stringify!($name);

            fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
                &allocators.$field
            }

            fn id(&self) -> &NumericId {
                &self.id
            }
        }

        identity_by_id!($name);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name)
            }
        }
    };
}

catalog_entity!(
    /// A country of origin (foreign seafood) or residence (customers).
    Country,
    countries
);

catalog_entity!(
    /// A category of seafood, e.g. "Shellfish".
    SeafoodType,
    seafood_types
);

catalog_entity!(
    /// A preservation method applied on import, e.g. "Frozen".
    Preserver,
    preservers
);
