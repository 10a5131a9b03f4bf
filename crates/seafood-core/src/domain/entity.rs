//! The `Entity` trait binding each entity type to its allocator.

use crate::identity::{EntityAllocators, IdAllocator, IdFormat};

/// The identifier type of entity `E`.
pub type EntityId<E> = <<E as Entity>::Format as IdFormat>::Id;

/// A persistent domain record with an identifier drawn from one allocator.
///
/// Storage loaders use this trait to synchronize the right allocator for a
/// batch without knowing the concrete entity type.
pub trait Entity {
    /// Identifier format of this type.
    type Format: IdFormat;

    /// Type name, used in logs and error messages.
    const KIND: &'static str;

    /// Selects this type's allocator from the registry.
    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Self::Format>;

    /// The immutable identifier of this instance.
    fn id(&self) -> &EntityId<Self>;
}

/// Implements `PartialEq`, `Eq` and `Hash` by identifier only.
///
/// Two records with the same identifier are the same entity, even if one of
/// them carries stale field values.
macro_rules! identity_by_id {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::domain::entity::Entity::id(self) == $crate::domain::entity::Entity::id(other)
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                $crate::domain::entity::Entity::id(self).hash(state);
            }
        }
    };
}

pub(crate) use identity_by_id;
