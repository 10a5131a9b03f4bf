//! Identifier allocation for every entity type.
//!
//! Each entity type owns exactly one [`IdAllocator`].  The allocators live in
//! an [`EntityAllocators`] registry that the application creates once at
//! startup and passes to every constructor, instead of keeping a hidden
//! static counter per type.

pub mod allocator;
pub mod registry;

pub use allocator::{IdAllocator, IdFormat, Numeric, Prefixed};
pub use registry::{EntityAllocators, IdPrefixes};
