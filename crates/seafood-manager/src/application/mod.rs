//! Application layer use cases for the seafood manager.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the entities in `seafood_core`) and the infrastructure (files, TOML).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a goal (e.g., "rebuild every
//!   stored record so that new records get fresh identifiers").
//! - **Depend on abstractions** (the [`load_snapshot::SnapshotSource`] trait)
//!   rather than concrete files, so storage can be swapped without changing
//!   this code.
//! - **Contain no file system access**.
//!
//! # Sub-modules
//!
//! - **`snapshot`** – Flat, serializable record types: one list per entity
//!   type, with references stored as identifiers.
//!
//! - **`load_snapshot`** – Drives the allocator synchronization hook for each
//!   batch and rehydrates entities in dependency order.
//!
//! - **`save_snapshot`** – The reverse direction: flattens loaded and newly
//!   created entities back into a snapshot for writing.

pub mod load_snapshot;
pub mod save_snapshot;
pub mod snapshot;
