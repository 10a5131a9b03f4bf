//! Domain entities for SeafoodMan.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no files, no databases, no UI.
//!
//! # Two ways to build an entity
//!
//! Every entity offers the same pair of constructors:
//!
//! - `new(…)` – the *form* path.  A user typed the fields in; the entity asks
//!   its type's allocator for a fresh identifier.
//! - `restore(…)` – the *data source* path.  The record came from storage
//!   with its identifier; the entity registers that identifier with the
//!   allocator so fresh identifiers stay ahead of it.
//!
//! Both go through one private initializer per entity, so validation,
//! identifier handling and derived-attribute setup cannot drift apart.
//!
//! # References between entities
//!
//! Associations are shared `Arc` references to the associated entity.
//! Ownership back-references (row → table, table → bill) store the owner's
//! identifier to avoid reference cycles.

pub mod bill;
pub mod catalog;
pub mod customer;
pub mod date;
pub mod entity;
pub mod order;
pub mod seafood;
pub mod transaction;

/// Text identifier of a seafood item (`S01`, …).
pub type SeafoodId = String;
/// Text identifier of a customer (`C01`, …).
pub type CustomerId = String;
/// Text identifier of an order table (`T01`, …).
pub type TableId = String;
/// Text identifier of a bill (`B01`, …).
pub type BillId = String;
/// Numeric identifier used by rows, transactions, catalogs and reports.
pub type NumericId = u64;
