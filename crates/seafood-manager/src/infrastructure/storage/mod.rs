//! Storage infrastructure: configuration and snapshot file persistence.
//!
//! This module provides a thin adapter between the application and the
//! file system:
//!
//! - `config` reads the TOML configuration file from the platform-appropriate
//!   directory, with sensible defaults when the file does not exist yet.
//! - `snapshot_file` reads and writes the stored records as one TOML document
//!   and implements the application's `SnapshotSource` trait.

pub mod config;
pub mod snapshot_file;
