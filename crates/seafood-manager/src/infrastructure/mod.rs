//! Infrastructure layer for the seafood manager.
//!
//! Contains file-system adapters: the configuration file and the TOML
//! snapshot store.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `seafood_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
