//! Configuration for export metadata resolution
//!
//! The resolver runs with `ResolverConfig::default()` unless a host catalog
//! supplies its own settings, usually from a TOML fragment.

pub mod types;

pub use types::*;
