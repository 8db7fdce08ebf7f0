//! Shared types, error model, and configuration for the climate robotics map.
//!
//! This crate is the foundation depended on by all other climatemap crates.
//! It provides:
//! - [`ClimateMapError`] — the unified error type
//! - Domain types ([`Entry`], [`EntryId`], [`Coordinates`])
//! - Configuration ([`AppConfig`], [`SheetConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, IconConfig, SheetConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{ClimateMapError, Result};
pub use types::{Coordinates, DEFAULT_ROBOTICS_TYPE, Entry, EntryId};
