//! Shared types, error model, and configuration for booksync.
//!
//! This crate is the foundation depended on by all other booksync crates.
//! It provides:
//! - [`BookSyncError`], the unified error type
//! - Domain types ([`DiscoveredChapter`], [`Chapter`])
//! - Configuration ([`AppConfig`], [`SyncConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, LayoutConfig, ProseConfig, SyncConfig, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{BookSyncError, Result};
pub use types::{Chapter, DiscoveredChapter};
