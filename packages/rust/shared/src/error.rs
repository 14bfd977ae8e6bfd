//! Error types for booksync.
//!
//! Library crates use [`BookSyncError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all booksync operations.
#[derive(Debug, thiserror::Error)]
pub enum BookSyncError {
    /// A chapter file has no usable `# ` heading outside code fences.
    #[error("no H1 heading found in {path:?}")]
    MissingHeading { path: PathBuf },

    /// The canonical filename for a chapter is taken by a different file.
    #[error("target filename already exists: {target:?} (renaming {source_path:?})")]
    NameCollision {
        source_path: PathBuf,
        target: PathBuf,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BookSyncError>;

impl BookSyncError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// A chapter at `path` has no H1 outside code fences.
    pub fn missing_heading(path: impl Into<PathBuf>) -> Self {
        Self::MissingHeading { path: path.into() }
    }

    /// Renaming `source_path` would clobber a different file at `target`.
    pub fn name_collision(source_path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self::NameCollision {
            source_path: source_path.into(),
            target: target.into(),
        }
    }
}
