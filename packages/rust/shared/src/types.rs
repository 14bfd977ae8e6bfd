//! Core domain types for booksync chapters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DiscoveredChapter
// ---------------------------------------------------------------------------

/// A root chapter file found by discovery, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredChapter {
    /// Assigned 1-based position in the book.
    pub number: usize,
    /// Numeric prefix parsed from the original filename (sort key only).
    pub prefix: u64,
    /// Current path of the file.
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Chapter
// ---------------------------------------------------------------------------

/// A chapter after normalization: canonical content and filename on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Assigned 1-based position in the book.
    pub number: usize,
    /// Text of the chapter's H1 heading.
    pub heading: String,
    /// Canonical root filename (`NN - Title.md`).
    pub filename: String,
}

impl Chapter {
    /// Extension-less mirror name, e.g. `chapter-03`.
    pub fn slug(&self) -> String {
        format!("chapter-{:02}", self.number)
    }

    /// Filename of the mirrored copy in the docs tree.
    pub fn mirror_filename(&self) -> String {
        format!("{}.md", self.slug())
    }
}
