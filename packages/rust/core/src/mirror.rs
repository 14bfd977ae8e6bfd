//! Documentation mirror.
//!
//! Copies each normalized root chapter verbatim into the docs section as
//! `chapter-NN.md`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use booksync_shared::{BookSyncError, Chapter, Result};

/// Mirror every chapter from `root` into `docs_dir`, returning the written paths.
///
/// Each mirror is a full overwrite. Nothing is created when `chapters` is empty.
#[instrument(skip_all, fields(docs_dir = %docs_dir.display(), chapters = chapters.len()))]
pub fn mirror_chapters(root: &Path, docs_dir: &Path, chapters: &[Chapter]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(chapters.len());

    for chapter in chapters {
        written.push(mirror_chapter(root, docs_dir, chapter)?);
    }

    if !written.is_empty() {
        info!(count = written.len(), "documentation mirror complete");
    }

    Ok(written)
}

/// Copy a single chapter's current root content into the docs tree.
fn mirror_chapter(root: &Path, docs_dir: &Path, chapter: &Chapter) -> Result<PathBuf> {
    let source = root.join(&chapter.filename);
    let target = docs_dir.join(chapter.mirror_filename());

    let content = std::fs::read_to_string(&source).map_err(|e| BookSyncError::io(&source, e))?;

    std::fs::create_dir_all(docs_dir).map_err(|e| BookSyncError::io(docs_dir, e))?;
    std::fs::write(&target, &content).map_err(|e| BookSyncError::io(&target, e))?;

    debug!(
        number = chapter.number,
        path = %target.display(),
        heading = %chapter.heading,
        "mirrored chapter"
    );
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
