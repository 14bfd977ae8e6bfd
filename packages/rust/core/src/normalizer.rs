//! Chapter normalizer.
//!
//! Rewrites each discovered chapter file into canonical content and renames it
//! to its canonical `NN - Title.md` filename.

use std::path::Path;

use tracing::{debug, info, instrument};

use booksync_shared::{BookSyncError, Chapter, DiscoveredChapter, Result};

/// What normalization did to a single chapter file.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// The chapter as it now exists on disk.
    pub chapter: Chapter,
    /// Whether the file content was rewritten.
    pub rewritten: bool,
    /// Previous filename, if the file was renamed.
    pub renamed_from: Option<String>,
}

/// Normalize one chapter file in place.
///
/// Content is only written when it changes. A rename fails with
/// [`BookSyncError::NameCollision`] when the canonical path is held by a
/// different file.
#[instrument(skip_all, fields(number = discovered.number, path = %discovered.path.display()))]
pub fn normalize_chapter(discovered: &DiscoveredChapter) -> Result<NormalizeOutcome> {
    let path = discovered.path.as_path();
    let text = std::fs::read_to_string(path).map_err(|e| BookSyncError::io(path, e))?;

    let normalized =
        booksync_markdown::normalize(&text).ok_or_else(|| BookSyncError::missing_heading(path))?;

    let expected = booksync_markdown::canonical_filename(discovered.number, &normalized.heading);
    let current = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = path.with_file_name(&expected);

    // Collisions are checked before anything is written.
    let needs_rename = current != expected;
    if needs_rename && target.exists() && !is_same_file(path, &target) {
        return Err(BookSyncError::name_collision(path, target));
    }

    let rewritten = normalized.content != text;
    if rewritten {
        std::fs::write(path, &normalized.content).map_err(|e| BookSyncError::io(path, e))?;
        info!(path = %path.display(), "rewrote chapter content");
    } else {
        debug!("chapter content already canonical");
    }

    let renamed_from = if needs_rename {
        std::fs::rename(path, &target).map_err(|e| BookSyncError::io(&target, e))?;
        info!(from = %current, to = %expected, "renamed chapter");
        Some(current)
    } else {
        None
    };

    Ok(NormalizeOutcome {
        chapter: Chapter {
            number: discovered.number,
            heading: normalized.heading,
            filename: expected,
        },
        rewritten,
        renamed_from,
    })
}

/// Whether two existing paths name the same file (e.g. a case-only rename).
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("booksync-normalizer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn discovered(dir: &Path, number: usize, name: &str, content: &str) -> DiscoveredChapter {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        DiscoveredChapter {
            number,
            prefix: number as u64,
            path,
        }
    }

    #[test]
    fn normalize_rewrites_and_renames() {
        let tmp = temp_dir();
        let input = discovered(&tmp, 2, "3-Intro.md", "\n\n# Intro\nHello\n\n\n");

        let outcome = normalize_chapter(&input).unwrap();
        assert_eq!(outcome.chapter.filename, "02 - Intro.md");
        assert_eq!(outcome.chapter.heading, "Intro");
        assert!(outcome.rewritten);
        assert_eq!(outcome.renamed_from.as_deref(), Some("3-Intro.md"));

        assert!(!tmp.join("3-Intro.md").exists());
        let content = std::fs::read_to_string(tmp.join("02 - Intro.md")).unwrap();
        assert_eq!(content, "# Intro\n\nHello\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn normalize_canonical_file_is_untouched() {
        let tmp = temp_dir();
        let input = discovered(&tmp, 1, "01 - Setup.md", "# Setup\n\nWorld\n");

        let outcome = normalize_chapter(&input).unwrap();
        assert!(!outcome.rewritten);
        assert!(outcome.renamed_from.is_none());
        assert_eq!(outcome.chapter.filename, "01 - Setup.md");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn normalize_sanitizes_heading_for_filename() {
        let tmp = temp_dir();
        let input = discovered(&tmp, 4, "4-x.md", "# Webhooks: What/Why?\n\nBody\n");

        let outcome = normalize_chapter(&input).unwrap();
        assert_eq!(outcome.chapter.heading, "Webhooks: What/Why?");
        assert_eq!(outcome.chapter.filename, "04 - Webhooks WhatWhy.md");
        assert!(tmp.join("04 - Webhooks WhatWhy.md").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn normalize_missing_heading_fails() {
        let tmp = temp_dir();
        let input = discovered(&tmp, 1, "1-Empty.md", "no heading here\n```\n# fenced\n```\n");

        let err = normalize_chapter(&input).unwrap_err();
        assert!(matches!(err, BookSyncError::MissingHeading { .. }));
        // The file is left exactly as it was.
        assert_eq!(
            std::fs::read_to_string(tmp.join("1-Empty.md")).unwrap(),
            "no heading here\n```\n# fenced\n```\n"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn normalize_collision_keeps_original_name() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("02 - Setup.md"), "unrelated\n").unwrap();
        let input = discovered(&tmp, 2, "5-Setup.md", "\n# Setup\nBody\n");

        let err = normalize_chapter(&input).unwrap_err();
        match err {
            BookSyncError::NameCollision { target, .. } => {
                assert_eq!(target, tmp.join("02 - Setup.md"));
            }
            other => panic!("expected NameCollision, got {other:?}"),
        }
        // Nothing was written to the chapter either.
        assert_eq!(
            std::fs::read_to_string(tmp.join("5-Setup.md")).unwrap(),
            "\n# Setup\nBody\n"
        );
        assert_eq!(
            std::fs::read_to_string(tmp.join("02 - Setup.md")).unwrap(),
            "unrelated\n"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
