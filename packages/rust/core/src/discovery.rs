//! Chapter discovery.
//!
//! Scans the book root for numbered chapter files and assigns each a dense
//! 1-based number by the order of their numeric prefixes.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use booksync_shared::{BookSyncError, DiscoveredChapter, Result};

/// `<ascii digits><ws>-<ws><title>.md`
static CHAPTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s*-\s*(.+)\.md$").expect("valid regex"));

/// Numeric prefix of a chapter filename, or `None` if the name doesn't match.
///
/// Prefixes too large for `u64` saturate; they still sort after every
/// smaller prefix.
pub fn chapter_prefix(file_name: &str) -> Option<u64> {
    let caps = CHAPTER_RE.captures(file_name)?;
    Some(caps[1].parse::<u64>().unwrap_or(u64::MAX))
}

/// Find the chapter files directly inside `root`, in book order.
///
/// Directory entries are visited in filename order so that equal prefixes
/// keep a deterministic relative order through the stable sort.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover(root: &Path) -> Result<Vec<DiscoveredChapter>> {
    let entries = std::fs::read_dir(root).map_err(|e| BookSyncError::io(root, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BookSyncError::io(root, e))?;
        let path = entry.path();

        // Follows symlinks, so a link to a chapter file counts as a chapter.
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "skipping dangling symlink");
                continue;
            }
            Err(e) => return Err(BookSyncError::io(&path, e)),
        };
        if !metadata.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!(path = %path.display(), "skipping non UTF-8 filename");
            continue;
        };

        if let Some(prefix) = chapter_prefix(&name) {
            candidates.push((name, prefix, path));
        }
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates.sort_by_key(|(_, prefix, _)| *prefix);

    let chapters: Vec<DiscoveredChapter> = candidates
        .into_iter()
        .enumerate()
        .map(|(idx, (_, prefix, path))| DiscoveredChapter {
            number: idx + 1,
            prefix,
            path,
        })
        .collect();

    for chapter in &chapters {
        debug!(
            number = chapter.number,
            prefix = chapter.prefix,
            path = %chapter.path.display(),
            "chapter discovered"
        );
    }
    info!(count = chapters.len(), "chapter discovery complete");

    Ok(chapters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("booksync-discovery-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn names(chapters: &[DiscoveredChapter]) -> Vec<String> {
        chapters
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn chapter_prefix_matches_pattern() {
        assert_eq!(chapter_prefix("01 - Setup.md"), Some(1));
        assert_eq!(chapter_prefix("3-Intro.md"), Some(3));
        assert_eq!(chapter_prefix("12   -Deploy.md"), Some(12));
        assert_eq!(chapter_prefix("007-\tBond.md"), Some(7));
    }

    #[test]
    fn chapter_prefix_rejects_other_files() {
        assert_eq!(chapter_prefix("index.md"), None);
        assert_eq!(chapter_prefix("README.md"), None);
        assert_eq!(chapter_prefix("01 - Setup.txt"), None);
        assert_eq!(chapter_prefix("01 Setup.md"), None);
        assert_eq!(chapter_prefix("v1 - Setup.md"), None);
        assert_eq!(chapter_prefix("\u{661}\u{662} - Arabic.md"), None);
    }

    #[test]
    fn chapter_prefix_saturates_huge_numbers() {
        assert_eq!(chapter_prefix("99999999999999999999999 - Big.md"), Some(u64::MAX));
    }

    #[test]
    fn discover_orders_by_prefix_and_renumbers() {
        let tmp = temp_dir();
        for name in ["10-Ten.md", "3-Intro.md", "1-Setup.md", "index.md", "notes.txt"] {
            std::fs::write(tmp.join(name), "# x\n").unwrap();
        }

        let chapters = discover(&tmp).unwrap();
        assert_eq!(names(&chapters), ["1-Setup.md", "3-Intro.md", "10-Ten.md"]);
        let numbers: Vec<usize> = chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(chapters[2].prefix, 10);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discover_breaks_ties_by_filename() {
        let tmp = temp_dir();
        for name in ["2-Beta.md", "2-Alpha.md", "1-First.md"] {
            std::fs::write(tmp.join(name), "# x\n").unwrap();
        }

        let chapters = discover(&tmp).unwrap();
        assert_eq!(names(&chapters), ["1-First.md", "2-Alpha.md", "2-Beta.md"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discover_skips_directories() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("4-Folder.md")).unwrap();
        std::fs::write(tmp.join("5-File.md"), "# x\n").unwrap();

        let chapters = discover(&tmp).unwrap();
        assert_eq!(names(&chapters), ["5-File.md"]);
        assert_eq!(chapters[0].number, 1);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn discover_follows_symlinked_chapters() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("src")).unwrap();
        std::fs::write(tmp.join("src/ch.md"), "# Linked\n").unwrap();
        std::fs::write(tmp.join("1-Setup.md"), "# Setup\n").unwrap();
        std::os::unix::fs::symlink(tmp.join("src/ch.md"), tmp.join("2-Linked.md")).unwrap();
        std::os::unix::fs::symlink(tmp.join("src"), tmp.join("3-Dir.md")).unwrap();
        std::os::unix::fs::symlink(tmp.join("gone.md"), tmp.join("4-Dangling.md")).unwrap();

        let chapters = discover(&tmp).unwrap();
        assert_eq!(names(&chapters), ["1-Setup.md", "2-Linked.md"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discover_ignores_non_ascii_digits() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("\u{661}-Arabic.md"), "# x\n").unwrap();
        std::fs::write(tmp.join("2-Setup.md"), "# x\n").unwrap();

        let chapters = discover(&tmp).unwrap();
        assert_eq!(names(&chapters), ["2-Setup.md"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discover_empty_root() {
        let tmp = temp_dir();
        assert!(discover(&tmp).unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discover_missing_root_is_io_error() {
        let tmp = std::env::temp_dir().join(format!("booksync-missing-{}", uuid::Uuid::now_v7()));
        let err = discover(&tmp).unwrap_err();
        assert!(matches!(err, BookSyncError::Io { .. }));
    }
}
