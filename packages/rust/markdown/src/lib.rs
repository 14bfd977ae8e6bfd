//! Chapter text normalization and filename helpers.
//!
//! Everything in this crate is pure string work: locating a chapter's H1
//! outside code fences, rebuilding the canonical chapter text, and deriving
//! safe filenames and link targets from headings. Filesystem effects live in
//! `booksync-core`.

mod cleanup;
mod filename;

use tracing::debug;

pub use filename::{canonical_filename, encode_link, sanitize_filename};

/// Marker that opens and closes a fenced code block.
const FENCE: &str = "```";

/// Marker of a top-level heading line.
const H1_PREFIX: &str = "# ";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A chapter's text rebuilt into canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedChapter {
    /// Trimmed text of the first H1.
    pub heading: String,
    /// `# heading`, a blank line, then the body, ending in one newline.
    pub content: String,
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Rebuild chapter text around its first H1.
///
/// Leading blank lines and anything before the heading are dropped, the
/// body's leading blank lines are removed, and trailing whitespace collapses
/// to a single newline. Returns `None` when the text has no H1 outside a
/// code fence.
pub fn normalize(text: &str) -> Option<NormalizedChapter> {
    let all_lines: Vec<&str> = text.lines().collect();
    let lines = cleanup::skip_leading_blank_lines(&all_lines);

    let (h1_index, heading) = find_first_h1(lines)?;
    let body = cleanup::skip_leading_blank_lines(&lines[h1_index + 1..]);

    let mut rebuilt = format!("{H1_PREFIX}{heading}\n\n");
    rebuilt.push_str(&body.join("\n"));
    let content = cleanup::ensure_trailing_newline(&rebuilt);

    debug!(heading = %heading, body_lines = body.len(), "chapter normalized");

    Some(NormalizedChapter { heading, content })
}

/// Index and trimmed text of the first H1 that is not inside a code fence.
pub fn find_first_h1(lines: &[&str]) -> Option<(usize, String)> {
    let mut in_fence = false;

    for (idx, line) in lines.iter().enumerate() {
        let stripped = line.trim();

        if stripped.starts_with(FENCE) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(text) = stripped.strip_prefix(H1_PREFIX) {
            return Some((idx, text.trim().to_string()));
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
