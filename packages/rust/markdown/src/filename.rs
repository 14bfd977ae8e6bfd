//! Filename sanitizing and link encoding for chapter files.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// Name used when a heading sanitizes down to nothing.
const FALLBACK_TITLE: &str = "Untitled";

/// Everything except `A-Z a-z 0-9 _ . - ~ /` is escaped in links.
const LINK_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Remove characters illegal in filenames and collapse whitespace runs.
pub fn sanitize_filename(title: &str) -> String {
    static INVALID_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x08\x0E-\x1F\x7F]"#).expect("valid regex"));
    static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    let cleaned = INVALID_RE.replace_all(title, "");
    SPACE_RE.replace_all(cleaned.trim(), " ").into_owned()
}

/// Canonical root filename for a chapter: `NN - Title.md`.
pub fn canonical_filename(number: usize, heading: &str) -> String {
    let sanitized = sanitize_filename(heading);
    let title = if sanitized.is_empty() {
        FALLBACK_TITLE
    } else {
        sanitized.as_str()
    };
    format!("{number:02} - {title}.md")
}

/// Percent-encode a relative link target.
pub fn encode_link(target: &str) -> String {
    utf8_percent_encode(target, LINK_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_illegal_characters() {
        assert_eq!(
            sanitize_filename(r#"What/Why: A "Guide" <v2>? *yes* | no \ maybe"#),
            "WhatWhy A Guide v2 yes no maybe"
        );
    }

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize_filename("  Setting   up\tthe\u{a0}app  "), "Setting up the app");
    }

    #[test]
    fn sanitize_never_leaves_illegal_characters() {
        let nasty = "a\\b/c:d*e?f\"g<h>i|j\u{7}k";
        let out = sanitize_filename(nasty);
        assert!(!out.contains(['\\', '/', ':', '*', '?', '"', '<', '>', '|']));
        assert!(!out.chars().any(char::is_control));
    }

    #[test]
    fn canonical_filename_pads_number() {
        assert_eq!(canonical_filename(1, "Setup"), "01 - Setup.md");
        assert_eq!(canonical_filename(12, "Deploying: Part 2"), "12 - Deploying Part 2.md");
        assert_eq!(canonical_filename(100, "Appendix"), "100 - Appendix.md");
    }

    #[test]
    fn canonical_filename_falls_back_when_empty() {
        assert_eq!(canonical_filename(3, "???"), "03 - Untitled.md");
    }

    #[test]
    fn encode_link_escapes_spaces_and_punctuation() {
        assert_eq!(encode_link("01 - Setup.md"), "01%20-%20Setup.md");
        assert_eq!(encode_link("02 - Q&A (Part 1).md"), "02%20-%20Q%26A%20%28Part%201%29.md");
    }

    #[test]
    fn encode_link_escapes_utf8_bytes() {
        assert_eq!(encode_link("Café.md"), "Caf%C3%A9.md");
    }
}
