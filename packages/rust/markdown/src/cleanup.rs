//! Line-level cleanup passes used when rebuilding chapter text.
//!
//! Each pass is a small pure function so the normalizer reads as a sequence.

/// A line with nothing but whitespace.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Pass 1: Drop leading blank lines
// ---------------------------------------------------------------------------

/// Return `lines` without its leading blank lines.
pub(crate) fn skip_leading_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines
        .iter()
        .position(|line| !is_blank(line))
        .unwrap_or(lines.len());
    &lines[start..]
}

// ---------------------------------------------------------------------------
// Pass 2: Ensure trailing newline
// ---------------------------------------------------------------------------

/// Strip all trailing whitespace and end with exactly one newline.
pub(crate) fn ensure_trailing_newline(md: &str) -> String {
    let trimmed = md.trim_end();
    format!("{trimmed}\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_leading_blank_lines_drops_whitespace_only_lines() {
        let lines = vec!["", "   ", "\t", "# Title", "", "Body"];
        assert_eq!(skip_leading_blank_lines(&lines), &["# Title", "", "Body"]);
    }

    #[test]
    fn skip_leading_blank_lines_keeps_inner_blanks() {
        let lines = vec!["Text", "", "More"];
        assert_eq!(skip_leading_blank_lines(&lines), lines.as_slice());
    }

    #[test]
    fn skip_leading_blank_lines_all_blank() {
        let lines = vec!["", " "];
        assert!(skip_leading_blank_lines(&lines).is_empty());
    }

    #[test]
    fn ensure_trailing_newline_adds_if_missing() {
        assert_eq!(ensure_trailing_newline("Content"), "Content\n");
    }

    #[test]
    fn ensure_trailing_newline_collapses_whitespace_tail() {
        assert_eq!(ensure_trailing_newline("Content  \n\n\t\n"), "Content\n");
    }
}
