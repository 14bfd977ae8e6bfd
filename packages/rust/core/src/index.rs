//! Index builder.
//!
//! Renders the three navigation pages that list every chapter in order:
//! the docs section index, the site content index, and the landing page.
//! Pages are rebuilt from scratch on every run.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use booksync_shared::{BookSyncError, Chapter, ProseConfig, Result, SyncConfig};

/// Filename of a section index page.
pub const SECTION_INDEX: &str = "_index.md";

const DOCS_TITLE: &str = "Documentation";
const DOCS_WEIGHT: u32 = 1;
const CHAPTER_GUIDE: &str = "## Chapter Guide";

/// Write all three index pages for `chapters`, returning the written paths.
///
/// An empty chapter list writes nothing.
#[instrument(skip_all, fields(chapters = chapters.len()))]
pub fn write_indexes(config: &SyncConfig, chapters: &[Chapter]) -> Result<Vec<PathBuf>> {
    if chapters.is_empty() {
        debug!("no chapters, skipping index pages");
        return Ok(Vec::new());
    }

    let pages = [
        (
            config.docs_dir.join(SECTION_INDEX),
            render_docs_index(chapters, &config.prose),
        ),
        (
            config.content_dir.join(SECTION_INDEX),
            render_content_index(chapters, &config.docs_link, &config.prose),
        ),
        (
            config.landing_page.clone(),
            render_landing_page(chapters, &config.prose),
        ),
    ];

    let mut written = Vec::with_capacity(pages.len());
    for (path, content) in pages {
        write_atomic(&path, &content)?;
        written.push(path);
    }

    info!(count = written.len(), "index pages written");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Docs section landing page linking to each `chapter-NN` mirror.
pub fn render_docs_index(chapters: &[Chapter], prose: &ProseConfig) -> String {
    let mut lines = front_matter(&[
        format!("title: {}", yaml_quote(DOCS_TITLE)),
        "bookCollapseSection: false".to_string(),
        format!("weight: {DOCS_WEIGHT}"),
    ]);
    lines.push(prose.docs_intro.clone());
    lines.push(String::new());
    lines.extend(
        chapters
            .iter()
            .map(|c| link_line(&c.heading, &format!("./{}", c.slug()))),
    );
    finish(lines)
}

/// Site content index; its title is the book title (first chapter heading).
///
/// `docs_link` is the docs directory relative to the content directory.
pub fn render_content_index(chapters: &[Chapter], docs_link: &str, prose: &ProseConfig) -> String {
    let docs_link = booksync_markdown::encode_link(docs_link);
    let mut lines = front_matter(&[format!("title: {}", yaml_quote(book_title(chapters)))]);
    lines.push(prose.root_intro.clone());
    lines.push(String::new());
    lines.push(CHAPTER_GUIDE.to_string());
    lines.push(String::new());
    lines.extend(
        chapters
            .iter()
            .map(|c| link_line(&c.heading, &format!("./{docs_link}/{}", c.slug()))),
    );
    lines.push(String::new());
    lines.push(prose.root_closing.clone());
    finish(lines)
}

/// Home-layout landing page linking to the root chapter files.
pub fn render_landing_page(chapters: &[Chapter], prose: &ProseConfig) -> String {
    let mut lines = front_matter(&["layout: home".to_string()]);
    lines.push(format!("# {}", book_title(chapters)));
    lines.push(String::new());
    lines.push(prose.root_overview.clone());
    lines.push(String::new());
    lines.push(CHAPTER_GUIDE.to_string());
    lines.push(String::new());
    lines.extend(chapters.iter().map(|c| {
        let target = format!("./{}", booksync_markdown::encode_link(&c.filename));
        link_line(&c.heading, &target)
    }));
    finish(lines)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn book_title(chapters: &[Chapter]) -> &str {
    chapters.first().map(|c| c.heading.as_str()).unwrap_or_default()
}

/// `---`-delimited front matter followed by a blank line.
fn front_matter(entries: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 3);
    lines.push("---".to_string());
    lines.extend(entries.iter().cloned());
    lines.push("---".to_string());
    lines.push(String::new());
    lines
}

/// YAML double-quoted scalar.
fn yaml_quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn link_line(text: &str, target: &str) -> String {
    format!("- [{text}]({target})")
}

/// Join lines and end with exactly one newline.
fn finish(lines: Vec<String>) -> String {
    let text = lines.join("\n");
    format!("{}\n", text.trim_end())
}

/// Write via a temp file in the same directory, then rename into place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| BookSyncError::io(dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = dir.join(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| BookSyncError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| BookSyncError::io(path, e))?;

    debug!(path = %path.display(), size = content.len(), "wrote index page");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
