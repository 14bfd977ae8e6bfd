//! End-to-end sync pipeline: discover → normalize → mirror → index.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};

use booksync_shared::{Chapter, Result, SyncConfig};

use crate::{discovery, index, mirror, normalizer};

/// Result of a completed sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Chapters in book order, as they now exist on disk.
    pub chapters: Vec<Chapter>,
    /// Number of chapter files renamed.
    pub renamed: usize,
    /// Number of chapter files whose content was rewritten.
    pub rewritten: usize,
    /// Mirrored docs files written.
    pub mirrored: Vec<PathBuf>,
    /// Index pages written.
    pub indexes: Vec<PathBuf>,
    /// Total elapsed time in milliseconds.
    pub elapsed_ms: u128,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a chapter file has been normalized.
    fn chapter_normalized(&self, chapter: &Chapter, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &SyncReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn chapter_normalized(&self, _chapter: &Chapter, _current: usize, _total: usize) {}
    fn done(&self, _report: &SyncReport) {}
}

/// Run the full sync pipeline.
///
/// 1. Discover numbered chapter files in the root
/// 2. Normalize content and filenames (aborts on the first fatal error)
/// 3. Mirror chapters into the docs section
/// 4. Regenerate the index pages
///
/// Nothing is mirrored or indexed unless every chapter normalized cleanly.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn sync(config: &SyncConfig, progress: &dyn ProgressReporter) -> Result<SyncReport> {
    let start = Instant::now();

    // --- Phase 1: Discovery ---
    progress.phase("Discovering chapters");
    let discovered = discovery::discover(&config.root)?;
    let total = discovered.len();

    // --- Phase 2: Normalize ---
    progress.phase("Normalizing chapters");
    let mut chapters = Vec::with_capacity(total);
    let mut renamed = 0;
    let mut rewritten = 0;

    for (i, item) in discovered.iter().enumerate() {
        let outcome = normalizer::normalize_chapter(item)?;
        progress.chapter_normalized(&outcome.chapter, i + 1, total);

        renamed += usize::from(outcome.renamed_from.is_some());
        rewritten += usize::from(outcome.rewritten);
        chapters.push(outcome.chapter);
    }

    // --- Phase 3: Mirror ---
    progress.phase("Mirroring chapters");
    let mirrored = mirror::mirror_chapters(&config.root, &config.docs_dir, &chapters)?;

    // --- Phase 4: Index pages ---
    progress.phase("Building index pages");
    let indexes = index::write_indexes(config, &chapters)?;

    let report = SyncReport {
        chapters,
        renamed,
        rewritten,
        mirrored,
        indexes,
        elapsed_ms: start.elapsed().as_millis(),
    };

    info!(
        chapters = report.chapters.len(),
        renamed = report.renamed,
        rewritten = report.rewritten,
        "sync complete"
    );
    progress.done(&report);

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
