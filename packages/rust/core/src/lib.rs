//! Core pipeline orchestration and domain logic for booksync.
//!
//! This crate ties together chapter discovery, normalization, the docs mirror,
//! and index page generation into a single `sync` run.

pub mod discovery;
pub mod index;
pub mod mirror;
pub mod normalizer;
pub mod pipeline;

pub use pipeline::{ProgressReporter, SilentProgress, SyncReport, sync};
