//! Project configuration for booksync.
//!
//! An optional `booksync.toml` lives in the book's root directory.
//! CLI flags override config file values, which override defaults.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BookSyncError, Result};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "booksync.toml";

// ---------------------------------------------------------------------------
// Config structs (matching booksync.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output locations.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Fixed prose placed around the generated chapter lists.
    #[serde(default)]
    pub prose: ProseConfig,
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Site content directory, relative to the root.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Docs section directory, relative to `content_dir`.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Landing page file, relative to the root.
    #[serde(default = "default_landing_page")]
    pub landing_page: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            docs_dir: default_docs_dir(),
            landing_page: default_landing_page(),
        }
    }
}

fn default_content_dir() -> String {
    "content".into()
}
fn default_docs_dir() -> String {
    "docs".into()
}
fn default_landing_page() -> String {
    "index.md".into()
}

/// `[prose]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProseConfig {
    /// Introduction of the docs section index.
    #[serde(default = "default_docs_intro")]
    pub docs_intro: String,

    /// Introduction of the root content index.
    #[serde(default = "default_root_intro")]
    pub root_intro: String,

    /// Closing paragraph of the root content index.
    #[serde(default = "default_root_closing")]
    pub root_closing: String,

    /// Overview paragraph of the landing page.
    #[serde(default = "default_root_overview")]
    pub root_overview: String,
}

impl Default for ProseConfig {
    fn default() -> Self {
        Self {
            docs_intro: default_docs_intro(),
            root_intro: default_root_intro(),
            root_closing: default_root_closing(),
            root_overview: default_root_overview(),
        }
    }
}

fn default_docs_intro() -> String {
    "This section collects the full Shopify app development playbook, guiding you from \
     platform fundamentals through extensions, deployment, and monetization."
        .into()
}
fn default_root_intro() -> String {
    "Welcome to a hands-on journey through Shopify app development. This book reframes \
     the platform through familiar full-stack patterns so you can build production-ready \
     apps with confidence."
        .into()
}
fn default_root_closing() -> String {
    "Work through the chapters in order or dive into the sections you need most, and refer \
     back as your Shopify apps evolve."
        .into()
}
fn default_root_overview() -> String {
    "This curriculum walks you through building modern Shopify apps, mapping each concept \
     to familiar full-stack patterns so you can ship production features faster."
        .into()
}

// ---------------------------------------------------------------------------
// Sync config (runtime, resolved against the project root)
// ---------------------------------------------------------------------------

/// Runtime sync configuration: config file values resolved against a root.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directory holding the numbered chapter files.
    pub root: PathBuf,
    /// Absolute site content directory (`<root>/content`).
    pub content_dir: PathBuf,
    /// Absolute docs section directory (`<root>/content/docs`).
    pub docs_dir: PathBuf,
    /// Docs directory relative to `content_dir`, `/`-separated, for links.
    pub docs_link: String,
    /// Absolute landing page path (`<root>/index.md`).
    pub landing_page: PathBuf,
    /// Prose blocks for the generated pages.
    pub prose: ProseConfig,
}

impl SyncConfig {
    /// Resolve `config` against `root`, validating the layout paths.
    ///
    /// Layout paths must stay inside the project root, and the landing page
    /// must sit directly in it so its `./NN - Title.md` links resolve.
    pub fn resolve(root: impl Into<PathBuf>, config: &AppConfig) -> Result<Self> {
        let root = root.into();
        let layout = &config.layout;

        let content_parts = layout_components("layout.content_dir", &layout.content_dir)?;
        let docs_parts = layout_components("layout.docs_dir", &layout.docs_dir)?;
        let landing_parts = layout_components("layout.landing_page", &layout.landing_page)?;

        if landing_parts.len() != 1 {
            return Err(BookSyncError::config(format!(
                "layout.landing_page must be a file name in the project root, got {:?}",
                layout.landing_page
            )));
        }

        let content_dir = content_parts.iter().fold(root.clone(), |dir, part| dir.join(part));
        let docs_dir = docs_parts.iter().fold(content_dir.clone(), |dir, part| dir.join(part));
        let landing_page = root.join(&landing_parts[0]);

        Ok(Self {
            root,
            content_dir,
            docs_dir,
            docs_link: docs_parts.join("/"),
            landing_page,
            prose: config.prose.clone(),
        })
    }
}

/// Split a layout path into its normal components, rejecting anything that
/// could leave the project root.
fn layout_components(key: &str, value: &str) -> Result<Vec<String>> {
    let path = Path::new(value);
    if path.is_absolute() || path.has_root() {
        return Err(BookSyncError::config(format!(
            "{key} must be relative to the project root, got {value:?}"
        )));
    }

    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(BookSyncError::config(format!(
                    "{key} must not leave the project root, got {value:?}"
                )));
            }
        }
    }

    if parts.iter().all(|part| part.trim().is_empty()) {
        return Err(BookSyncError::config(format!("{key} must not be empty")));
    }
    Ok(parts)
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the project config from `root`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BookSyncError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| BookSyncError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `root`. Returns the path to the created file.
///
/// An existing config file is never overwritten.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(BookSyncError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| BookSyncError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BookSyncError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
