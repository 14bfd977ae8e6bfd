//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use booksync_core::{ProgressReporter, SilentProgress, SyncReport};
use booksync_shared::{AppConfig, Chapter, SyncConfig, init_config, load_config, load_config_from};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// booksync: normalize numbered chapters and rebuild the docs navigation.
#[derive(Parser)]
#[command(
    name = "booksync",
    version,
    about = "Rename, mirror, and index numbered Markdown book chapters.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Book root containing the numbered chapter files (defaults to the current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/booksync.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the sync report as JSON instead of a summary.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Normalize chapters, mirror them, and rebuild the index pages (default).
    Sync,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default booksync.toml into the book root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["booksync_cli", "booksync_core", "booksync_markdown", "booksync_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().wrap_err("cannot determine working directory")?,
    };

    match cli.command.unwrap_or(Command::Sync) {
        Command::Sync => cmd_sync(&root, cli.config.as_deref(), cli.json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&root, cli.config.as_deref()),
        },
    }
}

fn resolve_config(root: &Path, config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_sync(root: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = resolve_config(root, config_path)?;
    let sync_config = SyncConfig::resolve(root, &config)?;

    info!(root = %root.display(), "synchronizing chapters");

    let report = if json {
        booksync_core::sync(&sync_config, &SilentProgress)?
    } else {
        booksync_core::sync(&sync_config, &CliProgress::new())?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.chapters.is_empty() {
        println!("No chapter files found in {}", root.display());
        return Ok(());
    }

    println!();
    println!("  Chapters synchronized!");
    println!("  Chapters:  {}", report.chapters.len());
    println!("  Renamed:   {}", report.renamed);
    println!("  Rewritten: {}", report.rewritten);
    println!("  Mirrored:  {}", report.mirrored.len());
    println!("  Indexes:   {}", report.indexes.len());
    println!("  Time:      {}ms", report.elapsed_ms);
    println!();

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(root, config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn chapter_normalized(&self, chapter: &Chapter, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Normalizing [{current}/{total}] {}", chapter.filename));
    }

    fn done(&self, _report: &SyncReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Errors skip `done`; don't leave the spinner on screen.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
