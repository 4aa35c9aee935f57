//! Entry point for the chapter reader.
//!
//! Responsibilities here are intentionally minimal:
//! - Load user configuration from `conf/config.toml`.
//! - Parse the optional chapters directory argument.
//! - Load the chapter texts and launch the GUI.

mod app;
mod config;
mod theme;
mod tts;

use crate::app::run_app;
use crate::config::load_config;
use anyhow::{Context, Result, bail};
use chapter_reader_core::chapters::ChapterCatalog;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let mut config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if let Some(dir) = parse_args()? {
        info!(path = %dir.display(), "Using chapters directory from command line");
        config.chapters_dir = dir.to_string_lossy().into_owned();
    }

    info!(
        level = %config.log_level,
        settings = %config.settings_path,
        speech = %config.speech_program,
        "Starting chapter reader"
    );

    let chapters_dir = Path::new(&config.chapters_dir);
    let catalog = if chapters_dir.is_dir() {
        ChapterCatalog::load_dir(chapters_dir)
    } else {
        warn!(
            path = %chapters_dir.display(),
            "Chapters directory not found; using built-in text"
        );
        ChapterCatalog::builtin()
    };

    run_app(config, catalog).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Ok(None);
    };
    if args.next().is_some() {
        bail!("Usage: chapter-reader [chapters-dir]");
    }

    let path = PathBuf::from(path);
    if !path.is_dir() {
        bail!("Chapters directory not found: {}", path.display());
    }
    Ok(Some(path))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!(%level, "RUST_LOG set; ignoring configured log level");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
