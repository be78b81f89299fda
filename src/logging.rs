//! Tracing subscriber setup
//!
//! `RUST_LOG` selects the level (default `info`). One-shot commands log to
//! stderr; the viewer logs to a file so the alternate screen stays clean.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log file used by the viewer (`<data_dir>/lazismu/lazismu.log`)
pub fn log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("lazismu").join("lazismu.log"))
}

/// Log to stderr for CLI commands
pub fn init_cli_logging() {
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Log to a file for the viewer; returns the path written to
pub fn init_tui_logging() -> Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_target(false)
                .with_ansi(false)
                .compact(),
        )
        .try_init();
    Ok(Some(path))
}
