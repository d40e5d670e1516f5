//! Tracing setup
//!
//! The TUI owns the terminal, so interactive runs log to a file. One-shot
//! commands log to stderr and keep stdout for their output.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "E4ALL_LOG";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("e4all=debug,info")
        } else {
            EnvFilter::new("info")
        }
    })
}

pub fn log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("Could not determine local data directory"))?;
    Ok(data_dir.join("e4all").join("e4all.log"))
}

/// Log to stderr
pub fn init_stderr(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter(verbose))
        .try_init()?;
    Ok(())
}

/// Append to the log file, returning its path
pub fn init_file(verbose: bool) -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter(verbose))
        .try_init()?;
    Ok(path)
}
