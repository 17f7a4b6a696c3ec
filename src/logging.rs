//! File logging.
//!
//! The console owns the terminal, so log output goes to a file next to the
//! config instead of stderr. `RUST_LOG` controls the filter.

use crate::error::{Result, TaskdeckError};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Install a global subscriber appending to `log_path`.
pub fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                TaskdeckError::Config(format!(
                    "failed to create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            TaskdeckError::Config(format!(
                "failed to open log file '{}': {}",
                log_path.display(),
                e
            ))
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init()
        .map_err(|e| TaskdeckError::Config(format!("failed to install logger: {}", e)))?;

    Ok(())
}
