//! Tracing setup.
//!
//! The terminal owns stdout, so logs go to a file through a non-blocking
//! appender. Filtering follows `STRATA_LOG` (`EnvFilter` syntax), defaulting
//! to `info`.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Environment variable holding the log filter.
pub const ENV_VAR: &str = "STRATA_LOG";

const DEFAULT_FILE: &str = "strata.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global subscriber writing to `path`.
///
/// Returns the guard that flushes the appender on drop, or `None` when a
/// global subscriber was already installed.
pub fn init(path: &Path) -> Result<Option<WorkerGuard>> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_FILE);

    std::fs::create_dir_all(directory)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    match tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        Err(_) => Ok(None),
    }
}
