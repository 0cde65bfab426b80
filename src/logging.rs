use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a file-backed `tracing` subscriber when `RUST_LOG` is set.
///
/// The terminal belongs to the TUI, so nothing is ever written to stderr.
/// Returns whether logging was enabled.
pub fn init(log_path: &Path) -> io::Result<bool> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        return Ok(false);
    }

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(true)
}
