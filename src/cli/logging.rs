//! env_logger setup for the binary

use log::warn;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

pub const LOG_FILE: &str = "sentinel-token.log";

/// Truncated log file at `path`, or stderr with the open error when that fails
pub fn log_target(path: &Path) -> (env_logger::Target, Option<io::Error>) {
    let opened = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path);

    match opened {
        Ok(file) => (env_logger::Target::Pipe(Box::new(file)), None),
        Err(e) => (env_logger::Target::Stderr, Some(e)),
    }
}

/// Initializes the global logger; an unwritable log file never aborts the run.
pub fn init(path: &Path) {
    let (target, open_error) = log_target(path);
    env_logger::Builder::from_default_env().target(target).init();

    if let Some(e) = open_error {
        warn!("Could not open {}, logging to stderr: {}", path.display(), e);
    }
}
