//! `env_logger` setup for both binaries.
//!
//! The terminal frontend owns the screen, so it logs to a file under the data
//! directory. The headless runner logs to stderr. Both honor `RUST_LOG`.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

fn builder(default_filter: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.format_timestamp_millis();
    builder
}

/// Append log records to `path`.
pub fn init_file_logger(path: &Path, default_filter: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    builder(default_filter)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Log to stderr. A second initialization is silently ignored.
pub fn init_stderr_logger(default_filter: &str) {
    let _ = builder(default_filter).target(Target::Stderr).try_init();
}
