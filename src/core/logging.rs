use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route `tracing` output to `log_file`. The terminal belongs to the UI, so
/// when the file cannot be opened logging is switched off instead.
pub fn init(log_file: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(parent) = log_file.parent() {
        // An unusable directory surfaces as an open failure below.
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_file.display(), "logging initialized");
        }
        Err(_) => {
            tracing_subscriber::registry().with(env_filter).init();
        }
    }
}
