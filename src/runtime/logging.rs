use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Initialize structured logging into the configured file.
///
/// The subscriber writes to a file rather than stderr so log lines never
/// bleed into the alternate-screen TUI. With no file configured, logging
/// stays off.
pub fn init(settings: &LogSettings) {
    let Some(path) = &settings.file else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("gamehaul: cannot open log file {path}: {err}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.filter.clone())),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
