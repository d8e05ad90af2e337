//! Small types shared between the move worker and the interactive thread.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("failed to remove original {path}: {source}")]
    RemoveOriginal { path: PathBuf, source: io::Error },
}

/// A record the worker successfully relocated. The interactive thread uses the
/// old path to find the record in the catalog and the new path to rewrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedGame {
    pub name: String,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// What happened to a whole batch. Skips and failures are non-fatal; the
/// records involved simply stay where they were.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub moved: Vec<MovedGame>,
    pub skipped: usize,
    pub failed: usize,
}

/// Events emitted by the worker thread, consumed on the interactive thread.
///
/// Progress for record `i` always precedes progress for `i + 1`; `Finished`
/// is strictly last.
#[derive(Debug)]
pub enum MoveEvent {
    /// Share of the batch processed so far, scaled to 0-100.
    Progress { percent: u8 },
    Finished(BatchOutcome),
}
