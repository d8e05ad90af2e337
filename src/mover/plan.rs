use std::path::{Path, PathBuf};

use crate::catalog::GameRecord;

/// Where `record` should land when moved onto the volume rooted at
/// `destination_root`.
///
/// Anchored records (those carrying `original_path`/`original_drive`) keep the
/// folder hierarchy they were registered with: the original drive prefix is
/// stripped from the original path and the remainder is rebuilt under the
/// destination root. The anchor is fixed at registration time, so the result
/// is the same no matter how many times the record has moved since.
///
/// Unanchored records, and anchored ones whose drive prefix no longer applies,
/// land directly under the root using the base name of their current path.
pub fn destination_path(record: &GameRecord, destination_root: &Path) -> PathBuf {
    if let (Some(original), Some(drive)) = (&record.original_path, &record.original_drive) {
        if let Ok(relative) = original.strip_prefix(drive) {
            if !relative.as_os_str().is_empty() {
                return destination_root.join(relative);
            }
        }
    }

    match record.path.file_name() {
        Some(name) => destination_root.join(name),
        None => destination_root.join(&record.path),
    }
}
