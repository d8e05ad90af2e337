//! Storage volume discovery.
//!
//! A volume is a string identifier paired with its filesystem root. Roots come
//! from the config file; on Windows an empty config falls back to scanning
//! drive letters, matching the drives the original records in the catalog.

use std::path::{Path, PathBuf};

use crate::config::VolumeSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub id: String,
    pub root: PathBuf,
}

impl Volume {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            root: PathBuf::from(&id),
            id,
        }
    }
}

/// Resolve the set of usable volumes. Configured roots win; an empty config
/// falls back to a drive-letter scan (Windows only).
pub fn detect(settings: &VolumeSettings) -> Vec<Volume> {
    let configured: Vec<Volume> = settings
        .roots
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(Volume::new)
        .collect();

    if configured.is_empty() {
        scan_drive_letters()
    } else {
        configured
    }
}

/// Index of the primary volume (the right-hand pane). The configured primary
/// wins when it names a known volume; otherwise the first volume is primary.
pub fn primary_index(volumes: &[Volume], settings: &VolumeSettings) -> usize {
    settings
        .primary
        .as_deref()
        .and_then(|p| volumes.iter().position(|v| v.id == p))
        .unwrap_or(0)
}

/// The volume whose root contains `path`, preferring the longest match when
/// roots are nested.
pub fn volume_of<'a>(volumes: &'a [Volume], path: &Path) -> Option<&'a Volume> {
    volumes
        .iter()
        .filter(|v| path.starts_with(&v.root))
        .max_by_key(|v| v.root.as_os_str().len())
}

#[cfg(windows)]
fn scan_drive_letters() -> Vec<Volume> {
    ('A'..='Z')
        .filter(|d| Path::new(&format!("{d}:\\")).exists())
        .map(|d| Volume::new(format!("{d}:")))
        .collect()
}

#[cfg(not(windows))]
fn scan_drive_letters() -> Vec<Volume> {
    Vec::new()
}
