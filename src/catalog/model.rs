use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A registered game: a display name plus the folder (or single file) that
/// backs it.
///
/// `original_path` and `original_drive` are recorded once, when the game is
/// first registered, and never rewritten afterwards. Every later move uses
/// them to rebuild the game's folder hierarchy under the destination volume
/// instead of flattening everything into the volume root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_drive: Option<String>,
}

impl GameRecord {
    /// Build a record for a freshly registered game, anchoring its original
    /// location to the volume it was found on.
    pub fn register(name: impl Into<String>, path: impl Into<PathBuf>, volume: &str) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            original_path: Some(path.clone()),
            original_drive: Some(volume.to_string()),
            path,
        }
    }

    /// The last path component of the current location, used for list display.
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Volume identifier -> ordered list of games believed to live there.
///
/// `BTreeMap` keeps the serialized document stable across saves.
pub type Catalog = BTreeMap<String, Vec<GameRecord>>;
