use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::model::{Catalog, GameRecord};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write catalog to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Owned, explicit home of the in-memory catalog.
///
/// All mutation goes through [`add`](CatalogStore::add) and
/// [`transfer`](CatalogStore::transfer); callers persist with
/// [`save`](CatalogStore::save) after mutating. Only the interactive thread
/// ever touches the store, and only after any in-flight move batch has
/// finished.
pub struct CatalogStore {
    path: PathBuf,
    games: Catalog,
}

impl CatalogStore {
    /// Read the catalog from `path`, seeding an empty list for every known
    /// volume. A missing or unreadable file is treated as an empty catalog;
    /// loading never fails the caller.
    pub fn load(path: PathBuf, known_volumes: &[String]) -> Self {
        let mut games: Catalog = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(games) => games,
                Err(err) => {
                    warn!(path = %path.display(), %err, "catalog unreadable, starting empty");
                    Catalog::new()
                }
            },
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), %err, "catalog unreadable, starting empty");
                }
                Catalog::new()
            }
        };

        for volume in known_volumes {
            games.entry(volume.clone()).or_default();
        }

        Self { path, games }
    }

    /// Serialize the whole catalog and replace the file on disk.
    ///
    /// Writes a sibling temp file first and renames it over the target, so
    /// readers never observe a partially written document.
    pub fn save(&self) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(&self.games)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| CatalogError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Append `record` to `volume`'s list, creating the list if needed.
    pub fn add(&mut self, volume: &str, record: GameRecord) {
        self.games.entry(volume.to_string()).or_default().push(record);
    }

    /// Move the record whose current path is `old_path` from `from`'s list to
    /// the end of `to`'s list, updating its path to `new_path`. Returns false
    /// when no record in `from` matches `old_path`.
    ///
    /// Must only be called after the corresponding filesystem move succeeded.
    pub fn transfer(&mut self, from: &str, to: &str, old_path: &Path, new_path: PathBuf) -> bool {
        let Some(list) = self.games.get_mut(from) else {
            return false;
        };
        let Some(pos) = list.iter().position(|g| g.path == old_path) else {
            return false;
        };

        let mut record = list.remove(pos);
        record.path = new_path;
        self.games.entry(to.to_string()).or_default().push(record);
        true
    }

    /// The games currently assigned to `volume`, in catalog order.
    pub fn records(&self, volume: &str) -> &[GameRecord] {
        self.games.get(volume).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Where the catalog is persisted.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
