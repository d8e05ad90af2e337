use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::catalog::GameRecord;
use crate::volumes::Volume;

use super::plan::destination_path;
use super::types::{BatchOutcome, MoveError, MoveEvent, MovedGame};

pub(super) fn spawn_move_thread(
    games: Vec<GameRecord>,
    destination: Volume,
    tx: Sender<MoveEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let total = games.len();
        let mut outcome = BatchOutcome::default();

        if total == 0 {
            let _ = tx.send(MoveEvent::Finished(outcome));
            return;
        }

        for (i, game) in games.into_iter().enumerate() {
            if !game.path.exists() {
                warn!(game = %game.name, path = %game.path.display(), "source path missing, skipping");
                outcome.skipped += 1;
            } else {
                let target = destination_path(&game, &destination.root);
                match relocate(&game.path, &target) {
                    Ok(()) => {
                        info!(
                            game = %game.name,
                            from = %game.path.display(),
                            to = %target.display(),
                            "relocated"
                        );
                        outcome.moved.push(MovedGame {
                            name: game.name,
                            old_path: game.path,
                            new_path: target,
                        });
                    }
                    Err(err) => {
                        warn!(
                            game = %game.name,
                            from = %game.path.display(),
                            to = %target.display(),
                            %err,
                            "move failed, record left in place"
                        );
                        outcome.failed += 1;
                    }
                }
            }

            let percent = (((i + 1) * 100) / total) as u8;
            let _ = tx.send(MoveEvent::Progress { percent });
        }

        let _ = tx.send(MoveEvent::Finished(outcome));
    })
}

/// Move one folder or file to `target`, creating the target's parent chain.
///
/// Folders get a rename first, with a copy-and-delete fallback for
/// cross-device moves. Single files are always copied then deleted, since an
/// atomic rename across volumes is not guaranteed anywhere.
fn relocate(source: &Path, target: &Path) -> Result<(), MoveError> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| MoveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    if source.is_dir() {
        if fs::rename(source, target).is_ok() {
            return Ok(());
        }
        copy_dir_recursive(source, target)?;
        fs::remove_dir_all(source).map_err(|err| MoveError::RemoveOriginal {
            path: source.to_path_buf(),
            source: err,
        })
    } else {
        fs::copy(source, target).map_err(|err| MoveError::Move {
            from: source.to_path_buf(),
            to: target.to_path_buf(),
            source: err,
        })?;
        fs::remove_file(source).map_err(|err| MoveError::RemoveOriginal {
            path: source.to_path_buf(),
            source: err,
        })
    }
}

/// Copy `source` into `target`, failing on the first error.
///
/// A walk error means part of the tree was never visited, so it must abort
/// the whole copy; the caller only deletes the original after an `Ok` here.
fn copy_dir_recursive(source: &Path, target: &Path) -> Result<(), MoveError> {
    for entry in WalkDir::new(source) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source.to_path_buf());
                return Err(MoveError::Walk { path, source: err });
            }
        };
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| Path::new(""));
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|err| MoveError::CreateDir {
                path: dest.clone(),
                source: err,
            })?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|err| MoveError::Move {
                from: entry.path().to_path_buf(),
                to: dest.clone(),
                source: err,
            })?;
        }
    }
    Ok(())
}
