use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::error;

use crate::catalog::{CatalogStore, GameRecord};
use crate::mover::{BatchOutcome, MoveBatch};
use crate::volumes::{self, Volume};

/// Which of the two record lists has keyboard focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Left,
    Right,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// How a status message should be rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Warning,
    Error,
    Busy,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

/// Two-step registration prompt: first the path, then a display name.
#[derive(Debug)]
pub enum PromptKind {
    GamePath,
    GameName { path: PathBuf },
}

#[derive(Debug)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

/// The main application model.
///
/// All catalog mutation funnels through the [`CatalogStore`] held here, and
/// only on the interactive thread. While a [`MoveBatch`] is present, starting
/// another batch and quitting the app are both refused.
pub struct App {
    pub catalog: CatalogStore,
    pub volumes: Vec<Volume>,
    /// Index of the right-hand pane's volume.
    pub primary: usize,
    /// Index of the left-hand pane's volume.
    pub secondary: usize,
    pub focus: Pane,
    cursors: [usize; 2],
    marks: [BTreeSet<usize>; 2],

    pub batch: Option<MoveBatch>,
    /// Latest progress percentage while a batch runs.
    pub progress: Option<u8>,
    pub status: Option<StatusLine>,
    pub prompt: Option<Prompt>,
}

impl App {
    /// Create the model. `primary` indexes into `volumes`; the left pane
    /// starts on the first non-primary volume.
    pub fn new(catalog: CatalogStore, volumes: Vec<Volume>, primary: usize) -> Self {
        let secondary = (0..volumes.len()).find(|&i| i != primary).unwrap_or(0);
        Self {
            catalog,
            volumes,
            primary,
            secondary,
            focus: Pane::Left,
            cursors: [0, 0],
            marks: [BTreeSet::new(), BTreeSet::new()],
            batch: None,
            progress: None,
            status: None,
            prompt: None,
        }
    }

    pub fn pane_volume(&self, pane: Pane) -> &Volume {
        match pane {
            Pane::Left => &self.volumes[self.secondary],
            Pane::Right => &self.volumes[self.primary],
        }
    }

    pub fn pane_records(&self, pane: Pane) -> &[GameRecord] {
        self.catalog.records(&self.pane_volume(pane).id)
    }

    pub fn cursor(&self, pane: Pane) -> usize {
        self.cursors[pane.index()]
    }

    pub fn is_marked(&self, pane: Pane, index: usize) -> bool {
        self.marks[pane.index()].contains(&index)
    }

    pub fn is_moving(&self) -> bool {
        self.batch.is_some()
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = Some(StatusLine {
            text: text.into(),
            tone,
        });
    }

    /// Move the cursor in the focused pane, clamped to the list.
    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.pane_records(self.focus).len();
        if len == 0 {
            return;
        }
        let cursor = &mut self.cursors[self.focus.index()];
        let next = (*cursor as i64 + delta as i64).clamp(0, len as i64 - 1);
        *cursor = next as usize;
    }

    pub fn focus_other(&mut self) {
        self.focus = self.focus.other();
        self.clamp_cursor(self.focus);
    }

    /// Toggle the mark on the focused pane's cursor row.
    pub fn toggle_mark(&mut self) {
        let pane = self.focus;
        if self.pane_records(pane).is_empty() {
            return;
        }
        let cursor = self.cursors[pane.index()];
        let marks = &mut self.marks[pane.index()];
        if !marks.remove(&cursor) {
            marks.insert(cursor);
        }
    }

    /// The record indices a move would act on: marked rows when any exist,
    /// otherwise the cursor row. Empty when the pane has no records.
    pub fn selection(&self, pane: Pane) -> Vec<usize> {
        let len = self.pane_records(pane).len();
        let marked: Vec<usize> = self.marks[pane.index()]
            .iter()
            .copied()
            .filter(|&i| i < len)
            .collect();
        if !marked.is_empty() {
            marked
        } else if len > 0 {
            vec![self.cursors[pane.index()].min(len - 1)]
        } else {
            Vec::new()
        }
    }

    /// Show the next non-primary volume in the left pane.
    pub fn cycle_secondary(&mut self) {
        if self.volumes.len() < 3 {
            return;
        }
        let mut next = self.secondary;
        loop {
            next = (next + 1) % self.volumes.len();
            if next != self.primary {
                break;
            }
        }
        if next != self.secondary {
            self.secondary = next;
            self.marks[Pane::Left.index()].clear();
            self.cursors[Pane::Left.index()] = 0;
        }
    }

    /// Kick off a move of the focused pane's selection onto the other pane's
    /// volume. Refused while a batch is already running or when nothing is
    /// selected.
    pub fn start_move(&mut self) {
        if self.is_moving() {
            self.set_status("A move is already in progress", StatusTone::Warning);
            return;
        }

        let from_pane = self.focus;
        let picks = self.selection(from_pane);
        if picks.is_empty() {
            self.set_status("Select a game to move first", StatusTone::Warning);
            return;
        }

        let source = self.pane_volume(from_pane).id.clone();
        let destination = self.pane_volume(from_pane.other()).clone();
        let games: Vec<GameRecord> = {
            let records = self.pane_records(from_pane);
            picks.iter().filter_map(|&i| records.get(i).cloned()).collect()
        };
        let count = games.len();

        self.batch = Some(MoveBatch::spawn(games, source, destination));
        self.progress = Some(0);
        self.set_status(format!("Moving {count} game(s)..."), StatusTone::Busy);
    }

    /// Reconcile the catalog after the worker's final event: every record the
    /// worker actually relocated hops to the destination volume's list, the
    /// whole catalog is saved, and a summary lands in the status line.
    pub fn finish_batch(&mut self, outcome: BatchOutcome) {
        let Some(batch) = self.batch.take() else {
            return;
        };
        let source = batch.source.clone();
        let destination = batch.destination.clone();
        batch.finish();

        for moved in &outcome.moved {
            self.catalog
                .transfer(&source, &destination, &moved.old_path, moved.new_path.clone());
        }

        match self.catalog.save() {
            Ok(()) => {
                let mut text = format!("Moved {} game(s)", outcome.moved.len());
                if outcome.skipped > 0 {
                    text.push_str(&format!(", {} skipped", outcome.skipped));
                }
                if outcome.failed > 0 {
                    text.push_str(&format!(", {} failed", outcome.failed));
                }
                let tone = if outcome.failed > 0 || outcome.skipped > 0 {
                    StatusTone::Warning
                } else {
                    StatusTone::Info
                };
                self.set_status(text, tone);
            }
            Err(err) => {
                error!(%err, "failed to persist catalog after move");
                self.set_status(
                    format!(
                        "Moved {} game(s), but saving the catalog failed: {err}",
                        outcome.moved.len()
                    ),
                    StatusTone::Error,
                );
            }
        }

        self.progress = None;
        self.marks[0].clear();
        self.marks[1].clear();
        self.clamp_cursor(Pane::Left);
        self.clamp_cursor(Pane::Right);
    }

    /// Open the focused record's folder in the platform file manager.
    pub fn open_selected(&mut self) {
        let pane = self.focus;
        let Some(record) = self.pane_records(pane).get(self.cursor(pane)) else {
            self.set_status("Nothing to open", StatusTone::Warning);
            return;
        };
        let name = record.name.clone();
        let path = record.path.clone();
        if !path.exists() {
            self.set_status(
                format!("{name} is missing on disk: {}", path.display()),
                StatusTone::Error,
            );
            return;
        }
        // Detached, so the file manager never blocks the event loop.
        match open::that_detached(&path) {
            Ok(()) => self.set_status(format!("Opened {name}"), StatusTone::Info),
            Err(err) => {
                error!(%err, path = %path.display(), "failed to open file manager");
                self.set_status(
                    format!("Could not open {}: {err}", path.display()),
                    StatusTone::Error,
                );
            }
        }
    }

    /// Open the registration prompt, asking for the game's path.
    pub fn begin_add_game(&mut self) {
        if self.is_moving() {
            self.set_status("Cannot add games while a move is in progress", StatusTone::Warning);
            return;
        }
        self.prompt = Some(Prompt {
            kind: PromptKind::GamePath,
            buffer: String::new(),
        });
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Advance the registration prompt: the path step validates the entered
    /// location and pre-fills a name; the name step writes the record, with
    /// its original-location anchors, into the catalog.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };

        match prompt.kind {
            PromptKind::GamePath => {
                let entered = prompt.buffer.trim();
                if entered.is_empty() {
                    return;
                }
                let path = PathBuf::from(entered);
                if !path.exists() {
                    self.set_status(
                        format!("Path does not exist: {}", path.display()),
                        StatusTone::Error,
                    );
                    return;
                }
                if volumes::volume_of(&self.volumes, &path).is_none() {
                    self.set_status(
                        format!("{} is not under any managed volume", path.display()),
                        StatusTone::Error,
                    );
                    return;
                }
                let default_name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("game")
                    .to_string();
                self.prompt = Some(Prompt {
                    kind: PromptKind::GameName { path },
                    buffer: default_name,
                });
            }
            PromptKind::GameName { path } => {
                let name = prompt.buffer.trim().to_string();
                if name.is_empty() {
                    self.prompt = Some(Prompt {
                        kind: PromptKind::GameName { path },
                        buffer: String::new(),
                    });
                    return;
                }
                // Checked during the path step; the volume set does not change
                // between prompt steps.
                let Some(volume_id) =
                    volumes::volume_of(&self.volumes, &path).map(|v| v.id.clone())
                else {
                    return;
                };
                self.catalog
                    .add(&volume_id, GameRecord::register(&name, path, &volume_id));
                match self.catalog.save() {
                    Ok(()) => self.set_status(format!("Added {name}"), StatusTone::Info),
                    Err(err) => {
                        error!(%err, "failed to persist catalog after add");
                        self.set_status(
                            format!("Added {name}, but saving the catalog failed: {err}"),
                            StatusTone::Error,
                        );
                    }
                }
            }
        }
    }

    fn clamp_cursor(&mut self, pane: Pane) {
        let len = self.pane_records(pane).len();
        let cursor = &mut self.cursors[pane.index()];
        if len == 0 {
            *cursor = 0;
        } else if *cursor >= len {
            *cursor = len - 1;
        }
    }
}
