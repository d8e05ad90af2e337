use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;

use crate::catalog::GameRecord;
use crate::volumes::Volume;

use super::thread::spawn_move_thread;
use super::types::MoveEvent;

/// One in-flight relocation batch.
///
/// The app model holds at most one of these; starting a second batch while one
/// exists is refused, and quitting while one exists is refused too. There is
/// no cancellation: a spawned batch always runs to its final event.
pub struct MoveBatch {
    pub source: String,
    pub destination: String,
    rx: Receiver<MoveEvent>,
    join: Option<JoinHandle<()>>,
}

impl MoveBatch {
    /// Spawn the worker thread for `games`, moving them from the volume named
    /// `source` onto `destination`.
    pub fn spawn(games: Vec<GameRecord>, source: String, destination: Volume) -> Self {
        let (tx, rx) = mpsc::channel::<MoveEvent>();
        let destination_id = destination.id.clone();
        let join = spawn_move_thread(games, destination, tx);

        Self {
            source,
            destination: destination_id,
            rx,
            join: Some(join),
        }
    }

    /// Next pending worker event, if any. Never blocks.
    pub fn try_event(&mut self) -> Option<MoveEvent> {
        self.rx.try_recv().ok()
    }

    /// Blocking receive, for tests that want to consume the whole event
    /// stream without polling.
    #[cfg(test)]
    pub(crate) fn rx_recv(&self) -> MoveEvent {
        self.rx.recv().expect("move worker channel closed")
    }

    /// Join the worker thread. Call after the `Finished` event was consumed.
    pub fn finish(mut self) {
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }
}
