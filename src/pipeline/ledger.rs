use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::types::{FileOutcome, FileStatus, Stage};

/// Outcomes recorded as soon as each file is done, plus the file every
/// worker is currently on.
///
/// A worker that dies mid-file loses nothing already recorded, and its
/// in-flight file can still be reported through [`abandon`](Self::abandon).
#[derive(Default)]
pub struct Ledger {
    outcomes: Mutex<Vec<FileOutcome>>,
    in_flight: Mutex<HashMap<usize, String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start(&self, worker: usize, name: &str) {
        self.in_flight.lock().await.insert(worker, name.to_string());
    }

    pub async fn finish(&self, worker: usize, outcome: FileOutcome) {
        self.in_flight.lock().await.remove(&worker);
        self.outcomes.lock().await.push(outcome);
    }

    /// Records the file `worker` was processing as failed. Returns `false`
    /// when the worker was between files.
    pub async fn abandon(&self, worker: usize, reason: &str) -> bool {
        let Some(name) = self.in_flight.lock().await.remove(&worker) else {
            return false;
        };

        self.outcomes.lock().await.push(FileOutcome {
            name,
            status: FileStatus::Failed {
                stage: Stage::Worker,
                reason: reason.to_string(),
            },
        });
        true
    }

    pub async fn drain(&self) -> Vec<FileOutcome> {
        std::mem::take(&mut *self.outcomes.lock().await)
    }
}
