//! # Pipeline Module
//!
//! Runs one organize pass over a fixed list of source files.
//!
//! ```text
//!             ┌──────────── worker 1 ──────────┐
//! file list → │ parse → cache / translate →    │ → outcomes
//!  (queue)    │          place                 │
//!             └──────────── worker N ──────────┘
//!                     ↕ TranslationCache ↕
//!                       flush task (every interval, and once at the end)
//! ```
//!
//! Workers are tokio tasks pulling from a shared queue. They only meet each
//! other in the [`TranslationCache`]. The flush task runs next to them until
//! all workers have joined, is then stopped through a watch channel, and one
//! last flush is done before the summary is returned.
//!
//! No single file can fail the run: parse and filesystem problems are
//! recorded as [`FileStatus::Failed`](crate::types::FileStatus::Failed) and
//! the file stays in the source directory.

mod flush;
mod ledger;
mod startup;
mod worker;

pub use flush::spawn_flusher;
pub use ledger::Ledger;
pub use startup::{Prepared, StartupError, prepare};
pub use worker::process_file;

use std::{collections::VecDeque, path::PathBuf, sync::Arc, time::Duration};

use chrono::Local;
use indicatif::ProgressBar;
use tokio::sync::{Mutex, watch};

use crate::{
    management::TranslationCache,
    translator::Translator,
    types::{FileOutcome, FileStatus, RelocateMode, RunSummary, SourceFile, Stage},
    warning,
};

/// Everything a worker needs, shared by all of them.
pub struct Context {
    pub target_dir: PathBuf,
    pub cache: Arc<TranslationCache>,
    pub translator: Translator,
    pub mode: RelocateMode,
    pub progress: ProgressBar,
}

/// Processes `files` with `workers` parallel tasks and returns the summary.
///
/// The cache is flushed every `flush_interval` while the workers run and once
/// more after they are done.
pub async fn run(
    ctx: Arc<Context>,
    files: Vec<SourceFile>,
    workers: usize,
    flush_interval: Duration,
) -> RunSummary {
    let mut summary = RunSummary::new(Local::now());
    let queue = Arc::new(Mutex::new(VecDeque::from(files)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let flusher = spawn_flusher(
        Arc::clone(&ctx.cache),
        flush_interval,
        shutdown_rx,
        ctx.progress.clone(),
    );

    let ledger = Arc::new(Ledger::new());
    let handles: Vec<_> = (0..workers.max(1))
        .map(|id| {
            let ctx = Arc::clone(&ctx);
            let queue = Arc::clone(&queue);
            let ledger = Arc::clone(&ledger);
            (id, tokio::spawn(async move { work(id, ctx, queue, ledger).await }))
        })
        .collect();

    for (id, handle) in handles {
        if let Err(e) = handle.await {
            ctx.progress
                .suspend(|| warning!("A worker stopped unexpectedly: {}", e));
            ledger
                .abandon(id, &format!("worker stopped unexpectedly: {}", e))
                .await;
        }
    }

    ledger
        .drain()
        .await
        .into_iter()
        .for_each(|o| summary.record(o));

    // only left over when every worker stopped early
    for file in queue.lock().await.drain(..) {
        summary.record(FileOutcome {
            name: file.name,
            status: FileStatus::Failed {
                stage: Stage::Worker,
                reason: "no worker left to process it".to_string(),
            },
        });
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = flusher.await {
        ctx.progress
            .suspend(|| warning!("Cache flush task stopped unexpectedly: {}", e));
    }

    summary.cache_saved = match ctx.cache.flush().await {
        Ok(_) => true,
        Err(e) => {
            ctx.progress.suspend(|| {
                warning!(
                    "Cannot save translation cache to {}: {}",
                    ctx.cache.path().display(),
                    e
                )
            });
            false
        }
    };

    summary.finished_at = Local::now();
    summary
}

async fn work(
    id: usize,
    ctx: Arc<Context>,
    queue: Arc<Mutex<VecDeque<SourceFile>>>,
    ledger: Arc<Ledger>,
) {
    loop {
        // the guard is dropped before the file is processed
        let next = queue.lock().await.pop_front();
        let Some(file) = next else {
            break;
        };

        ctx.progress.set_message(file.name.clone());
        ledger.start(id, &file.name).await;
        let outcome = process_file(&ctx, &file).await;
        ledger.finish(id, outcome).await;
        ctx.progress.inc(1);
    }
}
