use std::{sync::Arc, time::Duration};

use chrono::Local;
use indicatif::ProgressBar;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

use crate::{management::TranslationCache, warning};

/// Spawns the task that writes the cache snapshot every `every` until
/// `shutdown` turns `true` (or its sender is dropped).
///
/// A failed flush is logged and tried again on the next tick. The final
/// flush after shutdown is up to the caller.
pub fn spawn_flusher(
    cache: Arc<TranslationCache>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
    progress: ProgressBar,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match cache.flush().await {
                        Ok(true) => progress.set_message(format!(
                            "translation cache saved at {}",
                            Local::now().format("%H:%M:%S")
                        )),
                        Ok(false) => {}
                        Err(e) => progress.suspend(|| {
                            warning!("Cannot save translation cache: {}", e)
                        }),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    })
}
