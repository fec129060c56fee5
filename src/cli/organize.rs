use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{Overrides, Settings},
    error, info,
    pipeline::{self, Context},
    success,
    translator::SELF_CHECK_TEXT,
    types::RelocateMode,
    warning,
};

pub async fn organize(overrides: Overrides) {
    let settings = match Settings::resolve(&overrides) {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let pb = spinner(if settings.translate {
        format!("Checking translation service at {}...", settings.api_url)
    } else {
        "Loading translation cache...".to_string()
    });
    let prepared = pipeline::prepare(&settings).await;
    pb.finish_and_clear();

    let prepared = match prepared {
        Ok(prepared) => prepared,
        Err(e) => error!("{}", e),
    };

    match &prepared.self_check {
        Some(text) => success!("Translation service ready: '{}' -> '{}'", SELF_CHECK_TEXT, text),
        None => info!("Translation disabled, titles are kept as they are."),
    }
    info!(
        "Loaded {} cached translations from {}",
        prepared.cache.len().await,
        settings.cache_file.display()
    );

    if prepared.files.is_empty() {
        success!("Nothing to organize in {}.", settings.source_dir.display());
        return;
    }

    info!(
        "Organizing {} files with {} workers ({})",
        prepared.files.len(),
        settings.workers,
        match settings.mode {
            RelocateMode::Move => "move",
            RelocateMode::Copy => "copy",
        }
    );

    let pb = ProgressBar::new(prepared.files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let ctx = Arc::new(Context {
        target_dir: settings.target_dir.clone(),
        cache: Arc::new(prepared.cache),
        translator: prepared.translator,
        mode: settings.mode,
        progress: pb.clone(),
    });

    let summary = pipeline::run(
        ctx,
        prepared.files,
        settings.workers,
        settings.flush_interval,
    )
    .await;
    pb.finish_and_clear();

    println!("{}", Table::new(summary.rows()));

    if !summary.failures.is_empty() {
        warning!("{} files were left in the source directory:", summary.failed);
        println!("{}", Table::new(&summary.failures));
    }

    if summary.cache_saved {
        success!(
            "Placed {} of {} files, translation cache saved.",
            summary.placed,
            summary.total
        );
    } else {
        warning!(
            "Placed {} of {} files, but the translation cache could not be saved.",
            summary.placed,
            summary.total
        );
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
