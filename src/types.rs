use std::{fmt, path::PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

/// Author and title recovered from a raw file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTitle {
    pub author_info: String,
    pub source_title: String,
    /// A `]` was found with no `[` before it.
    pub ambiguous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocateMode {
    Move,
    Copy,
}

/// Where the translated part of a destination folder name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    CacheHit,
    Translated,
    Fallback,
    Passthrough,
}

/// The step of the per-file pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Organize,
    /// The worker holding the file stopped before finishing it.
    Worker,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Organize => write!(f, "organize"),
            Stage::Worker => write!(f, "worker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Placed {
        destination: PathBuf,
        source: TitleSource,
    },
    Failed {
        stage: Stage,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub name: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub placed: usize,
    pub failed: usize,
    pub cache_hits: usize,
    pub translated: usize,
    pub fallbacks: usize,
    pub cache_saved: bool,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub failures: Vec<FailureTableRow>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            total: 0,
            placed: 0,
            failed: 0,
            cache_hits: 0,
            translated: 0,
            fallbacks: 0,
            cache_saved: false,
            started_at,
            finished_at: started_at,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.total += 1;
        match outcome.status {
            FileStatus::Placed { source, .. } => {
                self.placed += 1;
                match source {
                    TitleSource::CacheHit => self.cache_hits += 1,
                    TitleSource::Translated => self.translated += 1,
                    TitleSource::Fallback => self.fallbacks += 1,
                    TitleSource::Passthrough => {}
                }
            }
            FileStatus::Failed { stage, reason } => {
                self.failed += 1;
                self.failures.push(FailureTableRow {
                    file: outcome.name,
                    stage: stage.to_string(),
                    reason,
                });
            }
        }
    }

    pub fn rows(&self) -> Vec<SummaryTableRow> {
        let elapsed = self.finished_at - self.started_at;
        vec![
            SummaryTableRow::new("files", self.total),
            SummaryTableRow::new("placed", self.placed),
            SummaryTableRow::new("failed", self.failed),
            SummaryTableRow::new("cache hits", self.cache_hits),
            SummaryTableRow::new("translated", self.translated),
            SummaryTableRow::new("fallbacks", self.fallbacks),
            SummaryTableRow {
                metric: "cache saved".to_string(),
                value: if self.cache_saved { "yes" } else { "no" }.to_string(),
            },
            SummaryTableRow {
                metric: "elapsed".to_string(),
                value: format!("{}s", elapsed.num_seconds()),
            },
        ]
    }
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    pub metric: String,
    pub value: String,
}

impl SummaryTableRow {
    fn new(metric: &str, value: usize) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct FailureTableRow {
    pub file: String,
    pub stage: String,
    pub reason: String,
}

#[derive(Tabled)]
pub struct ParseTableRow {
    pub file: String,
    pub author: String,
    pub title: String,
}

#[derive(Tabled)]
pub struct CacheTableRow {
    pub source: String,
    pub translated: String,
}
