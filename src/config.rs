//! Configuration management for the manga organizer.
//!
//! This module handles loading and accessing configuration values from
//! command-line flags, environment variables and `.env` files. Every option is
//! resolved in the same order:
//!
//! 1. Command-line flag (highest priority)
//! 2. Environment variable, possibly loaded from the `.env` file in the local
//!    data directory
//! 3. Application default (where one exists)

use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use crate::{types::RelocateMode, utils};

pub const ENV_SOURCE_DIR: &str = "MANGASORT_SOURCE_DIR";
pub const ENV_TARGET_DIR: &str = "MANGASORT_TARGET_DIR";
pub const ENV_CACHE_FILE: &str = "MANGASORT_CACHE_FILE";
pub const ENV_API_URL: &str = "MANGASORT_API_URL";
pub const ENV_MODEL: &str = "MANGASORT_MODEL";
pub const ENV_WORKERS: &str = "MANGASORT_WORKERS";
pub const ENV_FLUSH_INTERVAL: &str = "MANGASORT_FLUSH_INTERVAL";
pub const ENV_TIMEOUT: &str = "MANGASORT_TIMEOUT";
pub const ENV_TRANSLATE: &str = "MANGASORT_TRANSLATE";
pub const ENV_COPY: &str = "MANGASORT_COPY";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:12345/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "qwen2.5-ja-zh";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing {
        flag: &'static str,
        var: &'static str,
    },
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { flag, var } => {
                write!(f, "missing setting: pass {} or set {}", flag, var)
            }
            ConfigError::Invalid { var, value, reason } => {
                write!(f, "invalid value '{}' for {}: {}", value, var, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub cache_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub workers: Option<usize>,
    pub flush_interval: Option<u64>,
    pub timeout: Option<u64>,
    pub no_translate: bool,
    pub copy: bool,
}

/// Fully resolved settings for an `organize` run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub cache_file: PathBuf,
    pub api_url: String,
    pub model: String,
    pub workers: usize,
    pub flush_interval: Duration,
    pub timeout: Duration,
    pub translate: bool,
    pub mode: RelocateMode,
}

impl Settings {
    /// Resolves settings against the process environment.
    pub fn resolve(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Resolves settings using `lookup` in place of the process environment.
    pub fn resolve_with<F>(overrides: &Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source_dir = overrides
            .source_dir
            .clone()
            .or_else(|| var(ENV_SOURCE_DIR).map(PathBuf::from))
            .ok_or(ConfigError::Missing {
                flag: "--source",
                var: ENV_SOURCE_DIR,
            })?;

        let target_dir = overrides
            .target_dir
            .clone()
            .or_else(|| var(ENV_TARGET_DIR).map(PathBuf::from))
            .ok_or(ConfigError::Missing {
                flag: "--target",
                var: ENV_TARGET_DIR,
            })?;

        let cache_file = overrides
            .cache_file
            .clone()
            .or_else(|| var(ENV_CACHE_FILE).map(PathBuf::from))
            .unwrap_or_else(default_cache_file);

        let api_url = overrides
            .api_url
            .clone()
            .or_else(|| var(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let model = overrides
            .model
            .clone()
            .or_else(|| var(ENV_MODEL))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let workers = match overrides.workers {
            Some(w) => w,
            None => parse_var(ENV_WORKERS, var(ENV_WORKERS))?.unwrap_or(DEFAULT_WORKERS),
        };
        if workers == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_WORKERS,
                value: workers.to_string(),
                reason: "at least one worker is required".to_string(),
            });
        }

        let flush_secs = match overrides.flush_interval {
            Some(s) => s,
            None => parse_var(ENV_FLUSH_INTERVAL, var(ENV_FLUSH_INTERVAL))?
                .unwrap_or(DEFAULT_FLUSH_INTERVAL_SECS),
        };
        if flush_secs == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_FLUSH_INTERVAL,
                value: flush_secs.to_string(),
                reason: "interval must be at least one second".to_string(),
            });
        }

        let timeout_secs = match overrides.timeout {
            Some(s) => s,
            None => parse_var(ENV_TIMEOUT, var(ENV_TIMEOUT))?.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_TIMEOUT,
                value: timeout_secs.to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        let translate = if overrides.no_translate {
            false
        } else {
            bool_var(ENV_TRANSLATE, var(ENV_TRANSLATE))?.unwrap_or(true)
        };

        let copy = overrides.copy || bool_var(ENV_COPY, var(ENV_COPY))?.unwrap_or(false);

        Ok(Settings {
            source_dir,
            target_dir,
            cache_file,
            api_url,
            model,
            workers,
            flush_interval: Duration::from_secs(flush_secs),
            timeout: Duration::from_secs(timeout_secs),
            translate,
            mode: if copy {
                RelocateMode::Copy
            } else {
                RelocateMode::Move
            },
        })
    }
}

fn parse_var<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var: key,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn bool_var(key: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    value
        .map(|v| {
            utils::parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                var: key,
                value: v.clone(),
                reason: "expected true or false".to_string(),
            })
        })
        .transpose()
}

/// Returns the directory holding the `.env` file and the default cache.
///
/// - Linux: `~/.local/share/mangasort`
/// - macOS: `~/Library/Application Support/mangasort`
/// - Windows: `%LOCALAPPDATA%/mangasort`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mangasort");
    path
}

pub fn default_cache_file() -> PathBuf {
    data_dir().join("translation_cache.json")
}

/// Cache file for commands that only read the cache.
pub fn cache_file(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        env::var(ENV_CACHE_FILE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(default_cache_file)
}

/// Loads environment variables from the `.env` file in the local data
/// directory, if there is one.
///
/// Creates the directory when it does not exist yet. A missing `.env` file is
/// not an error; a file that exists but cannot be parsed is.
///
/// # Example
///
/// ```
/// if let Err(e) = config::load_env().await {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}
