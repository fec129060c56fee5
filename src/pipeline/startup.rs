use std::{fmt, io, path::PathBuf};

use crate::{
    config::{ConfigError, Settings},
    management::{CacheError, TranslationCache},
    translator::{TranslationError, Translator},
    types::SourceFile,
    utils,
};

/// Failures that stop a run before any file is touched.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Client(TranslationError),
    SelfCheck {
        endpoint: String,
        source: TranslationError,
    },
    Cache {
        path: PathBuf,
        source: CacheError,
    },
    SourceDir {
        path: PathBuf,
        source: io::Error,
    },
    TargetDir {
        path: PathBuf,
        source: io::Error,
    },
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "{}", e),
            StartupError::Client(e) => write!(f, "cannot set up translation client: {}", e),
            StartupError::SelfCheck { endpoint, source } => write!(
                f,
                "translation service self-check against {} failed: {}\nCheck MANGASORT_API_URL or run with --no-translate.",
                endpoint, source
            ),
            StartupError::Cache { path, source } => write!(
                f,
                "cannot load translation cache {}: {}\nFix or move the file away to start with an empty cache.",
                path.display(),
                source
            ),
            StartupError::SourceDir { path, source } => {
                write!(f, "cannot read source directory {}: {}", path.display(), source)
            }
            StartupError::TargetDir { path, source } => {
                write!(f, "cannot create target directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StartupError {}

/// Everything an organize run needs once the startup checks passed.
pub struct Prepared {
    pub translator: Translator,
    /// Answer of the self-check, `None` when translation is off.
    pub self_check: Option<String>,
    pub cache: TranslationCache,
    pub files: Vec<SourceFile>,
}

/// Runs the startup checks in order: translation client and self-check,
/// cache snapshot, source listing. The target root is created only when
/// there is something to put in it.
pub async fn prepare(settings: &Settings) -> Result<Prepared, StartupError> {
    let translator = Translator::from_settings(settings).map_err(StartupError::Client)?;

    let self_check = match &translator {
        Translator::Remote(client) => {
            let answer = client
                .self_check()
                .await
                .map_err(|source| StartupError::SelfCheck {
                    endpoint: client.endpoint().to_string(),
                    source,
                })?;
            Some(answer)
        }
        Translator::Passthrough => None,
    };

    let cache = TranslationCache::load(&settings.cache_file)
        .await
        .map_err(|source| StartupError::Cache {
            path: settings.cache_file.clone(),
            source,
        })?;

    let files = utils::list_source_files(&settings.source_dir)
        .await
        .map_err(|source| StartupError::SourceDir {
            path: settings.source_dir.clone(),
            source,
        })?;

    if !files.is_empty() {
        async_fs::create_dir_all(&settings.target_dir)
            .await
            .map_err(|source| StartupError::TargetDir {
                path: settings.target_dir.clone(),
                source,
            })?;
    }

    Ok(Prepared {
        translator,
        self_check,
        cache,
        files,
    })
}
