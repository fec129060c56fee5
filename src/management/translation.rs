use std::{
    collections::BTreeMap,
    fmt,
    future::Future,
    io::{self, Error},
    path::{Path, PathBuf},
};

use tokio::sync::Mutex;

use crate::{translator::Translation, utils};

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "cache file error: {}", e),
            CacheError::SerdeError(e) => write!(f, "malformed cache snapshot: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result of a cache lookup.
#[derive(Debug)]
pub enum Lookup {
    Hit(String),
    Miss(Translation),
}

impl Lookup {
    pub fn text(&self) -> &str {
        match self {
            Lookup::Hit(text) => text,
            Lookup::Miss(translation) => translation.text(),
        }
    }
}

struct CacheState {
    entries: BTreeMap<String, String>,
    revision: u64,
}

/// Process-wide map of source titles to translated titles.
///
/// Shared between all workers behind an `Arc`. The map itself is never handed
/// out; callers go through [`get_or_compute`](Self::get_or_compute) and
/// [`flush`](Self::flush), or take a copy with [`entries`](Self::entries).
pub struct TranslationCache {
    path: PathBuf,
    state: Mutex<CacheState>,
    // last revision written to disk; also serializes concurrent flushes
    flushed: Mutex<u64>,
}

impl TranslationCache {
    pub fn new(path: PathBuf, entries: BTreeMap<String, String>) -> Self {
        Self {
            path,
            state: Mutex::new(CacheState {
                entries,
                revision: 0,
            }),
            flushed: Mutex::new(0),
        }
    }

    /// Loads the snapshot at `path`. A missing file gives an empty cache; a
    /// malformed one is an error so that existing translations are never
    /// silently thrown away.
    pub async fn load(path: &Path) -> Result<Self, CacheError> {
        let entries = load_snapshot(path).await?;
        Ok(Self::new(path.to_path_buf(), entries))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, source_title: &str) -> Option<String> {
        self.state.lock().await.entries.get(source_title).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn entries(&self) -> BTreeMap<String, String> {
        self.state.lock().await.entries.clone()
    }

    /// Returns the cached translation of `source_title`, or runs `compute`
    /// and stores its result.
    ///
    /// The lock is released while `compute` runs so a slow translation never
    /// blocks other workers. Two workers missing on the same title at the
    /// same time may therefore both compute it; the last write wins. Only
    /// durable results are stored, a fallback is returned but not cached.
    pub async fn get_or_compute<F, Fut>(&self, source_title: &str, compute: F) -> Lookup
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Translation>,
    {
        if let Some(hit) = self.get(source_title).await {
            return Lookup::Hit(hit);
        }

        let translation = compute().await;

        if translation.is_durable() {
            let mut state = self.state.lock().await;
            state
                .entries
                .insert(source_title.to_string(), translation.text().to_string());
            state.revision += 1;
        }

        Lookup::Miss(translation)
    }

    /// Writes the current map to the snapshot file.
    ///
    /// The map is copied under the lock and written after releasing it.
    /// Returns `Ok(false)` without touching the disk when nothing changed
    /// since the last successful flush.
    pub async fn flush(&self) -> Result<bool, CacheError> {
        let mut flushed = self.flushed.lock().await;

        let (entries, revision) = {
            let state = self.state.lock().await;
            if state.revision == *flushed {
                return Ok(false);
            }
            (state.entries.clone(), state.revision)
        };

        flush_snapshot(&self.path, &entries).await?;
        *flushed = revision;
        Ok(true)
    }
}

pub async fn load_snapshot(path: &Path) -> Result<BTreeMap<String, String>, CacheError> {
    let content = match async_fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(CacheError::IoError(e)),
    };

    let entries = serde_json::from_str(&content)?;
    Ok(entries)
}

/// Replaces the snapshot at `path` with `entries`.
///
/// The JSON is written to a temporary file next to the target, synced and
/// then renamed over it, so a crash mid-write leaves the previous snapshot
/// intact.
pub async fn flush_snapshot(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    let tmp = utils::temp_sibling(path);

    if let Err(e) = write_synced(&tmp, json.as_bytes()).await {
        let _ = async_fs::remove_file(&tmp).await;
        return Err(CacheError::IoError(e));
    }

    if let Err(e) = async_fs::rename(&tmp, path).await {
        let _ = async_fs::remove_file(&tmp).await;
        return Err(CacheError::IoError(e));
    }

    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    async_fs::write(path, bytes).await?;
    let file = async_fs::OpenOptions::new().write(true).open(path).await?;
    file.sync_all().await
}
