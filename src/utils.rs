use std::{
    io,
    path::{Path, PathBuf},
};

use futures::TryStreamExt;
use rand::{Rng, distr::Alphanumeric};

use crate::types::SourceFile;

pub fn generate_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Returns a hidden, randomly named path next to `path`, used to stage a
/// write before renaming it into place.
pub fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, generate_suffix()))
}

/// Lists the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped. The listing is taken once; files that appear
/// later are not part of the run.
pub async fn list_source_files(dir: &Path) -> io::Result<Vec<SourceFile>> {
    let mut entries = async_fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.try_next().await? {
        let path = entry.path();
        let is_file = match async_fs::metadata(&path).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        };
        if !is_file {
            continue;
        }

        files.push(SourceFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
