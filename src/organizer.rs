use std::{
    fmt,
    io::{self, Error},
    path::{Path, PathBuf},
};

use crate::{types::RelocateMode, utils};

const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug)]
pub enum OrganizeError {
    IoError(Error),
    InvalidName(String),
    DestinationExists(PathBuf),
}

impl From<Error> for OrganizeError {
    fn from(err: Error) -> Self {
        OrganizeError::IoError(err)
    }
}

impl fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganizeError::IoError(e) => write!(f, "{}", e),
            OrganizeError::InvalidName(name) => write!(f, "unusable folder name '{}'", name),
            OrganizeError::DestinationExists(path) => {
                write!(f, "{} already exists", path.display())
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn destination_folder_name(author_info: &str, translated_title: &str) -> String {
    if author_info.is_empty() {
        translated_title.to_string()
    } else {
        format!("{} {}", author_info, translated_title)
    }
}

/// Puts `source` into `target_root/<sanitized folder_name>/`, keeping its
/// file name.
///
/// The folder is created if needed. An existing file at the destination is
/// never overwritten. On any error the source file is left where it was.
pub async fn place(
    source: &Path,
    folder_name: &str,
    target_root: &Path,
    mode: RelocateMode,
) -> Result<PathBuf, OrganizeError> {
    let folder = sanitize(folder_name);
    if folder.is_empty() || folder == "." || folder == ".." {
        return Err(OrganizeError::InvalidName(folder_name.to_string()));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| OrganizeError::InvalidName(source.display().to_string()))?;

    let dir = target_root.join(&folder);
    async_fs::create_dir_all(&dir).await?;

    let destination = dir.join(file_name);
    if async_fs::symlink_metadata(&destination).await.is_ok() {
        return Err(OrganizeError::DestinationExists(destination));
    }

    match mode {
        RelocateMode::Move => move_file(source, &destination).await?,
        RelocateMode::Copy => copy_file(source, &destination).await?,
    }

    Ok(destination)
}

async fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match async_fs::rename(source, destination).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_file(source, destination).await?;
            if let Err(e) = async_fs::remove_file(source).await {
                // keep exactly one copy around
                let _ = async_fs::remove_file(destination).await;
                return Err(e);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    let staging = utils::temp_sibling(destination);

    if let Err(e) = async_fs::copy(source, &staging).await {
        let _ = async_fs::remove_file(&staging).await;
        return Err(e);
    }

    if let Err(e) = async_fs::rename(&staging, destination).await {
        let _ = async_fs::remove_file(&staging).await;
        return Err(e);
    }

    Ok(())
}
