use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::parser::{is_anime_dir_name, EpisodeParser};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

/// A media file inside an anime directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeFile {
    pub path: PathBuf,
    pub file_name: String,
    pub episode_number: Option<u32>,
}

impl EpisodeFile {
    /// Extension including the leading dot, or empty
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// Lowest and highest episode number found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRange {
    pub min: u32,
    pub max: u32,
}

impl EpisodeRange {
    pub fn from_files(files: &[EpisodeFile]) -> Option<Self> {
        let mut numbers = files.iter().filter_map(|f| f.episode_number);
        let first = numbers.next()?;
        let (min, max) = numbers.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n)));
        Some(Self { min, max })
    }
}

fn check_directory(target: &Path) -> Result<(), ScannerError> {
    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    Ok(())
}

fn read_dir_checked(target: &Path) -> Result<fs::ReadDir, ScannerError> {
    fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })
}

/// List the non-hidden subdirectories of `target`, sorted by name
pub fn scan_directory(target: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    check_directory(target)?;

    let mut entries = Vec::new();

    for entry in read_dir_checked(target)? {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if !path.is_dir() {
            trace!(path = ?path, "Skipping non-directory");
            continue;
        }

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        if name.starts_with('.') {
            trace!(name = %name, "Skipping hidden directory");
            continue;
        }

        entries.push(DirectoryEntry::new(name, path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}

/// Find every directory below `root` whose name matches the anime scan format.
///
/// Matched directories are not descended into. Directories named in `skip` (the
/// backup folder) are ignored. Results are sorted by basename, then full path.
pub fn find_anime_dirs(root: &Path, skip: &[&str]) -> Result<Vec<DirectoryEntry>, ScannerError> {
    check_directory(root)?;

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let children = match scan_directory(&dir) {
            Ok(children) => children,
            Err(e) if dir != root => {
                debug!(path = ?dir, error = %e, "Skipping unreadable directory");
                continue;
            }
            Err(e) => return Err(e),
        };

        for child in children {
            if skip.contains(&child.name.as_str()) {
                trace!(name = %child.name, "Skipping excluded directory");
                continue;
            }

            if is_anime_dir_name(&child.name) {
                debug!(name = %child.name, "Found anime directory");
                found.push(child);
            } else {
                pending.push(child.path);
            }
        }
    }

    found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

    debug!(count = found.len(), "Anime directory discovery complete");

    Ok(found)
}

/// List media files directly inside `dir`, sorted by path
pub fn scan_media_files(
    dir: &Path,
    extensions: &[String],
    parser: &dyn EpisodeParser,
) -> Result<Vec<EpisodeFile>, ScannerError> {
    check_directory(dir)?;

    let mut files = Vec::new();

    for entry in read_dir_checked(dir)? {
        let path = entry?.path();

        if !path.is_file() {
            continue;
        }

        let is_media = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                extensions.iter().any(|m| m.eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false);

        if !is_media {
            trace!(path = ?path, "Skipping non-media file");
            continue;
        }

        let file_name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        let episode_number = parser.episode_number(&file_name);
        trace!(file = %file_name, episode = ?episode_number, "Found media file");

        files.push(EpisodeFile {
            path,
            file_name,
            episode_number,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(files)
}
