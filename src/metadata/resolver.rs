use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::{AnimeInfo, MetadataError, MetadataSource, TitleLanguage};
use crate::parser::{parse_directory_name, AnimeDirName, EpisodeParser};
use crate::scanner::{find_anime_dirs, scan_media_files, EpisodeFile, EpisodeRange, ScannerError};

/// An anime directory found on disk, before metadata is attached
#[derive(Debug, Clone)]
pub struct ScannedDir {
    pub name: AnimeDirName,
    pub path: PathBuf,
    pub files: Vec<EpisodeFile>,
    pub range: Option<EpisodeRange>,
}

impl ScannedDir {
    /// Directories without any numbered media files are listed but never renamed
    pub fn is_renamable(&self) -> bool {
        self.range.is_some()
    }
}

/// An anime directory with its metadata
#[derive(Debug, Clone)]
pub struct AnimeEntry {
    pub id: String,
    pub season: Option<u32>,
    pub part: Option<u32>,
    pub dir_path: PathBuf,
    pub dir_name: String,
    pub title: String,
    /// Filled by [`AnimeEntry::load_episode_titles`] right before renaming
    pub episode_titles: BTreeMap<u32, String>,
    pub files: Vec<EpisodeFile>,
    pub range: Option<EpisodeRange>,
}

impl AnimeEntry {
    pub fn new(scanned: ScannedDir, info: AnimeInfo) -> Self {
        Self {
            id: scanned.name.id,
            season: scanned.name.season,
            part: scanned.name.part,
            dir_name: scanned.name.original_name,
            dir_path: scanned.path,
            title: info.title,
            episode_titles: BTreeMap::new(),
            files: scanned.files,
            range: scanned.range,
        }
    }

    pub fn load_episode_titles(
        &mut self,
        source: &dyn MetadataSource,
        language: TitleLanguage,
    ) -> Result<(), MetadataError> {
        let Some(range) = self.range else {
            return Ok(());
        };

        self.episode_titles = source.fetch_episodes(&self.id, range, language)?;
        Ok(())
    }

    pub fn episode_title(&self, number: u32) -> Option<&str> {
        self.episode_titles.get(&number).map(String::as_str)
    }
}

/// Find anime directories under `root` and scan each for episode files
pub fn scan_anime_dirs(
    root: &Path,
    extensions: &[String],
    skip: &[&str],
    parser: &dyn EpisodeParser,
) -> Result<Vec<ScannedDir>, ScannerError> {
    let mut scanned = Vec::new();

    for entry in find_anime_dirs(root, skip)? {
        let name = match parse_directory_name(&entry.name) {
            Ok(name) => name,
            Err(_) => continue,
        };

        let files = match scan_media_files(&entry.path, extensions, parser) {
            Ok(files) => files,
            Err(e) => {
                warn!(path = ?entry.path, error = %e, "Could not list episode files");
                Vec::new()
            }
        };

        let range = EpisodeRange::from_files(&files);

        debug!(
            name = %entry.name,
            files = files.len(),
            range = ?range,
            "Scanned anime directory"
        );

        scanned.push(ScannedDir {
            name,
            path: entry.path,
            files,
            range,
        });
    }

    Ok(scanned)
}

/// Attach series metadata to a scanned directory
pub fn resolve_entry(
    scanned: ScannedDir,
    source: &dyn MetadataSource,
    language: TitleLanguage,
) -> Result<AnimeEntry, MetadataError> {
    let info = source.fetch_anime(&scanned.name.id, language)?;
    Ok(AnimeEntry::new(scanned, info))
}
