use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::scanner::EpisodeRange;

/// Series-level metadata for one provider id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeInfo {
    pub id: String,
    pub title: String,
}

/// Language a series or episode title is requested in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleLanguage {
    #[default]
    English,
    Romaji,
    Japanese,
}

impl TitleLanguage {
    pub fn key(&self) -> &'static str {
        match self {
            TitleLanguage::English => "english",
            TitleLanguage::Romaji => "romaji",
            TitleLanguage::Japanese => "japanese",
        }
    }

    /// Names accepted for this language in config values and metadata keys
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            TitleLanguage::English => &["english", "en"],
            TitleLanguage::Romaji => &["romaji", "romanji"],
            TitleLanguage::Japanese => &["japanese", "ja"],
        }
    }

    /// Value stored under this language in a map keyed by language name
    pub fn lookup<'a, V>(&self, map: &'a BTreeMap<String, V>) -> Option<&'a V> {
        self.aliases().iter().find_map(|alias| map.get(*alias))
    }
}

impl FromStr for TitleLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        [
            TitleLanguage::English,
            TitleLanguage::Romaji,
            TitleLanguage::Japanese,
        ]
        .into_iter()
        .find(|lang| lang.aliases().contains(&wanted.as_str()))
        .ok_or_else(|| format!("unknown title language \"{}\"", s))
    }
}

/// Supplies titles for anime ids and their episodes.
///
/// Implementations own any fetching, caching or rate limiting; the rename core
/// only sees the extracted values.
pub trait MetadataSource {
    fn fetch_anime(&self, id: &str, language: TitleLanguage) -> Result<AnimeInfo, MetadataError>;

    /// Episode titles keyed by episode number, limited to `range`
    fn fetch_episodes(
        &self,
        id: &str,
        range: EpisodeRange,
        language: TitleLanguage,
    ) -> Result<BTreeMap<u32, String>, MetadataError>;
}

/// One anime in the metadata file.
///
/// `title` and `episodes` hold the English titles. Other languages live in
/// `titles` and `episode_titles`, keyed by language name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataEntry {
    pub title: String,
    #[serde(default)]
    pub episodes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub titles: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub episode_titles: BTreeMap<String, BTreeMap<String, String>>,
}

/// The metadata file structure: provider id to entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFile {
    pub entries: BTreeMap<String, MetadataEntry>,
}

pub const METADATA_FILE_NAME: &str = ".aniname-metadata.json";

/// Where the metadata store lives
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub path: PathBuf,
}

impl MetadataConfig {
    /// Metadata file stored inside the scanned directory
    pub fn for_target_dir(target: &Path) -> Self {
        Self {
            path: target.join(METADATA_FILE_NAME),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("No metadata for anime {0}")]
    NotFound(String),

    #[error("Metadata file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Metadata file corrupted: {0}")]
    Corrupted(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
