use super::types::*;
use crate::scanner::EpisodeRange;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Metadata source backed by a JSON file
#[derive(Debug, Clone, Default)]
pub struct JsonMetadataStore {
    data: MetadataFile,
}

impl JsonMetadataStore {
    pub fn load(config: &MetadataConfig) -> Result<Self, MetadataError> {
        let data = Self::read_metadata_file(&config.path)?;
        info!(
            "Loaded metadata for {} anime from {:?}",
            data.entries.len(),
            config.path
        );
        Ok(Self { data })
    }

    fn read_metadata_file(path: &Path) -> Result<MetadataFile, MetadataError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MetadataError::MissingFile(path.to_path_buf())
            } else {
                MetadataError::IoError(e)
            }
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| MetadataError::Corrupted(e.to_string()))
    }

    pub fn from_entries(entries: BTreeMap<String, MetadataEntry>) -> Self {
        Self {
            data: MetadataFile { entries },
        }
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    fn entry(&self, id: &str) -> Result<&MetadataEntry, MetadataError> {
        self.data
            .entries
            .get(id)
            .ok_or_else(|| MetadataError::NotFound(id.to_string()))
    }
}

impl MetadataSource for JsonMetadataStore {
    fn fetch_anime(&self, id: &str, language: TitleLanguage) -> Result<AnimeInfo, MetadataError> {
        let entry = self.entry(id)?;

        // English lives in `title`; other languages fall back to it
        let title = match language {
            TitleLanguage::English => &entry.title,
            other => other.lookup(&entry.titles).unwrap_or_else(|| {
                debug!(id = %id, language = other.key(), "No localized title, using English");
                &entry.title
            }),
        };

        debug!(id = %id, title = %title, "Metadata hit");
        Ok(AnimeInfo {
            id: id.to_string(),
            title: title.clone(),
        })
    }

    fn fetch_episodes(
        &self,
        id: &str,
        range: EpisodeRange,
        language: TitleLanguage,
    ) -> Result<BTreeMap<u32, String>, MetadataError> {
        let entry = self.entry(id)?;

        let in_range = |(number, title): (&String, &String)| {
            let number: u32 = number.trim().parse().ok()?;
            (range.min..=range.max)
                .contains(&number)
                .then(|| (number, title.clone()))
        };

        let mut episodes: BTreeMap<u32, String> = entry.episodes.iter().filter_map(in_range).collect();

        if language != TitleLanguage::English {
            if let Some(localized) = language.lookup(&entry.episode_titles) {
                episodes.extend(localized.iter().filter_map(in_range));
            }
        }

        debug!(
            id = %id,
            count = episodes.len(),
            min = range.min,
            max = range.max,
            "Fetched episode titles"
        );

        Ok(episodes)
    }
}
