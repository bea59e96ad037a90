//! Run configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, the JSON config
//! file, environment variables (a `.env` file is loaded by `main`), then
//! command-line overrides. The result is an immutable [`Config`] passed to
//! every rename and restore call.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::ledger::BACKUP_DIR_NAME;
use crate::metadata::TitleLanguage;
use crate::template::{parse_template, ParsedTemplate, TemplateError};

pub const DEFAULT_EPISODE_FORMAT: &str = "{S&sn|}{P&pn|}{E&en|}{{ - }}{et|}";
pub const DEFAULT_SEASON_FORMAT: &str = "{S&sn|}{P&pn|}{{ - }}{st|}";
pub const DEFAULT_MEDIA_EXTENSIONS: [&str; 5] = ["mkv", "mp4", "avi", "m4v", "webm"];

/// Environment variable names
pub const ENV_EPISODE_FORMAT: &str = "ANINAME_EPISODE_FORMAT";
pub const ENV_SEASON_FORMAT: &str = "ANINAME_SEASON_FORMAT";
pub const ENV_BACKUP_DIR: &str = "ANINAME_BACKUP_DIR";
pub const ENV_SEASON_TITLE_LANGUAGE: &str = "ANINAME_SEASON_TITLE_LANGUAGE";
pub const ENV_EPISODE_TITLE_LANGUAGE: &str = "ANINAME_EPISODE_TITLE_LANGUAGE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid naming template: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// One configuration layer; unset fields fall through to lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub episode_format: Option<String>,
    pub season_format: Option<String>,
    pub media_extensions: Option<Vec<String>>,
    pub backup_dir_name: Option<String>,
    /// `english`, `romaji` or `japanese`
    pub season_title_language: Option<String>,
    pub episode_title_language: Option<String>,
}

impl ConfigLayer {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_env() -> Self {
        Self {
            episode_format: env::var(ENV_EPISODE_FORMAT).ok(),
            season_format: env::var(ENV_SEASON_FORMAT).ok(),
            media_extensions: None,
            backup_dir_name: env::var(ENV_BACKUP_DIR).ok(),
            season_title_language: env::var(ENV_SEASON_TITLE_LANGUAGE).ok(),
            episode_title_language: env::var(ENV_EPISODE_TITLE_LANGUAGE).ok(),
        }
    }

    /// Values set in `upper` replace ours
    pub fn merge(self, upper: ConfigLayer) -> Self {
        Self {
            episode_format: upper.episode_format.or(self.episode_format),
            season_format: upper.season_format.or(self.season_format),
            media_extensions: upper.media_extensions.or(self.media_extensions),
            backup_dir_name: upper.backup_dir_name.or(self.backup_dir_name),
            season_title_language: upper.season_title_language.or(self.season_title_language),
            episode_title_language: upper.episode_title_language.or(self.episode_title_language),
        }
    }
}

/// Validated configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    pub episode_format: ParsedTemplate,
    pub season_format: ParsedTemplate,
    pub media_extensions: Vec<String>,
    pub backup_dir_name: String,
    pub season_title_language: TitleLanguage,
    pub episode_title_language: TitleLanguage,
}

fn parse_language(field: &str, value: Option<&str>) -> Result<TitleLanguage, ConfigError> {
    match value {
        None => Ok(TitleLanguage::default()),
        Some(value) => value
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", field, e))),
    }
}

impl Config {
    /// Fill unset values with defaults and parse the templates
    pub fn from_layer(layer: ConfigLayer) -> Result<Self, ConfigError> {
        let episode_format = parse_template(
            layer
                .episode_format
                .as_deref()
                .unwrap_or(DEFAULT_EPISODE_FORMAT),
        )?;
        let season_format = parse_template(
            layer
                .season_format
                .as_deref()
                .unwrap_or(DEFAULT_SEASON_FORMAT),
        )?;

        let media_extensions: Vec<String> = layer
            .media_extensions
            .unwrap_or_else(|| DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect())
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if media_extensions.is_empty() {
            return Err(ConfigError::InvalidValue(
                "media_extensions must list at least one extension".to_string(),
            ));
        }

        let backup_dir_name = layer
            .backup_dir_name
            .unwrap_or_else(|| BACKUP_DIR_NAME.to_string());

        if backup_dir_name.is_empty() || backup_dir_name.contains(|c: char| c == '/' || c == '\\') {
            return Err(ConfigError::InvalidValue(format!(
                "backup_dir_name must be a plain folder name, got \"{}\"",
                backup_dir_name
            )));
        }

        let season_title_language =
            parse_language("season_title_language", layer.season_title_language.as_deref())?;
        let episode_title_language =
            parse_language("episode_title_language", layer.episode_title_language.as_deref())?;

        Ok(Self {
            episode_format,
            season_format,
            media_extensions,
            backup_dir_name,
            season_title_language,
            episode_title_language,
        })
    }
}

/// Default config file location in the user's config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("aniname").join("config.json"))
}

/// Build the run configuration from all layers.
///
/// An explicitly given config file must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>, overrides: ConfigLayer) -> Result<Config, ConfigError> {
    let file_layer = match explicit {
        Some(path) => ConfigLayer::load(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                info!("Using config file {:?}", path);
                ConfigLayer::load(&path)?
            }
            _ => {
                debug!("No config file found, using defaults");
                ConfigLayer::default()
            }
        },
    };

    let layer = file_layer.merge(ConfigLayer::from_env()).merge(overrides);
    debug!(?layer, "Merged configuration layers");

    Config::from_layer(layer)
}
