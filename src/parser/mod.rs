mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// Anime directory: <id> or <id>S<season>[P<part>]
// Examples: "12345", "12345S01", "12345s2p3"
static ANIME_DIR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:[Ss](\d+)(?:[Pp](\d+))?)?$").unwrap());

// Release tags such as [Group] or (1080p) carry numbers that are not episodes
static BRACKETED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

// A part marker directly after a season marker: S01P02 -> S01
static SEASON_PART_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(S\d+)P\d+").unwrap());

static SEASON_EPISODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS\d+\s*E(\d+)").unwrap());

static EPISODE_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:episode|ep|e)[\s._-]*(\d+)\b").unwrap());

static DASH_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-\s(\d+)\b").unwrap());

static STANDALONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,4})\b").unwrap());

/// Parse a directory name into its id, season and part
pub fn parse_directory_name(name: &str) -> Result<AnimeDirName, ParseError> {
    let captures = ANIME_DIR_REGEX
        .captures(name)
        .ok_or_else(|| ParseError::UnrecognizedFormat(name.to_string()))?;

    let id = captures
        .get(1)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::UnrecognizedFormat(name.to_string()))?;
    // A number too large for u32 fails the grammar rather than reading as absent
    let number = |group: usize| -> Result<Option<u32>, ParseError> {
        captures
            .get(group)
            .map(|m| m.as_str().parse::<u32>())
            .transpose()
            .map_err(|_| ParseError::UnrecognizedFormat(name.to_string()))
    };
    let season = number(2)?;
    let part = number(3)?;

    Ok(AnimeDirName {
        id,
        season,
        part,
        original_name: name.to_string(),
    })
}

pub fn is_anime_dir_name(name: &str) -> bool {
    parse_directory_name(name).is_ok()
}

/// Regex based episode number extraction for common release naming schemes
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEpisodeParser;

impl EpisodeParser for DefaultEpisodeParser {
    fn episode_number(&self, file_name: &str) -> Option<u32> {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());

        let cleaned = BRACKETED_REGEX.replace_all(&stem, " ");
        let cleaned = SEASON_PART_REGEX.replace_all(&cleaned, "$1");
        let cleaned = cleaned.replace('_', " ");

        [
            &*SEASON_EPISODE_REGEX,
            &*EPISODE_MARKER_REGEX,
            &*DASH_NUMBER_REGEX,
        ]
        .iter()
        .find_map(|re| re.captures(&cleaned).and_then(|c| c.get(1)))
        .or_else(|| {
            STANDALONE_NUMBER_REGEX
                .captures_iter(&cleaned)
                .last()
                .and_then(|c| c.get(1))
        })
        .and_then(|m| m.as_str().parse().ok())
    }
}
