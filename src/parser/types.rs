use thiserror::Error;

/// Identity encoded in an anime directory name: `<id>` or `<id>S<season>[P<part>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeDirName {
    pub id: String,
    pub season: Option<u32>,
    pub part: Option<u32>,
    pub original_name: String,
}

impl AnimeDirName {
    pub fn has_season(&self) -> bool {
        self.season.is_some()
    }
}

/// Extracts the episode number from a media filename
pub trait EpisodeParser {
    fn episode_number(&self, file_name: &str) -> Option<u32>;
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Directory name does not match the scan format: {0}")]
    UnrecognizedFormat(String),
}
