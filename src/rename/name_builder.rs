use crate::config::Config;
use crate::metadata::AnimeEntry;
use crate::scanner::EpisodeFile;
use crate::template::{Placeholder, RenderContext};

/// Zero-pad `number` to the width of `max_number`, at least two digits
pub fn format_zeros(number: u32, max_number: u32) -> String {
    let width = max_number.max(10).to_string().len();
    format!("{:0width$}", number, width = width)
}

/// Placeholders available when naming a season directory
pub fn season_context(entry: &AnimeEntry) -> RenderContext {
    RenderContext::new()
        .with(
            Placeholder::SeasonNumber,
            entry.season.map(|s| format_zeros(s, 1)),
        )
        .with(
            Placeholder::PartNumber,
            entry.part.map(|p| format_zeros(p, 1)),
        )
        .with(Placeholder::SeasonTitle, entry.title.as_str())
}

/// Placeholders available when naming an episode file
pub fn episode_context(entry: &AnimeEntry, episode_number: u32, episode_title: &str) -> RenderContext {
    let max = entry.range.map_or(episode_number, |r| r.max.max(episode_number));

    season_context(entry)
        .with(
            Placeholder::EpisodeNumber,
            format_zeros(episode_number, max),
        )
        .with(Placeholder::EpisodeTitle, episode_title)
}

/// Render the new directory name for an anime
pub fn build_dir_name(entry: &AnimeEntry, config: &Config) -> String {
    config.season_format.render(&season_context(entry))
}

/// Render the new file name for an episode, keeping its extension
pub fn build_episode_name(
    entry: &AnimeEntry,
    file: &EpisodeFile,
    episode_number: u32,
    episode_title: &str,
    config: &Config,
) -> String {
    let stem = config
        .episode_format
        .render(&episode_context(entry, episode_number, episode_title));
    format!("{}{}", stem, file.extension())
}
