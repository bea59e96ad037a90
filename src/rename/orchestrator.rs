use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::collision::{resolve_collision, DirListing, NameKind};
use crate::config::Config;
use crate::ledger::{write_ledger, RenameLedger};
use crate::metadata::{resolve_entry, AnimeEntry, MetadataSource, ScannedDir};
use crate::progress::Progress;

use super::name_builder::{build_dir_name, build_episode_name};
use super::types::{
    AnimeRenameReport, Outcome, RenameOperation, RenameResult, RenameState, SkipReason,
    SkippedDir, SkippedFile,
};

/// Options for a rename pass
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub dry_run: bool,
    /// Folder receiving one ledger per renamed anime directory
    pub backup_dir: PathBuf,
}

/// Where collision checks look for existing names
enum Namespace {
    /// Dry run: planned renames are applied to the snapshot only
    Planned(DirListing),
    Live(PathBuf),
}

impl Namespace {
    fn for_dir(dir: &Path, dry_run: bool) -> Self {
        if !dry_run {
            return Namespace::Live(dir.to_path_buf());
        }

        match DirListing::load(dir) {
            Ok(listing) => Namespace::Planned(listing),
            Err(e) => {
                warn!(dir = ?dir, error = %e, "Could not list directory, planning against an empty listing");
                Namespace::Planned(DirListing::default())
            }
        }
    }

    fn resolve(&self, name: &str, kind: NameKind) -> std::io::Result<String> {
        match self {
            Namespace::Planned(listing) => Ok(listing.resolve(name, kind)),
            Namespace::Live(dir) => resolve_collision(dir, name, kind),
        }
    }

    /// Apply the rename, or record it in the snapshot
    fn rename(&mut self, op: &mut RenameOperation) {
        match self {
            Namespace::Planned(listing) => {
                listing.rename(&op.source_name, &op.destination_name);
                op.outcome = Outcome::Planned;
            }
            Namespace::Live(_) => match fs::rename(&op.source_path, &op.destination_path) {
                Ok(()) => op.outcome = Outcome::Renamed,
                Err(e) => {
                    warn!(
                        from = %op.source_name,
                        to = %op.destination_name,
                        error = %e,
                        "Rename failed"
                    );
                    op.outcome = Outcome::Failed(e.to_string());
                }
            },
        }
    }
}

/// Build a rename plan for `name` inside `namespace`, resolving collisions
fn plan_operation(
    namespace: &Namespace,
    source_path: &Path,
    current_name: &str,
    proposed: String,
    kind: NameKind,
) -> RenameOperation {
    if proposed == current_name {
        return RenameOperation::new(source_path.to_path_buf(), proposed);
    }

    match namespace.resolve(&proposed, kind) {
        Ok(name) => RenameOperation::new(source_path.to_path_buf(), name),
        Err(e) => {
            let mut op = RenameOperation::new(source_path.to_path_buf(), proposed);
            op.outcome = Outcome::Failed(format!("collision check failed: {}", e));
            op
        }
    }
}

/// Rename the episode files and the directory of one anime, then write its ledger
pub fn rename_anime(
    entry: &AnimeEntry,
    config: &Config,
    options: &RenameOptions,
    progress: &mut Progress,
) -> AnimeRenameReport {
    let mut state = RenameState::Renaming;
    debug!(id = %entry.id, dir = %entry.dir_name, state = state.description(), "Starting rename");

    // Directory name
    let parent = entry
        .dir_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut parent_ns = Namespace::for_dir(&parent, options.dry_run);
    let mut directory = plan_operation(
        &parent_ns,
        &entry.dir_path,
        &entry.dir_name,
        build_dir_name(entry, config),
        NameKind::Directory,
    );

    // Episode files
    let mut files_ns = Namespace::for_dir(&entry.dir_path, options.dry_run);
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    let mut episodes: Vec<_> = entry.files.iter().collect();
    episodes.sort_by(|a, b| a.path.cmp(&b.path));
    let total = episodes.len();

    let mut ledger = RenameLedger::new(
        entry.id.as_str(),
        entry.title.as_str(),
        entry.season,
        entry.part,
        directory.destination_path.clone(),
    );

    for (i, file) in episodes.into_iter().enumerate() {
        let Some(number) = file.episode_number else {
            debug!(file = %file.file_name, "No episode number, skipping");
            skipped.push(SkippedFile {
                file_name: file.file_name.clone(),
                reason: SkipReason::NoEpisodeNumber,
            });
            continue;
        };

        let Some(title) = entry.episode_title(number) else {
            debug!(file = %file.file_name, episode = number, "No episode title, skipping");
            skipped.push(SkippedFile {
                file_name: file.file_name.clone(),
                reason: SkipReason::NoEpisodeTitle(number),
            });
            continue;
        };

        let proposed = build_episode_name(entry, file, number, title, config);
        let mut op = plan_operation(
            &files_ns,
            &file.path,
            &file.file_name,
            proposed,
            NameKind::File,
        );

        if op.outcome == Outcome::Planned {
            files_ns.rename(&mut op);
        }

        match &op.outcome {
            Outcome::Renamed => ledger.record(op.destination_name.as_str(), op.source_name.as_str()),
            Outcome::Failed(reason) => progress.warn(&format!(
                "Could not rename '{}': {}",
                op.source_name, reason
            )),
            _ => {}
        }

        if !op.is_unchanged() {
            progress.rename_progress(i + 1, total, &op.source_name, &op.destination_name);
        }

        files.push(op);
    }

    // The directory is renamed even when some files failed
    if directory.outcome == Outcome::Planned {
        parent_ns.rename(&mut directory);
    }
    match &directory.outcome {
        Outcome::Renamed => {
            info!("Renamed directory '{}' -> '{}'", directory.source_name, directory.destination_name);
            ledger = ledger.with_original_dir_name(directory.source_name.as_str());
        }
        Outcome::Failed(reason) => progress.warn(&format!(
            "Could not rename directory '{}': {}",
            directory.source_name, reason
        )),
        _ => {}
    }

    let mut ledger_path = None;
    let mut ledger_error = None;

    let dir_renamed = directory.outcome == Outcome::Renamed;
    if !options.dry_run && (!ledger.is_empty() || dir_renamed) {
        match write_ledger(&ledger, &options.backup_dir) {
            Ok(path) => {
                progress.ledger_written(&path);
                ledger_path = Some(path);
            }
            Err(e) => {
                warn!(id = %entry.id, error = %e, "Failed to write ledger");
                progress.warn(&format!("Could not write ledger for '{}': {}", entry.dir_name, e));
                ledger_error = Some(e.to_string());
            }
        }
    }

    let any_failed =
        directory.outcome.is_failure() || files.iter().any(|op| op.outcome.is_failure());

    state = if any_failed {
        RenameState::PartiallyFailed
    } else if options.dry_run {
        RenameState::Planned
    } else {
        RenameState::Renamed
    };

    info!(
        id = %entry.id,
        renamed = ledger.rename_count,
        skipped = skipped.len(),
        state = state.description(),
        "Finished anime directory"
    );

    AnimeRenameReport {
        id: entry.id.clone(),
        title: entry.title.clone(),
        season: entry.season,
        part: entry.part,
        state,
        directory,
        files,
        skipped,
        ledger_path,
        ledger_error,
    }
}

/// Resolve metadata for every scanned directory and rename them one at a time
pub fn rename_all(
    scanned: Vec<ScannedDir>,
    source: &dyn MetadataSource,
    config: &Config,
    options: &RenameOptions,
    progress: &mut Progress,
) -> RenameResult {
    let mut result = RenameResult::new(options.dry_run);
    let total = scanned.len();

    info!("Preparing to rename {} anime directories", total);

    for (i, dir) in scanned.into_iter().enumerate() {
        let name = dir.name.original_name.clone();
        let path = dir.path.clone();

        if !dir.is_renamable() {
            debug!(dir = %name, "No numbered media files, skipping");
            result.skipped.push(SkippedDir {
                name,
                path,
                reason: "no episode files".to_string(),
            });
            continue;
        }

        let mut entry = match resolve_entry(dir, source, config.season_title_language) {
            Ok(entry) => entry,
            Err(e) => {
                progress.warn(&format!("Skipping '{}': {}", name, e));
                result.skipped.push(SkippedDir {
                    name,
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        debug!(id = %entry.id, state = RenameState::MetadataReady.description(), "Metadata resolved");

        if let Err(e) = entry.load_episode_titles(source, config.episode_title_language) {
            progress.warn(&format!("Skipping '{}': {}", name, e));
            result.skipped.push(SkippedDir {
                name,
                path,
                reason: e.to_string(),
            });
            continue;
        }

        progress.anime_start(i + 1, total, &entry.dir_name, &entry.title);
        result.reports.push(rename_anime(&entry, config, options, progress));
    }

    progress.rename_complete(result.renamed_count(), result.failed_count(), options.dry_run);

    result
}
