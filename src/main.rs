use std::path::{Path, PathBuf};

use aniname::cli::Args;
use aniname::config::{load_config, Config};
use aniname::error::AppError;
use aniname::ledger::backup_dir_for;
use aniname::logging;
use aniname::metadata::{scan_anime_dirs, JsonMetadataStore, MetadataConfig};
use aniname::output::{display_dry_run, display_execution_result, display_restore_result};
use aniname::parser::DefaultEpisodeParser;
use aniname::progress::{should_use_colors, Progress};
use aniname::rename::{rename_all, RenameOptions};
use aniname::restore::{restore_from_path, RestoreOptions};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn display_error(e: std::io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}

fn run(args: Args) -> Result<(), AppError> {
    let mut progress = Progress::new_with_ui(args.verbose > 0, should_use_colors());

    if let Some(path) = &args.restore {
        info!("Restore mode: {:?}", path);
        return run_restore(path, args.dry, &mut progress);
    }

    let target_dir = args
        .target_dir
        .as_deref()
        .ok_or_else(|| AppError::Other("No target directory given".to_string()))?;

    let config = load_config(args.config.as_deref(), args.config_overrides())?;
    debug!(
        episode_format = config.episode_format.source(),
        season_format = config.season_format.source(),
        "Configuration loaded"
    );

    let target_dir = canonical_target(target_dir)?;
    run_rename(&args, &target_dir, &config, &mut progress)
}

fn canonical_target(target_dir: &Path) -> Result<PathBuf, AppError> {
    if !target_dir.exists() {
        return Err(AppError::DirectoryNotFound {
            path: target_dir.to_path_buf(),
        });
    }
    if !target_dir.is_dir() {
        return Err(AppError::NotADirectory {
            path: target_dir.to_path_buf(),
        });
    }
    target_dir
        .canonicalize()
        .map_err(|e| AppError::Other(format!("Cannot resolve {}: {}", target_dir.display(), e)))
}

fn run_rename(
    args: &Args,
    target_dir: &Path,
    config: &Config,
    progress: &mut Progress,
) -> Result<(), AppError> {
    // Step 1: Discover anime directories
    let skip = [config.backup_dir_name.as_str()];
    let scanned = scan_anime_dirs(
        target_dir,
        &config.media_extensions,
        &skip,
        &DefaultEpisodeParser,
    )?;
    progress.scan_complete(scanned.len());

    if scanned.is_empty() {
        return Err(AppError::NoAnimeDirectories {
            path: target_dir.to_path_buf(),
        });
    }
    info!("Found {} anime directories", scanned.len());

    // Step 2: Load metadata
    let metadata_config = match &args.metadata {
        Some(path) => MetadataConfig::at(path),
        None => MetadataConfig::for_target_dir(target_dir),
    };
    let source = JsonMetadataStore::load(&metadata_config)?;

    // Step 3: Rename
    let options = RenameOptions {
        dry_run: args.dry,
        backup_dir: backup_dir_for(target_dir, &config.backup_dir_name),
    };
    let result = rename_all(scanned, &source, config, &options, progress);

    let mut stdout = std::io::stdout();
    if args.dry {
        display_dry_run(&result, &mut stdout).map_err(display_error)?;
    } else {
        display_execution_result(&result, &mut stdout).map_err(display_error)?;
    }

    let failed = result.failed_count()
        + result
            .reports
            .iter()
            .filter(|r| r.ledger_error.is_some())
            .count();
    if failed > 0 {
        return Err(AppError::PartialFailure { failed });
    }

    Ok(())
}

fn run_restore(path: &Path, dry_run: bool, progress: &mut Progress) -> Result<(), AppError> {
    let options = RestoreOptions { dry_run };
    let result = restore_from_path(path, &options, progress)?;

    display_restore_result(&result, &mut std::io::stdout()).map_err(display_error)?;

    if result.has_failures() {
        let failed = result.failures.len()
            + result.reports.iter().map(|r| r.problem_count()).sum::<usize>();
        return Err(AppError::PartialFailure { failed });
    }

    Ok(())
}
