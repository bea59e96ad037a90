use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace, warn};

use crate::collision::{DirListing, NameKind};
use crate::ledger::{ledger_label, ledger_paths, read_ledger, LedgerError, RenameLedger};
use crate::progress::Progress;

#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Directory '{path}' recorded in ledger '{ledger}' does not exist")]
    DirectoryMissing { path: PathBuf, ledger: String },

    #[error("Failed to list '{path}': {source}")]
    ListError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Dry run: would be restored
    Planned,
    Restored,
    /// The renamed file is gone
    NotFound,
    /// The original name is taken by another entry
    Conflict,
    Failed(String),
}

/// Putting one name back
#[derive(Debug, Clone)]
pub struct RestoreOperation {
    pub current_name: String,
    pub original_name: String,
    pub outcome: RestoreOutcome,
}

impl RestoreOperation {
    pub fn is_restored(&self) -> bool {
        matches!(
            self.outcome,
            RestoreOutcome::Restored | RestoreOutcome::Planned
        )
    }
}

/// Result of restoring one ledger
#[derive(Debug, Clone)]
pub struct LedgerRestoreReport {
    pub label: String,
    pub dir_path: PathBuf,
    pub files: Vec<RestoreOperation>,
    /// Present when the ledger knows the directory's original name
    pub directory: Option<RestoreOperation>,
}

impl LedgerRestoreReport {
    pub fn restored_count(&self) -> usize {
        self.files.iter().filter(|op| op.is_restored()).count()
    }

    /// Entries that were not found, conflicted or failed, directory included
    pub fn problem_count(&self) -> usize {
        self.files
            .iter()
            .chain(self.directory.iter())
            .filter(|op| !op.is_restored())
            .count()
    }
}

/// A ledger that could not be processed at all
#[derive(Debug, Clone)]
pub struct RestoreFailure {
    pub label: String,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RestoreResult {
    pub reports: Vec<LedgerRestoreReport>,
    pub failures: Vec<RestoreFailure>,
    pub dry_run: bool,
}

impl RestoreResult {
    pub fn restored_count(&self) -> usize {
        self.reports.iter().map(|r| r.restored_count()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || self.reports.iter().any(|r| r.problem_count() > 0)
    }
}

/// Prefix of the names renamed files hold between the two restore phases
const STAGING_PREFIX: &str = ".aniname-restore-";

/// A directory being restored into. Dry runs only update the listing.
struct RestoreDir<'a> {
    path: &'a Path,
    listing: DirListing,
    dry_run: bool,
}

impl<'a> RestoreDir<'a> {
    fn open(path: &'a Path, dry_run: bool) -> Result<Self, RestoreError> {
        let listing = DirListing::load(path).map_err(|source| RestoreError::ListError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path,
            listing,
            dry_run,
        })
    }

    fn move_entry(&mut self, from: &str, to: &str) -> std::io::Result<()> {
        if !self.dry_run {
            fs::rename(self.path.join(from), self.path.join(to))?;
        }
        self.listing.rename(from, to);
        Ok(())
    }

    fn done(&self) -> RestoreOutcome {
        if self.dry_run {
            RestoreOutcome::Planned
        } else {
            RestoreOutcome::Restored
        }
    }
}

/// Put every recorded file back in two phases.
///
/// Phase one moves each renamed file to a staging name, phase two moves it to
/// its original name. Names freed and reused within one rename batch therefore
/// restore regardless of the order the pairs are stored in.
fn restore_files(dir: &mut RestoreDir, ledger: &RenameLedger) -> Vec<RestoreOperation> {
    let mut ops = Vec::with_capacity(ledger.restore.len());
    let mut staged = Vec::new();

    for (new_name, old_name) in &ledger.restore {
        let outcome = if !dir.listing.contains(new_name) {
            RestoreOutcome::NotFound
        } else if new_name == old_name {
            RestoreOutcome::Restored
        } else {
            let staging = dir
                .listing
                .resolve(&format!("{}{}", STAGING_PREFIX, new_name), NameKind::File);
            match dir.move_entry(new_name, &staging) {
                Ok(()) => {
                    trace!(from = %new_name, to = %staging, "Staged for restore");
                    staged.push((ops.len(), staging));
                    dir.done()
                }
                Err(e) => {
                    error!(from = %new_name, error = %e, "Restore failed");
                    RestoreOutcome::Failed(e.to_string())
                }
            }
        };

        ops.push(RestoreOperation {
            current_name: new_name.clone(),
            original_name: old_name.clone(),
            outcome,
        });
    }

    for (index, staging) in staged {
        let op = &mut ops[index];

        if !dir.listing.contains(&op.original_name) {
            match dir.move_entry(&staging, &op.original_name) {
                Ok(()) => continue,
                Err(e) => {
                    error!(from = %op.current_name, to = %op.original_name, error = %e, "Restore failed");
                    op.outcome = RestoreOutcome::Failed(e.to_string());
                }
            }
        } else {
            op.outcome = RestoreOutcome::Conflict;
        }

        // Not restored: return the file to its renamed name, or the next free one
        let back = dir.listing.resolve(&op.current_name, NameKind::File);
        match dir.move_entry(&staging, &back) {
            Ok(()) => op.current_name = back,
            Err(e) => {
                error!(staging = %staging, error = %e, "Could not return staged file");
                op.outcome = RestoreOutcome::Failed(format!("left as '{}': {}", staging, e));
            }
        }
    }

    ops
}

fn restore_directory(parent: &Path, current: &str, original: &str, dry_run: bool) -> RestoreOperation {
    let outcome = match RestoreDir::open(parent, dry_run) {
        Err(e) => {
            warn!(error = %e, "Cannot restore directory name");
            RestoreOutcome::Failed(e.to_string())
        }
        Ok(mut parent_dir) => {
            if !parent_dir.listing.contains(current) {
                RestoreOutcome::NotFound
            } else if current == original {
                RestoreOutcome::Restored
            } else if parent_dir.listing.contains(original) {
                RestoreOutcome::Conflict
            } else {
                match parent_dir.move_entry(current, original) {
                    Ok(()) => parent_dir.done(),
                    Err(e) => RestoreOutcome::Failed(e.to_string()),
                }
            }
        }
    };

    RestoreOperation {
        current_name: current.to_string(),
        original_name: original.to_string(),
        outcome,
    }
}

/// Restore every file recorded in `ledger`, then the directory name if known
pub fn restore_ledger(
    ledger: &RenameLedger,
    label: &str,
    options: &RestoreOptions,
    progress: &mut Progress,
) -> Result<LedgerRestoreReport, RestoreError> {
    if !ledger.dir_exists() {
        return Err(RestoreError::DirectoryMissing {
            path: ledger.dir_path.clone(),
            ledger: label.to_string(),
        });
    }

    let dir_path = &ledger.dir_path;
    let mut dir = RestoreDir::open(dir_path, options.dry_run)?;
    let total = ledger.restore.len();

    info!("Restoring {} files in {:?}", total, dir_path);
    progress.restore_start(label, total);

    let files = restore_files(&mut dir, ledger);

    for (i, op) in files.iter().enumerate() {
        match &op.outcome {
            RestoreOutcome::NotFound => progress.warn(&format!("'{}' not found", op.current_name)),
            RestoreOutcome::Conflict => progress.warn(&format!(
                "Cannot restore '{}': '{}' already exists",
                op.current_name, op.original_name
            )),
            RestoreOutcome::Failed(reason) => progress.warn(&format!(
                "Could not restore '{}': {}",
                op.current_name, reason
            )),
            _ => progress.restore_progress(i + 1, total, &op.current_name, &op.original_name),
        }
    }

    let directory = match (&ledger.original_dir_name, dir_path.parent()) {
        (Some(original), Some(parent)) => {
            let current = ledger.dir_name();
            debug!("Restoring directory name {} -> {}", current, original);
            let op = restore_directory(parent, &current, original, options.dry_run);
            match &op.outcome {
                RestoreOutcome::Conflict => progress.warn(&format!(
                    "Directory '{}' left as is: '{}' already exists",
                    current, original
                )),
                RestoreOutcome::Failed(reason) => progress.warn(&format!(
                    "Could not restore directory '{}': {}",
                    current, reason
                )),
                _ => {}
            }
            Some(op)
        }
        _ => None,
    };

    Ok(LedgerRestoreReport {
        label: label.to_string(),
        dir_path: dir_path.clone(),
        files,
        directory,
    })
}

/// Restore from a single ledger file or every ledger in a backup folder.
///
/// Ledgers that cannot be read or whose directory is gone are reported and the
/// batch moves on to the next one.
pub fn restore_from_path(
    path: &Path,
    options: &RestoreOptions,
    progress: &mut Progress,
) -> Result<RestoreResult, RestoreError> {
    info!("Loading ledgers from: {:?}", path);

    let paths = ledger_paths(path)?;
    let mut result = RestoreResult {
        reports: Vec::new(),
        failures: Vec::new(),
        dry_run: options.dry_run,
    };

    for ledger_path in paths {
        let label = ledger_label(&ledger_path);

        let outcome = read_ledger(&ledger_path)
            .map_err(RestoreError::from)
            .and_then(|ledger| restore_ledger(&ledger, &label, options, progress));

        match outcome {
            Ok(report) => result.reports.push(report),
            Err(e) => {
                warn!(ledger = %label, error = %e, "Skipping ledger");
                progress.warn(&e.to_string());
                result.failures.push(RestoreFailure {
                    label,
                    path: ledger_path,
                    message: e.to_string(),
                });
            }
        }
    }

    progress.restore_complete(result.restored_count(), options.dry_run);

    Ok(result)
}
