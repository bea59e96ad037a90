use std::path::PathBuf;

/// Lifecycle of one anime directory through a rename pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameState {
    Scanned,
    MetadataReady,
    Renaming,
    /// Dry run finished planning
    Planned,
    Renamed,
    PartiallyFailed,
}

impl RenameState {
    pub fn description(&self) -> &'static str {
        match self {
            RenameState::Scanned => "scanned",
            RenameState::MetadataReady => "metadata ready",
            RenameState::Renaming => "renaming",
            RenameState::Planned => "planned",
            RenameState::Renamed => "renamed",
            RenameState::PartiallyFailed => "partially failed",
        }
    }
}

/// What happened to a single rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dry run: would be renamed
    Planned,
    Renamed,
    /// Already has the target name
    Unchanged,
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// A single file or directory rename
#[derive(Debug, Clone)]
pub struct RenameOperation {
    /// Full path to the source
    pub source_path: PathBuf,
    /// Original name
    pub source_name: String,
    /// Full path to the destination
    pub destination_path: PathBuf,
    /// New name
    pub destination_name: String,
    pub outcome: Outcome,
}

impl RenameOperation {
    pub fn new(source_path: PathBuf, destination_name: String) -> Self {
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination_path = source_path
            .parent()
            .map(|p| p.join(&destination_name))
            .unwrap_or_else(|| PathBuf::from(&destination_name));

        let outcome = if source_name == destination_name {
            Outcome::Unchanged
        } else {
            Outcome::Planned
        };

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
            outcome,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.outcome == Outcome::Unchanged
    }
}

/// Why a media file was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoEpisodeNumber,
    NoEpisodeTitle(u32),
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Result of renaming one anime directory
#[derive(Debug, Clone)]
pub struct AnimeRenameReport {
    pub id: String,
    pub title: String,
    pub season: Option<u32>,
    pub part: Option<u32>,
    pub state: RenameState,
    pub directory: RenameOperation,
    pub files: Vec<RenameOperation>,
    pub skipped: Vec<SkippedFile>,
    pub ledger_path: Option<PathBuf>,
    pub ledger_error: Option<String>,
}

impl AnimeRenameReport {
    pub fn renamed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|op| matches!(op.outcome, Outcome::Renamed | Outcome::Planned))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        let dir_failed = usize::from(self.directory.outcome.is_failure());
        self.files.iter().filter(|op| op.outcome.is_failure()).count() + dir_failed
    }
}

/// An anime directory that was found but not processed
#[derive(Debug, Clone)]
pub struct SkippedDir {
    pub name: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a rename batch
#[derive(Debug, Clone)]
pub struct RenameResult {
    pub reports: Vec<AnimeRenameReport>,
    pub skipped: Vec<SkippedDir>,
    pub dry_run: bool,
}

impl RenameResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            reports: Vec::new(),
            skipped: Vec::new(),
            dry_run,
        }
    }

    pub fn renamed_count(&self) -> usize {
        self.reports.iter().map(|r| r.renamed_count()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.iter().map(|r| r.failed_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_operation_new() {
        let op = RenameOperation::new(
            PathBuf::from("/anime/12345S01"),
            "S01 - Example".to_string(),
        );

        assert_eq!(op.source_name, "12345S01");
        assert_eq!(op.destination_name, "S01 - Example");
        assert_eq!(op.destination_path, PathBuf::from("/anime/S01 - Example"));
        assert_eq!(op.outcome, Outcome::Planned);
    }

    #[test]
    fn test_rename_operation_same_name_is_unchanged() {
        let op = RenameOperation::new(PathBuf::from("/anime/Same.mkv"), "Same.mkv".to_string());
        assert!(op.is_unchanged());
    }

    #[test]
    fn test_report_counts() {
        let mut ok = RenameOperation::new(PathBuf::from("/a/1.mkv"), "x.mkv".to_string());
        ok.outcome = Outcome::Renamed;
        let mut failed = RenameOperation::new(PathBuf::from("/a/2.mkv"), "y.mkv".to_string());
        failed.outcome = Outcome::Failed("denied".to_string());
        let mut directory = RenameOperation::new(PathBuf::from("/a"), "b".to_string());
        directory.outcome = Outcome::Failed("busy".to_string());

        let report = AnimeRenameReport {
            id: "1".to_string(),
            title: "T".to_string(),
            season: None,
            part: None,
            state: RenameState::PartiallyFailed,
            directory,
            files: vec![ok, failed],
            skipped: vec![],
            ledger_path: None,
            ledger_error: None,
        };

        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failed_count(), 2);

        let mut result = RenameResult::new(false);
        assert!(result.is_empty());
        result.reports.push(report);
        assert_eq!(result.failed_count(), 2);
        assert_eq!(result.renamed_count(), 1);
    }

    #[test]
    fn test_state_description() {
        assert_eq!(RenameState::PartiallyFailed.description(), "partially failed");
    }
}
