use crate::rename::{AnimeRenameReport, Outcome, RenameResult, SkipReason};
use crate::restore::{RestoreOutcome, RestoreResult};
use std::io::{self, Write};

fn season_label(report: &AnimeRenameReport) -> String {
    match (report.season, report.part) {
        (Some(s), Some(p)) => format!(" S{}P{}", s, p),
        (Some(s), None) => format!(" S{}", s),
        _ => String::new(),
    }
}

fn write_skipped_dirs(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    if result.skipped.is_empty() {
        return Ok(());
    }

    writeln!(writer, "Skipped directories:")?;
    for dir in &result.skipped {
        writeln!(writer, "  - {} ({})", dir.name, dir.reason)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Display dry run results in a formatted output
pub fn display_dry_run(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Anime directories: {}", result.reports.len())?;
    writeln!(writer)?;

    write_skipped_dirs(result, writer)?;

    if result.reports.is_empty() {
        writeln!(writer, "Nothing to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;

    for (i, report) in result.reports.iter().enumerate() {
        writeln!(writer)?;
        writeln!(
            writer,
            "  {}. [{}{}] {}",
            i + 1,
            report.id,
            season_label(report),
            report.title
        )?;

        let dir = &report.directory;
        if dir.is_unchanged() {
            writeln!(writer, "     Directory: {} (unchanged)", dir.source_name)?;
        } else {
            writeln!(writer, "     Directory: {}", dir.source_name)?;
            writeln!(writer, "             -> {}", dir.destination_name)?;
        }

        for op in report.files.iter().filter(|op| !op.is_unchanged()) {
            writeln!(writer, "     {}", op.source_name)?;
            writeln!(writer, "       -> {}", op.destination_name)?;
        }

        for skipped in &report.skipped {
            let reason = match skipped.reason {
                SkipReason::NoEpisodeNumber => "no episode number".to_string(),
                SkipReason::NoEpisodeTitle(n) => format!("no title for episode {}", n),
            };
            writeln!(writer, "     [skip] {} ({})", skipped.file_name, reason)?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} files would be renamed", result.renamed_count())?;
    writeln!(writer)?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    write_skipped_dirs(result, writer)?;

    writeln!(
        writer,
        "Renamed {} files in {} anime directories.",
        result.renamed_count(),
        result.reports.len()
    )?;

    for report in &result.reports {
        for op in &report.files {
            if let Outcome::Failed(reason) = &op.outcome {
                writeln!(writer, "  [failed] {}: {}", op.source_name, reason)?;
            }
        }
        if let Outcome::Failed(reason) = &report.directory.outcome {
            writeln!(
                writer,
                "  [failed] directory {}: {}",
                report.directory.source_name, reason
            )?;
        }
        if let Some(error) = &report.ledger_error {
            writeln!(writer, "  [failed] ledger for {}: {}", report.directory.source_name, error)?;
        }
    }

    Ok(())
}

/// Display restore results, dry run or not
pub fn display_restore_result(result: &RestoreResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    if result.dry_run {
        writeln!(writer, "========================================")?;
        writeln!(writer, "           DRY RUN (restore)")?;
        writeln!(writer, "========================================")?;
        writeln!(writer)?;
    }

    for report in &result.reports {
        writeln!(writer, "{} ({})", report.label, report.dir_path.display())?;

        for op in &report.files {
            let status = match &op.outcome {
                RestoreOutcome::Planned => "plan".to_string(),
                RestoreOutcome::Restored => "ok".to_string(),
                RestoreOutcome::NotFound => "not found".to_string(),
                RestoreOutcome::Conflict => "conflict".to_string(),
                RestoreOutcome::Failed(reason) => format!("failed: {}", reason),
            };
            writeln!(
                writer,
                "  [{}] {} -> {}",
                status, op.current_name, op.original_name
            )?;
        }

        if let Some(dir) = &report.directory {
            if dir.is_restored() && dir.current_name != dir.original_name {
                writeln!(writer, "  Directory: {} -> {}", dir.current_name, dir.original_name)?;
            } else if !dir.is_restored() {
                writeln!(writer, "  Directory: {} left as is", dir.current_name)?;
            }
        }
    }

    if !result.failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Ledgers not restored:")?;
        for failure in &result.failures {
            writeln!(writer, "  - {}: {}", failure.label, failure.message)?;
        }
    }

    writeln!(writer)?;
    if result.dry_run {
        writeln!(
            writer,
            "{} names would be restored. Run without --dry to apply.",
            result.restored_count()
        )?;
    } else {
        writeln!(writer, "Restored {} names.", result.restored_count())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::{RenameOperation, RenameState, SkippedDir, SkippedFile};
    use crate::restore::{LedgerRestoreReport, RestoreFailure, RestoreOperation};
    use std::path::PathBuf;

    fn create_test_result(dry_run: bool) -> RenameResult {
        let mut result = RenameResult::new(dry_run);

        let mut file = RenameOperation::new(
            PathBuf::from("/anime/12345S01/[Grp] Example - 01.mkv"),
            "S01E01 - Start.mkv".to_string(),
        );
        let mut failed = RenameOperation::new(
            PathBuf::from("/anime/12345S01/[Grp] Example - 02.mkv"),
            "S01E02 - Next.mkv".to_string(),
        );
        let mut directory = RenameOperation::new(
            PathBuf::from("/anime/12345S01"),
            "S01 - Example".to_string(),
        );
        if !dry_run {
            file.outcome = Outcome::Renamed;
            failed.outcome = Outcome::Failed("Permission denied".to_string());
            directory.outcome = Outcome::Renamed;
        }

        result.reports.push(AnimeRenameReport {
            id: "12345".to_string(),
            title: "Example".to_string(),
            season: Some(1),
            part: None,
            state: RenameState::Planned,
            directory,
            files: vec![file, failed],
            skipped: vec![SkippedFile {
                file_name: "extra 03.mkv".to_string(),
                reason: SkipReason::NoEpisodeTitle(3),
            }],
            ledger_path: None,
            ledger_error: None,
        });
        result.skipped.push(SkippedDir {
            name: "999".to_string(),
            path: PathBuf::from("/anime/999"),
            reason: "No metadata for anime 999".to_string(),
        });

        result
    }

    #[test]
    fn test_display_dry_run() {
        let result = create_test_result(true);
        let mut output = Vec::new();

        display_dry_run(&result, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("DRY RUN"));
        assert!(output_str.contains("[12345 S1] Example"));
        assert!(output_str.contains("-> S01 - Example"));
        assert!(output_str.contains("-> S01E01 - Start.mkv"));
        assert!(output_str.contains("[skip] extra 03.mkv (no title for episode 3)"));
        assert!(output_str.contains("999 (No metadata for anime 999)"));
        assert!(output_str.contains("2 files would be renamed"));
    }

    #[test]
    fn test_display_dry_run_empty() {
        let result = RenameResult::new(true);
        let mut output = Vec::new();

        display_dry_run(&result, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("DRY RUN"));
        assert!(output_str.contains("Nothing to rename"));
    }

    #[test]
    fn test_display_execution_result() {
        let result = create_test_result(false);
        let mut output = Vec::new();

        display_execution_result(&result, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("Renamed 1 files in 1 anime directories"));
        assert!(output_str.contains("[failed] [Grp] Example - 02.mkv: Permission denied"));
    }

    #[test]
    fn test_display_restore_result() {
        let result = RestoreResult {
            reports: vec![LedgerRestoreReport {
                label: "S01 - Example".to_string(),
                dir_path: PathBuf::from("/anime/S01 - Example"),
                files: vec![
                    RestoreOperation {
                        current_name: "S01E01 - Start.mkv".to_string(),
                        original_name: "ep 01.mkv".to_string(),
                        outcome: RestoreOutcome::Restored,
                    },
                    RestoreOperation {
                        current_name: "S01E02 - Next.mkv".to_string(),
                        original_name: "ep 02.mkv".to_string(),
                        outcome: RestoreOutcome::NotFound,
                    },
                ],
                directory: Some(RestoreOperation {
                    current_name: "S01 - Example".to_string(),
                    original_name: "12345S01".to_string(),
                    outcome: RestoreOutcome::Restored,
                }),
            }],
            failures: vec![RestoreFailure {
                label: "Gone".to_string(),
                path: PathBuf::from("/backup/Gone.json"),
                message: "Directory '/anime/Gone' recorded in ledger 'Gone' does not exist"
                    .to_string(),
            }],
            dry_run: false,
        };
        let mut output = Vec::new();

        display_restore_result(&result, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("[ok] S01E01 - Start.mkv -> ep 01.mkv"));
        assert!(output_str.contains("[not found] S01E02 - Next.mkv"));
        assert!(output_str.contains("Directory: S01 - Example -> 12345S01"));
        assert!(output_str.contains("- Gone: Directory"));
        assert!(output_str.contains("Restored 1 names."));
    }
}
