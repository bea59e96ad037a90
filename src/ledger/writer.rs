use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::collision::{resolve_collision, NameKind};

use super::types::RenameLedger;

/// Error types for ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Failed to write ledger file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize ledger: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read ledger file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("No ledger files found in {0}")]
    NoLedgersFound(PathBuf),
}

/// Write a ledger into `backup_dir`, never overwriting an earlier one
pub fn write_ledger(ledger: &RenameLedger, backup_dir: &Path) -> Result<PathBuf, LedgerError> {
    fs::create_dir_all(backup_dir)?;

    let filename = resolve_collision(backup_dir, &ledger.generate_filename(), NameKind::File)?;
    let path = backup_dir.join(filename);

    write_to_path(ledger, &path)?;

    Ok(path)
}

fn write_to_path(ledger: &RenameLedger, path: &Path) -> Result<(), LedgerError> {
    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, ledger)?;
    }

    fs::rename(&temp_path, path)?;

    info!("Ledger written to: {:?}", path);

    Ok(())
}
