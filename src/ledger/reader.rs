use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::types::*;
use super::writer::LedgerError;

/// Read and parse a ledger file
pub fn read_ledger(path: &Path) -> Result<RenameLedger, LedgerError> {
    let file = File::open(path).map_err(|e| LedgerError::ReadError {
        path: path.to_path_buf(),
        message: format!("Cannot open file: {}", e),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| LedgerError::ReadError {
        path: path.to_path_buf(),
        message: format!("Invalid JSON: {}", e),
    })
}

/// Ledger files selected by `path`: the file itself, or every `*.json` in a folder
pub fn ledger_paths(path: &Path) -> Result<Vec<PathBuf>, LedgerError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(LedgerError::ReadError {
            path: path.to_path_buf(),
            message: "No such file or directory".to_string(),
        });
    }

    let entries = fs::read_dir(path).map_err(|e| LedgerError::ReadError {
        path: path.to_path_buf(),
        message: format!("Cannot list folder: {}", e),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();

    if paths.is_empty() {
        return Err(LedgerError::NoLedgersFound(path.to_path_buf()));
    }

    paths.sort();
    Ok(paths)
}

/// Identifier shown to users for a ledger file
pub fn ledger_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
