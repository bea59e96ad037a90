mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::metadata::MetadataError;
use crate::restore::RestoreError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("No anime directories found in {path}")]
    NoAnimeDirectories { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metadata error: {message}")]
    Metadata {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Ledger error: {message}")]
    Ledger {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("{failed} operations failed")]
    PartialFailure { failed: usize },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::NoAnimeDirectories { .. } => ExitCode::NoAnimeDirectories,
            AppError::Config(_) => ExitCode::ConfigError,
            AppError::Metadata { .. } => ExitCode::MetadataError,
            AppError::Ledger { .. } => ExitCode::LedgerError,
            AppError::PartialFailure { .. } => ExitCode::PartialFailure,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::NoAnimeDirectories { path } => {
                let mut msg = format!("No anime directories found under:\n  {}\n\n", path.display());
                msg.push_str("Expected directory names:\n");
                msg.push_str("  <id>                    Examples: 12345\n");
                msg.push_str("  <id>S<season>[P<part>]  Examples: 12345S01, 12345S01P02\n");
                msg
            }

            AppError::Config(err) => {
                format!(
                    "{}\n\n\
                     Check the config file, the ANINAME_* environment variables \
                     and the --episode-format/--season-format flags.",
                    err
                )
            }

            AppError::Metadata { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Metadata error:\n  {}\n{}\n\
                     Provide a metadata file with --metadata or place \
                     .aniname-metadata.json in the target directory.",
                    message, path_info
                )
            }

            AppError::Ledger { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("Path: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Ledger error:\n  {}\n{}\n\
                     Pass a ledger file or the backup folder holding them.",
                    message, path_info
                )
            }

            AppError::PartialFailure { failed } => {
                format!(
                    "{} operations did not complete. See the messages above; \
                     everything else was applied.",
                    failed
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<MetadataError> for AppError {
    fn from(err: MetadataError) -> Self {
        let path = match &err {
            MetadataError::MissingFile(path) => Some(path.clone()),
            _ => None,
        };
        AppError::Metadata {
            path,
            message: err.to_string(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let path = match &err {
            LedgerError::ReadError { path, .. } => Some(path.clone()),
            LedgerError::NoLedgersFound(path) => Some(path.clone()),
            _ => None,
        };
        AppError::Ledger {
            path,
            message: err.to_string(),
        }
    }
}

impl From<RestoreError> for AppError {
    fn from(err: RestoreError) -> Self {
        match err {
            RestoreError::Ledger(e) => e.into(),
            RestoreError::DirectoryMissing { path, .. } => AppError::DirectoryNotFound { path },
            RestoreError::ListError { path, source } => {
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    AppError::PermissionDenied { path }
                } else {
                    AppError::Other(format!("Failed to list {}: {}", path.display(), source))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::DirectoryNotFound);

        let err = AppError::NoAnimeDirectories {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::NoAnimeDirectories);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);

        let err = AppError::PartialFailure { failed: 2 };
        assert_eq!(err.exit_code(), ExitCode::PartialFailure);
    }

    #[test]
    fn test_detailed_message_includes_context() {
        let err = AppError::NoAnimeDirectories {
            path: PathBuf::from("/library"),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("/library"));
        assert!(msg.contains("12345S01P02"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::DirectoryNotFound);
    }

    #[test]
    fn test_config_error_conversion() {
        let err = crate::config::Config::from_layer(crate::config::ConfigLayer {
            episode_format: Some("{unclosed".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        let app_err: AppError = err.into();
        assert_eq!(app_err.exit_code(), ExitCode::ConfigError);
    }

    #[test]
    fn test_ledger_error_keeps_path() {
        let err = LedgerError::NoLedgersFound(PathBuf::from("/backup"));
        let app_err: AppError = RestoreError::Ledger(err).into();

        assert_eq!(app_err.exit_code(), ExitCode::LedgerError);
        assert!(app_err.detailed_message().contains("/backup"));
    }

    #[test]
    fn test_metadata_error_conversion() {
        let app_err: AppError = MetadataError::MissingFile(PathBuf::from("/m.json")).into();
        assert_eq!(app_err.exit_code(), ExitCode::MetadataError);
    }
}
