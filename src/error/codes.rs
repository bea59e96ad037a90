#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    DirectoryNotFound = 3,
    MetadataError = 4,
    NoAnimeDirectories = 5,
    /// The run finished but some renames or restores did not
    PartialFailure = 6,
    PermissionError = 7,
    LedgerError = 8,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::ConfigError as i32, 2);
        assert_eq!(ExitCode::DirectoryNotFound as i32, 3);
        assert_eq!(ExitCode::MetadataError as i32, 4);
        assert_eq!(ExitCode::NoAnimeDirectories as i32, 5);
        assert_eq!(ExitCode::PartialFailure as i32, 6);
        assert_eq!(ExitCode::PermissionError as i32, 7);
        assert_eq!(ExitCode::LedgerError as i32, 8);
    }

    #[test]
    fn test_exit_code_into_i32() {
        let code: i32 = ExitCode::NoAnimeDirectories.into();
        assert_eq!(code, 5);
    }
}
