pub mod cli;
pub mod collision;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod parser;
pub mod progress;
pub mod rename;
pub mod restore;
pub mod scanner;
pub mod template;

pub use collision::{next_available_name, resolve_collision, DirListing, NameKind};
pub use config::{load_config, Config, ConfigError, ConfigLayer};
pub use error::{AppError, ExitCode};
pub use ledger::{read_ledger, write_ledger, LedgerError, RenameLedger};
pub use metadata::{AnimeEntry, JsonMetadataStore, MetadataError, MetadataSource};
pub use parser::{parse_directory_name, AnimeDirName, DefaultEpisodeParser, EpisodeParser, ParseError};
pub use rename::{rename_all, rename_anime, RenameOptions, RenameResult};
pub use restore::{restore_from_path, RestoreError, RestoreOptions, RestoreResult};
pub use scanner::{scan_directory, DirectoryEntry, ScannerError};
pub use template::{parse_template, ParsedTemplate, RenderContext, TemplateError, Value};
