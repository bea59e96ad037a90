mod name_builder;
mod orchestrator;
mod types;

pub use name_builder::{build_dir_name, build_episode_name, format_zeros};
pub use orchestrator::{rename_all, rename_anime, RenameOptions};
pub use types::*;
