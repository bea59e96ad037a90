mod resolver;
mod store;
mod types;

pub use resolver::{resolve_entry, scan_anime_dirs, AnimeEntry, ScannedDir};
pub use store::JsonMetadataStore;
pub use types::*;
