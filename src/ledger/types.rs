use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Folder holding ledgers, created next to the scanned root
pub const BACKUP_DIR_NAME: &str = "ORIGINAL_EPISODE_FILENAMES";

/// Record of one anime directory's rename pass, used to restore original names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameLedger {
    /// Provider id of the anime
    #[serde(alias = "mal_id", deserialize_with = "id_from_string_or_number")]
    pub id: String,

    pub title: String,

    pub season: Option<u32>,

    pub part: Option<u32>,

    /// Directory the renamed files live in (its new name)
    pub dir_path: PathBuf,

    /// Number of files renamed
    pub rename_count: usize,

    /// New filename to original filename
    pub restore: BTreeMap<String, String>,

    /// Directory basename before the rename pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_dir_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl RenameLedger {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        season: Option<u32>,
        part: Option<u32>,
        dir_path: PathBuf,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            season,
            part,
            dir_path,
            rename_count: 0,
            restore: BTreeMap::new(),
            original_dir_name: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_original_dir_name(mut self, name: impl Into<String>) -> Self {
        self.original_dir_name = Some(name.into());
        self
    }

    /// Record a successful rename
    pub fn record(&mut self, new_name: impl Into<String>, old_name: impl Into<String>) {
        self.restore.insert(new_name.into(), old_name.into());
        self.rename_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.restore.is_empty()
    }

    /// Basename of the recorded directory
    pub fn dir_name(&self) -> String {
        self.dir_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.id.clone())
    }

    /// File name for this ledger inside the backup folder.
    ///
    /// The stem is cut to [`MAX_LEDGER_STEM_BYTES`] on a char boundary so that a
    /// directory name too long to rename to still yields a writable ledger.
    pub fn generate_filename(&self) -> String {
        let name = self.dir_name();
        let mut end = name.len().min(MAX_LEDGER_STEM_BYTES);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}.json", &name[..end])
    }

    pub fn dir_exists(&self) -> bool {
        self.dir_path.is_dir()
    }
}

/// Longest ledger file stem, leaving room for a collision suffix and `.json`
pub const MAX_LEDGER_STEM_BYTES: usize = 200;

/// Backup folder for a scan root: a sibling of the root
pub fn backup_dir_for(root: &Path, folder_name: &str) -> PathBuf {
    match root.parent() {
        Some(parent) => parent.join(folder_name),
        None => root.join(folder_name),
    }
}
