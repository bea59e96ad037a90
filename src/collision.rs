//! Keeps proposed names from overwriting existing directory entries by appending
//! a ` (n)` suffix, one above the highest suffix already in use.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Whether the trailing `.ext` of a name is kept outside the suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    File,
    Directory,
}

/// Split `name` into base and extension (with the dot). Directories and dotfiles
/// have no extension.
pub fn split_name(name: &str, kind: NameKind) -> (&str, &str) {
    if kind == NameKind::Directory {
        return (name, "");
    }
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Pick a name not present in `existing`.
///
/// Returns `name` unchanged when free. Otherwise returns `"<base> (n)<ext>"`
/// where `n` is one more than the largest all-digit ` (n)` suffix among
/// entries sharing the base name.
pub fn next_available_name<'a, I>(name: &str, existing: I, kind: NameKind) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let existing: BTreeSet<&str> = existing.into_iter().collect();

    if !existing.contains(name) {
        return name.to_string();
    }

    let (base, ext) = split_name(name, kind);

    let highest = existing
        .iter()
        .filter_map(|entry| {
            let (entry_base, _) = split_name(entry, kind);
            let digits = entry_base
                .strip_prefix(base)?
                .strip_prefix(" (")?
                .strip_suffix(')')?;
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.parse::<u64>().ok()
        })
        .max();

    // A suffix at u64::MAX has no successor; count up from 1 instead
    let mut index = highest.and_then(|n| n.checked_add(1)).unwrap_or(1);
    let mut candidate = format!("{} ({}){}", base, index, ext);

    while existing.contains(candidate.as_str()) {
        index += 1;
        candidate = format!("{} ({}){}", base, index, ext);
    }

    debug!(proposed = %name, resolved = %candidate, "Resolved name collision");

    candidate
}

/// Resolve `name` against the current contents of `dir` on disk
pub fn resolve_collision(dir: &Path, name: &str, kind: NameKind) -> io::Result<String> {
    if !dir.join(name).exists() {
        return Ok(name.to_string());
    }

    let listing = DirListing::load(dir)?;
    Ok(listing.resolve(name, kind))
}

/// In-memory snapshot of a directory's entry names.
///
/// Dry runs update the snapshot instead of the filesystem so later names in the
/// same batch see earlier planned renames.
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    names: BTreeSet<String>,
}

impl DirListing {
    pub fn load(dir: &Path) -> io::Result<Self> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            names.insert(entry?.file_name().to_string_lossy().to_string());
        }
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn resolve(&self, name: &str, kind: NameKind) -> String {
        next_available_name(name, self.names.iter().map(String::as_str), kind)
    }

    /// Record a rename of `from` to `to`
    pub fn rename(&mut self, from: &str, to: &str) {
        self.names.remove(from);
        self.names.insert(to.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_free_name_unchanged() {
        let existing = ["B.mkv", "A (1).mkv"];
        assert_eq!(
            next_available_name("A.mkv", existing, NameKind::File),
            "A.mkv"
        );
    }

    #[test]
    fn test_picks_one_above_highest_suffix() {
        let existing = ["A.mkv", "A (1).mkv", "A (3).mkv"];
        assert_eq!(
            next_available_name("A.mkv", existing, NameKind::File),
            "A (4).mkv"
        );
    }

    #[test]
    fn test_first_collision_gets_one() {
        assert_eq!(
            next_available_name("A.mkv", ["A.mkv"], NameKind::File),
            "A (1).mkv"
        );
    }

    #[test]
    fn test_suffix_at_integer_limit_counts_from_one() {
        let existing = ["A.mkv", "A (18446744073709551615).mkv"];
        assert_eq!(
            next_available_name("A.mkv", existing, NameKind::File),
            "A (1).mkv"
        );

        let existing = ["A.mkv", "A (1).mkv", "A (18446744073709551615).mkv"];
        assert_eq!(
            next_available_name("A.mkv", existing, NameKind::File),
            "A (2).mkv"
        );
    }

    #[test]
    fn test_non_numeric_suffix_ignored() {
        let existing = ["A.mkv", "A (v2).mkv", "A (2a).mkv", "A ().mkv"];
        assert_eq!(
            next_available_name("A.mkv", existing, NameKind::File),
            "A (1).mkv"
        );
    }

    #[test]
    fn test_directory_names_keep_dots() {
        let existing = ["S01 - Dr. Stone", "S01 - Dr. Stone (2)"];
        assert_eq!(
            next_available_name("S01 - Dr. Stone", existing, NameKind::Directory),
            "S01 - Dr. Stone (3)"
        );
    }

    #[test]
    fn test_never_returns_taken_name() {
        let existing = ["A.mkv", "A (1).mkv", "A (2).tar.mkv", "A (2).mkv.mkv"];
        let resolved = next_available_name("A.mkv", existing, NameKind::File);
        assert!(!existing.contains(&resolved.as_str()));
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("a.b.mkv", NameKind::File), ("a.b", ".mkv"));
        assert_eq!(split_name(".hidden", NameKind::File), (".hidden", ""));
        assert_eq!(split_name("noext", NameKind::File), ("noext", ""));
        assert_eq!(split_name("a.b", NameKind::Directory), ("a.b", ""));
    }

    #[test]
    fn test_resolve_collision_on_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A.mkv"), "").unwrap();
        fs::write(dir.path().join("A (1).mkv"), "").unwrap();
        fs::write(dir.path().join("A (3).mkv"), "").unwrap();

        assert_eq!(
            resolve_collision(dir.path(), "A.mkv", NameKind::File).unwrap(),
            "A (4).mkv"
        );
        assert_eq!(
            resolve_collision(dir.path(), "B.mkv", NameKind::File).unwrap(),
            "B.mkv"
        );
    }

    #[test]
    fn test_listing_tracks_renames() {
        let mut listing = DirListing::from_names(["a.mkv", "b.mkv"]);
        listing.rename("a.mkv", "Ep.mkv");

        assert!(!listing.contains("a.mkv"));
        assert_eq!(listing.resolve("Ep.mkv", NameKind::File), "Ep (1).mkv");
        assert_eq!(listing.resolve("a.mkv", NameKind::File), "a.mkv");
    }
}
