use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const METADATA: &str = r#"{
    "12345": {"title": "Example", "episodes": {"1": "Start", "2": "Middle"}}
}"#;

/// `<tmp>/library/12345S01` with two episodes, metadata and an empty config file
fn create_library() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let library = dir.path().join("library");
    let anime = library.join("12345S01");
    fs::create_dir_all(&anime).unwrap();
    fs::write(anime.join("[Grp] Example - 01.mkv"), "one").unwrap();
    fs::write(anime.join("[Grp] Example - 02.mkv"), "two").unwrap();
    fs::write(library.join(".aniname-metadata.json"), METADATA).unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    (dir, library)
}

fn aniname(tmp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("aniname").unwrap();
    cmd.env_remove("ANINAME_EPISODE_FORMAT")
        .env_remove("ANINAME_SEASON_FORMAT")
        .env_remove("ANINAME_BACKUP_DIR")
        .env_remove("ANINAME_SEASON_TITLE_LANGUAGE")
        .env_remove("ANINAME_EPISODE_TITLE_LANGUAGE")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(tmp.join("config.json"));
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("aniname")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename anime episode files"))
        .stdout(predicate::str::contains("--restore"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("aniname")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_target_dir() {
    Command::cargo_bin("aniname")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_dry_run_shows_plan_without_changes() {
    let (tmp, library) = create_library();

    aniname(tmp.path())
        .args(["--dry", library.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("-> S01 - Example"))
        .stdout(predicate::str::contains("-> S01E01 - Start.mkv"))
        .stdout(predicate::str::contains("2 files would be renamed"));

    assert!(library.join("12345S01").join("[Grp] Example - 01.mkv").exists());
    assert!(!tmp.path().join("ORIGINAL_EPISODE_FILENAMES").exists());
}

#[test]
fn test_rename_then_restore() {
    let (tmp, library) = create_library();

    aniname(tmp.path())
        .arg(&library)
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 files in 1 anime directories"));

    let renamed = library.join("S01 - Example");
    assert!(renamed.join("S01E01 - Start.mkv").exists());
    assert!(renamed.join("S01E02 - Middle.mkv").exists());

    let backup = tmp.path().join("ORIGINAL_EPISODE_FILENAMES");
    assert!(backup.join("S01 - Example.json").exists());

    aniname(tmp.path())
        .arg("--restore")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 2 names"));

    let original = library.join("12345S01");
    assert_eq!(
        fs::read_to_string(original.join("[Grp] Example - 01.mkv")).unwrap(),
        "one"
    );
    assert!(original.join("[Grp] Example - 02.mkv").exists());
    assert!(!renamed.exists());
}

#[test]
fn test_template_override_from_cli() {
    let (tmp, library) = create_library();

    aniname(tmp.path())
        .args([
            "--dry",
            "--episode-format",
            "{st|} - {en|}",
            library.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Example - 02.mkv"));
}

#[test]
fn test_nonexistent_directory() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("config.json"), "{}").unwrap();

    aniname(tmp.path())
        .arg("/nonexistent/path/12345")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_no_anime_directories() {
    let (tmp, _library) = create_library();
    let other = tmp.path().join("other");
    fs::create_dir_all(other.join("Some Show")).unwrap();

    aniname(tmp.path())
        .arg(&other)
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("No anime directories"));
}

#[test]
fn test_invalid_template_is_config_error() {
    let (tmp, library) = create_library();

    aniname(tmp.path())
        .args(["--season-format", "{st", library.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("template"));

    assert!(library.join("12345S01").exists());
}

#[test]
fn test_missing_metadata_file() {
    let (tmp, library) = create_library();
    fs::remove_file(library.join(".aniname-metadata.json")).unwrap();

    aniname(tmp.path())
        .arg(&library)
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_restore_missing_ledger_path() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("config.json"), "{}").unwrap();

    aniname(tmp.path())
        .args(["--restore", "/nonexistent/ledgers"])
        .assert()
        .failure()
        .code(8);
}
