use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn zealot(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zealot").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn first_line(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[test]
fn test_folder_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    let created = zealot(home)
        .args(["folder", "create", "  Work  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Folder created: Work"));
    let folder_id = first_line(&created.get_output().stdout);
    assert!(!folder_id.is_empty());

    zealot(home)
        .args(["new", "-f", &folder_id[..8], "-T", "Plan", "-c", "Ship it"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note created: Plan"));

    zealot(home)
        .args(["list", "-f", &folder_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan"));

    zealot(home)
        .args(["list", "--unfiled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));

    zealot(home)
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work").and(predicate::str::contains("All Notes")));

    zealot(home)
        .args(["folder", "delete", &folder_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 notes moved to All Notes"));

    zealot(home)
        .args(["list", "--unfiled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan"));
}

#[test]
fn test_edit_and_delete_note() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    let created = zealot(home)
        .args(["new", "-T", "Draft", "-c", "first"])
        .assert()
        .success();
    let note_id = first_line(&created.get_output().stdout);

    zealot(home)
        .args(["edit", &note_id, "-c", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note saved: Draft"));

    zealot(home)
        .args(["view", &note_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("second").and(predicate::str::contains("first").not()));

    zealot(home)
        .args(["delete", &note_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted: Draft"));

    zealot(home)
        .args(["view", &note_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No note matches"));
}

#[test]
fn test_blank_note_is_not_created() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zealot(home)
        .args(["new", "-T", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to save"));

    zealot(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));
}

#[test]
fn test_corrupt_storage_still_opens() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let storage = home.join("storage");
    std::fs::create_dir_all(&storage).unwrap();
    std::fs::write(storage.join("zealot-notes.json"), "{{{ not json").unwrap();
    std::fs::write(
        storage.join("zealot-folders.json"),
        r#"[{"id":"f1","name":"Kept","createdAt":1}, {"id":"f2"}]"#,
    )
    .unwrap();

    zealot(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));

    zealot(home)
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept"));
}

#[test]
fn test_untitled_note_in_listing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zealot(home)
        .args(["new", "-c", "body without a title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note created: Untitled Note"));

    zealot(home)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Untitled Note"));
}

#[test]
fn test_failed_repair_write_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let storage = home.join("storage");
    std::fs::create_dir_all(&storage).unwrap();
    std::fs::write(home.join("config.json"), r#"{"storage_quota": 10}"#).unwrap();
    std::fs::write(
        storage.join("zealot-notes.json"),
        r#"[{"id":"n1","title":"Orphan","content":"","folderId":"gone","createdAt":1,"updatedAt":2}]"#,
    )
    .unwrap();

    zealot(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes may not be saved").and(predicate::str::contains("Orphan")));
}

#[test]
fn test_config_set_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zealot(home)
        .args(["config", "preview-length", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preview-length set to 5"));

    zealot(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview-length = 5").and(predicate::str::contains("storage-quota = none")));

    zealot(home)
        .args(["config", "colour", "blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_version_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    zealot(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(concat!("zealot ", env!("CARGO_PKG_VERSION"))));
}
