//! Integration tests for the recr binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn recr() -> Command {
    Command::cargo_bin("recr").unwrap()
}

#[test]
fn help_lists_subcommands() {
    recr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_missing_file_fails() {
    recr()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_rejects_non_pdf_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.txt");
    std::fs::write(&path, "plain text").unwrap();

    recr()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn process_rejects_bad_magic_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.pdf");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"this is not a pdf").unwrap();

    recr()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid PDF"));
}

#[test]
fn batch_with_no_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf");

    recr()
        .args(["batch", pattern.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}

#[test]
fn config_path_prints_location() {
    recr()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}

#[test]
fn fetch_without_api_key_fails() {
    recr()
        .args(["fetch", "some-folder-id"])
        .env_remove("GOOGLE_DRIVE_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key configured"));
}
