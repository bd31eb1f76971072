#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const ARCHIVE: &str = "From alice@example.org Mon Apr 20 02:27:10 2015\n\
Subject: one\n\
\n\
From the desk of nobody\n\
From alice@example.org Tue Apr 21 16:00:00 2015\n\
Subject: two\n\
\n\
body two\n";

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mboxscan-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_archive(dir: &PathBuf, contents: &str) -> PathBuf {
    let path = dir.join("archive.mbox");
    std::fs::write(&path, contents).expect("archive should be writable");
    path
}

fn mboxscan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mboxscan"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("mboxscan should run")
}

#[test]
fn count_reports_messages_as_json() {
    let dir = unique_temp_dir("count");
    let archive = write_archive(&dir, ARCHIVE);

    let output = mboxscan(&["--format", "json", "count", archive.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("message-count.schema.json"));
    assert!(stdout.contains("\"messages\":2"));
    assert!(stdout.contains(&format!("\"bytes\":{}", ARCHIVE.len())));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn count_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mboxscan"))
        .args(["--log-level", "error", "--format", "raw", "count", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("mboxscan should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(ARCHIVE.as_bytes())
        .expect("stdin should accept the archive");

    let output = child.wait_with_output().expect("mboxscan should finish");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
}

#[test]
fn list_prints_offsets_and_envelopes() {
    let dir = unique_temp_dir("list");
    let archive = write_archive(&dir, ARCHIVE);
    let second_offset = ARCHIVE
        .find("From alice@example.org Tue")
        .expect("second separator should exist");

    let output = mboxscan(&["--format", "json", "list", archive.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"index\":0"));
    assert!(lines[0].contains("\"offset\":0"));
    assert!(lines[0].contains("\"sender\":\"alice@example.org\""));
    assert!(lines[1].contains(&format!("\"offset\":{second_offset}")));
    assert!(lines[1].contains("\"date\":\"2015-04-21T16:00:00\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn split_writes_one_file_per_message() {
    let dir = unique_temp_dir("split");
    let archive = write_archive(&dir, ARCHIVE);
    let out = dir.join("out");

    let output = mboxscan(&[
        "--format",
        "json",
        "split",
        archive.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let first = std::fs::read_to_string(out.join("000000.eml")).expect("first message written");
    let second = std::fs::read_to_string(out.join("000001.eml")).expect("second message written");
    assert_eq!(first, "Subject: one\n\nFrom the desk of nobody\n");
    assert_eq!(second, "Subject: two\n\nbody two\n");
    assert!(!out.join("000002.eml").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn split_can_keep_separator_lines() {
    let dir = unique_temp_dir("split-keep");
    let archive = write_archive(&dir, ARCHIVE);
    let out = dir.join("out");

    let output = mboxscan(&[
        "split",
        archive.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--keep-separator",
    ]);

    assert!(output.status.success());
    let first = std::fs::read_to_string(out.join("000000.eml")).expect("first message written");
    assert!(first.starts_with("From alice@example.org Mon Apr 20 02:27:10 2015\n"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn archive_without_separator_returns_60() {
    let dir = unique_temp_dir("invalid");
    let archive = write_archive(&dir, "From notanaddr Mon Apr 20 02:27:10 2015\nbody\n");

    let output = mboxscan(&["count", archive.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected end of stream"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_message_returns_60() {
    let dir = unique_temp_dir("oversized");
    let archive = write_archive(&dir, ARCHIVE);

    let output = mboxscan(&[
        "--max-message-size",
        "32",
        "count",
        archive.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("token too large"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn max_message_size_from_environment() {
    let dir = unique_temp_dir("env");
    let archive = write_archive(&dir, ARCHIVE);

    let output = Command::new(env!("CARGO_BIN_EXE_mboxscan"))
        .env("MBOXSCAN_MAX_MESSAGE_SIZE", "32")
        .args(["--log-level", "error", "count", archive.to_str().unwrap()])
        .output()
        .expect("mboxscan should run");

    assert_eq!(output.status.code(), Some(60));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_size_returns_usage() {
    let output = mboxscan(&["--max-message-size", "0", "count", "-"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn missing_archive_returns_51() {
    let output = mboxscan(&["count", "/nonexistent/mboxscan/archive.mbox"]);
    assert_eq!(output.status.code(), Some(51));
}

#[test]
fn version_prints_package_version() {
    let output = mboxscan(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("mboxscan {}", env!("CARGO_PKG_VERSION"))
    );
}
