//! Command Line Integration Tests
//!
//! Runs the `cosmic-ext-gallery` binary against temporary exports and
//! configuration files.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const EXPORT: &str = r#"[
    {
        "objectURL": "march",
        "index": 0,
        "message": {"conversationId": "1", "id": "a", "received_at": 1522540740000, "sent_at": 0},
        "attachment": {"contentType": "image/jpeg"}
    },
    {
        "objectURL": "today",
        "index": 0,
        "message": {"conversationId": "1", "id": "b", "received_at": 1523534400000, "sent_at": 0},
        "attachment": {"contentType": "video/mp4"}
    }
]"#;

fn gallery(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cosmic-ext-gallery"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cosmic-ext-gallery")
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("media.json");
    std::fs::write(&export, EXPORT).unwrap();
    let config = dir.path().join("gallery.toml");
    (dir, export, config)
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_group_command() {
    let (_dir, export, config) = setup();
    let output = gallery(
        &config,
        &[
            "group",
            export.to_str().unwrap(),
            "--reference",
            "2018-04-12T18:00Z",
            "--compact",
        ],
    );

    let sections = stdout_json(&output);
    assert_eq!(sections[0]["type"], "today");
    assert_eq!(sections[0]["mediaItems"][0]["objectURL"], "today");
    assert_eq!(sections[1]["type"], "yearMonth");
    assert_eq!(sections[1]["year"], 2018);
    assert_eq!(sections[1]["month"], 2);

    // Default config is written on first run
    assert!(config.exists());
}

#[test]
fn test_group_command_with_offset() {
    let (_dir, export, config) = setup();
    // 2018-03-31T23:59Z is already April 1st in UTC+02:00
    let output = gallery(
        &config,
        &[
            "group",
            export.to_str().unwrap(),
            "--reference",
            "2018-04-12T18:00Z",
            "--utc-offset",
            "+02:00",
        ],
    );

    let sections = stdout_json(&output);
    assert_eq!(sections[0]["type"], "today");
    assert_eq!(sections[1]["type"], "thisMonth");
    assert_eq!(sections[1]["mediaItems"][0]["objectURL"], "march");
}

#[test]
fn test_offset_from_config() {
    let (_dir, export, config) = setup();
    std::fs::write(&config, "[calendar]\nutc_offset = \"+02:00\"\n").unwrap();

    let output = gallery(
        &config,
        &[
            "group",
            export.to_str().unwrap(),
            "--reference",
            "1523556000000",
        ],
    );

    let sections = stdout_json(&output);
    assert_eq!(sections[1]["type"], "thisMonth");
}

#[test]
fn test_boundaries_command() {
    let (_dir, _export, config) = setup();
    let output = gallery(
        &config,
        &[
            "boundaries",
            "--reference",
            "2018-04-12T18:00Z",
            "--utc-offset",
            "-05:00",
        ],
    );

    let report = stdout_json(&output);
    assert_eq!(report["start_of_today"], "2018-04-12T00:00:00-05:00");
    assert_eq!(report["start_of_yesterday"], "2018-04-11T00:00:00-05:00");
    assert_eq!(report["start_of_this_week"], "2018-04-09T00:00:00-05:00");
    assert_eq!(report["start_of_this_month"], "2018-04-01T00:00:00-05:00");
}

#[test]
fn test_invalid_reference_fails() {
    let (_dir, export, config) = setup();
    let output = gallery(
        &config,
        &["group", export.to_str().unwrap(), "--reference", "soonish"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid --reference"));
}

#[test]
fn test_missing_export_fails() {
    let (dir, _export, config) = setup();
    let missing = dir.path().join("missing.json");
    let output = gallery(&config, &["group", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load media items"));
}

#[test]
fn test_config_command() {
    let (_dir, _export, config) = setup();
    let output = gallery(&config, &["config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[output]"));
    assert!(stdout.contains("pretty = true"));
}

#[test]
fn test_created_config_is_logged() {
    let (_dir, _export, config) = setup();
    let output = Command::new(env!("CARGO_BIN_EXE_cosmic-ext-gallery"))
        .arg("--config")
        .arg(&config)
        .arg("config")
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run cosmic-ext-gallery");

    assert!(output.status.success());
    assert!(config.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Created default config"));

    // Second run loads the existing file
    let output = Command::new(env!("CARGO_BIN_EXE_cosmic-ext-gallery"))
        .arg("--config")
        .arg(&config)
        .arg("config")
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run cosmic-ext-gallery");

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Created default config"));
}
