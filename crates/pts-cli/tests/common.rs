#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub const MASTER: &str = "correct horse battery staple";

pub fn temp_store(prefix: &str) -> (TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir");
    let store = temp.path().join("passthesalt.json");
    (temp, store)
}

/// A `pts` command wired to a temporary store with the master password in
/// the environment, so no prompt is ever needed.
pub fn pts(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pts").expect("pts binary");
    cmd.env("PTS_STORE", store)
        .env("PTS_MASTER", MASTER)
        .env("NO_COLOR", "1");
    cmd
}

pub fn init_store(store: &Path) {
    pts(store)
        .args(["init", "--owner", "alice"])
        .assert()
        .success();
}

pub fn add_login(store: &Path, label: &str, domain: &str) {
    pts(store)
        .args(["add", label, "--domain", domain, "--username", "alice"])
        .assert()
        .success();
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn stdout_string(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

pub fn write_manifest(dir: &Path, version: &str) -> PathBuf {
    let manifest = dir.join("Cargo.toml");
    fs::write(
        &manifest,
        format!("[package]\nname = \"demo\"\nversion = \"{version}\"\nedition = \"2021\"\n"),
    )
    .expect("write manifest");
    manifest
}
