mod common;

use common::{parse_json, pts, temp_store, write_manifest};

#[test]
fn matching_tag_passes() {
    let (temp, store) = temp_store("pts-release-ok");
    let manifest = write_manifest(temp.path(), "1.2.3");

    pts(&store)
        .args(["release", "--tag", "v1.2.3"])
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(0)
        .stdout(predicates::str::contains("matches version 1.2.3"));
}

#[test]
fn bare_version_tags_also_pass() {
    let (temp, store) = temp_store("pts-release-bare");
    let manifest = write_manifest(temp.path(), "1.2.3");

    pts(&store)
        .args(["release", "--tag", "1.2.3"])
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(0);
}

#[test]
fn mismatched_tag_fails_before_any_build_step() {
    let (temp, store) = temp_store("pts-release-mismatch");
    let manifest = write_manifest(temp.path(), "1.2.3");

    let assert = pts(&store)
        .args(["--json", "release", "--tag", "v1.2.4"])
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["tag"], "v1.2.4");
    assert_eq!(payload["details"]["version"], "1.2.3");
}

#[test]
fn manifest_without_a_version_is_a_user_error() {
    let (temp, store) = temp_store("pts-release-no-version");
    let manifest = temp.path().join("Cargo.toml");
    std::fs::write(&manifest, "[package]\nname = \"demo\"\n").expect("write manifest");

    pts(&store)
        .arg("release")
        .args(["--tag", "v1.2.3"])
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(1);
}

#[test]
fn missing_manifest_is_a_user_error() {
    let (temp, store) = temp_store("pts-release-no-manifest");
    let manifest = temp.path().join("Cargo.toml");

    pts(&store)
        .arg("release")
        .args(["--tag", "v1.2.3"])
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(1);
}

#[test]
fn without_a_tag_outside_a_repository_nothing_matches() {
    let (temp, store) = temp_store("pts-release-no-tag");
    let manifest = write_manifest(temp.path(), "1.2.3");

    pts(&store)
        .arg("release")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("no tag points at the current commit"));
}
