use std::fs;

mod common;

use common::{add_login, init_store, parse_json, pts, stdout_string, temp_store};

#[test]
fn init_creates_a_store_and_refuses_to_overwrite_it() {
    let (_temp, store) = temp_store("pts-init");

    pts(&store)
        .args(["init", "--owner", "alice"])
        .assert()
        .success();
    assert!(store.exists());

    pts(&store)
        .args(["init", "--owner", "alice"])
        .assert()
        .code(1);
}

#[test]
fn generated_logins_are_deterministic_across_invocations() {
    let (_temp, store) = temp_store("pts-deterministic");
    init_store(&store);
    add_login(&store, "github", "github.com");

    let first = stdout_string(&pts(&store).args(["get", "github"]).assert().success());
    let second = stdout_string(&pts(&store).args(["get", "github"]).assert().success());
    assert_eq!(first, second);
    assert_eq!(first.trim_end().len(), 20);
}

#[test]
fn iteration_rotates_the_generated_password() {
    let (_temp, store) = temp_store("pts-iteration");
    init_store(&store);
    add_login(&store, "github", "github.com");
    pts(&store)
        .args([
            "add",
            "github-rotated",
            "--domain",
            "github.com",
            "--username",
            "alice",
            "--iteration",
            "1",
        ])
        .assert()
        .success();

    let original = stdout_string(&pts(&store).args(["get", "github"]).assert().success());
    let rotated = stdout_string(&pts(&store).args(["get", "github-rotated"]).assert().success());
    assert_ne!(original, rotated);
}

#[test]
fn get_resolves_anchored_prefix_patterns() {
    let (_temp, store) = temp_store("pts-resolve");
    init_store(&store);
    add_login(&store, "work/github", "github.com");
    add_login(&store, "home/mail", "mail.com");

    let exact = stdout_string(
        &pts(&store)
            .args(["get", "work/github"])
            .assert()
            .success(),
    );
    let pattern = stdout_string(&pts(&store).args(["get", "work"]).assert().success());
    assert_eq!(exact, pattern);

    // patterns match from the start of the label only
    pts(&store).args(["get", "github"]).assert().code(1);
}

#[test]
fn ambiguous_patterns_are_user_errors() {
    let (_temp, store) = temp_store("pts-ambiguous");
    init_store(&store);
    add_login(&store, "mail", "mail.com");
    add_login(&store, "mailbox", "mailbox.org");

    // the exact label still wins over the pattern
    pts(&store).args(["get", "mail"]).assert().success();

    let assert = pts(&store).args(["--json", "get", "mai"]).assert().code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
}

#[test]
fn encrypted_secrets_round_trip_and_leave_no_blob_when_removed() {
    let (_temp, store) = temp_store("pts-encrypted");
    init_store(&store);

    pts(&store)
        .args(["add", "token", "--encrypt", "s3cr3t-value"])
        .assert()
        .success();

    let contents = fs::read_to_string(&store).expect("read store");
    assert!(contents.contains("secrets_encrypted"));
    assert!(!contents.contains("s3cr3t-value"));

    let value = stdout_string(&pts(&store).args(["get", "token"]).assert().success());
    assert_eq!(value.trim_end(), "s3cr3t-value");

    pts(&store).args(["rm", "token"]).assert().success();
    let contents = fs::read_to_string(&store).expect("read store");
    assert!(!contents.contains("secrets_encrypted"));
}

#[test]
fn wrong_master_password_is_a_user_error() {
    let (_temp, store) = temp_store("pts-wrong-master");
    init_store(&store);
    add_login(&store, "github", "github.com");

    pts(&store)
        .env("PTS_MASTER", "not the password")
        .args(["get", "github"])
        .assert()
        .code(1);
}

#[test]
fn mv_renames_and_keeps_the_value() {
    let (_temp, store) = temp_store("pts-mv");
    init_store(&store);
    add_login(&store, "github", "github.com");

    let before = stdout_string(&pts(&store).args(["get", "github"]).assert().success());

    pts(&store)
        .args(["mv", "github", "work/github"])
        .assert()
        .success();
    pts(&store).args(["get", "github"]).assert().code(1);

    let after = stdout_string(
        &pts(&store)
            .args(["get", "work/github"])
            .assert()
            .success(),
    );
    assert_eq!(before, after);
}

#[test]
fn duplicate_labels_are_rejected() {
    let (_temp, store) = temp_store("pts-duplicate");
    init_store(&store);
    add_login(&store, "github", "github.com");

    pts(&store)
        .args([
            "add", "github", "--domain", "github.com", "--username", "bob",
        ])
        .assert()
        .code(1);
}

#[test]
fn store_file_parses_with_the_domain_model() {
    let (_temp, store) = temp_store("pts-parse");
    init_store(&store);
    add_login(&store, "github", "github.com");

    let contents = fs::read_to_string(&store).expect("read store");
    let parsed = pts_domain::Store::from_json(&contents).expect("valid store");
    assert!(parsed.contains("github"));
    assert_eq!(parsed.config.owner.as_deref(), Some("alice"));
}
