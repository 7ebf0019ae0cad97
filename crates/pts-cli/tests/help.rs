mod common;

use common::{pts, temp_store};

#[test]
fn help_shows_the_banner_and_commands() {
    let (_temp, store) = temp_store("pts-help");

    let assert = pts(&store).arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert!(out.contains("Deterministic password manager"));
    for command in ["init", "add", "get", "ls", "rm", "mv", "release"] {
        assert!(out.contains(command), "help is missing `{command}`");
    }
}

#[test]
fn subcommand_help_shows_usage() {
    let (_temp, store) = temp_store("pts-help-add");

    pts(&store)
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("--encrypt"));
}
