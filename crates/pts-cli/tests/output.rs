mod common;

use common::{add_login, init_store, parse_json, pts, stdout_string, temp_store};

#[test]
fn json_mode_emits_the_full_envelope() {
    let (_temp, store) = temp_store("pts-json-envelope");
    init_store(&store);
    add_login(&store, "github", "github.com");

    let assert = pts(&store).args(["--json", "ls"]).assert().success();
    let payload = parse_json(&assert);

    assert_eq!(payload["command"], "ls");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["code"], 0);
    assert_eq!(payload["message"], "1 secret");
    assert_eq!(payload["details"]["secrets"][0]["label"], "github");
    assert_eq!(payload["details"]["secrets"][0]["kind"], "generatable");
}

#[test]
fn json_mode_reports_user_errors() {
    let (_temp, store) = temp_store("pts-json-error");
    init_store(&store);

    let assert = pts(&store)
        .args(["--json", "get", "missing"])
        .assert()
        .code(1);
    let payload = parse_json(&assert);

    assert_eq!(payload["command"], "get");
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["code"], 1);
}

#[test]
fn get_prints_the_bare_value_on_stdout() {
    let (_temp, store) = temp_store("pts-passthrough");
    init_store(&store);
    pts(&store)
        .args(["add", "token", "--encrypt", "hunter2"])
        .assert()
        .success();

    let out = stdout_string(&pts(&store).args(["get", "token"]).assert().success());
    assert_eq!(out, "hunter2\n");
}

#[test]
fn quiet_still_prints_the_bare_value() {
    let (_temp, store) = temp_store("pts-quiet-get");
    init_store(&store);
    pts(&store)
        .args(["add", "token", "--encrypt", "hunter2"])
        .assert()
        .success();

    let out = stdout_string(
        &pts(&store)
            .args(["--quiet", "get", "token"])
            .assert()
            .success(),
    );
    assert_eq!(out, "hunter2\n");
}

#[test]
fn quiet_suppresses_status_output() {
    let (_temp, store) = temp_store("pts-quiet");
    init_store(&store);

    let out = stdout_string(
        &pts(&store)
            .args([
                "--quiet", "add", "github", "--domain", "github.com", "--username", "alice",
            ])
            .assert()
            .success(),
    );
    assert!(out.is_empty());
}

#[test]
fn ls_renders_a_table_with_headers() {
    let (_temp, store) = temp_store("pts-table");
    init_store(&store);
    add_login(&store, "github", "github.com");
    pts(&store)
        .args(["add", "token", "--encrypt", "hunter2"])
        .assert()
        .success();

    let out = stdout_string(&pts(&store).arg("ls").assert().success());
    assert!(out.contains("LABEL"));
    assert!(out.contains("KIND"));
    assert!(out.contains("github.com|alice|0"));
    assert!(out.contains("encrypted"));
}
