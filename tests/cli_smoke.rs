mod support;

use assert_cmd::Command;
use predicates::str::contains;

use support::TestData;

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

#[test]
fn taskmap_help_works() {
    Command::cargo_bin("taskmap")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task map"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["graph", "team", "view", "node", "task"] {
        Command::cargo_bin("taskmap")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn graph_json_lists_elements() {
    let data = TestData::new().expect("fixture");
    let output = data
        .cmd()
        .args(["--json", "graph"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let payload = json_stdout(&output);
    assert_eq!(payload["schema_version"], "taskmap.v1");
    assert_eq!(payload["command"], "graph");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["data"]["edges"][0]["id"], "t1_intro>t2");
    assert_eq!(payload["data"]["edges"][0]["completed"], false);
}

#[test]
fn team_select_persists_between_runs() {
    let data = TestData::new().expect("fixture");
    data.cmd()
        .args(["team", "select", "red"])
        .assert()
        .success()
        .stdout(contains("Red (red)"));

    assert_eq!(data.read_store()["tm_selectedTeamId"], "red");

    let output = data
        .cmd()
        .args(["--json", "graph"])
        .output()
        .expect("run");
    let payload = json_stdout(&output);
    assert_eq!(payload["data"]["nodes"][0]["completed"], true);
    assert_eq!(payload["data"]["edges"][0]["completed"], true);
    assert_eq!(payload["data"]["edges"][1]["completed"], false);

    data.cmd().args(["team", "clear"]).assert().success();
    assert!(data.read_store().get("tm_selectedTeamId").is_none());
}

#[test]
fn unknown_team_is_user_error() {
    let data = TestData::new().expect("fixture");
    let output = data
        .cmd()
        .args(["--json", "team", "select", "ghost"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(2));
    let payload = json_stdout(&output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["command"], "team select");
    assert_eq!(payload["error"]["kind"], "user_error");
    assert_eq!(payload["error"]["details"]["team"], "ghost");
}

#[test]
fn missing_feed_is_operation_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("taskmap")
        .expect("binary")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--store")
        .arg(dir.path().join("store.json"))
        .arg("graph")
        .assert()
        .code(4)
        .stderr(contains("teams.json"));
}

#[test]
fn node_move_is_saved() {
    let data = TestData::new().expect("fixture");
    data.cmd()
        .args(["node", "move", "t2", "--x", "-40", "--y", "15.5"])
        .assert()
        .success();

    let raw = data.read_store()["tm_nodePositions"]
        .as_str()
        .expect("positions string")
        .to_string();
    let positions: serde_json::Value = serde_json::from_str(&raw).expect("positions json");
    assert_eq!(positions["t2"]["x"], -40.0);
    assert_eq!(positions["t2"]["y"], 15.5);
}

#[test]
fn view_zoom_and_reset() {
    let data = TestData::new().expect("fixture");
    let output = data
        .cmd()
        .args(["--json", "view", "zoom", "in"])
        .output()
        .expect("run");
    let payload = json_stdout(&output);
    assert_eq!(payload["data"]["viewport"]["zoom"], 1.25);
    assert_eq!(payload["data"]["slider"], 125);

    data.cmd()
        .args(["team", "select", "blue"])
        .assert()
        .success();
    let output = data
        .cmd()
        .args(["--json", "view", "reset"])
        .output()
        .expect("run");
    let payload = json_stdout(&output);
    assert_eq!(payload["data"]["saved_positions"], 3);
    assert_eq!(data.read_store()["tm_selectedTeamId"], "blue");
}

#[test]
fn view_zoom_rejects_garbage() {
    let data = TestData::new().expect("fixture");
    data.cmd()
        .args(["view", "zoom", "sideways"])
        .assert()
        .code(2)
        .stderr(contains("zoom step"));
}

#[test]
fn task_show_lists_prerequisites() {
    let data = TestData::new().expect("fixture");
    data.cmd().args(["team", "select", "red"]).assert().success();
    data.cmd()
        .args(["task", "show", "t2"])
        .assert()
        .success()
        .stdout(contains("requires [x] Intro (t1_intro)"));
}

#[test]
fn narrow_width_inverts_slider() {
    let data = TestData::new().expect("fixture");
    let output = data
        .cmd()
        .args(["--json", "view", "zoom", "175", "--width", "400"])
        .output()
        .expect("run");
    let payload = json_stdout(&output);
    assert_eq!(payload["data"]["viewport"]["zoom"], 0.5);
    assert_eq!(payload["data"]["slider"], 175);
}

#[test]
fn non_finite_move_keeps_saved_layout() {
    let data = TestData::new().expect("fixture");
    data.cmd()
        .args(["node", "move", "t2", "--x", "10", "--y", "20"])
        .assert()
        .success();
    let before = data.read_store()["tm_nodePositions"].clone();

    for bad in ["NaN", "inf", "-infinity"] {
        data.cmd()
            .args(["node", "move", "t3", "--x", bad, "--y", "5"])
            .assert()
            .code(2)
            .stderr(contains("finite"));
    }
    assert_eq!(data.read_store()["tm_nodePositions"], before);

    let raw = data.read_store()["tm_nodePositions"]
        .as_str()
        .expect("positions string")
        .to_string();
    let positions: serde_json::Value = serde_json::from_str(&raw).expect("positions json");
    assert_eq!(positions["t2"]["x"], 10.0);
    assert_eq!(positions["t2"]["y"], 20.0);
}

#[test]
fn non_finite_zoom_is_rejected() {
    let data = TestData::new().expect("fixture");
    data.cmd().args(["view", "show"]).assert().success();
    let before = data.read_store()["tm_viewport"].clone();

    data.cmd()
        .args(["view", "zoom", "NaN"])
        .assert()
        .code(2)
        .stderr(contains("zoom step"));
    assert_eq!(data.read_store()["tm_viewport"], before);
}
