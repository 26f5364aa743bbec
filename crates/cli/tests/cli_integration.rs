//! CLI integration tests: spawn the `specgraph` binary and verify exit
//! codes, stdout content, and stderr content.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"
Entity Player {
    State {
        hp: 100
    }
    Event Attack {
        Effect: enemy.hp -= 10
        P[0.8]
    }
}
Rule LowHp {
    When: Player.hp < 20
    Effect: Player.state = "danger"
}
"#;

fn specgraph() -> Command {
    Command::cargo_bin("specgraph").expect("specgraph binary")
}

#[test]
fn help_exits_0_with_description() {
    specgraph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule-spec graph toolchain"));
}

#[test]
fn version_exits_0() {
    specgraph()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("specgraph"));
}

#[test]
fn parse_prints_graph_json() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("arena.spec");
    fs::write(&spec, SAMPLE).unwrap();

    specgraph()
        .arg("parse")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"owns-event\""))
        .stdout(predicate::str::contains("\"rule-effect\""))
        .stdout(predicate::str::contains("\"label\": \"Player\""));
}

#[test]
fn parse_missing_file_exits_1() {
    specgraph()
        .arg("parse")
        .arg("no/such/file.spec")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn emit_regenerates_spec_text_from_parse_output() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("arena.spec");
    let graph = dir.path().join("arena.json");
    fs::write(&spec, SAMPLE).unwrap();

    specgraph()
        .arg("parse")
        .arg(&spec)
        .arg("-o")
        .arg(&graph)
        .assert()
        .success();

    specgraph()
        .arg("emit")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entity Player {"))
        .stdout(predicate::str::contains("hp: 100"))
        .stdout(predicate::str::contains("P[0.8]"))
        .stdout(predicate::str::contains("Rule LowHp {"));
}

#[test]
fn emit_rejects_malformed_json() {
    let dir = TempDir::new().unwrap();
    let graph = dir.path().join("broken.json");
    fs::write(&graph, "{ this is not json").unwrap();

    specgraph()
        .arg("emit")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid graph JSON"));
}

#[test]
fn roundtrip_prints_regenerated_document() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("arena.spec");
    fs::write(&spec, SAMPLE).unwrap();

    specgraph()
        .arg("roundtrip")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("Event Attack {"))
        .stdout(predicate::str::contains("Effect: enemy.hp -= 10"));
}

#[test]
fn default_entity_flag_controls_trigger_resolution() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("hero.spec");
    fs::write(
        &spec,
        r#"
Entity Hero {
    Event Strike {
        Effect: x
    }
    Event Followup {
        Trigger: Strike
    }
}
"#,
    )
    .unwrap();

    // Against the default entity (Player) the bare trigger never resolves.
    specgraph()
        .arg("parse")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"trigger\"").not());

    specgraph()
        .arg("parse")
        .arg(&spec)
        .arg("--default-entity")
        .arg("Hero")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"trigger\""));
}
