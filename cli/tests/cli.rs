use assert_cmd::Command;
use predicates::prelude::*;

const YACHT_REQUEST: &str = r#"{"state":{"turn":1,"trial":1,"player":"p1","dices":[6,6,6,6,6],"scoreBoard":{"p1":{"yacht":null,"choice":null}}}}"#;

#[test]
fn decide_reads_stdin() {
    Command::cargo_bin("yacht")
        .unwrap()
        .arg("decide")
        .write_stdin(YACHT_REQUEST)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""choice":"yacht""#));
}

#[test]
fn decide_reads_a_bom_prefixed_file() {
    let dir = std::env::temp_dir().join(format!("yacht-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("request.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        r#"{"state":{"turn":2,"trial":1,"player":"p1","dices":[1,2,3,4,6],"scoreBoard":{"p1":{"smallStraight":null,"largeStraight":null}}}}"#
            .as_bytes(),
    );
    std::fs::write(&path, bytes).unwrap();

    Command::cargo_bin("yacht")
        .unwrap()
        .args(["decide", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""keep":[0,1,2,3]"#));
}

#[test]
fn decide_rejects_unknown_player() {
    Command::cargo_bin("yacht")
        .unwrap()
        .arg("decide")
        .write_stdin(YACHT_REQUEST.replace("\"player\":\"p1\"", "\"player\":\"ghost\""))
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn play_prints_a_tagged_log() {
    Command::cargo_bin("yacht")
        .unwrap()
        .args(["play", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[ROLL] 1"))
        .stdout(predicate::str::contains("[CHOICE]"));
}

#[test]
fn play_accepts_open_categories() {
    Command::cargo_bin("yacht")
        .unwrap()
        .args(["play", "--seed", "7", "--open", "choice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[CHOICE] choice (final roll)"));
}

#[test]
fn play_rejects_misspelled_categories() {
    Command::cargo_bin("yacht")
        .unwrap()
        .args(["play", "--open", "FullHouse"])
        .assert()
        .failure();
}

#[test]
fn simulate_reports_every_open_category() {
    Command::cargo_bin("simulate")
        .unwrap()
        .args(["--samples", "50", "--open", "sixes,yacht"])
        .assert()
        .success()
        .stdout(predicate::str::contains("turns:              50"))
        .stdout(predicate::str::contains("sixes"))
        .stdout(predicate::str::contains("yacht"));
}
