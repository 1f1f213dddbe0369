//! End-to-end tests for the `neo` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const NEOS_CSV: &str = "\
pdes,name,pha,diameter
433,Eros,N,16.84
99942,Apophis,Y,0.37
2020 FK,,Y,
";

const CAD_JSON: &str = r#"{
    "fields": ["des", "orbit_id", "cd", "dist", "v_rel"],
    "data": [
        ["433", "659", "2020-Jan-01 00:00", "0.15", "12.0"],
        ["99942", "199", "2029-Apr-13 21:46", "0.00025", "7.42"],
        ["1999 XX", "1", "2020-Jan-01 12:00", "0.3", "5.5"],
        ["2020 FK", "3", "2020-Mar-25 16:33", "", ""]
    ]
}"#;

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("neos.csv"), NEOS_CSV).unwrap();
    std::fs::write(dir.path().join("cad.json"), CAD_JSON).unwrap();
    dir
}

fn neo(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neo").unwrap();
    cmd.env("RUST_LOG", "off")
        .arg("--neofile")
        .arg(dir.join("neos.csv"))
        .arg("--cadfile")
        .arg(dir.join("cad.json"));
    cmd
}

#[test]
fn inspect_by_designation() {
    let dir = data_dir();
    neo(dir.path())
        .args(["inspect", "--pdes", "433", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "433 Eros has a diameter of 16.840 km and is not potentially hazardous.",
        ))
        .stdout(predicate::str::contains("- on 2020-01-01 00:00 '433 Eros'"));
}

#[test]
fn inspect_unknown_name_fails() {
    let dir = data_dir();
    neo(dir.path())
        .args(["inspect", "--name", "Ceres"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching NEOs exist in the database."));
}

#[test]
fn query_hazardous_with_date_range() {
    let dir = data_dir();
    neo(dir.path())
        .args(["query", "--hazardous", "--start-date", "2021-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("99942 Apophis"))
        .stdout(predicate::str::contains("2020 FK").not());
}

#[test]
fn query_to_csv_file() {
    let dir = data_dir();
    let out = dir.path().join("results.csv");
    neo(dir.path())
        .args(["query", "--date", "2020-01-01", "--outfile"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2020-01-01 00:00,0.15,12.0,433,Eros,16.84,false");
    assert_eq!(lines[2], "2020-01-01 12:00,0.3,5.5,1999 XX,None,NaN,false");
}

#[test]
fn config_file_supplies_paths() {
    let dir = data_dir();
    let config = dir.path().join("neo.toml");
    std::fs::write(
        &config,
        format!(
            "[data]\nneo_path = {:?}\ncad_path = {:?}\n\n[query]\ndefault_limit = 1\n",
            dir.path().join("neos.csv"),
            dir.path().join("cad.json")
        ),
    )
    .unwrap();

    let output = Command::cargo_bin("neo")
        .unwrap()
        .env("RUST_LOG", "off")
        .arg("--config")
        .arg(&config)
        .arg("query")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 1);
}

#[test]
fn malformed_data_aborts_with_record_name() {
    let dir = data_dir();
    std::fs::write(
        dir.path().join("cad.json"),
        r#"{"fields": ["des", "cd"], "data": [["433", "not a date"]]}"#,
    )
    .unwrap();

    neo(dir.path())
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cad.json row 1"));
}

#[test]
fn missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    neo(dir.path())
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load NEOs"));
}
