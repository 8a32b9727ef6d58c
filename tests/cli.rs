use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("campfin").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("campfin"));
}

#[test]
fn interval_prints_milliseconds() {
    Command::cargo_bin("campfin")
        .unwrap()
        .args(["interval", "day"])
        .assert()
        .success()
        .stdout("86400000\n");
    Command::cargo_bin("campfin")
        .unwrap()
        .args(["interval", "bogus"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn label_prints_bucket_label() {
    Command::cargo_bin("campfin")
        .unwrap()
        .args(["label", "month", "1709251200000"])
        .assert()
        .success()
        .stdout("March 2024\n");
}

#[test]
fn buckets_prints_starts_and_labels() {
    Command::cargo_bin("campfin")
        .unwrap()
        .args(["buckets", "day", "1709251200000", "--count", "2"])
        .assert()
        .success()
        .stdout("1709251200000\t 1 Mar 2024\n1709337600000\t 2 Mar 2024\n");
}

#[test]
fn buckets_stop_at_the_end_of_time() {
    let start = (i64::MAX - 10).to_string();
    Command::cargo_bin("campfin")
        .unwrap()
        .args(["buckets", "hour", &start, "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("{start}\t")))
        .stdout(predicate::str::contains("\n").count(1));
}

#[test]
fn layout_writes_json_and_plot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "name,x,y\nA,10,5\nB,10,3\n").unwrap();
    let out = dir.path().join("out.json");
    let plot = dir.path().join("bars.svg");

    Command::cargo_bin("campfin")
        .unwrap()
        .arg("layout")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--plot")
        .arg(&plot)
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v[1]["points"][0], serde_json::json!([12.0, 0.0]));
    assert!(plot.exists());
}

#[test]
fn chart_requires_second_series() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("funds.csv");
    fs::write(&input, "date,value\n2020-01-01,10\n2020-02-01,20\n").unwrap();

    Command::cargo_bin("campfin")
        .unwrap()
        .arg("chart")
        .arg("net-funds")
        .arg("--input")
        .arg(&input)
        .arg("--plot")
        .arg(dir.path().join("net.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--second"));

    let plot = dir.path().join("donations.svg");
    Command::cargo_bin("campfin")
        .unwrap()
        .arg("chart")
        .arg("donations")
        .arg("--input")
        .arg(&input)
        .arg("--interval")
        .arg("month")
        .arg("--plot")
        .arg(&plot)
        .assert()
        .success();
    assert!(plot.exists());
}

#[test]
fn tooltip_prints_text_and_link() {
    Command::cargo_bin("campfin")
        .unwrap()
        .args([
            "tooltip",
            "day",
            "0",
            "--entry",
            "Donations=1234.4",
            "--entry",
            "Expenditures=99",
        ])
        .assert()
        .success()
        .stdout(
            " 1 Jan 1970\nDonations: $1,234\nExpenditures: $99\n/donations?date=1970-01-01\n",
        );
}
