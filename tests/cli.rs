//! End-to-end tests for the tableassert binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary directory holding the table files for one test
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn tableassert() -> Command {
    Command::cargo_bin("tableassert").unwrap()
}

#[test]
fn test_identical_tables_exit_zero() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "A,B\n1,2\n");
    let actual = fixture.file("actual.csv", "A,B\n1,2\n");

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .assert()
        .success()
        .stdout("No differences found.\n");
}

#[test]
fn test_value_difference_prints_grid() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "A,B\n1,2\n");
    let actual = fixture.file("actual.csv", "A,B\n1,3\n");

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .arg("--message")
        .arg("totals")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "Failed asserting that two tables were identical: totals\n\n",
        ))
        .stdout(predicate::str::contains("| X | 1 | X 3 |"))
        .stdout(predicate::str::contains("| i | ~ | ^ 2 |"));
}

#[test]
fn test_modes_control_column_rules() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "A,B\n1,2\n");
    let reordered = fixture.file("reordered.csv", "B,A\n2,1\n");
    let wider = fixture.file("wider.csv", "B,C,A\n2,x,1\n");

    tableassert()
        .arg(&expected)
        .arg(&reordered)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unexpected column sequence"));

    tableassert()
        .arg(&expected)
        .arg(&reordered)
        .args(["--mode", "equal"])
        .assert()
        .success();

    tableassert()
        .arg(&expected)
        .arg(&wider)
        .args(["--mode", "equal"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Structural difference: Unexpected columns: 'C'",
        ));

    tableassert()
        .arg(&expected)
        .arg(&wider)
        .args(["--mode", "contains-columns"])
        .assert()
        .success();
}

#[test]
fn test_compare_flag_uses_comparable_assertion() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "Item,Price\napple,1.00\n");
    let actual = fixture.file("actual.csv", "Item,Price\napple,1.004\n");

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .args(["--compare", "Price=numeric-tolerance:0.01"])
        .assert()
        .success();

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .args(["--compare", "Price=numeric-tolerance:0.001"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Failed comparing two tables: "));
}

#[test]
fn test_invalid_options_exit_two() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "A\n1\n");
    let actual = fixture.file("actual.csv", "A\n1\n");

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .args(["--options", r#"{"ignoreRowOrder": true}"#])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unexpected options: ignoreRowOrder"));

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .args(["--compare", "Missing=exact"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Cannot register custom comparator for unexpected column Missing",
        ));
}

#[test]
fn test_json_output() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "A\n1\n2\n");
    let actual = fixture.file("actual.csv", "A\n1\n");

    let output = tableassert()
        .arg(&expected)
        .arg(&actual)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["differences"][0]["message"],
        "Missing row #2 (expected: 2)"
    );
    assert_eq!(value["diff"], "Structural difference: Missing row #2 (expected: 2)");
}

#[test]
fn test_mixed_source_formats() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.table", "| name  | qty |\n| apple | 3   |\n");
    let actual = fixture.file(
        "actual.html",
        "<table><thead><tr><th>name</th><th>qty</th></tr></thead>\
         <tbody><tr><td>apple</td><td>3</td></tr></tbody></table>",
    );

    tableassert().arg(&expected).arg(&actual).assert().success();
}

#[test]
fn test_parse_errors_name_the_file() {
    let fixture = Fixture::new();
    let expected = fixture.file("expected.csv", "\n\n");
    let actual = fixture.file("actual.csv", "A\n1\n");

    tableassert()
        .arg(&expected)
        .arg(&actual)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse expected file"))
        .stderr(predicate::str::contains("The provided CSV was empty"));

    let unsupported = fixture.file("actual.xlsx", "");
    tableassert()
        .arg(&actual)
        .arg(&unsupported)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported file format: xlsx"));
}
