/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{RecordBuilder, pchr_text, realistic_record, write_pchr_file};
use predicates::prelude::*;

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pchr-parser"))
}

#[test]
fn test_cli_stats_command_with_data() {
    let file = write_pchr_file(&pchr_text(&[realistic_record(), realistic_record()]));

    cmd()
        .arg("stats")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PCHR File Statistics"))
        .stdout(predicate::str::contains("Records: 2"))
        .stdout(predicate::str::contains("Leaves: 42 (0 dropped, 0 kept as text)"))
        .stdout(predicate::str::contains("Total records: 2"));
}

#[test]
fn test_cli_stats_multiple_files() {
    let first = write_pchr_file(&realistic_record().to_text());
    let second = write_pchr_file(&pchr_text(&[
        RecordBuilder::new().leaf(1, "Label", "a"),
        RecordBuilder::new().leaf(1, "Label", "b"),
    ]));

    cmd()
        .arg("stats")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total records: 3"));
}

#[test]
fn test_cli_stats_empty_file() {
    let file = write_pchr_file("");

    cmd()
        .arg("stats")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Size: 0"))
        .stdout(predicate::str::contains("Total records: 0"));
}

#[test]
fn test_cli_stats_reports_failed_file() {
    let good = write_pchr_file(&realistic_record().to_text());
    let bad = write_pchr_file("not a pchr file\n");

    cmd()
        .arg("stats")
        .arg(good.path())
        .arg(bad.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total records: 1"))
        .stderr(predicate::str::contains("Missing start marker at line 1"))
        .stderr(predicate::str::contains("1 of 2 files failed to parse"));
}

#[test]
fn test_cli_stats_deep_nesting_fails_cleanly() {
    let mut builder = RecordBuilder::new();
    for depth in 1..=6_000 {
        builder = builder.block(depth, "B");
    }
    let deep = write_pchr_file(&builder.to_text());
    let good = write_pchr_file(&realistic_record().to_text());

    cmd()
        .arg("stats")
        .arg(good.path())
        .arg(deep.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total records: 1"))
        .stderr(predicate::str::contains("Nesting too deep at line 257"))
        .stderr(predicate::str::contains("1 of 2 files failed to parse"));
}

#[test]
fn test_cli_stats_requires_files() {
    cmd().arg("stats").assert().failure();
}

#[test]
fn test_cli_show_record_outline() {
    let file = write_pchr_file(&realistic_record().to_text());

    cmd()
        .arg("show")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 of 1 (version V100R010, leaves: 21)"))
        .stdout(predicate::str::contains("  CellId: 12345 (Int64)"))
        .stdout(predicate::str::contains("  ShoInfos[2]"))
        .stdout(predicate::str::contains("      ConnNCellEc_N0: -14.5 (Float64)"))
        .stdout(predicate::str::contains("CallStartTime: 2014-05-20 13:45:07.089 (DateTime)"));
}

#[test]
fn test_cli_show_selects_record() {
    let file = write_pchr_file(&pchr_text(&[
        RecordBuilder::new().leaf(1, "Label", "first"),
        RecordBuilder::new().version("9").leaf(1, "Label", "second"),
    ]));

    cmd()
        .arg("show")
        .arg(file.path())
        .arg("--record")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 2 of 2 (version 9, leaves: 1)"))
        .stdout(predicate::str::contains("Label: second (String)"));
}

#[test]
fn test_cli_show_record_out_of_range() {
    let file = write_pchr_file(&realistic_record().to_text());

    cmd()
        .arg("show")
        .arg(file.path())
        .arg("--record")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 5 not found"));
}

#[test]
fn test_cli_custom_fields_file() {
    let fields = write_pchr_file(r#"{"string_fields": ["CellId"]}"#);
    let file = write_pchr_file(&RecordBuilder::new().leaf(1, "CellId", "77").to_text());

    cmd()
        .arg("--fields")
        .arg(fields.path())
        .arg("show")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CellId: 77 (String)"));
}

#[test]
fn test_cli_invalid_fields_file() {
    let fields = write_pchr_file(r#"{"int_fields": ["A"], "float_fields": ["A"]}"#);
    let file = write_pchr_file(&realistic_record().to_text());

    cmd()
        .arg("stats")
        .arg(file.path())
        .arg("--fields")
        .arg(fields.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load field registry"));
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .arg("show")
        .arg("/nonexistent/file.pchr")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open PCHR file"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    cmd().assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse PCHR call history record dumps"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("show"));
}
