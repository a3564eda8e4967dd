//! Tests of the `blinkreact` binary.

mod common;

use common::{list_files, ComponentFixture};
use serde_json::Value;
use std::process::{Command, Output};

fn blinkreact(args: &[&str], cwd: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blinkreact"))
        .args(args)
        .current_dir(cwd)
        .env_remove("BLINKREACT_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute blinkreact")
}

#[test]
fn test_version_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = blinkreact(&["--version"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_markdown_report_written_to_working_directory() {
    let fixture = ComponentFixture::todo_list();
    let output = blinkreact(
        &["TodoList.tsx", "--virtual-time", "--plain"],
        fixture.dir.path(),
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = std::fs::read_to_string(fixture.dir.path().join("PERFORMANCE_REPORT.md")).unwrap();
    assert!(report.contains("# BlinkReact Performance Report: TodoList"));
    assert!(report.contains("| Total Renders | 3 |"));
    assert!(report.contains("| Max Render Time | 5.23ms |"));
    assert_eq!(
        list_files(fixture.dir.path()),
        vec!["PERFORMANCE_REPORT.md", "TodoList.tsx"]
    );
}

#[test]
fn test_json_report_to_custom_path() {
    let fixture = ComponentFixture::todo_list();
    let output = blinkreact(
        &[
            "TodoList.tsx",
            "--format",
            "json",
            "--output",
            "report.json",
            "--virtual-time",
        ],
        fixture.dir.path(),
    );
    assert!(output.status.success());

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(fixture.dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["componentName"], "TodoList");
    assert_eq!(json["renderMetrics"]["totalRenders"], 3);
    assert_eq!(json["stateMetrics"]["totalStateUpdates"], 10);
}

#[test]
fn test_missing_file_exits_non_zero_with_reason() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = blinkreact(&["Nope.tsx", "--plain"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error [E001]: Component file not found: Nope.tsx"));
    assert!(stderr.contains("phase: classification"));
    assert!(stderr.contains("hint: check the component path"));
    assert!(!stderr.contains("panicked"));
    assert!(!dir.path().join("PERFORMANCE_REPORT.md").exists());
}

#[test]
fn test_non_component_exits_non_zero() {
    let fixture = ComponentFixture::new("math.js", "export const square = (x) => x * x;\n");
    let output = blinkreact(&["math.js", "--plain"], fixture.dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E010"));
    assert!(stderr.contains("does not appear to be a React component"));
    assert_eq!(fixture.files(), vec!["math.js"]);
}

#[test]
fn test_invalid_overrides_are_config_errors() {
    let fixture = ComponentFixture::todo_list();
    let output = blinkreact(
        &["TodoList.tsx", "--settle-ms", "1000", "--timeout-ms", "2000", "--plain"],
        fixture.dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E020"));
    assert!(stderr.contains("hint:"));
    assert!(!stderr.contains("phase:"));
}

#[test]
fn test_harness_failure_reports_phase_without_hint() {
    let fixture = ComponentFixture::todo_list();
    std::fs::write(
        fixture.dir.path().join(".blinkreact.toml"),
        "[harness]\nmode = \"process\"\nrunner = [\"blinkreact-no-such-runner\"]\n",
    )
    .unwrap();

    let output = blinkreact(&["TodoList.tsx", "--plain"], fixture.dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error [E032]"), "stderr: {stderr}");
    assert!(stderr.contains("phase: harness"));
    assert!(!stderr.contains("hint:"));
    assert_eq!(fixture.files(), vec![".blinkreact.toml", "TodoList.tsx"]);
}

#[test]
fn test_config_file_is_discovered() {
    let fixture = ComponentFixture::todo_list();
    std::fs::write(
        fixture.dir.path().join(".blinkreact.toml"),
        "[harness]\nclock = \"virtual\"\n\n[output]\nformat = \"json\"\npath = \"out.json\"\n",
    )
    .unwrap();

    let output = blinkreact(&["TodoList.tsx"], fixture.dir.path());

    assert!(output.status.success());
    assert!(fixture.dir.path().join("out.json").exists());
}
