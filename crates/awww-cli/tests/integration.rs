//! Integration tests for the awww CLI.
//!
//! These run the compiled binary and check its output.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn awww_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_awww"))
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to execute awww");
    assert!(
        output.status.success(),
        "awww failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const LAYOUT: &str = r#"
name = "Filter"

[[widgets]]
id = "cutoff"
kind = "knob"
parameter = 0
format = "hz"

[widgets.options]
min = "20"
max = "20000"
scale = "log"
value = "440"

[[widgets]]
id = "size"
kind = "resize"

[widgets.options]
minWidth = "100"
minHeight = "100"
maxScale = "4"
"#;

fn write_fixture(dir: &Path, trace: &str) -> (String, String) {
    let layout = dir.join("layout.toml");
    let trace_path = dir.join("trace.jsonl");
    fs::write(&layout, LAYOUT).unwrap();
    fs::write(&trace_path, trace).unwrap();
    (
        layout.to_string_lossy().into_owned(),
        trace_path.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_help() {
    let stdout = stdout_of(awww_bin().arg("--help"));
    assert!(stdout.contains("widgets"));
    assert!(stdout.contains("scale"));
    assert!(stdout.contains("replay"));
}

#[test]
fn test_widgets_lists_kinds() {
    let stdout = stdout_of(awww_bin().arg("widgets"));
    assert!(stdout.contains("knob"));
    assert!(stdout.contains("resize"));
}

#[test]
fn test_widgets_shows_options() {
    let stdout = stdout_of(awww_bin().args(["widgets", "knob"]));
    assert!(stdout.contains("minValue"));
    assert!(stdout.contains("scale"));

    let stdout = stdout_of(awww_bin().args(["widgets", "resize"]));
    assert!(stdout.contains("keepAspectRatio"));
    assert!(stdout.contains("maxScale"));
}

#[test]
fn test_widgets_unknown_kind_fails() {
    let output = awww_bin().args(["widgets", "slider"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown widget kind"));
}

#[test]
fn test_scale_linear() {
    let stdout = stdout_of(awww_bin().args(["scale", "--min", "0", "--max", "10", "5", "20"]));
    assert!(stdout.contains("5 -> 0.500000"));
    // Out-of-range input is clamped first
    assert!(stdout.contains("20 -> 1.000000"));
}

#[test]
fn test_scale_denormalize() {
    let stdout = stdout_of(awww_bin().args([
        "scale", "--min", "-10", "--max", "10", "--normalized", "0.25",
    ]));
    assert!(stdout.contains("0.25 -> -5.000000"), "unexpected output: {stdout}");

    let stdout = stdout_of(awww_bin().args([
        "scale", "--scale", "db", "--min", "-60", "--max", "0", "--normalized", "1",
    ]));
    assert!(stdout.contains("1 -> 0.000000"), "unexpected output: {stdout}");
}

#[test]
fn test_scale_unknown_fails() {
    let output = awww_bin().args(["scale", "--scale", "cubic", "1"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_replay_wheel_reaches_host() {
    let dir = TempDir::new().unwrap();
    let (layout, trace) = write_fixture(
        dir.path(),
        "{\"at_ms\": 0, \"event\": {\"type\": \"wheel\", \"x\": 0, \"y\": 0, \"delta_y\": -1}}\n",
    );

    let stdout = stdout_of(awww_bin().args(["replay", "--layout", &layout, "--trace", &trace]));
    assert!(stdout.contains("'cutoff' (knob)"));
    assert!(stdout.contains("setvalue 440 Hz"));
    assert!(stdout.contains("host begin_edit 0"));
    assert!(stdout.contains("host set_parameter 0"));
    assert!(stdout.contains("100 ms  host end_edit 0"));
    assert!(stdout.contains("100 ms  controlend"));
    assert!(stdout.contains("Final value:"));

    let begin = stdout.find("host begin_edit").unwrap();
    let write = stdout.find("host set_parameter").unwrap();
    let end = stdout.find("host end_edit").unwrap();
    assert!(begin < write && write < end);
}

#[test]
fn test_replay_resize_by_id() {
    let dir = TempDir::new().unwrap();
    let (layout, trace) = write_fixture(
        dir.path(),
        concat!(
            "{\"at_ms\": 0, \"event\": {\"type\": \"mouse_down\", \"x\": 190, \"y\": 190}}\n",
            "# drag past the maximum width\n",
            "{\"at_ms\": 10, \"event\": {\"type\": \"mouse_move\", \"x\": 430, \"y\": 210}}\n",
            "{\"at_ms\": 20, \"event\": {\"type\": \"mouse_up\", \"x\": 430, \"y\": 210}}\n",
        ),
    );

    let stdout = stdout_of(awww_bin().args([
        "replay",
        "--layout",
        &layout,
        "--trace",
        &trace,
        "--id",
        "size",
        "--width",
        "16",
        "--height",
        "16",
        "--view-width",
        "200",
        "--view-height",
        "200",
    ]));
    assert!(stdout.contains("setvalue 200x200"));
    assert!(stdout.contains("host set_size 400x220"));
    assert!(stdout.contains("Final size: 400x220"));
}

#[test]
fn test_replay_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let (layout, trace) = write_fixture(dir.path(), "");
    let output = awww_bin()
        .args(["replay", "--layout", &layout, "--trace", &trace, "--id", "gain"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No widget with id 'gain'"));
}
