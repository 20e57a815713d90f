//! Integration tests for polyq CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

/// Get the path to a test scene file.
fn asset(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from poly-transform-cli to crates
    path.pop(); // Go up from crates to repo root
    path.push("test_assets");
    path.push(name);
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polyq"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Run a command that must succeed and parse its `--json` output.
fn json(args: &[&str]) -> Value {
    let mut args = args.to_vec();
    args.push("--json");
    let output = run(&args);
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn close(value: &Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-9)
}

#[test]
fn info_reports_square_summary() {
    let square = asset("square.yaml");
    let report = json(&["info", &square]);

    assert_eq!(report["name"], "square");
    assert_eq!(report["unit"], "world");
    assert_eq!(report["points"].as_array().map(Vec::len), Some(4));
    assert!(close(&report["centroid"]["x"], 5.0));
    assert!(close(&report["centroid"]["y"], 5.0));
    assert!(close(&report["rotation"], 0.0));
    assert!(close(&report["bounding_box"]["max"]["x"], 10.0));
    assert!(close(&report["signed_area"], 100.0));
    assert_eq!(report["clockwise"], false);

    let segments = report["segments"].as_array().expect("segments array");
    assert_eq!(segments.len(), 4);
    // Last edge wraps back to the first vertex
    assert_eq!(segments[3]["from"]["index"], 3);
    assert_eq!(segments[3]["to"]["index"], 0);
    assert!(close(&segments[0]["length"], 10.0));
    assert!(close(&segments[0]["angle"], 90.0));
}

#[test]
fn info_text_output_lists_points() {
    let output = run(&["info", &asset("square.yaml")]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Points:    4 (world)"), "got: {}", stdout);
    assert!(stdout.contains("[2] 10.000, 10.000"));
    assert!(stdout.contains("Centroid:  5.000, 5.000"));
}

#[test]
fn info_reads_json_scene() {
    let report = json(&["info", &asset("triangle.json")]);
    assert_eq!(report["unit"], "pixels");
    assert!(close(&report["centroid"]["x"], 10.0));
    assert!(close(&report["centroid"]["y"], 40.0 / 3.0));
    assert!(close(&report["segments"][1]["length"], 50.0));
}

#[test]
fn info_reads_scene_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_polyq"))
        .args(["info", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"points: [[0, 0], [4, 0], [4, 4]]\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(report["points"].as_array().map(Vec::len), Some(3));
}

#[test]
fn closest_point_respects_exclusions() {
    let square = asset("square.yaml");

    let report = json(&["closest", &square, "--at", "1,1"]);
    assert_eq!(report["point"]["index"], 0);
    assert!(close(&report["distance"], 2.0_f64.sqrt()));
    assert!(report.get("segment").is_none());

    // (10,0) and (0,10) tie; lowest index wins
    let report = json(&["closest", &square, "--at", "1,1", "-x", "0"]);
    assert_eq!(report["point"]["index"], 1);
}

#[test]
fn closest_neighbor_picks_nearer_adjacent_vertex() {
    let report = json(&["closest", &asset("square.yaml"), "--at", "1,2", "--neighbor"]);
    assert_eq!(report["point"]["index"], 3);
}

#[test]
fn closest_line_reports_edge_and_distance() {
    let report = json(&["closest", &asset("square.yaml"), "--at", "5,-1", "--line"]);
    assert_eq!(report["segment"]["index"], 0);
    assert!(close(&report["distance"], 1.0));
    assert!(report.get("point").is_none());
}

#[test]
fn closest_converts_input_units() {
    // 2 px per world unit: (18,2) px is (9,1) world
    let report = json(&[
        "closest",
        &asset("square.yaml"),
        "--at",
        "18,2",
        "--in",
        "pixels",
    ]);
    assert_eq!(report["point"]["index"], 1);
}

#[test]
fn segment_hits_edge_within_tolerance() {
    let square = asset("square.yaml");

    let hit = json(&["segment", &square, "--at", "5,0.005"]);
    assert_eq!(hit["index"], 0);

    let miss = json(&["segment", &square, "--at", "5,5"]);
    assert!(miss.is_null());

    let wide = json(&["segment", &square, "--at", "5,0.5", "-t", "1"]);
    assert_eq!(wide["index"], 0);
}

#[test]
fn segment_accepts_percentage_positions() {
    // 5% of 100 px = 5 px = 2.5 world units along the top edge
    let hit = json(&[
        "segment",
        &asset("square.yaml"),
        "--at",
        "0.05,0",
        "--in",
        "percentage",
    ]);
    assert_eq!(hit["index"], 0);
}

#[test]
fn near_finds_centroid_and_vertices() {
    let square = asset("square.yaml");

    let report = json(&["near", &square, "--at", "5,5", "-t", "0.1,0.1"]);
    assert_eq!(report["centroid"], true);
    assert!(report["point"].is_null());

    let report = json(&["near", &square, "--at", "10.2,9.8"]);
    assert_eq!(report["point"]["index"], 2);
    assert_eq!(report["centroid"], false);
}

#[test]
fn transform_move_shifts_centroid() {
    let report = json(&["transform", &asset("square.yaml"), "--move", "100,100"]);
    assert!(close(&report["centroid"]["x"], 105.0));
    assert!(close(&report["centroid"]["y"], 105.0));
    assert!(close(&report["rotation"], 0.0));
    assert!(close(&report["points"][0]["x"], 100.0));
}

#[test]
fn transform_rotates_clockwise_about_centroid() {
    let report = json(&["transform", &asset("square.yaml"), "--rotate", "90"]);
    assert!(close(&report["rotation"], 90.0));

    // Top-left corner swings to top-right on a y-down screen
    let first = &report["points"][0];
    assert!((first["x"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!(first["y"].as_f64().unwrap().abs() < 1e-9);
}

#[test]
fn transform_set_rotation_with_origin() {
    let report = json(&[
        "transform",
        &asset("square.yaml"),
        "--set-rotation",
        "180",
        "--origin",
        "0,0",
    ]);
    assert!(close(&report["rotation"], 180.0));
    assert!((report["centroid"]["x"].as_f64().unwrap() + 5.0).abs() < 1e-9);
    assert!((report["centroid"]["y"].as_f64().unwrap() + 5.0).abs() < 1e-9);
}

#[test]
fn transform_centroid_and_set_position() {
    let square = asset("square.yaml");

    let report = json(&["transform", &square, "--centroid", "0,0"]);
    assert!(close(&report["centroid"]["x"], 0.0));
    assert!(close(&report["points"][0]["x"], -5.0));

    // set-position only moves vertex 0
    let report = json(&["transform", &square, "--set-position", "-2,-2"]);
    assert!(close(&report["points"][0]["x"], -2.0));
    assert!(close(&report["points"][1]["x"], 10.0));
}

#[test]
fn transform_changes_working_unit() {
    let report = json(&["transform", &asset("square.yaml"), "--unit", "pixels"]);
    assert_eq!(report["unit"], "pixels");
    assert!(close(&report["points"][2]["x"], 20.0));
    assert!(close(&report["points"][2]["y"], 20.0));
}

#[test]
fn positions_stay_in_scene_unit_after_unit_change() {
    let square = asset("square.yaml");

    // 1 world unit = 2 px = 2% of the 100 px reference width
    let report = json(&[
        "transform", &square, "--unit", "percentage", "--move", "1,0",
    ]);
    assert_eq!(report["unit"], "percentage");
    assert!(close(&report["points"][0]["x"], 0.02));
    assert!(close(&report["points"][0]["y"], 0.0));
    assert!(close(&report["points"][1]["x"], 0.22));

    // origin (5,5) world is (10,10) px
    let report = json(&[
        "transform", &square, "--unit", "pixels", "--rotate", "180", "--origin", "5,5",
    ]);
    assert!((report["points"][0]["x"].as_f64().unwrap() - 20.0).abs() < 1e-9);
    assert!((report["points"][0]["y"].as_f64().unwrap() - 20.0).abs() < 1e-9);

    let report = json(&[
        "transform", &square, "--unit", "pixels", "--centroid", "1,1",
    ]);
    assert!(close(&report["centroid"]["x"], 2.0));
    assert!(close(&report["centroid"]["y"], 2.0));
}

#[test]
fn missing_position_is_usage_error() {
    let output = run(&["closest", &asset("square.yaml")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--at x,y required"), "got: {}", stderr);
}

#[test]
fn unknown_command_and_option_fail() {
    let output = run(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown command"));

    let output = run(&["info", &asset("square.yaml"), "--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown option: --bogus"));
}

#[test]
fn missing_and_empty_scenes_fail() {
    let output = run(&["info", &asset("does-not-exist.yaml")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));

    let output = run(&["info", &asset("empty.yaml")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no points"));
}

#[test]
fn percentage_without_reference_is_conversion_error() {
    let output = run(&[
        "near",
        &asset("triangle.json"),
        "--at",
        "0.5,0.5",
        "--in",
        "percentage",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot convert percentage to pixels"), "got: {}", stderr);
}

#[test]
fn help_prints_usage() {
    let output = run(&["help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"));
    assert!(stderr.contains("transform"));
}
