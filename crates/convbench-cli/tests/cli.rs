use assert_cmd::Command;
use predicates::prelude::*;

use convbench_bmp::{read_bmp, write_bmp, BmpPlanes};
use convbench_core::ChannelBuf;

fn gradient_planes(width: usize, height: usize) -> BmpPlanes {
    let mut b = ChannelBuf::new(width, height);
    let mut g = ChannelBuf::new(width, height);
    let mut r = ChannelBuf::new(width, height);
    for y in 0..height {
        for x in 0..width {
            b.set(x, y, (x * 9 + y) as u8);
            g.set(x, y, (x + y * 7) as u8);
            r.set(x, y, (x * 2 + y * 3) as u8);
        }
    }
    BmpPlanes { b, g, r }
}

fn convbench() -> Command {
    Command::cargo_bin("convbench").unwrap()
}

#[test]
fn identity_1x1_round_trips_pixel_data() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let planes = gradient_planes(10, 6);
    write_bmp(&input, &planes).unwrap();

    convbench()
        .arg(&input)
        .arg(&output)
        .args(["--rows", "1", "--cols", "1", "--weights", "1.0"])
        .args(["--warmup", "0", "--runs", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average time:"));

    let decoded = read_bmp(&output).unwrap();
    assert_eq!(decoded.b, planes.b);
    assert_eq!(decoded.g, planes.g);
    assert_eq!(decoded.r, planes.r);
}

#[test]
fn default_kernel_shrinks_by_two() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    write_bmp(&input, &gradient_planes(8, 8)).unwrap();

    convbench()
        .arg(&input)
        .arg(&output)
        .args(["--warmup", "0", "--runs", "1"])
        .assert()
        .success();

    let decoded = read_bmp(&output).unwrap();
    assert_eq!(decoded.width(), 6);
    assert_eq!(decoded.height(), 6);
}

#[test]
fn wrong_weight_count_reports_expected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    write_bmp(&input, &gradient_planes(8, 8)).unwrap();

    convbench()
        .arg(&input)
        .arg(&output)
        .args(["--rows", "3", "--cols", "3", "--weights", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 9"));
}

#[test]
fn oversized_kernel_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    write_bmp(&input, &gradient_planes(4, 4)).unwrap();

    let weights = vec!["1"; 25].join(",");
    convbench()
        .arg(&input)
        .arg(&output)
        .args(["--rows", "5", "--cols", "5", "--weights", &weights])
        .args(["--warmup", "0", "--runs", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds image extent"));
    assert!(!output.exists());
}

#[test]
fn missing_input_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.bmp");

    convbench()
        .arg(dir.path().join("missing.bmp"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.bmp"));
}

#[test]
fn partial_kernel_flags_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    write_bmp(&input, &gradient_planes(4, 4)).unwrap();

    convbench()
        .arg(&input)
        .arg(dir.path().join("out.bmp"))
        .args(["--rows", "3"])
        .assert()
        .failure();
}

#[test]
fn stats_json_report_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let stats = dir.path().join("stats.json");
    write_bmp(&input, &gradient_planes(16, 16)).unwrap();

    convbench()
        .arg(&input)
        .arg(&output)
        .args(["--warmup", "1", "--runs", "3"])
        .arg("--stats-json")
        .arg(&stats)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&stats).unwrap()).unwrap();
    assert_eq!(report["iterations"], 3);
    assert_eq!(report["width"], 16);
    assert_eq!(report["out_width"], 14);
    assert_eq!(report["kernel_rows"], 3);
    assert!(report["mean_us"].as_f64().unwrap() >= 0.0);
}

#[test]
fn sharpen_kernel_matches_engine_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let planes = gradient_planes(12, 9);
    write_bmp(&input, &planes).unwrap();

    convbench()
        .arg(&input)
        .arg(&output)
        .args([
            "--rows",
            "3",
            "--cols",
            "3",
            "--weights",
            "-1,-1,-1,-1,8,-1,-1,-1,-1",
        ])
        .args(["--warmup", "0", "--runs", "1"])
        .assert()
        .success();

    let kernel = convbench_core::Kernel::new(
        3,
        3,
        vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    )
    .unwrap();
    let expected_b = convbench_core::convolve(planes.b.as_view(), &kernel);

    let decoded = read_bmp(&output).unwrap();
    assert_eq!(decoded.b, expected_b);
}
