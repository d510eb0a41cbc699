use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Minimal valid TOML config for the simulated sensor: fast calibration and
// a short report cadence so bounded runs finish quickly.
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[sensor]
sample_rate_hz = 200
read_timeout_ms = 50

[calibration]
samples = 5
interval_ms = 1

[pipeline]
dead_zone_mps2 = 0.3
stationary_band_mps2 = 1.0
stationary_run_ticks = 100
notify_threshold_mps = 2.0
integrate = "x"

[report]
every_ticks = 20
vehicle_id = 7
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn speedwatch() -> Command {
    Command::cargo_bin("speedwatch").unwrap()
}

#[test]
fn help_prints_usage() {
    speedwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn bounded_run_emits_json_summary() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let out = speedwatch()
        .args(["--config", cfg.to_str().unwrap(), "--json", "run", "--ticks", "60"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("stdout is JSON");
    assert_eq!(v["ticks"], 60);
    assert_eq!(v["reports_sent"], 3); // ticks 20, 40, 60
    assert!(v["final_velocity_mps"].is_number());
}

#[test]
fn calibrate_reports_one_g_on_z() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let out = speedwatch()
        .args(["--config", cfg.to_str().unwrap(), "--json", "calibrate"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("stdout is JSON");
    let z = v["bias_z"].as_f64().unwrap();
    assert!((0.9..1.1).contains(&z), "bias_z {z}");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[sensor]\nsample_rate_hz = 0\n").unwrap();
    speedwatch()
        .args(["--config", path.to_str().unwrap(), "run", "--ticks", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample_rate_hz"));
}

#[rstest]
#[case::no_subcommand(&[], "Usage")]
#[case::unknown_flag(&["run", "--bogus"], "unexpected argument")]
fn usage_errors(#[case] args: &[&str], #[case] needle: &str) {
    speedwatch()
        .args(args)
        .assert()
        .code(2)
        .stderr(predicate::str::contains(needle));
}
