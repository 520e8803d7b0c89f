use std::{env, fs, path::PathBuf};
use trendcast::{Forecast, ForecastService, Manager};

/// Service that ignores the data and repeats the period.
struct Constant;

impl ForecastService for Constant {
    fn forecast(&self, _data: &[f64], steps: i64, period: i64) -> Forecast {
        Forecast {
            forecast: vec![period as f64; steps.max(0) as usize],
            avg: 0.0,
            trend: 0.0,
            period: Some(period),
        }
    }

    fn name(&self) -> &str {
        "constant"
    }
}

fn setup_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");
    test_dir
}

#[test]
fn custom_service_is_used() {
    let test_dir = setup_dir("custom_service_is_used");
    fs::write(test_dir.join("config.toml"), "").expect("failed to write config file");
    fs::write(test_dir.join("series-a.toml"), "data = [1.0, 2.0]\nperiod = 7\n")
        .expect("failed to write series file");

    let mgr =
        Manager::with_service(&test_dir, Box::new(Constant)).expect("failed to construct mgr");
    assert_eq!(mgr.run_jobs().expect("failed to run jobs"), 1);

    let mut out = Vec::new();
    mgr.report(&mut out).expect("failed to write report");
    let report: serde_json::Value = serde_json::from_slice(&out).expect("invalid report");
    assert_eq!(report["a"]["forecast"], serde_json::json!([7.0, 7.0, 7.0]));
    assert_eq!(report["a"]["period"], serde_json::json!(7));

    assert_eq!(mgr.clean().expect("failed to clean"), 1);
    assert_eq!(mgr.clean().expect("failed to clean"), 0);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn empty_job_dir() {
    let test_dir = setup_dir("empty_job_dir");
    fs::write(test_dir.join("config.toml"), "pretty = true\n")
        .expect("failed to write config file");

    let mgr = Manager::new(&test_dir).expect("failed to construct mgr");
    assert_eq!(mgr.run_jobs().expect("failed to run jobs"), 0);

    let mut out = Vec::new();
    mgr.report(&mut out).expect("failed to write report");
    let report: serde_json::Value = serde_json::from_slice(&out).expect("invalid report");
    assert_eq!(report, serde_json::json!({}));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn missing_config_fails() {
    let test_dir = setup_dir("missing_config_fails");
    assert!(Manager::new(&test_dir).is_err());
    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn malformed_series_fails() {
    let test_dir = setup_dir("malformed_series_fails");
    fs::write(test_dir.join("config.toml"), "").expect("failed to write config file");
    fs::write(test_dir.join("series-bad.toml"), "data = [\"x\"]\n")
        .expect("failed to write series file");

    let mgr = Manager::new(&test_dir).expect("failed to construct mgr");
    assert!(mgr.run_jobs().is_err());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn job_dir_with_glob_metacharacters() {
    let test_dir = setup_dir("job[1]?*");
    fs::write(test_dir.join("config.toml"), "").expect("failed to write config file");
    fs::write(test_dir.join("series-a.toml"), "data = [1.0, 2.0]\n")
        .expect("failed to write series file");

    let mgr = Manager::new(&test_dir).expect("failed to construct mgr");
    assert_eq!(mgr.run_jobs().expect("failed to run jobs"), 1);
    assert!(test_dir.join("forecast-a.msgpack").is_file());

    let mut out = Vec::new();
    mgr.report(&mut out).expect("failed to write report");
    let report: serde_json::Value = serde_json::from_slice(&out).expect("invalid report");
    assert_eq!(report["a"]["avg"], serde_json::json!(1.5));

    assert_eq!(mgr.clean().expect("failed to clean"), 1);
    assert!(!test_dir.join("forecast-a.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}
