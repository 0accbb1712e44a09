//! Configuration loading and validation tests

use fatigue_monitor::config::{Config, EXAMPLE_CONFIG};

#[test]
fn example_config_roundtrips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();
    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.monitor.interval_ms, 20);
    assert_eq!(config.monitor.stabilizer, 3);
    assert_eq!(config.monitor.fatigue_threshold, 7.0);
    assert_eq!(config.monitor.history_cap, 100_000);
    assert_eq!(config.classifier.result_line, 143);
}

#[test]
fn save_and_reload_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::default();
    config.monitor.stabilizer = 8;
    config.classifier.result_line = 7;
    config.to_file(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.monitor.stabilizer, 8);
    assert_eq!(reloaded.classifier.result_line, 7);
}

#[test]
fn partial_config_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    // A user config typically overrides a handful of settings at most
    std::fs::write(&path, "monitor:\n  fatigue_threshold: 5.5\n").unwrap();
    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.monitor.fatigue_threshold, 5.5);
    assert_eq!(config.monitor.interval_ms, 20);
    assert_eq!(config.monitor.history_cap, 100_000);
    assert_eq!(config.classifier.result_line, 143);
}

#[test]
fn missing_file_is_an_error() {
    assert!(Config::from_file("/nonexistent/config.yaml").is_err());
}

#[test]
fn malformed_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    std::fs::write(&path, "monitor: [not, a, mapping").unwrap();
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn validation_checks_model_paths() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.models.face_cascade = dir.path().join("missing-cascade.xml");
    config.models.shape_model = dir.path().join("missing-model.onnx");

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("cascade"));
}

#[test]
fn validation_rejects_nonpositive_interval() {
    let mut config = Config::default();
    config.monitor.interval_ms = 0;
    assert!(config.validate().is_err());

    config.monitor.interval_ms = -5;
    assert!(config.validate().is_err());
}
