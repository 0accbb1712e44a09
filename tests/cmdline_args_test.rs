//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the main application.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("fatigue-monitor")
        .version("0.1.0")
        .about("Webcam-based drowsiness monitor")
        .arg(
            Arg::new("cam")
                .long("cam")
                .value_name("INDEX")
                .default_value("0")
                .help("Camera index"),
        )
        .arg(
            Arg::new("video")
                .short('v')
                .long("video")
                .value_name("PATH")
                .conflicts_with("cam")
                .help("Video file path"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("MS")
                .help("Pacing interval in milliseconds"),
        )
        .arg(
            Arg::new("stabilizer")
                .short('s')
                .long("stabilizer")
                .value_name("N")
                .help("Averaging window size"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("VALUE")
                .help("Fatigue alert threshold"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Run without a GUI window"),
        )
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("PATH")
                .help("Configuration file"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
}

#[test]
fn test_default_camera_index() {
    let matches = create_test_command()
        .try_get_matches_from(["fatigue-monitor"])
        .unwrap();

    assert_eq!(matches.get_one::<String>("cam").unwrap(), "0");
    assert!(!matches.get_flag("headless"));
}

#[test]
fn test_video_conflicts_with_cam() {
    let result = create_test_command().try_get_matches_from([
        "fatigue-monitor",
        "--cam",
        "1",
        "--video",
        "session.mp4",
    ]);

    assert!(result.is_err());
}

#[test]
fn test_monitor_parameters() {
    let matches = create_test_command()
        .try_get_matches_from([
            "fatigue-monitor",
            "--interval",
            "50",
            "--stabilizer",
            "5",
            "--threshold",
            "8",
        ])
        .unwrap();

    assert_eq!(matches.get_one::<String>("interval").unwrap(), "50");
    assert_eq!(matches.get_one::<String>("stabilizer").unwrap(), "5");
    assert_eq!(matches.get_one::<String>("threshold").unwrap(), "8");
}

#[test]
fn test_headless_flag() {
    let matches = create_test_command()
        .try_get_matches_from(["fatigue-monitor", "--headless", "--debug"])
        .unwrap();

    assert!(matches.get_flag("headless"));
    assert!(matches.get_flag("debug"));
}
