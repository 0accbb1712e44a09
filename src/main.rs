//! Fatigue monitor application entry point.

use anyhow::Result;
use clap::Parser;
use fatigue_monitor::app::{FatigueApp, VideoSource};
use fatigue_monitor::config::Config;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Video file to process instead of a camera
    #[arg(short, long, conflicts_with = "cam")]
    video: Option<String>,

    /// Path to the face cascade XML file
    #[arg(long)]
    cascade: Option<PathBuf>,

    /// Path to the facial shape model
    #[arg(long)]
    shape_model: Option<PathBuf>,

    /// Initial pacing interval in milliseconds
    #[arg(short, long)]
    interval: Option<i32>,

    /// Initial stabilizer window size
    #[arg(short, long)]
    stabilizer: Option<usize>,

    /// Initial fatigue alert threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Run without a GUI window
    #[arg(long)]
    headless: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn run(args: Args) -> Result<()> {
    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(cascade) = args.cascade {
        config.models.face_cascade = cascade;
    }
    if let Some(shape_model) = args.shape_model {
        config.models.shape_model = shape_model;
    }
    if let Some(interval) = args.interval {
        config.monitor.interval_ms = interval;
    }
    if let Some(stabilizer) = args.stabilizer {
        config.monitor.stabilizer = stabilizer;
    }
    if let Some(threshold) = args.threshold {
        config.monitor.fatigue_threshold = threshold;
    }
    if args.headless {
        config.display.gui = false;
    }

    config.validate()?;

    let video_source = if let Some(video_path) = args.video {
        VideoSource::File(video_path)
    } else {
        VideoSource::Camera(args.cam)
    };

    let mut app = FatigueApp::new(config, video_source)?;
    app.run()?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Fatigue Monitor");

    // Startup failures abort with a message and a nonzero exit
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
