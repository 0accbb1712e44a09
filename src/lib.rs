//! Webcam-based drowsiness monitor.
//!
//! This library wires a per-frame fatigue scoring pipeline:
//! 1. Capture a frame from a camera or video file
//! 2. Detect a face with an `OpenCV` cascade classifier
//! 3. Fit a 68-point facial shape model to the face region
//! 4. Normalize the shape and export it to an ARFF attribute file
//! 5. Invoke an external classifier process that scores the file
//! 6. Average the most recent scores and display the result, with an
//!    audible alert above a threshold
//!
//! Face detection, shape fitting and classification are external
//! collaborators; this crate is the orchestration around them.
//!
//! # Examples
//!
//! ```no_run
//! use fatigue_monitor::{app::{FatigueApp, VideoSource}, config::Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! config.validate()?;
//!
//! let mut app = FatigueApp::new(config, VideoSource::Camera(0))?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! The score history and its stabilized mean are usable on their own:
//!
//! ```
//! use fatigue_monitor::history::FatigueHistory;
//!
//! let mut history = FatigueHistory::new(100_000);
//! history.push(6.0);
//! history.push(8.0);
//! assert_eq!(history.stabilized(3), Some(7.0));
//! ```

/// Face detection via a cascade classifier
pub mod face_detection;

/// 68-point facial shape fitting
pub mod shape_fitting;

/// Fitted shape type and export normalization
pub mod shape;

/// ARFF attribute file export
pub mod arff;

/// External classifier process bridge
pub mod classifier;

/// Fatigue score history and stabilization
pub mod history;

/// Audible alert player
pub mod alert;

/// Trackbar control panel
pub mod controls;

/// Utility functions and safe casting helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
