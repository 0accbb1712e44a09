//! Configuration management for the fatigue monitor application

use crate::constants::{
    DEFAULT_FATIGUE_THRESHOLD, DEFAULT_INTERVAL_MS, DEFAULT_RESULT_LINE, DEFAULT_STABILIZER,
    MAX_HISTORY_LEN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model configuration
    pub models: ModelConfig,

    /// External classifier configuration
    pub classifier: ClassifierConfig,

    /// Monitor loop parameters
    pub monitor: MonitorConfig,

    /// Alert configuration
    pub alert: AlertConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Model file paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the face cascade classifier XML file
    pub face_cascade: PathBuf,

    /// Path to the facial shape model (ONNX)
    pub shape_model: PathBuf,
}

/// External classifier process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Program to execute
    pub program: String,

    /// Arguments passed verbatim; must name the ARFF input and result output
    pub args: Vec<String>,

    /// ARFF file the monitor writes each frame
    pub arff_path: PathBuf,

    /// Result file the classifier writes
    pub result_path: PathBuf,

    /// 1-based line of the result file carrying the score
    pub result_line: usize,
}

/// Monitor loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pacing interval in milliseconds between loop iterations
    pub interval_ms: i32,

    /// Averaging window for the stabilized score
    pub stabilizer: usize,

    /// Alert threshold for the stabilized score
    pub fatigue_threshold: f64,

    /// Cap on stored scores; the history is cleared when it is reached
    pub history_cap: usize,
}

/// Alert sound configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Sound player program
    pub program: String,

    /// Player arguments, typically naming the sound file
    pub args: Vec<String>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the GUI window and trackbars
    pub gui: bool,

    /// Draw the fitted landmarks on the displayed frame
    pub draw_landmarks: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            face_cascade: PathBuf::from("assets/haarcascade_frontalface_alt2.xml"),
            shape_model: PathBuf::from("assets/face_landmarks.onnx"),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: [
                "-classpath",
                "weka.jar",
                "weka.filters.supervised.attribute.AddClassification",
                "-serialized",
                "model_filtered.model",
                "-classification",
                "-remove-old-class",
                "-i",
                "value.arff",
                "-o",
                "value",
                "-c",
                "first",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            arff_path: PathBuf::from("value.arff"),
            result_path: PathBuf::from("value"),
            result_line: DEFAULT_RESULT_LINE,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            stabilizer: DEFAULT_STABILIZER,
            fatigue_threshold: DEFAULT_FATIGUE_THRESHOLD,
            history_cap: MAX_HISTORY_LEN,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            program: "canberra-gtk-play".to_string(),
            args: vec!["-f".to_string(), "rest.ogg".to_string()],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: true,
            draw_landmarks: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        if self.monitor.interval_ms <= 0 {
            return Err(Error::ConfigError(
                "Interval must be greater than 0".to_string(),
            ));
        }
        if self.monitor.stabilizer == 0 {
            return Err(Error::ConfigError(
                "Stabilizer window must be greater than 0".to_string(),
            ));
        }
        if self.monitor.history_cap == 0 {
            return Err(Error::ConfigError(
                "History cap must be greater than 0".to_string(),
            ));
        }
        if !self.monitor.fatigue_threshold.is_finite() {
            return Err(Error::ConfigError(
                "Fatigue threshold must be a finite number".to_string(),
            ));
        }

        if self.classifier.program.is_empty() {
            return Err(Error::ConfigError(
                "Classifier program must not be empty".to_string(),
            ));
        }
        if self.classifier.result_line == 0 {
            return Err(Error::ConfigError(
                "Classifier result line is 1-based and must be greater than 0".to_string(),
            ));
        }

        // Model paths must exist before the loop starts
        if !self.models.face_cascade.exists() {
            return Err(Error::ConfigError(format!(
                "Face cascade not found: {}",
                self.models.face_cascade.display()
            )));
        }
        if !self.models.shape_model.exists() {
            return Err(Error::ConfigError(format!(
                "Shape model not found: {}",
                self.models.shape_model.display()
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Fatigue Monitor Configuration

# Model paths
models:
  face_cascade: "assets/haarcascade_frontalface_alt2.xml"
  shape_model: "assets/face_landmarks.onnx"

# External classifier
classifier:
  program: "java"
  args:
    - "-classpath"
    - "weka.jar"
    - "weka.filters.supervised.attribute.AddClassification"
    - "-serialized"
    - "model_filtered.model"
    - "-classification"
    - "-remove-old-class"
    - "-i"
    - "value.arff"
    - "-o"
    - "value"
    - "-c"
    - "first"
  arff_path: "value.arff"
  result_path: "value"
  result_line: 143

# Monitor loop
monitor:
  interval_ms: 20
  stabilizer: 3
  fatigue_threshold: 7.0
  history_cap: 100000

# Alert sound
alert:
  program: "canberra-gtk-play"
  args: ["-f", "rest.ogg"]

# Display
display:
  gui: true
  draw_landmarks: true
"#;
