//! Main application module for the fatigue monitor.

use crate::{
    alert::AlertPlayer,
    arff,
    classifier::{ClassifierCommand, FatigueClassifier},
    config::Config,
    constants::WINDOW_NAME,
    controls::{ControlPanel, MonitorParams},
    error::Result,
    face_detection::{refine_box, FaceDetector},
    shape_fitting::ShapeFitter,
};
use log::{debug, info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui::{self, WINDOW_NORMAL},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};
use std::time::Duration;

/// Video source type
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// Result of processing a single frame
struct FrameOutcome {
    /// Raw score for this frame
    score: f64,
    /// Mean of the most recent stabilizer-window scores
    stabilized: f64,
    /// Landmarks in frame coordinates, for drawing
    landmarks: Vec<Point>,
}

/// Main application struct
pub struct FatigueApp {
    config: Config,
    video_source: VideoSource,
    video_capture: VideoCapture,
    face_detector: FaceDetector,
    shape_fitter: ShapeFitter,
    classifier: FatigueClassifier,
    alert: AlertPlayer,
    history: crate::history::FatigueHistory,
    controls: Option<ControlPanel>,
    params: MonitorParams,
}

impl FatigueApp {
    /// Create a new fatigue monitor application
    ///
    /// # Errors
    ///
    /// Returns an error if the camera or video file cannot be opened, a model
    /// file fails to load, or the GUI cannot be created.
    pub fn new(config: Config, video_source: VideoSource) -> Result<Self> {
        info!("Initializing fatigue monitor");

        let mut video_capture = match &video_source {
            VideoSource::Camera(index) => {
                info!("Opening camera {index}");
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;

                // Reduce buffer size for lower latency (webcam only)
                cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;

                cap
            }
            VideoSource::File(path) => {
                info!("Opening video file: {path}");
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };
        if !video_capture.is_opened()? {
            return Err(crate::Error::InvalidInput(
                "Failed to open video source".to_string(),
            ));
        }

        let face_detector = FaceDetector::new(&config.models.face_cascade)?;
        let shape_fitter = ShapeFitter::new(&config.models.shape_model)?;

        let classifier = FatigueClassifier::new(ClassifierCommand {
            program: config.classifier.program.clone(),
            args: config.classifier.args.clone(),
            result_path: config.classifier.result_path.clone(),
            result_line: config.classifier.result_line,
        });

        let alert = AlertPlayer::new(config.alert.program.clone(), config.alert.args.clone());

        let history = crate::history::FatigueHistory::new(config.monitor.history_cap);

        let params = MonitorParams {
            interval_ms: config.monitor.interval_ms,
            stabilizer: config.monitor.stabilizer,
            fatigue_threshold: config.monitor.fatigue_threshold,
        };

        let controls = if config.display.gui {
            highgui::named_window(WINDOW_NAME, WINDOW_NORMAL)?;
            Some(ControlPanel::new(WINDOW_NAME, params)?)
        } else {
            info!("Running headless, parameters fixed from configuration");
            None
        };

        Ok(Self {
            config,
            video_source,
            video_capture,
            face_detector,
            shape_fitter,
            classifier,
            alert,
            history,
            controls,
            params,
        })
    }

    /// Run the main monitor loop.
    ///
    /// Blocks on frame acquisition, on the classifier subprocess and on key
    /// polling. Returns when the user quits or, for file sources, at end of
    /// input.
    ///
    /// # Errors
    ///
    /// Per-frame failures are logged and skipped; only capture or GUI
    /// failures abort the loop.
    pub fn run(&mut self) -> Result<()> {
        info!("Entering main loop");
        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                if matches!(self.video_source, VideoSource::File(_)) {
                    info!("End of video file reached");
                    break;
                }
                warn!("No captured frame, retrying");
                continue;
            }

            // Trackbar positions are read once per iteration
            if let Some(controls) = &mut self.controls {
                self.params = controls.read()?;
            }

            let outcome = match self.process_frame(&frame) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Skipping frame: {e}");
                    None
                }
            };

            if let Some(outcome) = &outcome {
                debug!(
                    "Frame score {:.3}, stabilized {:.3}",
                    outcome.score, outcome.stabilized
                );
                self.alert
                    .check(outcome.stabilized, self.params.fatigue_threshold);
            }

            if self.controls.is_some() {
                self.display(&frame, outcome.as_ref())?;

                let key = highgui::wait_key(self.params.interval_ms)?;
                if key == i32::from(b'c') || key == i32::from(b'q') || key == 27 {
                    info!("Exit requested by user");
                    break;
                }
            } else {
                // Headless pacing without a key poll
                std::thread::sleep(Duration::from_millis(u64::try_from(
                    self.params.interval_ms,
                )
                .unwrap_or(20)));
            }
        }

        self.cleanup();
        info!("Application shutting down");
        Ok(())
    }

    /// Process a single frame: detect, fit, export, classify, stabilize.
    ///
    /// `Ok(None)` means the frame carried no face, which is normal.
    fn process_frame(&mut self, frame: &Mat) -> Result<Option<FrameOutcome>> {
        let Some(face_box) = self.face_detector.detect_largest(frame)? else {
            debug!("This frame doesn't contain any faces");
            return Ok(None);
        };

        let fit_box = refine_box(face_box, frame.cols(), frame.rows(), 0.2);
        let face_roi = Mat::roi(frame, fit_box)?.try_clone()?;

        let mut shape = self.shape_fitter.fit(&face_roi)?;

        // Landmarks in frame coordinates, before the shape is normalized away
        let landmarks = shape
            .points()
            .iter()
            .map(|p| Point::new(fit_box.x + p.x as i32, fit_box.y + p.y as i32))
            .collect();

        shape.normalize()?;
        arff::write(&self.config.classifier.arff_path, &shape)?;

        let score = self.classifier.score()?;
        self.history.push(score);

        let stabilized = self
            .history
            .stabilized(self.params.stabilizer)
            .unwrap_or(score);

        Ok(Some(FrameOutcome {
            score,
            stabilized,
            landmarks,
        }))
    }

    /// Show the frame with landmarks and the stabilized value
    fn display(&self, frame: &Mat, outcome: Option<&FrameOutcome>) -> Result<()> {
        let mut display_frame = frame.clone();

        if let Some(outcome) = outcome {
            if self.config.display.draw_landmarks {
                for point in &outcome.landmarks {
                    imgproc::circle(
                        &mut display_frame,
                        *point,
                        2,
                        Scalar::new(0.0, 0.0, 255.0, 0.0),
                        -1,
                        LINE_8,
                        0,
                    )?;
                }
            }

            let text = format!("Fatigue: {:.2}", outcome.stabilized);
            let color = if outcome.stabilized >= self.params.fatigue_threshold {
                Scalar::new(0.0, 0.0, 255.0, 0.0)
            } else {
                Scalar::new(0.0, 255.0, 0.0, 0.0)
            };
            imgproc::put_text(
                &mut display_frame,
                &text,
                Point::new(10, 30),
                FONT_HERSHEY_SIMPLEX,
                1.0,
                color,
                2,
                LINE_8,
                false,
            )?;
        }

        highgui::imshow(WINDOW_NAME, &display_frame)?;
        Ok(())
    }

    /// Remove the hand-off files, best effort
    fn cleanup(&self) {
        for path in [
            self.config.classifier.arff_path.as_path(),
            self.classifier.result_path(),
        ] {
            if let Err(e) = std::fs::remove_file(path) {
                debug!("Could not remove {}: {e}", path.display());
            }
        }
    }
}
