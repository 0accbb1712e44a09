//! Cascade-based face detection.

use crate::{Error, Result};
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::imgproc;
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::Path;

/// Default minimum face size in pixels
const DEFAULT_MIN_FACE_SIZE: i32 = 60;

/// Face detector backed by an `OpenCV` cascade classifier
pub struct FaceDetector {
    cascade: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
    min_face_size: i32,
}

impl FaceDetector {
    /// Load a cascade classifier from an XML file
    ///
    /// # Errors
    ///
    /// Returns an error if the cascade file cannot be loaded or is empty.
    pub fn new<P: AsRef<Path>>(cascade_path: P) -> Result<Self> {
        let path = cascade_path.as_ref();
        log::info!("Loading face cascade: {}", path.display());

        let path_str = path.to_str().ok_or_else(|| {
            Error::InvalidInput(format!("Non-UTF8 cascade path: {}", path.display()))
        })?;

        let cascade = CascadeClassifier::new(path_str)?;
        if cascade.empty()? {
            return Err(Error::ModelError(format!(
                "Cascade file {} loaded empty",
                path.display()
            )));
        }

        Ok(Self {
            cascade,
            scale_factor: 1.1,
            min_neighbors: 3,
            min_face_size: DEFAULT_MIN_FACE_SIZE,
        })
    }

    /// Detect the most prominent face in a frame.
    ///
    /// Detection runs on a grayscale, histogram-equalized copy of the frame;
    /// the largest detection wins. `None` means the frame carries no face,
    /// which is a normal outcome rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an `OpenCV` operation fails.
    pub fn detect_largest(&mut self, frame: &Mat) -> Result<Option<Rect>> {
        let mut gray = Mat::default();
        imgproc::cvt_color(frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        let mut equalized = Mat::default();
        imgproc::equalize_hist(&gray, &mut equalized)?;

        let mut faces = Vector::<Rect>::new();
        self.cascade.detect_multi_scale(
            &equalized,
            &mut faces,
            self.scale_factor,
            self.min_neighbors,
            0,
            Size::new(self.min_face_size, self.min_face_size),
            Size::default(),
        )?;

        Ok(faces
            .iter()
            .max_by_key(|face| i64::from(face.width) * i64::from(face.height)))
    }
}

/// Expand a face box for shape fitting and clamp it to the frame.
///
/// The fitter needs context around the cascade detection. The box is grown by
/// `shift` on each side, squared, and kept within frame bounds.
#[must_use]
pub fn refine_box(bbox: Rect, max_width: i32, max_height: i32, shift: f32) -> Rect {
    let mut bbox = bbox;

    let x_shift = (bbox.width as f32 * shift) as i32;
    let y_shift = (bbox.height as f32 * shift) as i32;

    bbox.x = (bbox.x - x_shift).max(0);
    bbox.y = (bbox.y - y_shift).max(0);
    bbox.width = (bbox.width + 2 * x_shift).min(max_width - bbox.x);
    bbox.height = (bbox.height + 2 * y_shift).min(max_height - bbox.y);

    // Make it square
    let side_length = bbox.width.max(bbox.height);
    bbox.width = side_length.min(max_width);
    bbox.height = side_length.min(max_height);

    if bbox.x + bbox.width > max_width {
        bbox.x = max_width - bbox.width;
    }
    if bbox.y + bbox.height > max_height {
        bbox.y = max_height - bbox.height;
    }

    bbox
}
