//! Facial shape fitting using `ONNX` Runtime.
//!
//! Fits the 68-point shape model to a detected face region. The model file
//! is loaded once at startup; fitting runs per frame on the face ROI.

use crate::constants::{NUM_COORDINATE_ATTRIBUTES, NUM_FACIAL_LANDMARKS};
use crate::shape::FaceShape;
use crate::utils::safe_cast::{i32_to_usize, usize_to_i32};
use crate::{Error, Result};
use ndarray::{Array1, Array4, CowArray};
use opencv::core::{Mat, Point2f, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Model input side length
const FITTER_INPUT_SIZE: i32 = 128;

/// Shape fitter backed by an `ONNX` landmark model
pub struct ShapeFitter {
    session: Session,
    input_size: i32,
}

impl ShapeFitter {
    /// Create a shape fitter from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        log::info!(
            "Initializing ShapeFitter with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("shape_fitter")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        Ok(Self {
            session,
            input_size: FITTER_INPUT_SIZE,
        })
    }

    /// Fit the shape model to a face region
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Image preprocessing fails
    /// - The model inference fails
    /// - The output does not carry 68 landmarks
    pub fn fit(&self, face_image: &Mat) -> Result<FaceShape> {
        let input = self.preprocess(face_image)?;
        let marks = self.forward(input)?;
        self.postprocess(&marks, face_image)
    }

    /// Preprocess the face region for the model
    fn preprocess(&self, image: &Mat) -> Result<Array4<f32>> {
        let size = i32_to_usize(self.input_size)?;
        let channels = 3;

        // Resize image
        let mut resized = Mat::default();
        imgproc::resize(
            image,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        // Convert BGR to RGB
        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        // Convert to f32 and normalize to [0, 1]
        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel =
                    float_image.at_2d::<opencv::core::Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        // NHWC layout, matching the landmark model input
        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| Error::ModelError(format!("Failed to create input array: {e}")))
    }

    /// Run forward pass through the model
    fn forward(&self, inputs: Array4<f32>) -> Result<Array1<f32>> {
        let cow_array = CowArray::from(inputs.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        let marks_output = outputs
            .into_iter()
            .next()
            .ok_or_else(|| Error::ModelOutputError("No output from model".to_string()))?;

        let marks_tensor = marks_output.try_extract::<f32>()?;
        let marks_view = marks_tensor.view();
        let marks_data = marks_view
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to get output data".to_string()))?;

        Ok(Array1::from(marks_data.to_vec()))
    }

    /// Convert model output to a shape in face-image coordinates
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for pixel coordinates
    fn postprocess(&self, marks: &Array1<f32>, face_image: &Mat) -> Result<FaceShape> {
        if marks.len() < NUM_COORDINATE_ATTRIBUTES {
            return Err(Error::ModelOutputError(format!(
                "Model produced {} values, expected {NUM_COORDINATE_ATTRIBUTES}",
                marks.len()
            )));
        }

        // Marks are in input-size coordinates, scale back to the face region
        let face_width = face_image.cols() as f32;
        let face_height = face_image.rows() as f32;

        let points = (0..NUM_FACIAL_LANDMARKS)
            .map(|j| {
                let x = marks[j * 2] * face_width / self.input_size as f32;
                let y = marks[j * 2 + 1] * face_height / self.input_size as f32;
                Point2f::new(x, y)
            })
            .collect();

        FaceShape::from_points(points)
    }
}
