//! Fitted facial shape and its export normalization.
//!
//! A [`FaceShape`] is the ordered sequence of 68 landmark points produced by
//! the shape fitter. Before export the shape is normalized: every point is
//! translated by the last landmark and the point set is scaled so that its
//! width and height both span [`NORMALIZED_SHAPE_SIZE`] units.

use crate::constants::{NORMALIZED_SHAPE_SIZE, NUM_FACIAL_LANDMARKS};
use crate::{Error, Result};
use opencv::core::Point2f;

/// Ordered sequence of 68 2-D landmark points
#[derive(Debug, Clone, PartialEq)]
pub struct FaceShape {
    points: Vec<Point2f>,
}

impl FaceShape {
    /// Create a shape from a full set of landmark points
    ///
    /// # Errors
    ///
    /// Returns an error if the point count is not exactly 68.
    pub fn from_points(points: Vec<Point2f>) -> Result<Self> {
        if points.len() != NUM_FACIAL_LANDMARKS {
            return Err(Error::ShapeError(format!(
                "Expected {NUM_FACIAL_LANDMARKS} landmarks, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Landmark points in landmark order
    #[must_use]
    pub fn points(&self) -> &[Point2f] {
        &self.points
    }

    /// Horizontal extent of the point set
    #[must_use]
    pub fn width(&self) -> f32 {
        let (min, max) = Self::extent(self.points.iter().map(|p| p.x));
        max - min
    }

    /// Vertical extent of the point set
    #[must_use]
    pub fn height(&self) -> f32 {
        let (min, max) = Self::extent(self.points.iter().map(|p| p.y));
        max - min
    }

    /// Normalize the shape in place for export.
    ///
    /// Translates every point by the last landmark (so point 67 lands on the
    /// origin), then scales x by `200 / width` and y by `200 / height`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has zero width or height, which would
    /// make the scale factors undefined.
    pub fn normalize(&mut self) -> Result<()> {
        let width = self.width();
        let height = self.height();
        if width <= f32::EPSILON || height <= f32::EPSILON {
            return Err(Error::ShapeError(format!(
                "Degenerate shape extent {width}x{height}"
            )));
        }

        let anchor = self.points[NUM_FACIAL_LANDMARKS - 1];
        for point in &mut self.points {
            point.x -= anchor.x;
            point.y -= anchor.y;
        }

        for point in &mut self.points {
            point.x = point.x * NORMALIZED_SHAPE_SIZE / width;
            point.y = point.y * NORMALIZED_SHAPE_SIZE / height;
        }

        Ok(())
    }

    /// Flattened coordinates in export order: `x0, y0, x1, y1, ...`
    pub fn coordinates(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().flat_map(|p| [p.x, p.y])
    }

    fn extent(values: impl Iterator<Item = f32>) -> (f32, f32) {
        values.fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_shape() -> FaceShape {
        // 68 points on a 4x17 grid spanning 160x30
        let points = (0..NUM_FACIAL_LANDMARKS)
            .map(|i| Point2f::new((i % 17) as f32 * 10.0, (i / 17) as f32 * 10.0))
            .collect();
        FaceShape::from_points(points).unwrap()
    }

    #[test]
    fn test_point_count_enforced() {
        let too_few = vec![Point2f::new(0.0, 0.0); 10];
        assert!(FaceShape::from_points(too_few).is_err());

        let exact = vec![Point2f::new(0.0, 0.0); NUM_FACIAL_LANDMARKS];
        assert!(FaceShape::from_points(exact).is_ok());
    }

    #[test]
    fn test_extent() {
        let shape = grid_shape();
        assert_eq!(shape.width(), 160.0);
        assert_eq!(shape.height(), 30.0);
    }

    #[test]
    fn test_normalize_anchors_last_point() {
        let mut shape = grid_shape();
        shape.normalize().unwrap();

        let last = shape.points()[NUM_FACIAL_LANDMARKS - 1];
        assert_eq!(last.x, 0.0);
        assert_eq!(last.y, 0.0);
    }

    #[test]
    fn test_normalize_scales_to_target() {
        let mut shape = grid_shape();
        shape.normalize().unwrap();

        assert!((shape.width() - NORMALIZED_SHAPE_SIZE).abs() < 1e-3);
        assert!((shape.height() - NORMALIZED_SHAPE_SIZE).abs() < 1e-3);
    }

    #[test]
    fn test_normalize_rejects_degenerate_shape() {
        let mut flat =
            FaceShape::from_points(vec![Point2f::new(1.0, 1.0); NUM_FACIAL_LANDMARKS]).unwrap();
        assert!(flat.normalize().is_err());
    }

    #[test]
    fn test_coordinate_order() {
        let shape = grid_shape();
        let coords: Vec<f32> = shape.coordinates().collect();

        assert_eq!(coords.len(), crate::constants::NUM_COORDINATE_ATTRIBUTES);
        assert_eq!(coords[0], shape.points()[0].x);
        assert_eq!(coords[1], shape.points()[0].y);
        assert_eq!(coords[2], shape.points()[1].x);
    }
}
