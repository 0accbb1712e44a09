//! ARFF export of the normalized shape.
//!
//! The external classifier consumes a fixed-schema attribute-relation file:
//! one unknown class attribute followed by 136 coordinate attributes, and a
//! single data row per frame.

use crate::constants::NUM_FACIAL_LANDMARKS;
use crate::shape::FaceShape;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the attribute file contents for one normalized shape
#[must_use]
pub fn render(shape: &FaceShape) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("@relation fatigue\n\n");
    out.push_str("@attribute fatigue_value real\n");
    for i in 0..NUM_FACIAL_LANDMARKS {
        out.push_str(&format!("@attribute a{i}_x real\n"));
        out.push_str(&format!("@attribute a{i}_y real\n"));
    }

    out.push_str("\n@data\n");
    // Class value is unknown at export time; the classifier fills it in
    out.push('?');
    for coord in shape.coordinates() {
        out.push_str(&format!(",{coord}"));
    }
    out.push('\n');

    out
}

/// Write the attribute file for one normalized shape
///
/// The file is rewritten from scratch every frame.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write<P: AsRef<Path>>(path: P, shape: &FaceShape) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(render(shape).as_bytes())?;
    writer.flush()?;
    Ok(())
}
