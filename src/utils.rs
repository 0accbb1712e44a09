//! Utility helpers shared across the pipeline.

pub mod safe_cast;
