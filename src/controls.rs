//! Trackbar control panel for the monitor window.
//!
//! The interval, stabilizer and fatigue threshold are adjustable at runtime
//! through `highgui` trackbars. Positions are polled once per loop iteration
//! rather than mutated from callbacks; a zero on Interval or Stabilizer is
//! rejected by restoring the previous value onto the trackbar.

use crate::constants::{
    INTERVAL_TRACKBAR_MAX, STABILIZER_TRACKBAR_MAX, THRESHOLD_TRACKBAR_MAX,
};
use crate::utils::safe_cast::{f64_to_i32, i32_to_usize, usize_to_i32};
use crate::Result;
use opencv::highgui;

const INTERVAL_TRACKBAR: &str = "Interval";
const STABILIZER_TRACKBAR: &str = "Stabilizer";
const THRESHOLD_TRACKBAR: &str = "Fatigue Threshold";

/// Runtime-adjustable monitor parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorParams {
    /// Pacing interval in milliseconds
    pub interval_ms: i32,
    /// Averaging window for the stabilized score
    pub stabilizer: usize,
    /// Alert threshold
    pub fatigue_threshold: f64,
}

/// Trackbar panel attached to the monitor window
pub struct ControlPanel {
    window: String,
    current: MonitorParams,
}

impl ControlPanel {
    /// Create the trackbars on an existing window, seeded with `initial`
    ///
    /// # Errors
    ///
    /// Returns an error if a trackbar cannot be created.
    pub fn new(window: &str, initial: MonitorParams) -> Result<Self> {
        highgui::create_trackbar(INTERVAL_TRACKBAR, window, None, INTERVAL_TRACKBAR_MAX, None)?;
        highgui::create_trackbar(
            STABILIZER_TRACKBAR,
            window,
            None,
            STABILIZER_TRACKBAR_MAX,
            None,
        )?;
        highgui::create_trackbar(
            THRESHOLD_TRACKBAR,
            window,
            None,
            THRESHOLD_TRACKBAR_MAX,
            None,
        )?;

        highgui::set_trackbar_pos(INTERVAL_TRACKBAR, window, initial.interval_ms)?;
        highgui::set_trackbar_pos(
            STABILIZER_TRACKBAR,
            window,
            usize_to_i32(initial.stabilizer)?.min(STABILIZER_TRACKBAR_MAX),
        )?;
        highgui::set_trackbar_pos(
            THRESHOLD_TRACKBAR,
            window,
            f64_to_i32(initial.fatigue_threshold.round())?,
        )?;

        Ok(Self {
            window: window.to_string(),
            current: initial,
        })
    }

    /// Read the current parameters, rejecting zero trackbar positions.
    ///
    /// A zero Interval or Stabilizer would stall the loop or void the
    /// average; the previous value is kept and written back to the trackbar.
    ///
    /// # Errors
    ///
    /// Returns an error if a trackbar position cannot be read or restored.
    pub fn read(&mut self) -> Result<MonitorParams> {
        let interval = highgui::get_trackbar_pos(INTERVAL_TRACKBAR, &self.window)?;
        if interval == 0 {
            highgui::set_trackbar_pos(INTERVAL_TRACKBAR, &self.window, self.current.interval_ms)?;
        } else {
            self.current.interval_ms = interval;
        }

        let stabilizer = highgui::get_trackbar_pos(STABILIZER_TRACKBAR, &self.window)?;
        if stabilizer == 0 {
            highgui::set_trackbar_pos(
                STABILIZER_TRACKBAR,
                &self.window,
                usize_to_i32(self.current.stabilizer)?.min(STABILIZER_TRACKBAR_MAX),
            )?;
        } else {
            self.current.stabilizer = i32_to_usize(stabilizer)?;
        }

        let threshold = highgui::get_trackbar_pos(THRESHOLD_TRACKBAR, &self.window)?;
        self.current.fatigue_threshold = f64::from(threshold);

        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_are_copyable() {
        let params = MonitorParams {
            interval_ms: 20,
            stabilizer: 3,
            fatigue_threshold: 7.0,
        };
        let copy = params;
        assert_eq!(copy, params);
    }
}
