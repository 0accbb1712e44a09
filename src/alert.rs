//! Audible alert for high fatigue values.

use std::process::Command;

/// Plays an alert sound through an external player when the stabilized
/// fatigue value reaches the threshold.
pub struct AlertPlayer {
    program: String,
    args: Vec<String>,
}

impl AlertPlayer {
    #[must_use]
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// Trigger the alert if `value` has reached `threshold`.
    ///
    /// Returns whether the alert fired. Player failures are logged and
    /// swallowed; a broken sound setup must not stop the monitor.
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        if value < threshold {
            return false;
        }

        log::warn!("Fatigue value {value:.2} reached threshold {threshold:.2}");
        match Command::new(&self.program).args(&self.args).status() {
            Ok(status) if status.success() => {}
            Ok(status) => log::warn!("Alert player exited with status {status}"),
            Err(e) => log::warn!("Failed to run alert player '{}': {e}", self.program),
        }
        true
    }
}
