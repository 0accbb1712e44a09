//! Fatigue score history and trailing-window stabilization.
//!
//! Scores are appended once per classified frame. The history is deliberately
//! append-only with a hard cap: when a push would exceed the cap the whole
//! history is cleared first, discarding all prior scores. The displayed value
//! is the mean of the most recent `window` scores.

use crate::constants::MAX_HISTORY_LEN;

/// Capped, append-only sequence of fatigue scores
#[derive(Debug, Clone)]
pub struct FatigueHistory {
    values: Vec<f64>,
    cap: usize,
}

impl Default for FatigueHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY_LEN)
    }
}

impl FatigueHistory {
    /// Create a history with the given capacity cap
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            values: Vec::new(),
            cap,
        }
    }

    /// Append a score, clearing the history first if it is at capacity
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.cap {
            log::info!("Fatigue history reached cap of {}, clearing", self.cap);
            self.values.clear();
        }
        self.values.push(value);
    }

    /// Number of stored scores
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no scores have been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of the most recent `window` scores.
    ///
    /// When fewer than `window` scores are present the mean covers the whole
    /// history. Returns `None` for an empty history or a zero window.
    #[must_use]
    pub fn stabilized(&self, window: usize) -> Option<f64> {
        if self.values.is_empty() || window == 0 {
            return None;
        }
        let begin = self.values.len().saturating_sub(window);
        let tail = &self.values[begin..];
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stabilized_full_window() {
        let mut history = FatigueHistory::new(100);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            history.push(v);
        }

        // Mean of the trailing three scores
        assert_eq!(history.stabilized(3), Some(4.0));
        assert_eq!(history.stabilized(5), Some(3.0));
    }

    #[test]
    fn test_stabilized_short_history() {
        let mut history = FatigueHistory::new(100);
        history.push(6.0);
        history.push(8.0);

        // Window larger than history falls back to the whole history
        assert_eq!(history.stabilized(10), Some(7.0));
    }

    #[test]
    fn test_stabilized_empty() {
        let history = FatigueHistory::new(100);
        assert_eq!(history.stabilized(3), None);
    }

    #[test]
    fn test_stabilized_zero_window() {
        let mut history = FatigueHistory::new(100);
        history.push(1.0);
        assert_eq!(history.stabilized(0), None);
    }

    #[test]
    fn test_cap_clears_history() {
        let mut history = FatigueHistory::new(4);
        for v in 0..4 {
            history.push(f64::from(v));
        }
        assert_eq!(history.len(), 4);

        // Fifth push hits the cap: everything prior is discarded
        history.push(9.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.stabilized(3), Some(9.0));
    }

    #[test]
    fn test_default_cap() {
        let history = FatigueHistory::default();
        assert_eq!(history.cap, MAX_HISTORY_LEN);
    }
}
