//! Property tests for the score history and its stabilized mean

use fatigue_monitor::history::FatigueHistory;
use proptest::prelude::*;

/// Direct arithmetic mean over the trailing window, computed independently
fn direct_mean(values: &[f64], window: usize) -> Option<f64> {
    if values.is_empty() || window == 0 {
        return None;
    }
    let begin = values.len().saturating_sub(window);
    let tail = &values[begin..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

proptest! {
    #[test]
    fn stabilized_matches_direct_mean(
        values in prop::collection::vec(-100.0f64..100.0, 0..50),
        window in 1usize..12,
    ) {
        let mut history = FatigueHistory::new(1000);
        for &v in &values {
            history.push(v);
        }

        match (history.stabilized(window), direct_mean(&values, window)) {
            (Some(actual), Some(expected)) => {
                prop_assert!((actual - expected).abs() < 1e-9);
            }
            (None, None) => {}
            (actual, expected) => {
                prop_assert!(false, "mismatch: {actual:?} vs {expected:?}");
            }
        }
    }

    #[test]
    fn history_never_exceeds_cap(
        values in prop::collection::vec(0.0f64..10.0, 1..500),
        cap in 1usize..100,
    ) {
        let mut history = FatigueHistory::new(cap);
        for &v in &values {
            history.push(v);
            prop_assert!(history.len() <= cap);
        }
    }

    #[test]
    fn stabilized_is_bounded_by_extremes(
        values in prop::collection::vec(-50.0f64..50.0, 1..50),
        window in 1usize..12,
    ) {
        let mut history = FatigueHistory::new(1000);
        for &v in &values {
            history.push(v);
        }

        let mean = history.stabilized(window).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
    }
}

#[test]
fn truncation_happens_exactly_at_cap() {
    let cap = 10;
    let mut history = FatigueHistory::new(cap);

    for i in 0..cap {
        history.push(i as f64);
        assert_eq!(history.len(), i + 1);
    }

    // The push that would exceed the cap clears everything first
    history.push(42.0);
    assert_eq!(history.len(), 1);
    assert_eq!(history.stabilized(cap), Some(42.0));
}

#[test]
fn short_history_averages_everything() {
    let mut history = FatigueHistory::new(100);
    history.push(2.0);
    history.push(4.0);

    // Window of 5 with only two entries: mean over both
    assert_eq!(history.stabilized(5), Some(3.0));
}
