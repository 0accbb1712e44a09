//! Constants used throughout the application

/// Number of facial landmarks in the fitted shape
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Number of coordinate attributes exported per shape (68 points x 2 coordinates)
pub const NUM_COORDINATE_ATTRIBUTES: usize = 136;

/// Side length the normalized shape is scaled to before export
pub const NORMALIZED_SHAPE_SIZE: f32 = 200.0;

/// Maximum number of fatigue scores kept before the history is cleared
pub const MAX_HISTORY_LEN: usize = 100_000;

/// 1-based line of the classifier result file that carries the score
pub const DEFAULT_RESULT_LINE: usize = 143;

/// Default pacing interval in milliseconds between loop iterations
pub const DEFAULT_INTERVAL_MS: i32 = 20;

/// Default averaging window for the stabilized score
pub const DEFAULT_STABILIZER: usize = 3;

/// Default alert threshold for the stabilized score
pub const DEFAULT_FATIGUE_THRESHOLD: f64 = 7.0;

/// Trackbar maxima for the control window
pub const INTERVAL_TRACKBAR_MAX: i32 = 5000;
pub const STABILIZER_TRACKBAR_MAX: i32 = 10;
pub const THRESHOLD_TRACKBAR_MAX: i32 = 10;

/// Main window title
pub const WINDOW_NAME: &str = "Fatigue Monitor";
