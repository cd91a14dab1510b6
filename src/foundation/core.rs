/// Name of the time dimension exposed by query data models.
pub const TIME_DIMENSION: &str = "time";

/// Discrete index into the time axis of a dataset.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeIndex(pub u64);

/// Cursor position along the time axis, normalized to `[0, 1]`.
///
/// Construction clamps: UI layers occasionally deliver positions a hair
/// outside the unit interval during drag gestures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPosition(f64);

impl NormalizedPosition {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Map this position onto a discrete time index: `round(p * (N - 1))`.
    ///
    /// Returns `None` when the time axis has no extent (`time_size == 0`).
    /// For `time_size >= 1` the result always lies in `[0, N - 1]`.
    pub fn to_time_index(self, time_size: usize) -> Option<TimeIndex> {
        if time_size == 0 {
            return None;
        }
        let max = (time_size - 1) as f64;
        Some(TimeIndex((self.0 * max).round() as u64))
    }
}
