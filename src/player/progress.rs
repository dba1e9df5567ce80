// SPDX-License-Identifier: MPL-2.0
//! Progress snapshots read from the playback engine.

use std::time::Duration;

/// A read-only snapshot of playback progress, taken on a poll tick.
///
/// The position is always clamped to `[0, duration]`; engines occasionally
/// report positions slightly past the end near stream boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSample {
    pub position: Duration,
    pub duration: Duration,
}

impl ProgressSample {
    /// Creates a sample, clamping the position into the stream bounds.
    #[must_use]
    pub fn new(position: Duration, duration: Duration) -> Self {
        Self {
            position: position.min(duration),
            duration,
        }
    }

    /// Returns a sample at the beginning of the stream.
    #[must_use]
    pub fn at_start(duration: Duration) -> Self {
        Self {
            position: Duration::ZERO,
            duration,
        }
    }

    /// Position as a fraction of the duration, in `[0, 1]`.
    ///
    /// A zero-length stream reports 0 rather than dividing by zero.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_clamped_to_duration() {
        let sample = ProgressSample::new(Duration::from_secs(130), Duration::from_secs(120));
        assert_eq!(sample.position, Duration::from_secs(120));
    }

    #[test]
    fn in_range_position_is_untouched() {
        let sample = ProgressSample::new(Duration::from_secs(65), Duration::from_secs(120));
        assert_eq!(sample.position, Duration::from_secs(65));
        assert_eq!(sample.duration, Duration::from_secs(120));
    }

    #[test]
    fn at_start_is_zero() {
        let sample = ProgressSample::at_start(Duration::from_secs(120));
        assert_eq!(sample.position, Duration::ZERO);
        assert_eq!(sample.fraction(), 0.0);
    }

    #[test]
    fn fraction_handles_zero_duration() {
        let sample = ProgressSample::new(Duration::from_secs(5), Duration::ZERO);
        assert_eq!(sample.fraction(), 0.0);
    }

    #[test]
    fn fraction_is_proportional() {
        let sample = ProgressSample::new(Duration::from_secs(30), Duration::from_secs(120));
        assert!((sample.fraction() - 0.25).abs() < f32::EPSILON);
    }
}
