// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application.

/// Source of the played stream. Not user-configurable.
pub const SOURCE_URL: &str = "http://clips.vorwaerts-gmbh.de/big_buck_bunny.mp4";

// ==========================================================================
// Timing
// ==========================================================================

/// Interval of the screen's periodic tick (progress polling, fades,
/// watchdog checks, notification auto-dismiss).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Deadline for the stream to become ready before the load watchdog
/// declares a fatal load failure.
pub const LOAD_TIMEOUT_SECS: u64 = 10;

/// Duration of the controls fade in/out.
pub const FADE_DURATION_MS: u64 = 300;

/// How long the screen lingers after a fatal error so the toast is
/// readable before the window closes.
pub const FATAL_EXIT_DELAY_SECS: u64 = 3;

// ==========================================================================
// Controls auto-hide
// ==========================================================================

/// Default inactivity delay before the controls hide during playback
/// (in seconds).
pub const DEFAULT_AUTO_HIDE_SECS: u32 = 3;

/// Minimum auto-hide delay (in seconds).
pub const MIN_AUTO_HIDE_SECS: u32 = 1;

/// Maximum auto-hide delay (in seconds).
pub const MAX_AUTO_HIDE_SECS: u32 = 30;

// ==========================================================================
// Screen variants
// ==========================================================================

/// Whether the progress scrubber is shown by default.
pub const DEFAULT_SHOW_SCRUBBER: bool = true;

/// Whether the total-duration label is shown by default.
pub const DEFAULT_SHOW_DURATION_LABEL: bool = true;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(TICK_INTERVAL_MS > 0);
    assert!(FADE_DURATION_MS >= TICK_INTERVAL_MS);
    assert!(LOAD_TIMEOUT_SECS > 0);
    assert!(FATAL_EXIT_DELAY_SECS > 0);

    assert!(MIN_AUTO_HIDE_SECS > 0);
    assert!(MAX_AUTO_HIDE_SECS >= MIN_AUTO_HIDE_SECS);
    assert!(DEFAULT_AUTO_HIDE_SECS >= MIN_AUTO_HIDE_SECS);
    assert!(DEFAULT_AUTO_HIDE_SECS <= MAX_AUTO_HIDE_SECS);

    assert!(!SOURCE_URL.is_empty());
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_hide_defaults_are_valid() {
        assert_eq!(DEFAULT_AUTO_HIDE_SECS, 3);
        assert!(DEFAULT_AUTO_HIDE_SECS >= MIN_AUTO_HIDE_SECS);
        assert!(DEFAULT_AUTO_HIDE_SECS <= MAX_AUTO_HIDE_SECS);
    }

    #[test]
    fn tick_is_faster_than_fade() {
        assert!(TICK_INTERVAL_MS < FADE_DURATION_MS);
    }

    #[test]
    fn source_url_points_at_mp4() {
        assert!(SOURCE_URL.ends_with(".mp4"));
    }
}
