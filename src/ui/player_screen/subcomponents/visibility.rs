// SPDX-License-Identifier: MPL-2.0
//! Controls visibility bookkeeping: interaction timestamps and the
//! inactivity timeout that auto-hides the transport controls.

use std::time::{Duration, Instant};

/// Tracks the intended controls visibility and the last user interaction.
///
/// The actual on-screen opacity is the fade's business; this type only
/// decides *when* visibility should change.
#[derive(Debug, Clone, Default)]
pub struct State {
    target_visible: bool,
    last_interaction: Option<Instant>,
}

impl State {
    /// Reveals the controls and restarts the inactivity timer.
    pub fn show(&mut self, now: Instant) {
        self.target_visible = true;
        self.last_interaction = Some(now);
    }

    /// Hides the controls.
    pub fn hide(&mut self) {
        self.target_visible = false;
    }

    /// Flips visibility; returns the new target.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.target_visible {
            self.hide();
        } else {
            self.show(now);
        }
        self.target_visible
    }

    /// Records a user interaction with the controls, keeping them up.
    pub fn touch(&mut self, now: Instant) {
        if self.target_visible {
            self.last_interaction = Some(now);
        }
    }

    /// Checks the inactivity timeout. Returns `true` exactly when the
    /// controls just auto-hid.
    pub fn check_timeout(&mut self, now: Instant, delay: Duration) -> bool {
        if !self.target_visible {
            return false;
        }
        let idle = self
            .last_interaction
            .is_some_and(|t| now.duration_since(t) > delay);
        if idle {
            self.target_visible = false;
        }
        idle
    }

    #[must_use]
    pub fn target_visible(&self) -> bool {
        self.target_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(3);

    #[test]
    fn starts_hidden() {
        assert!(!State::default().target_visible());
    }

    #[test]
    fn show_and_toggle_flip_target() {
        let now = Instant::now();
        let mut state = State::default();

        state.show(now);
        assert!(state.target_visible());

        assert!(!state.toggle(now));
        assert!(state.toggle(now));
    }

    #[test]
    fn times_out_after_inactivity() {
        let now = Instant::now();
        let mut state = State::default();
        state.show(now);

        assert!(!state.check_timeout(now + Duration::from_secs(1), DELAY));
        assert!(state.target_visible());

        assert!(state.check_timeout(now + Duration::from_secs(4), DELAY));
        assert!(!state.target_visible());
    }

    #[test]
    fn touch_restarts_the_timer() {
        let now = Instant::now();
        let mut state = State::default();
        state.show(now);

        state.touch(now + Duration::from_secs(2));
        assert!(!state.check_timeout(now + Duration::from_secs(4), DELAY));
        assert!(state.check_timeout(now + Duration::from_secs(6), DELAY));
    }

    #[test]
    fn timeout_is_reported_once() {
        let now = Instant::now();
        let mut state = State::default();
        state.show(now);

        let late = now + Duration::from_secs(10);
        assert!(state.check_timeout(late, DELAY));
        assert!(!state.check_timeout(late, DELAY));
    }

    #[test]
    fn touch_while_hidden_does_not_arm_timer() {
        let now = Instant::now();
        let mut state = State::default();

        state.touch(now);
        assert!(!state.check_timeout(now + Duration::from_secs(10), DELAY));
    }
}
