// SPDX-License-Identifier: MPL-2.0
//! Opacity fade for the transport controls.
//!
//! Interpolates opacity linearly toward 0.0 or 1.0 over a fixed duration,
//! driven by the screen tick. The element counts as hidden only once the
//! fade reaches 0, so it never pops out mid-fade. Retargeting while a fade
//! is running restarts from the current opacity toward the new target;
//! fades never stack.

use std::time::Duration;

/// Where the fade currently is.
///
/// Only the continuous opacity is observable from outside; the phases
/// exist to keep the transitions honest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// Tick-driven opacity fade between hidden and visible.
#[derive(Debug, Clone)]
pub struct Fade {
    phase: Phase,
    opacity: f32,
    duration: Duration,
}

impl Fade {
    /// Creates a fade resting at hidden.
    #[must_use]
    pub fn hidden(duration: Duration) -> Self {
        Self {
            phase: Phase::Hidden,
            opacity: 0.0,
            duration,
        }
    }

    /// Creates a fade resting at visible.
    #[must_use]
    pub fn visible(duration: Duration) -> Self {
        Self {
            phase: Phase::Visible,
            opacity: 1.0,
            duration,
        }
    }

    /// Starts fading toward the given target.
    ///
    /// Idempotent: already at (or moving toward) the target is a no-op,
    /// and a mid-flight reversal continues from the current opacity.
    pub fn animate_to(&mut self, target_visible: bool) {
        self.phase = match (self.phase, target_visible) {
            (Phase::Visible | Phase::FadingIn, true) => self.phase,
            (Phase::Hidden | Phase::FadingOut, false) => self.phase,
            (_, true) => {
                if self.opacity >= 1.0 {
                    Phase::Visible
                } else {
                    Phase::FadingIn
                }
            }
            (_, false) => {
                if self.opacity <= 0.0 {
                    Phase::Hidden
                } else {
                    Phase::FadingOut
                }
            }
        };
    }

    /// Advances the fade by the elapsed time since the previous tick.
    pub fn tick(&mut self, dt: Duration) {
        if self.duration.is_zero() {
            match self.phase {
                Phase::FadingIn => {
                    self.opacity = 1.0;
                    self.phase = Phase::Visible;
                }
                Phase::FadingOut => {
                    self.opacity = 0.0;
                    self.phase = Phase::Hidden;
                }
                _ => {}
            }
            return;
        }

        let step = dt.as_secs_f32() / self.duration.as_secs_f32();
        match self.phase {
            Phase::FadingIn => {
                self.opacity += step;
                if self.opacity >= 1.0 {
                    self.opacity = 1.0;
                    self.phase = Phase::Visible;
                }
            }
            Phase::FadingOut => {
                self.opacity -= step;
                if self.opacity <= 0.0 {
                    self.opacity = 0.0;
                    self.phase = Phase::Hidden;
                }
            }
            _ => {}
        }
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True once the fade-out has fully completed.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.phase == Phase::Hidden
    }

    /// The side the fade is resting at or moving toward.
    #[must_use]
    pub fn target_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible | Phase::FadingIn)
    }
}
