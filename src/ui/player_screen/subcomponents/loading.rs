// SPDX-License-Identifier: MPL-2.0
//! Loading state sub-component: animated spinner plus the load watchdog.

use crate::config;
use std::time::{Duration, Instant};

/// Deadline for the stream to become ready.
const LOAD_TIMEOUT: Duration = Duration::from_secs(config::LOAD_TIMEOUT_SECS);

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

/// Loading state for the playback screen.
#[derive(Debug, Clone, Default)]
pub struct State {
    is_loading: bool,
    /// When loading started (for timeout detection).
    started_at: Option<Instant>,
    /// Current spinner rotation angle in radians.
    spinner_rotation: f32,
    /// Whether the watchdog has already fired. It fires at most once.
    timed_out: bool,
}

/// Effects produced by the loading state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The stream did not become ready before the deadline.
    LoadingTimedOut,
}

impl State {
    /// Starts loading and arms the watchdog.
    pub fn start(&mut self, now: Instant) {
        self.is_loading = true;
        self.started_at = Some(now);
        self.timed_out = false;
    }

    /// Stops loading and disarms the watchdog (success or failure).
    pub fn stop(&mut self) {
        self.is_loading = false;
        self.started_at = None;
        self.spinner_rotation = 0.0;
    }

    /// Advances the spinner and checks the watchdog deadline.
    pub fn tick(&mut self, now: Instant) -> Effect {
        if !self.is_loading {
            return Effect::None;
        }

        self.spinner_rotation += SPINNER_SPEED;
        if self.spinner_rotation > std::f32::consts::TAU {
            self.spinner_rotation -= std::f32::consts::TAU;
        }

        if !self.timed_out {
            if let Some(started) = self.started_at {
                if now.duration_since(started) > LOAD_TIMEOUT {
                    self.timed_out = true;
                    return Effect::LoadingTimedOut;
                }
            }
        }
        Effect::None
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current spinner rotation angle in radians.
    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }
}
