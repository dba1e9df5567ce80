// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the screen.
//!
//! Manages the lifecycle of the playback session with clear state
//! transitions:
//! - Loading: stream is being prepared, spinner is showing
//! - Ready: stream prepared, playback not yet confirmed
//! - Playing: stream is playing at a position
//! - Paused: playback paused at a position
//! - Finished: stream completed, engine rewound to the start
//! - Error: load failed, screen is terminating

use super::progress::ProgressSample;
use super::widget::{PlaybackWidget, PlayerEvent};
use crate::error::PlaybackError;
use std::time::Duration;
use tracing::debug;

/// Playback state machine.
///
/// This enum represents all possible states of the screen's playback
/// session, ensuring type-safe transitions via pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// Stream is being prepared. Initial state at screen entry.
    Loading,

    /// Stream is prepared; playback has been requested but not confirmed.
    Ready,

    /// Stream is playing.
    Playing { position: Duration },

    /// Playback is paused; resuming continues from here.
    Paused { position: Duration },

    /// Stream completed. Re-enterable: a new start plays from 0.
    Finished,

    /// Load failed. Terminal.
    Error,
}

impl PlaybackState {
    /// Returns the current playback position, if the state carries one.
    pub fn position(&self) -> Option<Duration> {
        match self {
            Self::Playing { position } | Self::Paused { position } => Some(*position),
            Self::Finished => Some(Duration::ZERO),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// The single effect a transition may request from the screen.
///
/// Every operation yields at most one of these; the loading indicator
/// needs no directive because its visibility is derived from
/// [`PlaybackState::Loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEffect {
    None,

    /// Reveal the transport controls.
    ShowControls,

    /// Hide the transport controls.
    HideControls,

    /// Surface a fatal error and leave the screen.
    Fatal(PlaybackError),
}

/// Owns the playback state and the engine collaborator.
///
/// Transition methods both mutate the state and send the matching engine
/// command; engine-confirmed events reconcile idempotently, so state is
/// correct whichever side reports first.
pub struct PlaybackController {
    state: PlaybackState,
    duration: Option<Duration>,
    widget: Box<dyn PlaybackWidget>,
}

impl PlaybackController {
    /// Creates a controller in the Loading state.
    pub fn new(widget: Box<dyn PlaybackWidget>) -> Self {
        Self {
            state: PlaybackState::Loading,
            duration: None,
            widget,
        }
    }

    /// Points the engine at the stream. The state stays Loading until the
    /// prepared event arrives.
    pub fn load(&mut self, url: &str) {
        debug!(url, "loading stream");
        self.widget.set_source(url);
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Stream duration, known once prepared.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Drains pending engine events for dispatch via [`Self::on_event`].
    pub fn poll_events(&mut self) -> Vec<PlayerEvent> {
        self.widget.poll_events()
    }

    /// Dispatches one engine event to the matching transition.
    pub fn on_event(&mut self, event: PlayerEvent) -> ControlEffect {
        match event {
            PlayerEvent::Prepared { duration } => self.on_prepared(duration),
            PlayerEvent::Error { message } => self.on_error(message),
            PlayerEvent::Completion => self.on_completion(),
            PlayerEvent::Play => self.on_play_started(),
            PlayerEvent::Pause => self.on_play_paused(),
        }
    }

    /// The stream became ready.
    ///
    /// Loading → Ready; playback starts immediately and the controls are
    /// revealed. A prepared event in any other state is stale and ignored.
    pub fn on_prepared(&mut self, duration: Duration) -> ControlEffect {
        if !self.state.is_loading() {
            return ControlEffect::None;
        }
        debug!(?duration, "stream prepared");
        self.duration = Some(duration);
        self.state = PlaybackState::Ready;
        self.widget.start();
        ControlEffect::ShowControls
    }

    /// The engine reported a decode/format error.
    ///
    /// Fatal exactly once; further errors after the terminal state are
    /// swallowed.
    pub fn on_error(&mut self, message: String) -> ControlEffect {
        if self.state.is_error() {
            return ControlEffect::None;
        }
        self.state = PlaybackState::Error;
        ControlEffect::Fatal(PlaybackError::UnsupportedSource(message))
    }

    /// The load watchdog fired before the stream became ready.
    ///
    /// Only meaningful while Loading; once prepared the watchdog is
    /// canceled and a stale timeout does nothing.
    pub fn on_timeout(&mut self) -> ControlEffect {
        if !self.state.is_loading() {
            return ControlEffect::None;
        }
        self.state = PlaybackState::Error;
        ControlEffect::Fatal(PlaybackError::LoadTimeout)
    }

    /// Playback reached the end of the stream.
    ///
    /// The engine is rewound to the start right away, so a later restart is
    /// a plain start from 0. Controls come back for the restart affordance.
    pub fn on_completion(&mut self) -> ControlEffect {
        match self.state {
            PlaybackState::Playing { .. } | PlaybackState::Paused { .. } => {
                self.widget.seek_to(Duration::ZERO);
                self.state = PlaybackState::Finished;
                ControlEffect::ShowControls
            }
            _ => ControlEffect::None,
        }
    }

    /// Engine-confirmed playback start.
    pub fn on_play_started(&mut self) -> ControlEffect {
        match self.state {
            PlaybackState::Playing { .. } => ControlEffect::None,
            PlaybackState::Ready | PlaybackState::Finished => {
                self.state = PlaybackState::Playing {
                    position: Duration::ZERO,
                };
                ControlEffect::HideControls
            }
            PlaybackState::Paused { position } => {
                self.state = PlaybackState::Playing { position };
                ControlEffect::HideControls
            }
            _ => ControlEffect::None,
        }
    }

    /// Engine-confirmed pause.
    pub fn on_play_paused(&mut self) -> ControlEffect {
        if let PlaybackState::Playing { position } = self.state {
            self.state = PlaybackState::Paused { position };
        }
        ControlEffect::None
    }

    /// User pressed the play/pause control.
    ///
    /// Playing → Paused keeps the controls up; any resumable state →
    /// Playing hides them (the engine's own play event would do the same,
    /// idempotently).
    pub fn toggle_playback(&mut self) -> ControlEffect {
        match self.state {
            PlaybackState::Playing { position } => {
                self.widget.pause();
                self.state = PlaybackState::Paused { position };
                ControlEffect::None
            }
            PlaybackState::Paused { position } => {
                self.widget.start();
                self.state = PlaybackState::Playing { position };
                ControlEffect::HideControls
            }
            PlaybackState::Ready | PlaybackState::Finished => {
                self.widget.start();
                self.state = PlaybackState::Playing {
                    position: Duration::ZERO,
                };
                ControlEffect::HideControls
            }
            _ => ControlEffect::None,
        }
    }

    /// Commits a scrubber seek. The target is clamped to the stream bounds.
    pub fn seek_to(&mut self, target: Duration) {
        let Some(duration) = self.duration else {
            return;
        };
        let clamped = target.min(duration);
        match self.state {
            PlaybackState::Playing { .. } => {
                self.widget.seek_to(clamped);
                self.state = PlaybackState::Playing { position: clamped };
            }
            PlaybackState::Paused { .. } => {
                self.widget.seek_to(clamped);
                self.state = PlaybackState::Paused { position: clamped };
            }
            _ => {}
        }
    }

    /// Reads a progress snapshot from the engine while playing.
    ///
    /// Also advances the position carried in the state, so pausing lands on
    /// the freshest position. Returns `None` outside of Playing.
    pub fn sample_progress(&mut self) -> Option<ProgressSample> {
        let duration = self.duration?;
        if !self.state.is_playing() {
            return None;
        }
        let sample = ProgressSample::new(self.widget.position(), duration);
        self.state = PlaybackState::Playing {
            position: sample.position,
        };
        Some(sample)
    }
}
