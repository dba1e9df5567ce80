// SPDX-License-Identifier: MPL-2.0
//! Playback-widget port definition.
//!
//! This module defines the [`PlaybackWidget`] trait for the external
//! playback engine. Infrastructure adapters (like GStreamer) implement this
//! trait; the screen never touches the engine directly.
//!
//! # Design Notes
//!
//! - The widget is **stateful** - it maintains the current source and
//!   playback position.
//! - Commands are fire-and-forget; outcomes arrive as [`PlayerEvent`]s.
//! - Events are queued inside the widget and drained on the UI update loop
//!   via [`PlaybackWidget::poll_events`], keeping all state mutation
//!   single-threaded.

use std::time::Duration;

/// Lifecycle events surfaced by the playback widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The stream is ready to play; its duration is known.
    Prepared { duration: Duration },

    /// The engine failed to load or decode the stream.
    Error { message: String },

    /// Playback reached the end of the stream.
    Completion,

    /// Playback actually started (engine-confirmed).
    Play,

    /// Playback actually paused (engine-confirmed).
    Pause,
}

/// Port for the platform playback engine.
///
/// # Lifecycle
///
/// 1. `set_source()` points the engine at a stream and starts preparing it.
/// 2. A `Prepared` event arrives once the stream is ready (or `Error`).
/// 3. `start()`/`pause()`/`seek_to()` control playback; the engine confirms
///    with `Play`/`Pause` events and reports the end with `Completion`.
/// 4. Dropping the widget releases the engine.
pub trait PlaybackWidget: Send {
    /// Points the engine at a stream URL and begins preparing it.
    fn set_source(&mut self, url: &str);

    /// Starts or resumes playback.
    fn start(&mut self);

    /// Pauses playback at the current position.
    fn pause(&mut self);

    /// Seeks to an absolute position.
    fn seek_to(&mut self, position: Duration);

    /// Returns the engine's current playback position.
    fn position(&self) -> Duration;

    /// Returns the stream duration, once known.
    fn duration(&self) -> Option<Duration>;

    /// Drains events queued since the last poll, oldest first.
    fn poll_events(&mut self) -> Vec<PlayerEvent>;
}
