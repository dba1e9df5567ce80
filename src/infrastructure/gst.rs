// SPDX-License-Identifier: MPL-2.0
//! GStreamer-backed playback widget.
//!
//! A worker thread owns the `gstreamer-player` engine and drives it from a
//! command channel; signal handlers queue [`PlayerEvent`]s and the worker
//! publishes a position/duration snapshot on every loop turn. The UI side
//! only ever touches the channel and the snapshot, so all screen state
//! stays on the update loop.

use crate::error::{Error, PlaybackError, Result};
use crate::player::widget::{PlaybackWidget, PlayerEvent};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_player as gplayer;
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How often the worker publishes a fresh snapshot while idle.
const SNAPSHOT_INTERVAL: Duration = Duration::from_millis(100);

enum Command {
    SetSource(String),
    Play,
    Pause,
    Seek(Duration),
    Shutdown,
}

#[derive(Default)]
struct Shared {
    position: Duration,
    duration: Option<Duration>,
    prepared_sent: bool,
    last_state: Option<gplayer::PlayerState>,
    events: VecDeque<PlayerEvent>,
}

fn lock(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Playback widget backed by a `gstreamer-player` engine on a worker
/// thread. Decoding, rendering and audio are entirely the engine's.
pub struct GstPlaybackWidget {
    commands: Sender<Command>,
    shared: Arc<Mutex<Shared>>,
    worker: Option<JoinHandle<()>>,
}

impl GstPlaybackWidget {
    /// Initializes GStreamer and spawns the engine worker.
    pub fn spawn() -> Result<Self> {
        gst::init().map_err(|e| {
            Error::Playback(PlaybackError::UnsupportedSource(e.to_string()))
        })?;

        let (commands, receiver) = channel();
        let shared = Arc::new(Mutex::new(Shared::default()));
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("playback-engine".to_string())
            .spawn(move || run_engine(&receiver, &worker_shared))?;

        Ok(Self {
            commands,
            shared,
            worker: Some(worker),
        })
    }

    fn send(&self, command: Command) {
        // The worker only goes away on shutdown; a dead channel past that
        // point is not an error worth surfacing.
        if self.commands.send(command).is_err() {
            warn!("playback engine is gone, command dropped");
        }
    }
}

impl PlaybackWidget for GstPlaybackWidget {
    fn set_source(&mut self, url: &str) {
        self.send(Command::SetSource(url.to_string()));
    }

    fn start(&mut self) {
        self.send(Command::Play);
    }

    fn pause(&mut self) {
        self.send(Command::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.send(Command::Seek(position));
    }

    fn position(&self) -> Duration {
        lock(&self.shared).position
    }

    fn duration(&self) -> Option<Duration> {
        lock(&self.shared).duration
    }

    fn poll_events(&mut self) -> Vec<PlayerEvent> {
        lock(&self.shared).events.drain(..).collect()
    }
}

impl Drop for GstPlaybackWidget {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_engine(commands: &Receiver<Command>, shared: &Arc<Mutex<Shared>>) {
    let engine_loop = glib::MainLoop::new(None, false);

    let dispatcher = gplayer::PlayerGMainContextSignalDispatcher::new(None);
    let player = gplayer::Player::new(
        None::<gplayer::PlayerVideoRenderer>,
        Some(dispatcher.upcast::<gplayer::PlayerSignalDispatcher>()),
    );

    {
        let shared = Arc::clone(shared);
        player.connect_media_info_updated(move |_, info| {
            let Some(duration) = info.duration() else {
                return;
            };
            let mut guard = lock(&shared);
            let duration = Duration::from_millis(duration.mseconds());
            guard.duration = Some(duration);
            if !guard.prepared_sent {
                guard.prepared_sent = true;
                info!(?duration, "stream prepared");
                guard.events.push_back(PlayerEvent::Prepared { duration });
            }
        });
    }

    {
        let shared = Arc::clone(shared);
        player.connect_state_changed(move |_, state| {
            let mut guard = lock(&shared);
            let previous = guard.last_state.replace(state);
            match state {
                gplayer::PlayerState::Playing => {
                    guard.events.push_back(PlayerEvent::Play);
                }
                gplayer::PlayerState::Paused => {
                    // The initial preroll also lands in Paused; only a
                    // pause out of Playing is a playback pause.
                    if previous == Some(gplayer::PlayerState::Playing) {
                        guard.events.push_back(PlayerEvent::Pause);
                    }
                }
                _ => {}
            }
        });
    }

    {
        let shared = Arc::clone(shared);
        player.connect_end_of_stream(move |player| {
            debug!("end of stream");
            player.pause();
            lock(&shared).events.push_back(PlayerEvent::Completion);
        });
    }

    {
        let shared = Arc::clone(shared);
        player.connect_error(move |player, err| {
            error!(error = %err, "playback engine error");
            player.stop();
            lock(&shared).events.push_back(PlayerEvent::Error {
                message: err.to_string(),
            });
        });
    }

    let loop_handle = engine_loop.clone();
    let loop_thread = std::thread::spawn(move || {
        loop_handle.run();
    });

    loop {
        match commands.recv_timeout(SNAPSHOT_INTERVAL) {
            Ok(Command::SetSource(url)) => {
                info!(url, "setting source");
                player.set_uri(Some(url.as_str()));
                // Preroll without playing; media-info-updated reports
                // readiness, the controller decides when to start.
                player.pause();
            }
            Ok(Command::Play) => player.play(),
            Ok(Command::Pause) => player.pause(),
            Ok(Command::Seek(position)) => {
                let millis = u64::try_from(position.as_millis()).unwrap_or(u64::MAX);
                player.seek(gst::ClockTime::from_mseconds(millis));
            }
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                player.stop();
                engine_loop.quit();
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        let position = player
            .position()
            .map(|t| Duration::from_millis(t.mseconds()))
            .unwrap_or_default();
        let duration = player.duration().map(|t| Duration::from_millis(t.mseconds()));

        let mut guard = lock(shared);
        guard.position = position;
        if duration.is_some() {
            guard.duration = duration;
        }
    }

    let _ = loop_thread.join();
}
