// SPDX-License-Identifier: MPL-2.0
//! Playback screen component encapsulating state and update logic.
//!
//! The component owns the playback controller and the visibility machinery
//! and is driven by a periodic tick: every tick drains engine events, runs
//! the load watchdog, checks the controls auto-hide, advances the fade and
//! polls playback progress. Everything mutates on the update loop; the
//! engine only ever speaks through the drained event queue.

use crate::config::{self, ScreenOptions};
use crate::error::PlaybackError;
use crate::i18n::fluent::I18n;
use crate::player::{
    ControlEffect, PlaybackController, PlaybackWidget, PlayerEvent, ProgressSample,
};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::player_screen::subcomponents::{fade::Fade, loading, visibility};
use crate::ui::player_screen::transport;
use crate::ui::widgets::Spinner;
use iced::widget::{container, mouse_area, text, Column, Container, Stack};
use iced::{alignment, Element, Length, Theme};
use std::time::{Duration, Instant};
use tracing::info;

const FADE_DURATION: Duration = Duration::from_millis(config::FADE_DURATION_MS);

/// Messages consumed by the playback screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Periodic tick driving polling, timers and fades.
    Tick(Instant),
    /// The playback surface was tapped/clicked.
    SurfaceTapped,
    /// Transport controls interaction.
    Transport(transport::Message),
}

/// Side effects the application performs after handling a screen message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hide the window chrome (fullscreen).
    EnterImmersive,
    /// Restore the window chrome.
    ExitImmersive,
    /// Surface a fatal error and leave the screen.
    FatalError(PlaybackError),
}

impl Effect {
    /// Keeps the weightier of two effects; fatal always wins and chrome
    /// beats nothing.
    fn merge(self, other: Effect) -> Effect {
        match (&self, &other) {
            (Effect::FatalError(_), _) => self,
            (_, Effect::FatalError(_)) => other,
            (Effect::None, _) => other,
            _ => self,
        }
    }
}

/// Environment required to render the screen.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
}

/// Complete playback screen state.
pub struct State {
    controller: PlaybackController,
    loading: loading::State,
    visibility: visibility::State,
    fade: Fade,
    progress: Option<ProgressSample>,
    /// Scrubber drag preview in seconds; `Some` while dragging.
    seek_preview: Option<f64>,
    last_tick: Option<Instant>,
    fatal: bool,
    options: ScreenOptions,
}

impl State {
    /// Creates the screen, points the engine at the stream and arms the
    /// load watchdog.
    pub fn new(widget: Box<dyn PlaybackWidget>, options: ScreenOptions) -> Self {
        let mut controller = PlaybackController::new(widget);
        controller.load(config::SOURCE_URL);

        let mut loading = loading::State::default();
        loading.start(Instant::now());

        Self {
            controller,
            loading,
            visibility: visibility::State::default(),
            fade: Fade::hidden(FADE_DURATION),
            progress: None,
            seek_preview: None,
            last_tick: None,
            fatal: false,
            options,
        }
    }

    /// Handles a screen message, returning at most one app-level effect.
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Tick(now) => self.handle_tick(now),
            Message::SurfaceTapped => self.handle_surface_tapped(Instant::now()),
            Message::Transport(msg) => self.handle_transport(msg, Instant::now()),
        }
    }

    fn handle_tick(&mut self, now: Instant) -> Effect {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        let mut effect = Effect::None;

        // Engine events first: a prepared event must disarm the watchdog
        // before the deadline check below.
        for event in self.controller.poll_events() {
            match &event {
                PlayerEvent::Prepared { duration } => {
                    self.loading.stop();
                    self.progress = Some(ProgressSample::at_start(*duration));
                }
                PlayerEvent::Completion => {
                    if let Some(duration) = self.controller.duration() {
                        self.progress = Some(ProgressSample::at_start(duration));
                    }
                }
                _ => {}
            }
            let control = self.controller.on_event(event);
            effect = effect.merge(self.apply_control_effect(control, now));
        }

        if let loading::Effect::LoadingTimedOut = self.loading.tick(now) {
            let control = self.controller.on_timeout();
            effect = effect.merge(self.apply_control_effect(control, now));
        }

        // Auto-hide only applies during playback and never mid-drag.
        if self.controller.state().is_playing()
            && self.seek_preview.is_none()
            && self.visibility.check_timeout(now, self.options.auto_hide)
        {
            self.fade.animate_to(false);
            effect = effect.merge(Effect::EnterImmersive);
        }

        self.fade.tick(dt);

        // Progress poll: playing, scrubber on screen, not dragging.
        if self.controller.state().is_playing()
            && !self.fade.is_hidden()
            && self.seek_preview.is_none()
        {
            if let Some(sample) = self.controller.sample_progress() {
                self.progress = Some(sample);
            }
        }

        effect
    }

    fn handle_surface_tapped(&mut self, now: Instant) -> Effect {
        // Controls never show while the stream is still loading, and a
        // terminating screen ignores input.
        if self.fatal || self.controller.state().is_loading() {
            return Effect::None;
        }

        if self.visibility.toggle(now) {
            self.fade.animate_to(true);
            Effect::ExitImmersive
        } else {
            self.fade.animate_to(false);
            Effect::EnterImmersive
        }
    }

    fn handle_transport(&mut self, message: transport::Message, now: Instant) -> Effect {
        if self.fatal {
            return Effect::None;
        }
        self.visibility.touch(now);

        match message {
            transport::Message::TogglePlayback => {
                let control = self.controller.toggle_playback();
                self.apply_control_effect(control, now)
            }
            transport::Message::SeekPreview(position_secs) => {
                self.seek_preview = Some(position_secs.max(0.0));
                Effect::None
            }
            transport::Message::SeekCommit => {
                if let Some(target_secs) = self.seek_preview.take() {
                    let target = Duration::from_secs_f64(target_secs);
                    self.controller.seek_to(target);
                    if let Some(duration) = self.controller.duration() {
                        self.progress = Some(ProgressSample::new(target, duration));
                    }
                }
                Effect::None
            }
        }
    }

    fn apply_control_effect(&mut self, control: ControlEffect, now: Instant) -> Effect {
        match control {
            ControlEffect::None => Effect::None,
            ControlEffect::ShowControls => {
                self.visibility.show(now);
                self.fade.animate_to(true);
                Effect::ExitImmersive
            }
            ControlEffect::HideControls => {
                self.visibility.hide();
                self.fade.animate_to(false);
                Effect::EnterImmersive
            }
            ControlEffect::Fatal(error) => {
                info!(%error, "fatal playback failure, leaving screen");
                self.fatal = true;
                self.loading.stop();
                Effect::FatalError(error)
            }
        }
    }

    /// Renders the screen: playback surface, loading overlay, controls.
    pub fn view<'a>(&'a self, env: ViewEnv<'a>) -> Element<'a, Message> {
        let surface: Element<'a, Message> = mouse_area(
            container(text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| container::Style {
                    background: Some(iced::Background::Color(palette::BLACK)),
                    ..Default::default()
                }),
        )
        .on_press(Message::SurfaceTapped)
        .into();

        let mut stack = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(surface);

        if self.controller.state().is_loading() {
            let spinner =
                Spinner::new(palette::WHITE, self.loading.spinner_rotation()).into_element();
            let label = text(env.i18n.tr("loading-label"))
                .size(typography::BODY)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_200),
                });

            let overlay = Container::new(
                Column::new()
                    .spacing(spacing::SM)
                    .align_x(alignment::Horizontal::Center)
                    .push(spinner)
                    .push(label),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center);

            stack = stack.push(overlay);
        }

        if !self.fade.is_hidden() && !self.controller.state().is_loading() {
            let controls = transport::view(
                transport::ViewContext { i18n: env.i18n },
                &self.controls_state(),
            )
            .map(Message::Transport);

            let overlay = Container::new(controls)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD);

            stack = stack.push(overlay);
        }

        stack.into()
    }

    fn controls_state(&self) -> transport::ControlsState {
        let (position_secs, duration_secs) = match self.progress {
            Some(sample) => (
                sample.position.as_secs_f64(),
                sample.duration.as_secs_f64(),
            ),
            None => (
                self.controller
                    .state()
                    .position()
                    .map(|p| p.as_secs_f64())
                    .unwrap_or(0.0),
                self.controller
                    .duration()
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0),
            ),
        };

        transport::ControlsState {
            is_playing: self.controller.state().is_playing(),
            position_secs,
            duration_secs,
            seek_preview_position: self.seek_preview,
            show_scrubber: self.options.show_scrubber,
            show_duration_label: self.options.show_duration_label,
            opacity: self.fade.opacity(),
        }
    }

    /// Current playback state.
    pub fn playback_state(&self) -> &crate::player::PlaybackState {
        self.controller.state()
    }

    /// Latest progress snapshot.
    #[must_use]
    pub fn progress(&self) -> Option<ProgressSample> {
        self.progress
    }

    /// Whether the controls are shown or fading in.
    #[must_use]
    pub fn controls_target_visible(&self) -> bool {
        self.fade.target_visible()
    }

    /// Current controls opacity.
    #[must_use]
    pub fn controls_opacity(&self) -> f32 {
        self.fade.opacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackState;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    const TICK: Duration = Duration::from_millis(100);

    #[derive(Default)]
    struct Script {
        position: Duration,
        duration: Option<Duration>,
        pending: VecDeque<PlayerEvent>,
        starts: u32,
        pauses: u32,
        seeks: Vec<Duration>,
    }

    #[derive(Clone, Default)]
    struct ScriptedWidget {
        script: Arc<Mutex<Script>>,
    }

    impl ScriptedWidget {
        fn handle(&self) -> Arc<Mutex<Script>> {
            Arc::clone(&self.script)
        }
    }

    impl PlaybackWidget for ScriptedWidget {
        fn set_source(&mut self, _url: &str) {}

        fn start(&mut self) {
            let mut script = self.script.lock().unwrap();
            script.starts += 1;
            script.pending.push_back(PlayerEvent::Play);
        }

        fn pause(&mut self) {
            let mut script = self.script.lock().unwrap();
            script.pauses += 1;
            script.pending.push_back(PlayerEvent::Pause);
        }

        fn seek_to(&mut self, position: Duration) {
            let mut script = self.script.lock().unwrap();
            script.seeks.push(position);
            script.position = position;
        }

        fn position(&self) -> Duration {
            self.script.lock().unwrap().position
        }

        fn duration(&self) -> Option<Duration> {
            self.script.lock().unwrap().duration
        }

        fn poll_events(&mut self) -> Vec<PlayerEvent> {
            self.script.lock().unwrap().pending.drain(..).collect()
        }
    }

    fn screen() -> (State, Arc<Mutex<Script>>, Instant) {
        let widget = ScriptedWidget::default();
        let handle = widget.handle();
        let state = State::new(Box::new(widget), ScreenOptions::default());
        (state, handle, Instant::now())
    }

    fn inject(handle: &Arc<Mutex<Script>>, event: PlayerEvent) {
        handle.lock().unwrap().pending.push_back(event);
    }

    fn prepare(handle: &Arc<Mutex<Script>>, duration: Duration) {
        handle.lock().unwrap().duration = Some(duration);
        inject(handle, PlayerEvent::Prepared { duration });
    }

    /// Runs the screen through prepared + play confirmation.
    fn playing_screen() -> (State, Arc<Mutex<Script>>, Instant) {
        let (mut screen, handle, now) = screen();
        prepare(&handle, Duration::from_secs(120));
        screen.handle(Message::Tick(now));
        screen.handle(Message::Tick(now + TICK));
        (screen, handle, now + TICK)
    }

    #[test]
    fn starts_loading_with_hidden_controls() {
        let (screen, _, _) = screen();
        assert!(screen.playback_state().is_loading());
        assert!(!screen.controls_target_visible());
        assert_eq!(screen.controls_opacity(), 0.0);
    }

    #[test]
    fn prepared_reveals_controls_and_restores_chrome() {
        let (mut screen, handle, now) = screen();
        prepare(&handle, Duration::from_secs(120));

        let effect = screen.handle(Message::Tick(now));

        assert_eq!(effect, Effect::ExitImmersive);
        assert!(screen.controls_target_visible());
        assert_eq!(
            screen.progress(),
            Some(ProgressSample::at_start(Duration::from_secs(120)))
        );
    }

    #[test]
    fn play_confirmation_hides_controls_again() {
        let (mut screen, handle, now) = screen();
        prepare(&handle, Duration::from_secs(120));
        screen.handle(Message::Tick(now));

        // The engine confirms the start queued by on_prepared.
        let effect = screen.handle(Message::Tick(now + TICK));

        assert_eq!(effect, Effect::EnterImmersive);
        assert!(screen.playback_state().is_playing());
        assert!(!screen.controls_target_visible());
    }

    #[test]
    fn watchdog_terminates_screen_exactly_once() {
        let (mut screen, _, now) = screen();

        screen.handle(Message::Tick(now));
        let effect = screen.handle(Message::Tick(now + Duration::from_secs(11)));
        assert_eq!(effect, Effect::FatalError(PlaybackError::LoadTimeout));
        assert!(screen.playback_state().is_error());

        let effect = screen.handle(Message::Tick(now + Duration::from_secs(12)));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn prepared_before_deadline_cancels_watchdog() {
        let (mut screen, handle, now) = screen();
        prepare(&handle, Duration::from_secs(120));
        screen.handle(Message::Tick(now));

        // Well past the deadline: nothing fires.
        let effect = screen.handle(Message::Tick(now + Duration::from_secs(30)));
        assert_ne!(
            effect,
            Effect::FatalError(PlaybackError::LoadTimeout)
        );
        assert!(!screen.playback_state().is_error());
    }

    #[test]
    fn engine_error_is_fatal() {
        let (mut screen, handle, now) = screen();
        inject(
            &handle,
            PlayerEvent::Error {
                message: "no decoder".to_string(),
            },
        );

        let effect = screen.handle(Message::Tick(now));
        assert!(matches!(
            effect,
            Effect::FatalError(PlaybackError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn tap_while_loading_is_ignored() {
        let (mut screen, _, _) = screen();
        let effect = screen.handle(Message::SurfaceTapped);
        assert_eq!(effect, Effect::None);
        assert!(!screen.controls_target_visible());
    }

    #[test]
    fn tap_toggles_controls_and_chrome_together() {
        let (mut screen, _, _) = playing_screen();
        assert!(!screen.controls_target_visible());

        let effect = screen.handle(Message::SurfaceTapped);
        assert_eq!(effect, Effect::ExitImmersive);
        assert!(screen.controls_target_visible());

        let effect = screen.handle(Message::SurfaceTapped);
        assert_eq!(effect, Effect::EnterImmersive);
        assert!(!screen.controls_target_visible());
    }

    #[test]
    fn poller_emits_samples_only_while_playing() {
        let (mut screen, handle, now) = playing_screen();
        screen.handle(Message::SurfaceTapped); // reveal controls

        handle.lock().unwrap().position = Duration::from_secs(65);
        screen.handle(Message::Tick(now + TICK));
        assert_eq!(
            screen.progress().map(|p| p.position),
            Some(Duration::from_secs(65))
        );

        // Pause; position keeps moving in the engine but no samples land.
        screen.handle(Message::Transport(transport::Message::TogglePlayback));
        handle.lock().unwrap().position = Duration::from_secs(99);
        screen.handle(Message::Tick(now + TICK * 2));
        screen.handle(Message::Tick(now + TICK * 3));
        assert_eq!(
            screen.progress().map(|p| p.position),
            Some(Duration::from_secs(65))
        );
    }

    #[test]
    fn poller_pauses_during_scrubber_drag() {
        let (mut screen, handle, now) = playing_screen();
        screen.handle(Message::SurfaceTapped);

        screen.handle(Message::Transport(transport::Message::SeekPreview(30.0)));
        handle.lock().unwrap().position = Duration::from_secs(80);
        screen.handle(Message::Tick(now + TICK));

        // The drag preview wins; no sample was taken.
        assert_ne!(
            screen.progress().map(|p| p.position),
            Some(Duration::from_secs(80))
        );
    }

    #[test]
    fn seek_commit_lands_on_preview_position() {
        let (mut screen, handle, now) = playing_screen();
        screen.handle(Message::SurfaceTapped);

        screen.handle(Message::Transport(transport::Message::SeekPreview(30.0)));
        screen.handle(Message::Transport(transport::Message::SeekCommit));

        assert_eq!(
            handle.lock().unwrap().seeks,
            vec![Duration::from_secs(30)]
        );
        assert_eq!(
            screen.progress().map(|p| p.position),
            Some(Duration::from_secs(30))
        );

        // Polling resumes afterwards.
        handle.lock().unwrap().position = Duration::from_secs(31);
        screen.handle(Message::Tick(now + TICK));
        assert_eq!(
            screen.progress().map(|p| p.position),
            Some(Duration::from_secs(31))
        );
    }

    #[test]
    fn completion_finishes_and_resets_scrubber() {
        let (mut screen, handle, now) = playing_screen();
        handle.lock().unwrap().position = Duration::from_secs(120);
        inject(&handle, PlayerEvent::Completion);

        let effect = screen.handle(Message::Tick(now + TICK));

        assert_eq!(effect, Effect::ExitImmersive);
        assert_eq!(screen.playback_state(), &PlaybackState::Finished);
        assert_eq!(
            screen.progress(),
            Some(ProgressSample::at_start(Duration::from_secs(120)))
        );
        assert!(screen.controls_target_visible());
        // The engine was rewound for the restart affordance.
        assert!(handle
            .lock()
            .unwrap()
            .seeks
            .contains(&Duration::ZERO));
    }

    #[test]
    fn controls_auto_hide_after_inactivity() {
        let (mut screen, _, now) = playing_screen();
        screen.handle(Message::SurfaceTapped);
        assert!(screen.controls_target_visible());

        // The tap above stamped real time; advance well past the delay.
        let effect = screen.handle(Message::Tick(now + Duration::from_secs(8)));
        assert_eq!(effect, Effect::EnterImmersive);
        assert!(!screen.controls_target_visible());
    }

    #[test]
    fn controls_do_not_auto_hide_while_paused() {
        let (mut screen, _, now) = playing_screen();
        screen.handle(Message::SurfaceTapped);
        screen.handle(Message::Transport(transport::Message::TogglePlayback));
        screen.handle(Message::Tick(now + TICK));
        assert!(screen.playback_state().is_paused());

        let effect = screen.handle(Message::Tick(now + Duration::from_secs(30)));
        assert_eq!(effect, Effect::None);
        assert!(screen.controls_target_visible());
    }

    #[test]
    fn fade_reversal_leaves_controls_visible() {
        let (mut screen, _, now) = playing_screen();

        // Show, immediately hide, then show again before the fade-out
        // completes.
        screen.handle(Message::SurfaceTapped);
        screen.handle(Message::Tick(now + TICK));
        screen.handle(Message::SurfaceTapped);
        screen.handle(Message::Tick(now + TICK * 2));
        screen.handle(Message::SurfaceTapped);

        for i in 3..10u32 {
            screen.handle(Message::Tick(now + TICK * i));
        }
        assert!(screen.controls_target_visible());
        assert_eq!(screen.controls_opacity(), 1.0);
    }

    #[test]
    fn input_after_fatal_is_ignored() {
        let (mut screen, handle, now) = screen();
        inject(
            &handle,
            PlayerEvent::Error {
                message: "boom".to_string(),
            },
        );
        screen.handle(Message::Tick(now));

        assert_eq!(screen.handle(Message::SurfaceTapped), Effect::None);
        assert_eq!(
            screen.handle(Message::Transport(transport::Message::TogglePlayback)),
            Effect::None
        );
        assert_eq!(handle.lock().unwrap().starts, 0);
    }

    #[test]
    fn view_renders_in_every_phase() {
        let i18n = I18n::default();

        let (screen, _, _) = self::screen();
        let _ = screen.view(ViewEnv { i18n: &i18n });

        let (mut screen, _, _) = playing_screen();
        screen.handle(Message::SurfaceTapped);
        let _ = screen.view(ViewEnv { i18n: &i18n });
    }
}
