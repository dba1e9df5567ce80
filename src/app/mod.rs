// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the playback screen, localization and
//! toast notifications, and translates screen effects into window side
//! effects (immersive chrome toggles, window close). Policy decisions are
//! kept close to the update loop so user-facing behavior is easy to audit.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::config;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::infrastructure::GstPlaybackWidget;
use crate::ui::notifications;
use crate::ui::player_screen::{self, component};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::time::Duration;
use tracing::{error, warn};

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 540;

const FATAL_EXIT_DELAY: Duration = Duration::from_secs(config::FATAL_EXIT_DELAY_SECS);

/// Root Iced application state bridging the playback screen, localization
/// and notifications.
pub struct App {
    i18n: I18n,
    screen: Option<component::State>,
    notifications: notifications::Manager,
    immersive: bool,
    exiting: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_screen", &self.screen.is_some())
            .field("immersive", &self.immersive)
            .field("exiting", &self.exiting)
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes the application: loads preferences, resolves the
    /// locale, spawns the playback engine and enters immersive mode.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let app_config = match config::load() {
            Ok(app_config) => app_config,
            Err(err) => {
                warn!(%err, "failed to load settings, using defaults");
                config::Config::default()
            }
        };
        let i18n = I18n::new(flags.lang, &app_config);
        let options = app_config.screen_options();

        let mut notifications = notifications::Manager::new();

        let (screen, task) = match GstPlaybackWidget::spawn() {
            Ok(widget) => {
                let screen = component::State::new(Box::new(widget), options);
                // Chrome stays up while loading; the first play
                // confirmation enters immersive mode.
                (Some(screen), Task::none())
            }
            Err(err) => {
                error!(%err, "failed to start the playback engine");
                let key = match &err {
                    Error::Playback(playback) => playback.i18n_key(),
                    _ => "notification-load-error-format",
                };
                notifications.push(notifications::Notification::error(key));
                (None, exit_after(FATAL_EXIT_DELAY))
            }
        };

        let app = App {
            i18n,
            screen,
            notifications,
            immersive: false,
            exiting: false,
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.screen.is_some() || self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Player(screen_message) => {
                let Some(screen) = self.screen.as_mut() else {
                    return Task::none();
                };
                let effect = screen.handle(screen_message);
                self.apply_screen_effect(effect)
            }
            Message::Tick(now) => {
                self.notifications.tick();
                let Some(screen) = self.screen.as_mut() else {
                    return Task::none();
                };
                let effect = screen.handle(player_screen::Message::Tick(now));
                self.apply_screen_effect(effect)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::CloseRequested => window::latest().and_then(window::close),
        }
    }

    /// Translates a screen effect into window tasks and toasts.
    fn apply_screen_effect(&mut self, effect: component::Effect) -> Task<Message> {
        match effect {
            component::Effect::None => Task::none(),
            component::Effect::EnterImmersive => {
                if self.immersive {
                    return Task::none();
                }
                self.immersive = true;
                set_window_mode(window::Mode::Fullscreen)
            }
            component::Effect::ExitImmersive => {
                if !self.immersive {
                    return Task::none();
                }
                self.immersive = false;
                set_window_mode(window::Mode::Windowed)
            }
            component::Effect::FatalError(err) => {
                if self.exiting {
                    return Task::none();
                }
                self.exiting = true;
                self.notifications
                    .push(notifications::Notification::error(err.i18n_key()));
                exit_after(FATAL_EXIT_DELAY)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let screen: Element<'_, Message> = match &self.screen {
            Some(screen) => screen
                .view(component::ViewEnv { i18n: &self.i18n })
                .map(Message::Player),
            None => iced::widget::Container::new(iced::widget::Text::new(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        };

        let toasts = notifications::Toast::view_overlay(&self.notifications, &self.i18n)
            .map(Message::Notification);

        iced::widget::Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(screen)
            .push(toasts)
            .into()
    }
}

fn set_window_mode(mode: window::Mode) -> Task<Message> {
    window::latest().and_then(move |id| window::set_mode(id, mode))
}

/// Lingers so the error toast is readable, then closes the window.
fn exit_after(delay: Duration) -> Task<Message> {
    Task::future(async move {
        tokio::time::sleep(delay).await;
        Message::CloseRequested
    })
}
