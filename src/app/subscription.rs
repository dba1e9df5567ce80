// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::config;
use crate::ui::player_screen::{self, transport};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Routes native events: window close requests plus the two keyboard
/// affordances the screen has (Space toggles playback, Escape leaves).
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = &event {
            return Some(Message::CloseRequested);
        }

        if let event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = &event {
            if status == event::Status::Captured {
                return None;
            }
            return match key {
                keyboard::Key::Named(keyboard::key::Named::Space) => Some(Message::Player(
                    player_screen::Message::Transport(transport::Message::TogglePlayback),
                )),
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    Some(Message::CloseRequested)
                }
                _ => None,
            };
        }

        None
    })
}

/// Creates the periodic tick driving progress polling, the load watchdog,
/// fades and notification auto-dismiss.
pub fn create_tick_subscription(active: bool) -> Subscription<Message> {
    if active {
        time::every(Duration::from_millis(config::TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
