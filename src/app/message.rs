// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::notifications;
use crate::ui::player_screen;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Player(player_screen::Message),
    Notification(notifications::NotificationMessage),
    /// Periodic tick for the screen, fades and notification auto-dismiss.
    Tick(Instant),
    /// Leave the screen (close request, Escape, or fatal-error linger).
    CloseRequested,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `de`, `en-US`).
    pub lang: Option<String>,
}
