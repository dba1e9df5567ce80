// SPDX-License-Identifier: MPL-2.0
//! UI components for the playback screen.

pub mod design_tokens;
pub mod notifications;
pub mod player_screen;
pub mod widgets;
