// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` is a full-screen network video playback screen built with
//! the Iced GUI framework.
//!
//! It wires a playback state machine, tick-driven progress polling,
//! fading transport controls and a load watchdog over an external
//! playback engine, and demonstrates internationalization with Fluent and
//! user preference management.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod player;
pub mod ui;
