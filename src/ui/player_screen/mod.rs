// SPDX-License-Identifier: MPL-2.0
//! The full-screen playback screen.

pub mod component;
pub mod subcomponents;
pub mod transport;

pub use component::{Effect, Message, State, ViewEnv};
