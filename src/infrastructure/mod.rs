// SPDX-License-Identifier: MPL-2.0
//! Infrastructure adapters for the playback-widget port.

pub mod gst;

pub use gst::GstPlaybackWidget;
