// SPDX-License-Identifier: MPL-2.0
//! Transport controls UI.
//!
//! Renders the bottom controls bar: play/pause button, timeline scrubber
//! and elapsed/total time labels. Which pieces appear is configurable, so
//! one component covers every screen variant.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::{button, container, slider, text, tooltip, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Slider step in seconds (1ms precision).
const SLIDER_STEP_SECS: f64 = 0.001;

/// Messages emitted by the transport widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Toggle play/pause state.
    TogglePlayback,

    /// Seek preview - slider is being dragged (visual feedback only, no
    /// actual seek). Position in seconds.
    SeekPreview(f64),

    /// Commit seek - slider released, perform actual seek to preview
    /// position.
    SeekCommit,
}

/// View context for rendering the transport controls.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Snapshot of everything the controls bar renders from.
#[derive(Debug, Clone)]
pub struct ControlsState {
    /// Is the video currently playing?
    pub is_playing: bool,

    /// Current playback position in seconds.
    pub position_secs: f64,

    /// Total duration in seconds.
    pub duration_secs: f64,

    /// Preview position during a scrubber drag, if any. When `Some`, the
    /// slider shows this position instead of the playback position.
    pub seek_preview_position: Option<f64>,

    /// Whether the scrubber is rendered.
    pub show_scrubber: bool,

    /// Whether the total-duration label is rendered.
    pub show_duration_label: bool,

    /// Fade opacity applied to the whole bar.
    pub opacity: f32,
}

/// Renders the transport controls bar.
pub fn view<'a>(ctx: ViewContext<'a>, state: &ControlsState) -> Element<'a, Message> {
    let alpha = state.opacity.clamp(0.0, 1.0);

    let glyph = if state.is_playing { "⏸" } else { "▶" };
    let play_pause_tooltip = if state.is_playing {
        ctx.i18n.tr("video-pause-tooltip")
    } else {
        ctx.i18n.tr("video-play-tooltip")
    };

    let play_pause_button: Element<'_, Message> = button(
        Text::new(glyph)
            .size(sizing::ICON_MD)
            .align_x(alignment::Horizontal::Center),
    )
    .on_press(Message::TogglePlayback)
    .padding(spacing::XS)
    .width(Length::Fixed(sizing::BUTTON_HEIGHT + spacing::XS))
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .style(move |theme: &Theme, status| transport_button_style(theme, status, alpha))
    .into();

    let play_pause = tooltip(
        play_pause_button,
        Text::new(play_pause_tooltip).size(typography::CAPTION),
        tooltip::Position::Top,
    )
    .gap(4);

    let mut controls: Row<'a, Message> = Row::new()
        .spacing(spacing::XS)
        .padding(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(play_pause);

    if state.show_scrubber {
        // Preview position while dragging, live position otherwise.
        let timeline_position = state
            .seek_preview_position
            .unwrap_or(state.position_secs);

        let timeline = slider(
            0.0..=state.duration_secs,
            timeline_position,
            Message::SeekPreview,
        )
        .on_release(Message::SeekCommit)
        .width(Length::FillPortion(1))
        .step(SLIDER_STEP_SECS);

        controls = controls.push(timeline);
    }

    let time_text = if state.show_duration_label {
        format!(
            "{} / {}",
            format_time(state.position_secs),
            format_time(state.duration_secs)
        )
    } else {
        format_time(state.position_secs)
    };
    let time_display = text(time_text)
        .size(typography::BODY)
        .style(move |_theme: &Theme| text::Style {
            color: Some(Color {
                a: alpha,
                ..palette::WHITE
            }),
        });
    controls = controls.push(time_display);

    Container::new(controls)
        .width(Length::Fill)
        .padding(spacing::XS)
        .style(move |_theme: &Theme| bar_style(alpha))
        .into()
}

fn bar_style(alpha: f32) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_STRONG * alpha,
            ..palette::GRAY_900
        })),
        border: iced::Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn transport_button_style(_theme: &Theme, status: button::Status, alpha: f32) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => {
            Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE * alpha,
                ..palette::WHITE
            }))
        }
        _ => None,
    };

    button::Style {
        background,
        text_color: Color {
            a: alpha,
            ..palette::WHITE
        },
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: iced::Shadow::default(),
        snap: true,
    }
}

/// Formats a time in MM:SS or HH:MM:SS format.
fn format_time(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> ControlsState {
        ControlsState {
            is_playing: true,
            position_secs: 30.0,
            duration_secs: 120.0,
            seek_preview_position: None,
            show_scrubber: true,
            show_duration_label: true,
            opacity: 1.0,
        }
    }

    #[test]
    fn format_time_handles_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn format_time_handles_seconds() {
        assert_eq!(format_time(45.0), "00:45");
    }

    #[test]
    fn format_time_two_minutes() {
        // 120000 ms duration renders as 02:00.
        assert_eq!(format_time(120.0), "02:00");
    }

    #[test]
    fn format_time_mid_stream_position() {
        // A position tick at 65000 ms renders as 01:05.
        assert_eq!(format_time(65.0), "01:05");
    }

    #[test]
    fn format_time_handles_hours() {
        assert_eq!(format_time(3665.0), "01:01:05");
    }

    #[test]
    fn format_time_handles_negative() {
        // Negative time is clamped to 0.
        assert_eq!(format_time(-10.0), "00:00");
    }

    #[test]
    fn timeline_uses_preview_position_when_set() {
        let state = ControlsState {
            seek_preview_position: Some(90.0),
            ..sample_state()
        };

        let position = state.seek_preview_position.unwrap_or(state.position_secs);
        assert_eq!(position, 90.0);
    }

    #[test]
    fn timeline_falls_back_to_playback_position() {
        let state = sample_state();
        let position = state.seek_preview_position.unwrap_or(state.position_secs);
        assert_eq!(position, 30.0);
    }

    #[test]
    fn view_renders() {
        let i18n = I18n::default();
        let ctx = ViewContext { i18n: &i18n };
        let _element = view(ctx, &sample_state());
    }

    #[test]
    fn view_renders_without_scrubber_or_duration() {
        let i18n = I18n::default();
        let ctx = ViewContext { i18n: &i18n };
        let state = ControlsState {
            show_scrubber: false,
            show_duration_label: false,
            ..sample_state()
        };
        let _element = view(ctx, &state);
    }

    #[test]
    fn message_clone_works() {
        let msg = Message::SeekPreview(30.5);
        assert_eq!(msg.clone(), msg);
    }
}
