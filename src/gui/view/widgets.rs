//! Slider widgets for the player window.

use iced::widget::{column, row, slider, text};
use iced::{Element, Length};

use super::super::state::Message;
use super::constants::{TICK_TEXT, VOLUME_TICK_STEP};
use crate::core::types::Display;

/// Seek slider over `[0, duration]`.
///
/// Dragging emits `SeekDrag`; only the release commits a seek.
pub(crate) fn seek_slider(display: &Display) -> Element<'_, Message> {
    // slider needs a sane range; if we don't know duration yet, freeze it at 0..=1
    let (max, value) = if display.slider_max > 0 {
        let max = display.slider_max as f64;
        (max, (display.slider_value as f64).min(max))
    } else {
        (1.0, 0.0)
    };

    slider(0.0..=max, value, Message::SeekDrag)
        .on_release(Message::SeekRelease)
        .step(1.0)
        .width(Length::Fill)
        .into()
}

/// Volume slider `[0, 100]` with tick labels underneath.
pub(crate) fn volume_control(volume: u8) -> Element<'static, Message> {
    let volume_slider = slider(0..=100u8, volume.min(100), Message::SetVolume).width(Length::Fill);

    let mut ticks = row![];
    for mark in (0..=100u8).step_by(VOLUME_TICK_STEP as usize) {
        ticks = ticks.push(text(mark.to_string()).size(TICK_TEXT).width(Length::Fill));
    }

    column![volume_slider, ticks.width(Length::Fill)]
        .spacing(2)
        .into()
}
