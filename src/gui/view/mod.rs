//! GUI renderer (reads state, produces widgets; no mutation).
//!
//! Top to bottom: Play/Pause, Stop, seek slider, volume slider, song
//! label, Open, position label, then the engine status line if any.

mod constants;
mod widgets;

use iced::widget::{Column, button, column, text};

use super::state::{Message, Player};
use constants::{LABEL_TEXT, PADDING, SPACING, STATUS_TEXT};

pub(crate) fn view(state: &Player) -> Column<'_, Message> {
    let display = state.controller.display();

    let mut layout = column![
        button(display.play_label).on_press(Message::TogglePlayPause),
        button("Stop").on_press(Message::Stop),
        widgets::seek_slider(display),
        widgets::volume_control(display.volume),
        text(display.song_label.as_str()).size(LABEL_TEXT),
        button("Open").on_press(Message::Open),
        text(display.position_label.as_str()).size(LABEL_TEXT),
    ]
    .spacing(SPACING)
    .padding(PADDING);

    if let Some(status) = state.controller.status_line() {
        layout = layout.push(text(status).size(STATUS_TEXT));
    }

    layout
}
