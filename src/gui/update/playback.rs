//! gui/update/playback.rs
//! GUI -> controller bridge.
//!
//! The GUI never touches rodio/symphonia directly; every handler is a
//! one-line hand-off to `PlayerController`.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{Message, Player};
use crate::core::chooser::choose_audio_file;

pub(crate) fn drain_events(state: &mut Player) -> Task<Message> {
    state.controller.pump_events();
    Task::none()
}

pub(crate) fn refresh(state: &mut Player) -> Task<Message> {
    state.controller.tick();
    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut Player) -> Task<Message> {
    state.controller.toggle_play_pause();
    Task::none()
}

pub(crate) fn stop(state: &mut Player) -> Task<Message> {
    state.controller.stop();
    Task::none()
}

/// Show the native dialog off the event loop; the answer comes back as
/// `Message::FileChosen`.
pub(crate) fn open(state: &mut Player) -> Task<Message> {
    let (title, filter) = state.controller.dialog_request();
    Task::perform(choose_audio_file(title, filter), Message::FileChosen)
}

pub(crate) fn file_chosen(state: &mut Player, choice: Option<PathBuf>) -> Task<Message> {
    state.controller.file_chosen(choice);
    Task::none()
}

pub(crate) fn seek_drag(state: &mut Player, ms: f64) -> Task<Message> {
    state.controller.preview_seek(ms.max(0.0).round() as u64);
    Task::none()
}

pub(crate) fn seek_release(state: &mut Player) -> Task<Message> {
    state.controller.commit_seek();
    Task::none()
}

pub(crate) fn set_volume(state: &mut Player, volume: u8) -> Task<Message> {
    state.controller.set_volume(volume);
    Task::none()
}
