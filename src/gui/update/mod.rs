//! gui/update/mod.rs
//! Update logic (router).
//! Forwards each `Message` to the controller.

use iced::Task;

use super::state::{Message, Player};

mod playback;

pub(crate) fn update(state: &mut Player, message: Message) -> Task<Message> {
    match message {
        Message::EnginePoll => playback::drain_events(state),
        Message::Refresh => playback::refresh(state),

        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::Open => playback::open(state),
        Message::FileChosen(choice) => playback::file_chosen(state, choice),

        Message::SeekDrag(ms) => playback::seek_drag(state, ms),
        Message::SeekRelease => playback::seek_release(state),

        Message::SetVolume(v) => playback::set_volume(state, v),
    }
}
