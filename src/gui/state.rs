//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::path::PathBuf;

use crate::config::PlayerConfig;
use crate::core::controller::PlayerController;
use crate::core::playback::{RodioBackend, start_playback};

pub(crate) type Controller = PlayerController<RodioBackend>;

/// App state: one controller, owned for the lifetime of the window.
pub(crate) struct Player {
    pub controller: Controller,
}

impl Player {
    pub(crate) fn new(config: PlayerConfig) -> Self {
        let backend = start_playback(config.default_volume, config.engine_poll_period);
        Self {
            controller: PlayerController::new(backend, config),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Buttons
    TogglePlayPause,
    Stop,
    Open,
    /// The open dialog closed; `None` on cancel.
    FileChosen(Option<PathBuf>),

    // Seek: drag moves the display, release commits
    SeekDrag(f64),
    SeekRelease,

    SetVolume(u8),

    // Timers
    EnginePoll,
    Refresh,
}
