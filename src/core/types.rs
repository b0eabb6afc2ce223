//! Core data types shared between the controller, the engine and the UI.
//!
//! Boring bags of data: no GUI code, no audio code.

use std::path::PathBuf;

/// Transport state as the engine reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Where the currently loaded media is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaStatus {
    #[default]
    NoMedia,
    /// `load` was requested; waiting for the engine to confirm.
    Loading,
    /// Media is probed and ready to play.
    Loaded,
    /// Playback ran off the end of the media.
    EndOfMedia,
    /// The engine could not open or decode the media.
    Invalid,
}

/// The currently loaded media and what we know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    pub media: Option<PathBuf>,
    pub status: MediaStatus,
    pub state: PlayState,
    /// 0 until the engine reports it.
    pub duration_ms: u64,
    pub position_ms: u64,
    /// 0..=100
    pub volume: u8,
}

impl PlaybackSession {
    pub fn new(volume: u8) -> Self {
        Self {
            media: None,
            status: MediaStatus::NoMedia,
            state: PlayState::Stopped,
            duration_ms: 0,
            position_ms: 0,
            volume: volume.min(100),
        }
    }
}

/// What the widgets currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub slider_value: u64,
    pub slider_max: u64,
    pub position_label: String,
    pub song_label: String,
    pub play_label: &'static str,
    pub volume: u8,
}

impl Display {
    pub fn empty(no_song_text: &str, volume: u8) -> Self {
        Self {
            slider_value: 0,
            slider_max: 0,
            position_label: "00:00".to_string(),
            song_label: no_song_text.to_string(),
            play_label: "Play",
            volume: volume.min(100),
        }
    }
}

/// Events the engine emits back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    StatusChanged(MediaStatus),
    StateChanged(PlayState),
    PositionChanged(u64),
    DurationChanged(u64),
    Error(String),
}
