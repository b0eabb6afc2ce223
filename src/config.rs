//! Player configuration.
//!
//! Everything is built in code; there is no config file and nothing is
//! persisted between runs.

use std::time::Duration;

/// File-chooser filter: a display name plus accepted extensions (no dots).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl AudioFilter {
    /// Case-insensitive extension check.
    pub fn accepts(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl Default for AudioFilter {
    fn default() -> Self {
        Self {
            name: "Audio Files".to_string(),
            extensions: vec!["mp3".into(), "ogg".into(), "wav".into()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_width: f32,
    pub window_height: f32,

    /// Initial volume, 0..=100.
    pub default_volume: u8,

    /// Fallback position refresh while media is loaded.
    pub refresh_period: Duration,
    /// How often the GUI drains engine events.
    pub engine_poll_period: Duration,

    pub dialog_title: String,
    pub filter: AudioFilter,

    /// Song label text when nothing is loaded.
    pub no_song_text: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            window_title: "Music Player".to_string(),
            window_width: 500.0,
            window_height: 200.0,
            default_volume: 50,
            refresh_period: Duration::from_millis(1000),
            engine_poll_period: Duration::from_millis(200),
            dialog_title: "Open Music File".to_string(),
            filter: AudioFilter::default(),
            no_song_text: "No song selected".to_string(),
        }
    }
}
