//! core/playback/mod.rs
//! Playback core: the `MediaBackend` seam plus the rodio engine behind it.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::error;

use crate::core::types::{MediaStatus, PlayState, PlayerEvent};

mod decoder;
mod engine;

use engine::PlaybackEngine;

/// What the controller needs from a media engine.
///
/// Calls are requests: the engine answers through `PlayerEvent`s, which the
/// GUI collects with `drain_events` and feeds back to the controller.
/// Requests that make no sense (play with no media, seek while empty) are
/// ignored by the backend, not reported.
pub trait MediaBackend {
    fn load(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_position(&mut self, ms: u64);
    fn set_volume(&mut self, volume: u8);

    fn state(&self) -> PlayState;
    fn position(&self) -> u64;
    fn duration(&self) -> u64;

    /// Events emitted since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<PlayerEvent>;
}

#[derive(Debug)]
pub enum PlayerCommand {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(u64),     // ms
    SetVolume(u8), // 0..=100
    Shutdown,
}

/// GUI-side handle to the engine thread.
///
/// Caches the last reported state/position/duration so `MediaBackend`
/// queries never block on the engine.
pub struct RodioBackend {
    command_tx: Sender<PlayerCommand>,
    event_rx: Receiver<PlayerEvent>,

    has_media: bool,
    state: PlayState,
    position_ms: u64,
    duration_ms: u64,
}

impl RodioBackend {
    /// Best-effort send. If the engine died, the command is dropped.
    fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }

    fn observe(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::StatusChanged(MediaStatus::Loading) => {
                self.has_media = false;
                self.position_ms = 0;
                self.duration_ms = 0;
            }
            PlayerEvent::StatusChanged(MediaStatus::Loaded) => self.has_media = true,
            PlayerEvent::StatusChanged(MediaStatus::Invalid) => {
                self.has_media = false;
                self.state = PlayState::Stopped;
                self.position_ms = 0;
                self.duration_ms = 0;
            }
            PlayerEvent::StatusChanged(_) => {}
            PlayerEvent::StateChanged(s) => self.state = *s,
            PlayerEvent::PositionChanged(ms) => self.position_ms = *ms,
            PlayerEvent::DurationChanged(ms) => self.duration_ms = *ms,
            PlayerEvent::Error(_) => {}
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, path: &Path) {
        self.send(PlayerCommand::Load(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
        // Optimistic, so a second click before the engine answers toggles back.
        if self.has_media {
            self.state = PlayState::Playing;
        }
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    fn stop(&mut self) {
        self.send(PlayerCommand::Stop);
        if self.has_media {
            self.state = PlayState::Stopped;
            self.position_ms = 0;
        }
    }

    fn set_position(&mut self, ms: u64) {
        self.send(PlayerCommand::Seek(ms));
        // Optimistic, so a position read before the engine answers sees the seek.
        if self.has_media {
            self.position_ms = if self.duration_ms > 0 {
                ms.min(self.duration_ms)
            } else {
                ms
            };
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.send(PlayerCommand::SetVolume(volume));
    }

    fn state(&self) -> PlayState {
        self.state
    }

    fn position(&self) -> u64 {
        self.position_ms
    }

    fn duration(&self) -> u64 {
        self.duration_ms
    }

    fn drain_events(&mut self) -> Vec<PlayerEvent> {
        let drained: Vec<PlayerEvent> = self.event_rx.try_iter().collect();
        for ev in &drained {
            self.observe(ev);
        }
        drained
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.send(PlayerCommand::Shutdown);
    }
}

/// Spawns the engine thread and returns the handle the controller drives.
///
/// If the audio device can't be opened the thread reports a
/// `PlayerEvent::Error` and exits; later commands are silently dropped.
pub fn start_playback(volume: u8, tick: Duration) -> RodioBackend {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone(), volume) {
            Ok(e) => e,
            Err(e) => {
                error!("{e}");
                let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                return;
            }
        };

        engine.run(command_rx, tick);
    });

    RodioBackend {
        command_tx,
        event_rx,
        has_media: false,
        state: PlayState::Stopped,
        position_ms: 0,
        duration_ms: 0,
    }
}
