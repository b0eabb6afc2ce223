//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink for the loaded media (rebuilt on seek and after stop)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{debug, info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::PlayerCommand;
use super::decoder::{OpenedMedia, open_at};
use crate::core::types::{MediaStatus, PlayState, PlayerEvent};
use crate::error::PlayerError;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    // None while stopped; play() rebuilds it from `base_ms`.
    sink: Option<Sink>,
    media: Option<PathBuf>,
    duration_ms: Option<u64>,
    /// Offset the current sink's source was opened at.
    base_ms: u64,
    state: PlayState,
    volume: u8,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>, volume: u8) -> Result<Self, PlayerError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Output(e.to_string()))?;

        Ok(Self {
            stream,
            sink: None,
            media: None,
            duration_ms: None,
            base_ms: 0,
            state: PlayState::Stopped,
            volume: volume.min(100),
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>, tick: Duration) {
        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.unload();
    }

    /// Returns true on shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        debug!("engine command {cmd:?}");

        match cmd {
            PlayerCommand::Load(path) => self.load(path),
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Seek(ms) => self.seek(ms),
            PlayerCommand::SetVolume(v) => self.set_volume(v),
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn emit(&self, event: PlayerEvent) {
        // Receiver gone means the GUI is shutting down.
        let _ = self.event_tx.send(event);
    }

    fn position_ms(&self) -> u64 {
        match &self.sink {
            Some(sink) => self.base_ms + sink.get_pos().as_millis() as u64,
            None => self.base_ms,
        }
    }

    fn tick(&mut self) {
        if self.state != PlayState::Playing {
            return;
        }
        let Some(sink) = &self.sink else { return };

        if sink.empty() {
            info!("end of media");
            self.sink = None;
            self.base_ms = 0;
            self.set_state(PlayState::Stopped);
            self.emit(PlayerEvent::StatusChanged(MediaStatus::EndOfMedia));
            return;
        }

        self.emit(PlayerEvent::PositionChanged(self.position_ms()));
    }

    fn set_state(&mut self, state: PlayState) {
        if self.state != state {
            self.state = state;
            self.emit(PlayerEvent::StateChanged(state));
        }
    }

    /// Build a paused sink for the loaded media starting at `start_ms`.
    fn prepare_sink(&mut self, start_ms: u64) -> Result<(), PlayerError> {
        let Some(path) = &self.media else {
            return Ok(());
        };

        let OpenedMedia {
            source,
            duration_ms,
        } = open_at(path, start_ms)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(f32::from(self.volume) / 100.0);
        sink.append(source);

        self.sink = Some(sink);
        self.base_ms = start_ms;
        if duration_ms.is_some() {
            self.duration_ms = duration_ms;
        }
        Ok(())
    }

    fn load(&mut self, path: PathBuf) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.set_state(PlayState::Stopped);
        self.unload();
        self.emit(PlayerEvent::StatusChanged(MediaStatus::Loading));

        self.media = Some(path.clone());
        match self.prepare_sink(0) {
            Ok(()) => {
                info!("loaded {}", path.display());
                if let Some(d) = self.duration_ms {
                    self.emit(PlayerEvent::DurationChanged(d));
                }
                self.emit(PlayerEvent::PositionChanged(0));
                self.emit(PlayerEvent::StatusChanged(MediaStatus::Loaded));
            }
            Err(e) => {
                warn!("load {} failed: {e}", path.display());
                self.unload();
                self.emit(PlayerEvent::StatusChanged(MediaStatus::Invalid));
                self.emit(PlayerEvent::Error(e.to_string()));
            }
        }
    }

    fn play(&mut self) {
        if self.media.is_none() || self.state == PlayState::Playing {
            return;
        }

        if self.sink.is_none() {
            if let Err(e) = self.prepare_sink(self.base_ms) {
                self.emit(PlayerEvent::Error(e.to_string()));
                return;
            }
        }

        if let Some(sink) = &self.sink {
            sink.play();
            self.set_state(PlayState::Playing);
        }
    }

    fn pause(&mut self) {
        if self.state != PlayState::Playing {
            return;
        }
        if let Some(sink) = &self.sink {
            sink.pause();
            self.set_state(PlayState::Paused);
        }
    }

    fn stop(&mut self) {
        if self.media.is_none() {
            return;
        }
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.base_ms = 0;
        self.set_state(PlayState::Stopped);
        self.emit(PlayerEvent::PositionChanged(0));
    }

    fn seek(&mut self, ms: u64) {
        if self.media.is_none() {
            return;
        }

        let mut target = ms;
        if let Some(d) = self.duration_ms {
            // Seeking to *exactly* the end tends to produce EOF weirdness; clamp slightly.
            target = target.min(d.saturating_sub(1));
        }

        let was_playing = self.state == PlayState::Playing;
        match self.prepare_sink(target) {
            Ok(()) => {
                if was_playing {
                    if let Some(sink) = &self.sink {
                        sink.play();
                    }
                }
                self.emit(PlayerEvent::PositionChanged(target));
            }
            Err(e) => {
                warn!("seek to {target}ms failed: {e}");
                self.emit(PlayerEvent::Error(e.to_string()));
            }
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(sink) = &self.sink {
            sink.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.media = None;
        self.duration_ms = None;
        self.base_ms = 0;
        self.state = PlayState::Stopped;
    }
}
