//! core/controller.rs
//!
//! `PlayerController` sits between the widgets and the media engine:
//! - user actions come in as method calls and go out as engine requests
//! - engine events come back through `handle_event` and update the
//!   `Display` the view renders
//!
//! No iced or rodio imports: the engine is reached through the
//! `MediaBackend` trait, and the file dialog's answer arrives through
//! `file_chosen`.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use super::format::format_time;
use super::playback::MediaBackend;
use super::types::{Display, MediaStatus, PlayState, PlaybackSession, PlayerEvent};
use crate::config::{AudioFilter, PlayerConfig};

pub struct PlayerController<B> {
    backend: B,
    config: PlayerConfig,

    session: PlaybackSession,
    display: Display,

    /// Whether the periodic position refresh should be running.
    refresh_active: bool,
    /// Slider value while the user is dragging the seek bar.
    drag_ms: Option<u64>,
    /// Last engine error, shown under the controls.
    status_line: Option<String>,
}

impl<B: MediaBackend> PlayerController<B> {
    pub fn new(mut backend: B, config: PlayerConfig) -> Self {
        let volume = config.default_volume.min(100);
        backend.set_volume(volume);

        Self {
            session: PlaybackSession::new(volume),
            display: Display::empty(&config.no_song_text, volume),
            backend,
            config,
            refresh_active: false,
            drag_ms: None,
            status_line: None,
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn refresh_active(&self) -> bool {
        self.refresh_active
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    // ---- user actions ----

    /// Title and filter for the open-file dialog.
    pub fn dialog_request(&self) -> (String, AudioFilter) {
        (self.config.dialog_title.clone(), self.config.filter.clone())
    }

    /// The open-file dialog answered: hand the file to the engine.
    /// Cancelling the dialog changes nothing.
    pub fn file_chosen(&mut self, choice: Option<PathBuf>) {
        let Some(path) = choice else {
            debug!("open cancelled");
            return;
        };

        if !self.config.filter.accepts(&path) {
            warn!("ignoring unsupported file {}", path.display());
            return;
        }

        info!("opening {}", path.display());

        // Nothing is playable until the engine confirms.
        self.refresh_active = false;
        self.drag_ms = None;
        self.status_line = None;
        self.session.status = MediaStatus::Loading;
        self.session.state = PlayState::Stopped;
        self.session.position_ms = 0;
        self.session.duration_ms = 0;
        self.display = Display::empty(&self.config.no_song_text, self.session.volume);

        self.backend.load(&path);
        self.session.media = Some(path);
    }

    /// Pause when playing, otherwise play (from stopped or paused).
    pub fn toggle_play_pause(&mut self) {
        if self.backend.state() == PlayState::Playing {
            self.backend.pause();
        } else {
            self.backend.play();
        }
        self.sync_state();
    }

    /// Stop playback. Duration (and the slider range) stays known.
    pub fn stop(&mut self) {
        debug!(
            "stop from {:?} at {}ms",
            self.session.state, self.session.position_ms
        );
        self.backend.stop();
        self.sync_state();

        self.drag_ms = None;
        self.session.position_ms = 0;
        self.show_position(0);
    }

    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.backend.set_volume(volume);
        self.session.volume = volume;
        self.display.volume = volume;
    }

    /// Jump to `ms`. Only user actions get here; engine position
    /// updates go through `on_position_changed`.
    pub fn seek(&mut self, ms: u64) {
        debug!("seek to {ms}ms");
        self.backend.set_position(ms);
        self.session.position_ms = ms;
        self.show_position(ms);
    }

    /// Seek slider is being dragged: move the display, not the engine.
    pub fn preview_seek(&mut self, ms: u64) {
        let ms = ms.min(self.display.slider_max);
        self.drag_ms = Some(ms);
        self.show_position(ms);
    }

    /// Seek slider released: commit the last dragged value.
    pub fn commit_seek(&mut self) {
        if let Some(ms) = self.drag_ms.take() {
            self.seek(ms);
        }
    }

    // ---- engine events ----

    pub fn handle_event(&mut self, event: PlayerEvent) {
        debug!("player event {event:?}");

        match event {
            PlayerEvent::StatusChanged(MediaStatus::Loaded) => self.on_media_ready(),
            PlayerEvent::StatusChanged(MediaStatus::EndOfMedia) => self.on_end_of_media(),
            PlayerEvent::StatusChanged(MediaStatus::Invalid) => self.on_media_invalid(),
            PlayerEvent::StatusChanged(status) => self.session.status = status,
            PlayerEvent::StateChanged(state) => {
                self.session.state = state;
                self.display.play_label = play_label(state);
            }
            PlayerEvent::PositionChanged(ms) => self.on_position_changed(ms),
            PlayerEvent::DurationChanged(ms) => self.on_duration_changed(ms),
            PlayerEvent::Error(msg) => {
                error!("playback error: {msg}");
                self.status_line = Some(msg);
            }
        }
    }

    /// Pull everything the engine has emitted and apply it in order.
    pub fn pump_events(&mut self) {
        for event in self.backend.drain_events() {
            self.handle_event(event);
        }
    }

    pub fn on_media_ready(&mut self) {
        self.session.status = MediaStatus::Loaded;

        self.display.song_label = match &self.session.media {
            Some(path) => display_name(path),
            None => self.config.no_song_text.clone(),
        };

        let duration = self.backend.duration();
        if duration > 0 {
            self.on_duration_changed(duration);
        }

        self.refresh_active = true;
    }

    pub fn on_end_of_media(&mut self) {
        info!("end of media");
        self.session.status = MediaStatus::EndOfMedia;
        self.stop();
    }

    pub fn on_media_invalid(&mut self) {
        warn!(
            "engine rejected {}",
            self.session
                .media
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );

        self.session = PlaybackSession::new(self.session.volume);
        self.session.status = MediaStatus::Invalid;
        self.display = Display::empty(&self.config.no_song_text, self.session.volume);
        self.refresh_active = false;
        self.drag_ms = None;
    }

    pub fn on_position_changed(&mut self, ms: u64) {
        let ms = if self.session.duration_ms > 0 {
            ms.min(self.session.duration_ms)
        } else {
            ms
        };
        self.session.position_ms = ms;

        // Don't fight the user's drag.
        if self.drag_ms.is_none() {
            self.show_position(ms);
        }
    }

    pub fn on_duration_changed(&mut self, ms: u64) {
        self.session.duration_ms = ms;
        self.display.slider_max = ms;
        if ms > 0 && self.session.position_ms > ms {
            self.session.position_ms = ms;
        }
        if ms > 0 && self.display.slider_value > ms {
            self.display.slider_value = ms;
        }
    }

    /// Periodic fallback: re-read the engine position.
    pub fn tick(&mut self) {
        if !self.refresh_active || self.session.status == MediaStatus::Loading {
            return;
        }
        let ms = self.backend.position();
        self.on_position_changed(ms);
    }

    fn sync_state(&mut self) {
        let state = self.backend.state();
        self.session.state = state;
        self.display.play_label = play_label(state);
    }

    fn show_position(&mut self, ms: u64) {
        self.display.slider_value = ms;
        self.display.position_label = format_time(ms);
    }
}

/// Label for the play button: what the next click will do.
fn play_label(state: PlayState) -> &'static str {
    match state {
        PlayState::Playing => "Pause",
        PlayState::Stopped | PlayState::Paused => "Play",
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Load(PathBuf),
        Play,
        Pause,
        Stop,
        SetPosition(u64),
        SetVolume(u8),
    }

    /// Records requests; state/position/duration are set by the test.
    #[derive(Default)]
    struct FakeBackend {
        calls: Vec<Call>,
        state: PlayState,
        position: u64,
        duration: u64,
        pending: Vec<PlayerEvent>,
    }

    impl MediaBackend for FakeBackend {
        fn load(&mut self, path: &Path) {
            self.calls.push(Call::Load(path.to_path_buf()));
        }
        fn play(&mut self) {
            self.calls.push(Call::Play);
        }
        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }
        fn stop(&mut self) {
            self.calls.push(Call::Stop);
            self.state = PlayState::Stopped;
        }
        fn set_position(&mut self, ms: u64) {
            self.calls.push(Call::SetPosition(ms));
            self.position = ms;
        }
        fn set_volume(&mut self, volume: u8) {
            self.calls.push(Call::SetVolume(volume));
        }
        fn state(&self) -> PlayState {
            self.state
        }
        fn position(&self) -> u64 {
            self.position
        }
        fn duration(&self) -> u64 {
            self.duration
        }
        fn drain_events(&mut self) -> Vec<PlayerEvent> {
            std::mem::take(&mut self.pending)
        }
    }

    type Controller = PlayerController<FakeBackend>;

    fn controller() -> Controller {
        PlayerController::new(FakeBackend::default(), PlayerConfig::default())
    }

    /// The dialog answered with `name`.
    fn choose(c: &mut Controller, name: &str) {
        c.file_chosen(Some(PathBuf::from(name)));
    }

    /// Open `name` and deliver the engine's "ready" with `duration`.
    fn loaded(name: &str, duration: u64) -> Controller {
        let mut c = controller();
        choose(&mut c, name);
        c.backend.duration = duration;
        c.handle_event(PlayerEvent::DurationChanged(duration));
        c.handle_event(PlayerEvent::StatusChanged(MediaStatus::Loaded));
        c
    }

    #[test]
    fn starts_empty_with_default_volume() {
        let c = controller();

        assert_eq!(c.display().song_label, "No song selected");
        assert_eq!(c.display().position_label, "00:00");
        assert_eq!(c.display().volume, 50);
        assert_eq!(c.display().play_label, "Play");
        assert_eq!(c.session().media, None);
        assert_eq!(c.backend().calls, vec![Call::SetVolume(50)]);
        assert!(!c.refresh_active());
    }

    #[test]
    fn cancelled_dialog_changes_nothing() {
        let mut c = controller();
        let before = c.display().clone();

        c.file_chosen(None);

        assert_eq!(c.display(), &before);
        assert_eq!(c.session().media, None);
        assert_eq!(c.session().status, MediaStatus::NoMedia);
        assert_eq!(c.backend().calls, vec![Call::SetVolume(50)]);
    }

    #[test]
    fn dialog_is_asked_with_audio_filter() {
        let c = controller();

        let (title, filter) = c.dialog_request();

        assert_eq!(title, "Open Music File");
        assert_eq!(filter.extensions, vec!["mp3", "ogg", "wav"]);
    }

    #[test]
    fn open_loads_and_waits_for_engine() {
        let mut c = controller();

        choose(&mut c, "/music/song.mp3");

        assert_eq!(
            c.backend().calls.last(),
            Some(&Call::Load(PathBuf::from("/music/song.mp3")))
        );
        assert_eq!(c.session().status, MediaStatus::Loading);
        assert_eq!(c.session().position_ms, 0);
        assert_eq!(c.session().duration_ms, 0);
        assert!(!c.refresh_active());
    }

    #[test]
    fn unsupported_extension_is_not_loaded() {
        let mut c = controller();

        choose(&mut c, "/music/cover.png");

        assert_eq!(c.session().media, None);
        assert!(!c.backend().calls.iter().any(|x| matches!(x, Call::Load(_))));
    }

    #[test]
    fn full_playback_scenario() {
        let mut c = loaded("/music/song.mp3", 180_000);

        assert_eq!(c.display().song_label, "song.mp3");
        assert_eq!(c.display().slider_max, 180_000);
        assert!(c.refresh_active());

        let labels: Vec<String> = [0, 1_000, 61_000]
            .into_iter()
            .map(|p| {
                c.handle_event(PlayerEvent::PositionChanged(p));
                c.display().position_label.clone()
            })
            .collect();
        assert_eq!(labels, vec!["00:00", "00:01", "01:01"]);
        assert_eq!(c.display().slider_value, 61_000);

        c.handle_event(PlayerEvent::StatusChanged(MediaStatus::EndOfMedia));

        assert_eq!(c.display().position_label, "00:00");
        assert_eq!(c.display().slider_value, 0);
        assert_eq!(c.session().state, PlayState::Stopped);
        assert_eq!(c.backend().calls.last(), Some(&Call::Stop));
    }

    #[test]
    fn slider_max_tracks_every_duration_event() {
        let mut c = loaded("/music/song.ogg", 1_000);

        for d in [0, 5, 180_000, 42, 3_600_000] {
            c.handle_event(PlayerEvent::DurationChanged(d));
            assert_eq!(c.display().slider_max, d);
        }
    }

    #[test]
    fn toggle_pauses_only_when_playing() {
        for (state, expected) in [
            (PlayState::Playing, Call::Pause),
            (PlayState::Paused, Call::Play),
            (PlayState::Stopped, Call::Play),
        ] {
            let mut c = loaded("/music/song.wav", 10_000);
            c.backend.state = state;

            c.toggle_play_pause();

            assert_eq!(c.backend().calls.last(), Some(&expected), "from {state:?}");
        }
    }

    #[test]
    fn toggle_without_media_does_not_panic() {
        let mut c = controller();

        c.toggle_play_pause();

        assert_eq!(c.backend().calls.last(), Some(&Call::Play));
        assert_eq!(c.session().state, PlayState::Stopped);
        assert_eq!(c.display().song_label, "No song selected");
    }

    #[test]
    fn play_label_follows_engine_state() {
        let mut c = loaded("/music/song.mp3", 10_000);

        c.handle_event(PlayerEvent::StateChanged(PlayState::Playing));
        assert_eq!(c.display().play_label, "Pause");

        c.handle_event(PlayerEvent::StateChanged(PlayState::Paused));
        assert_eq!(c.display().play_label, "Play");
    }

    #[test]
    fn stop_keeps_duration() {
        let mut c = loaded("/music/song.mp3", 180_000);
        c.handle_event(PlayerEvent::PositionChanged(90_000));

        c.stop();

        assert_eq!(c.display().position_label, "00:00");
        assert_eq!(c.display().slider_value, 0);
        assert_eq!(c.display().slider_max, 180_000);
        assert_eq!(c.session().duration_ms, 180_000);
    }

    #[test]
    fn volume_is_forwarded_without_touching_playback() {
        let mut c = loaded("/music/song.mp3", 180_000);
        c.handle_event(PlayerEvent::StateChanged(PlayState::Playing));
        c.handle_event(PlayerEvent::PositionChanged(30_000));

        c.set_volume(75);

        assert_eq!(c.backend().calls.last(), Some(&Call::SetVolume(75)));
        assert_eq!(c.display().volume, 75);
        assert_eq!(c.session().volume, 75);
        assert_eq!(c.session().state, PlayState::Playing);
        assert_eq!(c.session().position_ms, 30_000);
    }

    #[test]
    fn volume_never_exceeds_100() {
        let mut c = controller();

        c.set_volume(200);

        assert_eq!(c.display().volume, 100);
        assert_eq!(c.backend().calls.last(), Some(&Call::SetVolume(100)));
    }

    #[test]
    fn drag_previews_then_commits_one_seek() {
        let mut c = loaded("/music/song.mp3", 180_000);

        c.preview_seek(10_000);
        c.preview_seek(61_000);
        assert_eq!(c.display().position_label, "01:01");
        assert!(!c.backend().calls.iter().any(|x| matches!(x, Call::SetPosition(_))));

        c.commit_seek();

        let seeks: Vec<&Call> = c
            .backend()
            .calls
            .iter()
            .filter(|x| matches!(x, Call::SetPosition(_)))
            .collect();
        assert_eq!(seeks, vec![&Call::SetPosition(61_000)]);
    }

    #[test]
    fn engine_updates_during_drag_do_not_move_slider() {
        let mut c = loaded("/music/song.mp3", 180_000);
        c.preview_seek(120_000);

        c.handle_event(PlayerEvent::PositionChanged(5_000));
        c.backend.position = 6_000;
        c.tick();

        assert_eq!(c.display().slider_value, 120_000);
        assert_eq!(c.display().position_label, "02:00");
    }

    #[test]
    fn position_updates_never_issue_seeks() {
        let mut c = loaded("/music/song.mp3", 180_000);

        c.handle_event(PlayerEvent::PositionChanged(1_000));
        c.backend.position = 2_000;
        c.tick();
        c.commit_seek();

        assert!(!c.backend().calls.iter().any(|x| matches!(x, Call::SetPosition(_))));
    }

    #[test]
    fn refresh_after_seek_keeps_new_position() {
        let mut c = loaded("/music/song.mp3", 180_000);
        c.handle_event(PlayerEvent::PositionChanged(1_000));

        c.preview_seek(90_000);
        c.commit_seek();
        c.tick();

        assert_eq!(c.display().position_label, "01:30");
        assert_eq!(c.display().slider_value, 90_000);
    }

    #[test]
    fn tick_rereads_engine_position() {
        let mut c = loaded("/music/song.mp3", 180_000);
        c.backend.position = 61_500;

        c.tick();

        assert_eq!(c.display().slider_value, 61_500);
        assert_eq!(c.display().position_label, "01:01");
    }

    #[test]
    fn tick_and_position_event_agree() {
        let mut c = loaded("/music/song.mp3", 180_000);

        c.handle_event(PlayerEvent::PositionChanged(7_000));
        let from_event = c.display().clone();
        c.backend.position = 7_000;
        c.tick();

        assert_eq!(c.display(), &from_event);
    }

    #[test]
    fn tick_is_inert_before_media_ready() {
        let mut c = controller();
        choose(&mut c, "/music/song.mp3");
        c.backend.position = 9_000;

        c.tick();

        assert_eq!(c.display().position_label, "00:00");
    }

    #[test]
    fn position_is_clamped_to_duration() {
        let mut c = loaded("/music/song.mp3", 10_000);

        c.handle_event(PlayerEvent::PositionChanged(12_000));

        assert_eq!(c.session().position_ms, 10_000);
        assert_eq!(c.display().slider_value, 10_000);
    }

    #[test]
    fn invalid_media_falls_back_to_no_song() {
        let mut c = loaded("/music/first.mp3", 180_000);
        c.handle_event(PlayerEvent::PositionChanged(30_000));

        choose(&mut c, "/music/broken.mp3");
        c.handle_event(PlayerEvent::StatusChanged(MediaStatus::Invalid));
        c.handle_event(PlayerEvent::Error("Format probe failed".into()));

        assert_eq!(c.display().song_label, "No song selected");
        assert_eq!(c.display().position_label, "00:00");
        assert_eq!(c.display().slider_value, 0);
        assert_eq!(c.display().slider_max, 0);
        assert_eq!(c.session().media, None);
        assert_eq!(c.status_line(), Some("Format probe failed"));
        assert!(!c.refresh_active());
    }

    #[test]
    fn pump_applies_backend_events_in_order() {
        let mut c = controller();
        choose(&mut c, "/music/song.mp3");
        c.backend.duration = 180_000;
        c.backend.pending = vec![
            PlayerEvent::StatusChanged(MediaStatus::Loading),
            PlayerEvent::DurationChanged(180_000),
            PlayerEvent::StatusChanged(MediaStatus::Loaded),
            PlayerEvent::PositionChanged(61_000),
        ];

        c.pump_events();

        assert_eq!(c.display().song_label, "song.mp3");
        assert_eq!(c.display().slider_max, 180_000);
        assert_eq!(c.display().position_label, "01:01");
    }
}
