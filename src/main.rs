//! Sonora Mini
//!
//! A minimal desktop audio player: Play/Pause, Stop, a seek slider, a volume
//! slider and an Open button, built with `iced` on top of a rodio/symphonia
//! playback thread.
//!
//! # Layout
//! - `core::controller` keeps playback state and the widget mirror in sync
//!   (testable without audio or a window)
//! - `core::playback` owns the audio device on its own thread
//! - `gui` is the iced `update`/`view`/`subscription` glue
//!
//! # Concurrency model
//! - The controller lives on the iced event loop.
//! - The engine thread talks back over a channel that the GUI drains on a
//!   short timer; a second 1 s timer re-reads the position while media is
//!   loaded.

mod config;
mod core;
mod error;
mod gui;

use flexi_logger::Logger;
use log::info;

use crate::config::PlayerConfig;
use crate::error::AppError;
use crate::gui::Player;

fn main() -> Result<(), AppError> {
    // RUST_LOG wins; otherwise info to stderr.
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let config = PlayerConfig::default();
    let size = (config.window_width, config.window_height);
    info!("starting {}", config.window_title);

    iced::application(Player::default, gui::update, gui::view)
        .subscription(gui::subscription)
        .title(|state: &Player| state.controller.config().window_title.clone())
        .window_size(size)
        .run()?;

    Ok(())
}
