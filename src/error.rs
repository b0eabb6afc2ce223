//! Error types.
//!
//! `PlayerError` covers everything the playback engine can fail at.
//! `AppError` is what `main` returns.

use flexi_logger::FlexiLoggerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Audio output init failed: {0}")]
    Output(String),

    #[error("Open failed: {0}")]
    Open(String),

    #[error("Format probe failed: {0}")]
    Probe(String),

    #[error("No supported audio track found.")]
    NoTrack,

    #[error("Decoder init failed: {0}")]
    Decoder(String),

    #[error("Seek failed: {0}")]
    Seek(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<std::io::Error> for PlayerError {
    fn from(error: std::io::Error) -> Self {
        PlayerError::Open(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Logger initialization error: {0}")]
    Logger(String),

    #[error("GUI error: {0}")]
    Gui(String),
}

impl From<FlexiLoggerError> for AppError {
    fn from(error: FlexiLoggerError) -> Self {
        AppError::Logger(error.to_string())
    }
}

impl From<iced::Error> for AppError {
    fn from(error: iced::Error) -> Self {
        AppError::Gui(error.to_string())
    }
}
