//! core/mod.rs
//!
//! The brain of the app:
//! - `controller`: playback state + what the widgets should show
//! - `playback`: the audio engine thread and the `MediaBackend` seam
//! - `chooser`: the file-dialog seam
//! - `format`, `types`: plain helpers and data
//!
//! Nothing in here knows about iced; the GUI only forwards messages in and
//! renders `Display` out.

pub mod chooser;
pub mod controller;
pub mod format;
pub mod playback;
pub mod types;
