//! File chooser.
//!
//! Native OS dialog from `rfd`, awaited off the event loop; the GUI wraps
//! it in a `Task` and hands the answer to `PlayerController::file_chosen`.

use std::path::PathBuf;

use crate::config::AudioFilter;

/// `None` when the user cancels.
pub async fn choose_audio_file(title: String, filter: AudioFilter) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title(title.as_str())
        .add_filter(filter.name.as_str(), filter.extensions.as_slice())
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
