//! core/playback/decoder.rs
//! Symphonia demux + decode exposed as a seekable rodio::Source.
//!
//! The engine re-opens the file through here on every seek, so opening is
//! also how it learns the media duration.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use rodio::Source;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use crate::error::PlayerError;

/// A freshly opened media file, positioned at the requested offset.
pub struct OpenedMedia {
    pub source: SymphoniaSource,
    /// None when the container doesn't say (e.g. some VBR mp3s).
    pub duration_ms: Option<u64>,
}

/// Open `path` and position the stream at `start_ms`.
pub fn open_at(path: &Path, start_ms: u64) -> Result<OpenedMedia, PlayerError> {
    let mut format = probe(path)?;

    let track = format.default_track().ok_or(PlayerError::NoTrack)?;
    let track_id = track.id;
    // Owned copy so the format reader can be borrowed mutably for seeking.
    let params = track.codec_params.clone();

    let duration_ms = duration_ms(params.time_base, params.n_frames);

    if start_ms > 0 {
        let seek_to = SeekTo::Time {
            time: Time::from(Duration::from_millis(start_ms)),
            track_id: Some(track_id),
        };
        format
            .seek(SeekMode::Accurate, seek_to)
            .map_err(|e| PlayerError::Seek(e.to_string()))?;
    }

    // Built after any seek so the decoder starts from a clean state.
    let decoder = new_decoder(&params)?;

    Ok(OpenedMedia {
        source: SymphoniaSource::new(path.to_path_buf(), format, decoder, track_id),
        duration_ms,
    })
}

fn probe(path: &Path) -> Result<Box<dyn FormatReader>, PlayerError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PlayerError::Probe(e.to_string()))?;

    Ok(probed.format)
}

fn new_decoder(params: &CodecParameters) -> Result<Box<dyn Decoder>, PlayerError> {
    symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(|e| PlayerError::Decoder(e.to_string()))
}

fn duration_ms(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let t = time_base?.calc_time(n_frames?);
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

/// Streaming rodio Source that decodes packet by packet.
pub struct SymphoniaSource {
    path: PathBuf,
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,

    sample_rate: u32,
    channels: u16,

    // Interleaved samples of the current packet.
    buf: Vec<f32>,
    buf_pos: usize,

    ended: bool,
}

impl SymphoniaSource {
    fn new(
        path: PathBuf,
        format: Box<dyn FormatReader>,
        decoder: Box<dyn Decoder>,
        track_id: u32,
    ) -> Self {
        let mut this = Self {
            path,
            format,
            decoder,
            track_id,
            sample_rate: 44_100,
            channels: 2,
            buf: Vec::new(),
            buf_pos: 0,
            ended: false,
        };

        // Decode the first packet now so channels/sample_rate are right
        // before rodio asks for them.
        if let Err(e) = this.refill() {
            warn!("{}: {e}", this.path.display());
            this.ended = true;
        }

        this
    }

    /// Decode the next packet of our track into `buf`.
    /// End of stream sets `ended` and returns Ok.
    fn refill(&mut self) -> Result<(), PlayerError> {
        self.buf.clear();
        self.buf_pos = 0;

        while !self.ended {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                // Corrupt packet; skip it.
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            let spec = *decoded.spec();
            let frames = decoded.frames();
            if frames == 0 {
                continue;
            }

            self.sample_rate = spec.rate;
            self.channels = spec.channels.count() as u16;

            let mut samples = SampleBuffer::<f32>::new(frames as u64, spec);
            samples.copy_interleaved_ref(decoded);
            self.buf.extend_from_slice(samples.samples());
            break;
        }

        Ok(())
    }
}

impl Iterator for SymphoniaSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        while self.buf_pos >= self.buf.len() {
            if self.ended {
                return None;
            }
            if let Err(e) = self.refill() {
                warn!("{}: {e}", self.path.display());
                self.ended = true;
                return None;
            }
        }

        let sample = self.buf[self.buf_pos];
        self.buf_pos += 1;
        Some(sample)
    }
}

impl Source for SymphoniaSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
