//! Looping background track decoded from a WAV file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::mixer::FrameSource;
use super::output::OutputStream;
use crate::error::AudioError;
use crate::page::MediaPlayer;
use crate::params::OutputParams;

/// Decoded mono audio
#[derive(Debug, Clone)]
pub struct TrackBuffer {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
}

impl TrackBuffer {
    /// Decode a WAV file, downmixing to mono
    pub fn decode_wav(path: &Path) -> Result<Self, AudioError> {
        let media_error = |reason: String| AudioError::Media {
            path: path.to_path_buf(),
            reason,
        };

        let reader = hound::WavReader::open(path).map_err(|e| media_error(e.to_string()))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| media_error(e.to_string()))?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| media_error(e.to_string()))?
            }
        };

        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        if samples.is_empty() {
            return Err(media_error("no audio frames".to_string()));
        }

        Ok(Self {
            samples,
            sample_rate_hz: spec.sample_rate,
        })
    }

    pub fn duration_s(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }
}

/// Play head over a track buffer, wrapping at the end
#[derive(Debug)]
struct TrackCursor {
    buffer: TrackBuffer,
    /// Position in source frames
    position: f64,
    playing: bool,
    gain: f32,
}

impl FrameSource for TrackCursor {
    fn fill(&mut self, out: &mut [f32], sample_rate_hz: f32) {
        let len = self.buffer.samples.len();
        if !self.playing || len == 0 || sample_rate_hz <= 0.0 {
            out.fill(0.0);
            return;
        }

        let step = self.buffer.sample_rate_hz as f64 / sample_rate_hz as f64;
        let samples = &self.buffer.samples;

        for sample in out.iter_mut() {
            // Linear interpolation between neighbouring source frames
            let index = self.position as usize;
            let frac = (self.position - index as f64) as f32;
            let a = samples[index % len];
            let b = samples[(index + 1) % len];
            *sample = (a + (b - a) * frac) * self.gain;

            self.position = (self.position + step) % len as f64;
        }
    }
}

/// Background track player: loads lazily, loops forever, pauses in place
pub struct LoopingTrack {
    path: PathBuf,
    params: OutputParams,
    cursor: Option<Arc<Mutex<TrackCursor>>>,
    output: Option<OutputStream>,
}

impl LoopingTrack {
    pub fn new(path: impl Into<PathBuf>, params: OutputParams) -> Self {
        Self {
            path: path.into(),
            params,
            cursor: None,
            output: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn cursor(&mut self) -> Result<Arc<Mutex<TrackCursor>>, AudioError> {
        if let Some(cursor) = &self.cursor {
            return Ok(Arc::clone(cursor));
        }

        let buffer = TrackBuffer::decode_wav(&self.path)?;
        log::info!(
            target: "audio",
            "loaded background track {} ({:.1}s)",
            self.path.display(),
            buffer.duration_s()
        );

        let cursor = Arc::new(Mutex::new(TrackCursor {
            buffer,
            position: 0.0,
            playing: false,
            gain: self.params.track_gain,
        }));
        self.cursor = Some(Arc::clone(&cursor));
        Ok(cursor)
    }

    fn set_playing(cursor: &Mutex<TrackCursor>, playing: bool) {
        if let Ok(mut cursor) = cursor.lock() {
            cursor.playing = playing;
        }
    }
}

impl MediaPlayer for LoopingTrack {
    fn play(&mut self) -> Result<(), AudioError> {
        let cursor = self.cursor()?;
        Self::set_playing(&cursor, true);

        match &self.output {
            Some(output) => output.play(),
            None => {
                let output = OutputStream::open(cursor, &self.params)?;
                self.output = Some(output);
                Ok(())
            }
        }
    }

    fn pause(&mut self) {
        if let Some(cursor) = &self.cursor {
            Self::set_playing(cursor, false);
        }
        if let Some(output) = &self.output {
            if let Err(e) = output.pause() {
                log::warn!(target: "audio", "could not pause background track: {}", e);
            }
        }
    }
}
