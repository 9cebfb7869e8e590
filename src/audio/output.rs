//! cpal output stream driven by a shared frame source.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use super::mixer::FrameSource;
use crate::error::AudioError;
use crate::params::OutputParams;

/// Output stream on the default device (kept alive while held)
pub struct OutputStream {
    stream: cpal::Stream,
    sample_rate_hz: f32,
}

impl OutputStream {
    /// Open the default output device and start pulling from `source`
    pub fn open<S>(source: Arc<Mutex<S>>, params: &OutputParams) -> Result<Self, AudioError>
    where
        S: FrameSource + 'static,
    {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Stream(format!("Failed to get audio config: {}", e)))?;

        let sample_rate_hz = config.sample_rate().0 as f32;
        let channels = (config.channels() as usize).max(1);

        log::info!(
            target: "audio",
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate().0,
            channels
        );

        let ceiling = params.limiter_ceiling;
        let mut mono = Vec::<f32>::new();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / channels;
                    mono.resize(frames, 0.0);

                    match source.lock() {
                        Ok(mut source) => source.fill(&mut mono, sample_rate_hz),
                        Err(_) => mono.fill(0.0),
                    }

                    for (frame, sample) in data.chunks_mut(channels).zip(&mono) {
                        // Safety limiter: hard clip to prevent ear damage
                        frame.fill(sample.clamp(-ceiling, ceiling));
                    }
                },
                |err| log::error!(target: "audio", "Audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::Stream(format!("Failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::Stream(format!("Failed to start audio stream: {}", e)))?;

        Ok(Self {
            stream,
            sample_rate_hz,
        })
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }

    pub fn play(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::Stream(format!("Failed to start audio stream: {}", e)))
    }

    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::Stream(format!("Failed to pause audio stream: {}", e)))
    }
}
