//! Audio session backed by the default cpal output device.

use std::sync::{Arc, Mutex};

use super::mixer::VoiceMixer;
use super::output::OutputStream;
use super::session::{AudioSession, SessionState};
use super::voice::ToneVoice;
use crate::error::AudioError;
use crate::params::OutputParams;

/// Live session: a running output stream pulling from a voice mixer
pub struct CpalSession {
    /// Shared with the audio callback
    mixer: Arc<Mutex<VoiceMixer>>,

    /// Output stream (kept alive)
    output: OutputStream,

    state: SessionState,
}

impl CpalSession {
    /// Open the device and start the stream. Any failure here means the
    /// host refused to give us a session at all.
    pub fn open(params: &OutputParams) -> Result<Self, AudioError> {
        // Sample rate is adopted from the device on the first callback
        let mixer = Arc::new(Mutex::new(VoiceMixer::new(0.0)));

        let output = OutputStream::open(Arc::clone(&mixer), params)
            .map_err(|e| AudioError::SessionInit(e.to_string()))?;

        log::info!(target: "audio", "note session running at {}Hz", output.sample_rate_hz());

        Ok(Self {
            mixer,
            output,
            state: SessionState::Running,
        })
    }
}

impl AudioSession for CpalSession {
    fn state(&self) -> SessionState {
        self.state
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.state == SessionState::Running {
            return Ok(());
        }
        self.output
            .play()
            .map_err(|e| AudioError::Resume(e.to_string()))?;
        self.state = SessionState::Running;
        log::debug!(target: "audio", "note session resumed");
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), AudioError> {
        if self.state == SessionState::Suspended {
            return Ok(());
        }
        self.output.pause()?;
        self.state = SessionState::Suspended;
        log::debug!(target: "audio", "note session suspended");
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.mixer
            .lock()
            .map(|mixer| mixer.current_time())
            .unwrap_or(0.0)
    }

    fn start_voice(&mut self, voice: ToneVoice) {
        match self.mixer.lock() {
            Ok(mut mixer) => {
                mixer.add_voice(voice);
                log::trace!(target: "audio", "{} voices sounding", mixer.active_voices());
            }
            Err(_) => log::warn!(target: "audio", "mixer unavailable, dropping voice"),
        }
    }
}
