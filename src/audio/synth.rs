//! Piano note synthesizer: one short enveloped tone per request.

use super::envelope::Envelope;
use super::note::NoteId;
use super::session::{AudioSession, SessionState};
use super::voice::ToneVoice;
use crate::error::AudioError;
use crate::params::SynthParams;

/// Plays single notes on an audio session. Every call starts a fresh,
/// independent voice; rapid calls overlap rather than cut each other off.
pub struct NoteSynthesizer<S: AudioSession> {
    session: S,
    params: SynthParams,
}

impl<S: AudioSession> NoteSynthesizer<S> {
    pub fn new(session: S, params: SynthParams) -> Result<Self, AudioError> {
        params.validate().map_err(AudioError::InvalidParams)?;
        Ok(Self { session, params })
    }

    /// Play the note printed on a key. Labels that are not one of the seven
    /// notes are ignored.
    pub fn play(&mut self, label: &str) {
        match NoteId::from_label(label) {
            Some(note) => self.play_note(note),
            None => log::debug!(target: "audio", "ignoring unknown note label {:?}", label),
        }
    }

    /// Start a tone for `note`, resuming the session first if it is suspended
    pub fn play_note(&mut self, note: NoteId) {
        if self.session.state() == SessionState::Suspended {
            if let Err(e) = self.session.resume() {
                log::warn!(target: "audio", "could not resume audio session: {}", e);
            }
        }

        let start_time = self.session.current_time();
        let voice = ToneVoice {
            frequency_hz: note.frequency_hz(),
            waveform: self.params.waveform,
            envelope: Envelope::from_params(&self.params),
            start_time,
            stop_time: start_time + self.params.duration_s,
        };

        log::debug!(target: "audio", "note {} at {:.2}Hz (t={:.3}s)", note, voice.frequency_hz, start_time);
        self.session.start_voice(voice);
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }
}
