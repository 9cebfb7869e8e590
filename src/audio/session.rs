//! Audio session abstraction: the clock and output sink tones are scheduled on.

use super::voice::ToneVoice;
use crate::error::AudioError;

/// Whether the session is currently producing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Suspended,
}

/// An audio-processing session voices are started on
pub trait AudioSession {
    fn state(&self) -> SessionState;

    /// Resume a suspended session (no-op when already running)
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Stop producing output; the clock freezes until `resume`
    fn suspend(&mut self) -> Result<(), AudioError>;

    /// Session clock (seconds)
    fn current_time(&self) -> f64;

    /// Hand a voice to the session. The session drops it after `stop_time`.
    fn start_voice(&mut self, voice: ToneVoice);
}

/// Creates sessions on demand
pub trait SessionFactory {
    type Session: AudioSession;

    fn open(&mut self) -> Result<Self::Session, AudioError>;
}

impl<S, F> SessionFactory for F
where
    S: AudioSession,
    F: FnMut() -> Result<S, AudioError>,
{
    type Session = S;

    fn open(&mut self) -> Result<S, AudioError> {
        self()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Session that records what it is asked to do instead of making sound
    #[derive(Debug)]
    pub struct RecordingSession {
        pub voices: Vec<ToneVoice>,
        pub state: SessionState,
        pub resume_calls: usize,
        pub fail_resume: bool,
        pub time: f64,
    }

    impl RecordingSession {
        pub fn running() -> Self {
            Self {
                voices: Vec::new(),
                state: SessionState::Running,
                resume_calls: 0,
                fail_resume: false,
                time: 0.0,
            }
        }

        pub fn suspended() -> Self {
            Self {
                state: SessionState::Suspended,
                ..Self::running()
            }
        }
    }

    impl AudioSession for RecordingSession {
        fn state(&self) -> SessionState {
            self.state
        }

        fn resume(&mut self) -> Result<(), AudioError> {
            self.resume_calls += 1;
            if self.fail_resume {
                return Err(AudioError::Resume("blocked by host".into()));
            }
            self.state = SessionState::Running;
            Ok(())
        }

        fn suspend(&mut self) -> Result<(), AudioError> {
            self.state = SessionState::Suspended;
            Ok(())
        }

        fn current_time(&self) -> f64 {
            self.time
        }

        fn start_voice(&mut self, voice: ToneVoice) {
            self.voices.push(voice);
        }
    }

    #[test]
    fn test_closure_factory() {
        let mut opened = 0;
        let mut factory = || {
            opened += 1;
            Ok::<_, AudioError>(RecordingSession::running())
        };
        let session = factory.open().unwrap();
        assert_eq!(session.state(), SessionState::Running);
        drop(factory);
        assert_eq!(opened, 1);
    }
}
