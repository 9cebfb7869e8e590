//! Audio engine: piano note synthesis and the looping background track.
//!
//! Tones are scheduled as disposable voices on an `AudioSession`; the live
//! session mixes them in software and feeds a cpal output stream.

mod envelope;
mod mixer;
mod note;
mod output;
mod session;
mod synth;
mod system;
mod track;
mod voice;

// Re-export public types
pub use envelope::Envelope;
pub use mixer::{FrameSource, VoiceMixer};
pub use note::NoteId;
pub use output::OutputStream;
pub use session::{AudioSession, SessionFactory, SessionState};
pub use synth::NoteSynthesizer;
pub use system::CpalSession;
pub use track::{LoopingTrack, TrackBuffer};
pub use voice::{ToneVoice, Waveform};

#[cfg(test)]
pub(crate) use session::testing;
