//! Error types for the audio engine and page layout loading.

use std::path::PathBuf;

/// Failures raised by the audio side of the page (note synthesis and the
/// background track).
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// The audio session could not be created at all
    #[error("audio session could not be created: {0}")]
    SessionInit(String),

    /// A previous session creation failed; the piano stays silent
    #[error("note engine halted after failed initialization")]
    EngineHalted,

    /// Host has no usable output device
    #[error("no audio output device found")]
    NoOutputDevice,

    /// Output stream could not be built, started or paused
    #[error("audio stream error: {0}")]
    Stream(String),

    /// Background media missing or undecodable
    #[error("media unavailable at {path}: {reason}")]
    Media { path: PathBuf, reason: String },

    /// Suspended session refused to resume
    #[error("audio session resume failed: {0}")]
    Resume(String),

    /// Synthesizer parameters rejected by validation
    #[error("invalid synth parameters: {0}")]
    InvalidParams(String),
}

impl AudioError {
    /// Fatal errors stop the interactive audio feature for the rest of the
    /// session; everything else is logged and absorbed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SessionInit(_) | Self::EngineHalted)
    }
}

/// Failures loading or validating a page layout file
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("could not read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed layout: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid layout: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_split() {
        assert!(AudioError::SessionInit("denied".into()).is_fatal());
        assert!(AudioError::EngineHalted.is_fatal());
        assert!(!AudioError::NoOutputDevice.is_fatal());
        assert!(!AudioError::Resume("busy".into()).is_fatal());
        assert!(!AudioError::Media {
            path: PathBuf::from("missing.wav"),
            reason: "not found".into(),
        }
        .is_fatal());
    }
}
