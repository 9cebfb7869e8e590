//! Vinyl player control for the looping background track.

use crate::error::AudioError;

/// Playback backend for the background track
pub trait MediaPlayer {
    /// Start or resume from the current position
    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self);
}

/// Play/pause toggle behind the vinyl icon.
///
/// The "playing" visual state is applied as soon as playback is requested,
/// even when the backend refuses to play. The refusal is only logged.
pub struct BackgroundPlayerToggle<P: MediaPlayer> {
    player: P,
    is_playing: bool,
    visual_playing: bool,
}

impl<P: MediaPlayer> BackgroundPlayerToggle<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            is_playing: false,
            visual_playing: false,
        }
    }

    pub fn toggle(&mut self) {
        if self.is_playing {
            self.player.pause();
            self.visual_playing = false;
        } else {
            if let Err(e) = self.player.play() {
                log::warn!(target: "audio", "Audio file missing or blocked: {}", e);
            }
            self.visual_playing = true;
        }
        self.is_playing = !self.is_playing;
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the icon shows the spinning "playing" state
    pub fn shows_playing(&self) -> bool {
        self.visual_playing
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::PathBuf;

    /// Player that records calls and can refuse to play
    #[derive(Debug, Default)]
    pub struct FakePlayer {
        pub plays: usize,
        pub pauses: usize,
        pub fail: bool,
    }

    impl MediaPlayer for FakePlayer {
        fn play(&mut self) -> Result<(), AudioError> {
            self.plays += 1;
            if self.fail {
                return Err(AudioError::Media {
                    path: PathBuf::from("assets/music/background.wav"),
                    reason: "not found".into(),
                });
            }
            Ok(())
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }
    }
}
