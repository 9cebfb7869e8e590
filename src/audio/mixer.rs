//! Software mixer summing independent tone voices on a sample clock.

use super::voice::ToneVoice;

/// Anything that fills mono output blocks for the cpal callback
pub trait FrameSource: Send {
    /// Fill `out` with mono samples at `sample_rate_hz`
    fn fill(&mut self, out: &mut [f32], sample_rate_hz: f32);
}

/// Mixes every live voice; overlapping voices simply add up
#[derive(Debug)]
pub struct VoiceMixer {
    voices: Vec<ToneVoice>,
    frames_rendered: u64,
    sample_rate_hz: f32,
}

impl VoiceMixer {
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            voices: Vec::new(),
            frames_rendered: 0,
            sample_rate_hz,
        }
    }

    /// Mixer clock (seconds of audio rendered so far)
    pub fn current_time(&self) -> f64 {
        if self.sample_rate_hz <= 0.0 {
            return 0.0;
        }
        self.frames_rendered as f64 / self.sample_rate_hz as f64
    }

    pub fn add_voice(&mut self, voice: ToneVoice) {
        self.voices.push(voice);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}

impl FrameSource for VoiceMixer {
    fn fill(&mut self, out: &mut [f32], sample_rate_hz: f32) {
        self.sample_rate_hz = sample_rate_hz;
        let dt = 1.0 / sample_rate_hz as f64;

        for sample in out.iter_mut() {
            let t = self.frames_rendered as f64 * dt;
            *sample = self.voices.iter().map(|v| v.sample_at(t)).sum();
            self.frames_rendered += 1;
        }

        // Drop voices whose scheduled stop has passed
        let now = self.current_time();
        self.voices.retain(|v| !v.is_finished(now));
    }
}
