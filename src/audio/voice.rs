//! Disposable tone voices: one oscillator at a fixed frequency plus its envelope.

use std::f64::consts::TAU;

use super::envelope::Envelope;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    #[default]
    Triangle,
}

impl Waveform {
    /// Sample the waveform at `phase` cycles (only the fractional part matters).
    /// Every shape starts at zero and rises, like the browser's built-in oscillators.
    pub fn sample(self, phase: f64) -> f32 {
        let p = phase.rem_euclid(1.0);
        let value = match self {
            Self::Sine => (TAU * p).sin(),
            Self::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Sawtooth => 2.0 * (p + 0.5).rem_euclid(1.0) - 1.0,
            Self::Triangle => 1.0 - 4.0 * ((p + 0.25).rem_euclid(1.0) - 0.5).abs(),
        };
        value as f32
    }
}

/// A scheduled tone. Times are on the owning session's clock (seconds).
#[derive(Debug, Clone, PartialEq)]
pub struct ToneVoice {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub envelope: Envelope,
    pub start_time: f64,
    pub stop_time: f64,
}

impl ToneVoice {
    /// Output sample at session time `time`
    pub fn sample_at(&self, time: f64) -> f32 {
        if time < self.start_time || time >= self.stop_time {
            return 0.0;
        }
        let elapsed = time - self.start_time;
        let phase = elapsed * self.frequency_hz as f64;
        self.waveform.sample(phase) * self.envelope.gain_at(elapsed)
    }

    /// The oscillator has reached its scheduled stop
    pub fn is_finished(&self, time: f64) -> bool {
        time >= self.stop_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SynthParams;

    fn voice(start: f64) -> ToneVoice {
        ToneVoice {
            frequency_hz: 440.0,
            waveform: Waveform::Triangle,
            envelope: Envelope::from_params(&SynthParams::default()),
            start_time: start,
            stop_time: start + 1.5,
        }
    }

    #[test]
    fn test_triangle_shape() {
        let tri = Waveform::Triangle;
        assert!(tri.sample(0.0).abs() < 1e-6);
        assert!((tri.sample(0.25) - 1.0).abs() < 1e-6);
        assert!(tri.sample(0.5).abs() < 1e-6);
        assert!((tri.sample(0.75) + 1.0).abs() < 1e-6);
        assert!(tri.sample(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_waveforms_start_at_zero_rising() {
        for wf in [Waveform::Sine, Waveform::Triangle, Waveform::Sawtooth] {
            assert!(wf.sample(0.0).abs() < 1e-6, "{wf:?}");
            assert!(wf.sample(0.05) > 0.0, "{wf:?}");
        }
    }

    #[test]
    fn test_waveforms_bounded() {
        for wf in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ] {
            for i in 0..100 {
                let s = wf.sample(i as f64 / 37.0);
                assert!((-1.0..=1.0).contains(&s), "{wf:?} out of range: {s}");
            }
        }
    }

    #[test]
    fn test_voice_silent_outside_window() {
        let v = voice(2.0);
        assert_eq!(v.sample_at(1.9), 0.0);
        assert_eq!(v.sample_at(3.5), 0.0);
        assert_eq!(v.sample_at(4.0), 0.0);
    }

    #[test]
    fn test_voice_audible_after_attack() {
        let v = voice(0.0);
        // Phase 9.25 cycles lands on a triangle peak just after the attack
        let t = 9.25 / 440.0;
        assert!(v.sample_at(t) > 0.25);
    }

    #[test]
    fn test_voice_finishes_at_stop() {
        let v = voice(1.0);
        assert!(!v.is_finished(2.49));
        assert!(v.is_finished(2.5));
    }
}
