//! Note synthesis and audio output configuration.

use crate::audio::Waveform;

/// Shape of a single piano tone
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Oscillator waveform for every tone
    pub waveform: Waveform,

    /// Gain reached at the end of the attack (linear, 0..1)
    pub peak_gain: f32,

    /// Attack duration (seconds), linear ramp from silence to peak
    pub attack_s: f64,

    /// Gain the exponential decay lands on (linear, must be > 0)
    pub floor_gain: f32,

    /// Total tone length from start to automatic stop (seconds)
    pub duration_s: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Triangle, // Smoother than square, richer than sine
            peak_gain: 0.3,
            attack_s: 0.02,
            floor_gain: 0.001,
            duration_s: 1.5,
        }
    }
}

impl SynthParams {
    /// Validate configuration (exponential ramps cannot touch zero, etc.)
    pub fn validate(&self) -> Result<(), String> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.floor_gain) || !positive(self.peak_gain) {
            return Err(format!(
                "Envelope gains must be > 0, got peak {} floor {}",
                self.peak_gain, self.floor_gain
            ));
        }
        let attack_ok = self.attack_s.is_finite() && self.attack_s >= 0.0;
        if !attack_ok || !self.duration_s.is_finite() || self.duration_s <= self.attack_s {
            return Err(format!(
                "Tone duration {}s must exceed attack {}s",
                self.duration_s, self.attack_s
            ));
        }
        Ok(())
    }
}

/// Output stream configuration shared by the synth and the background track
#[derive(Debug, Clone)]
pub struct OutputParams {
    /// Safety limiter: hard clip to ±this value to prevent ear damage
    pub limiter_ceiling: f32,

    /// Background track gain (linear)
    pub track_gain: f32,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            limiter_ceiling: 0.5,
            track_gain: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_synth_params_valid() {
        assert!(SynthParams::default().validate().is_ok());
    }

    #[test]
    fn test_synth_params_reject_zero_floor() {
        let params = SynthParams {
            floor_gain: 0.0,
            ..SynthParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_synth_params_reject_silent_or_nan_peak() {
        for peak_gain in [0.0, -0.3, f32::NAN, f32::INFINITY] {
            let params = SynthParams {
                peak_gain,
                ..SynthParams::default()
            };
            assert!(params.validate().is_err(), "peak {} accepted", peak_gain);
        }
    }

    #[test]
    fn test_synth_params_reject_nan_timing() {
        let params = SynthParams {
            attack_s: f64::NAN,
            ..SynthParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_synth_params_reject_short_duration() {
        let params = SynthParams {
            duration_s: 0.01,
            ..SynthParams::default()
        };
        assert!(params.validate().is_err());
    }
}
