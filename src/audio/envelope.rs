//! Attack/decay gain envelope.

use crate::params::SynthParams;

/// Gain curve of a single tone: silence at start, linear attack to `peak`,
/// then exponential decay to `floor` at `end_s`. Times are seconds since the
/// tone started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub peak: f32,
    pub attack_s: f64,
    pub floor: f32,
    pub end_s: f64,
}

impl Envelope {
    pub fn from_params(params: &SynthParams) -> Self {
        Self {
            peak: params.peak_gain,
            attack_s: params.attack_s,
            floor: params.floor_gain,
            end_s: params.duration_s,
        }
    }

    /// Gain at `elapsed_s` seconds after tone start
    pub fn gain_at(&self, elapsed_s: f64) -> f32 {
        if elapsed_s < 0.0 || elapsed_s > self.end_s {
            return 0.0;
        }

        if elapsed_s <= self.attack_s {
            if self.attack_s <= 0.0 {
                return self.peak;
            }
            return self.peak * (elapsed_s / self.attack_s) as f32;
        }

        // Exponential ramp: v(t) = peak * (floor / peak) ^ progress
        let progress = (elapsed_s - self.attack_s) / (self.end_s - self.attack_s);
        let ratio = (self.floor / self.peak) as f64;
        (self.peak as f64 * ratio.powf(progress)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> Envelope {
        Envelope::from_params(&SynthParams::default())
    }

    #[test]
    fn test_envelope_shape() {
        let env = envelope();
        assert_eq!(env.gain_at(0.0), 0.0);
        assert!((env.gain_at(0.02) - 0.3).abs() < 1e-6);
        assert!((env.gain_at(1.5) - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_attack_is_linear() {
        let env = envelope();
        assert!((env.gain_at(0.01) - 0.15).abs() < 1e-6);
        assert!((env.gain_at(0.005) - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_decay_is_exponential() {
        let env = envelope();
        // Halfway through the decay the gain is the geometric mean of peak and floor
        let mid = 0.02 + (1.5 - 0.02) / 2.0;
        let expected = (0.3f32 * 0.001).sqrt();
        assert!((env.gain_at(mid) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_decay_monotonic() {
        let env = envelope();
        let mut last = env.gain_at(0.02);
        let mut t = 0.03;
        while t <= 1.5 {
            let g = env.gain_at(t);
            assert!(g < last, "gain rose at t={t}");
            last = g;
            t += 0.01;
        }
    }

    #[test]
    fn test_silent_outside_tone() {
        let env = envelope();
        assert_eq!(env.gain_at(-0.1), 0.0);
        assert_eq!(env.gain_at(1.6), 0.0);
    }

    #[test]
    fn test_zero_attack_starts_at_peak() {
        let env = Envelope {
            attack_s: 0.0,
            ..envelope()
        };
        assert_eq!(env.gain_at(0.0), 0.3);
    }
}
