//! Page colours and the eased background fade between them.

use glam::Vec3;

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            _ => None,
        }
    }

    /// Normalized sRGB components (0..1)
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing function
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Material "standard" curve, cubic-bezier(0.4, 0, 0.2, 1)
    pub const STANDARD: Self = Self {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    fn curve(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    /// Eased value for linear progress `x` in 0..1
    pub fn ease(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);

        // x(t) is monotonic for x1, x2 in 0..1, so bisection always converges
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        let mut t = x;
        for _ in 0..32 {
            let current = Self::curve(self.x1, self.x2, t);
            if (current - x).abs() < 1e-6 {
                break;
            }
            if current < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }

        Self::curve(self.y1, self.y2, t)
    }
}

/// Smooth transition of the page background to the most recent target
#[derive(Debug, Clone)]
pub struct BackgroundFade {
    from: Vec3,
    to: Vec3,
    start_s: f32,
    duration_s: f32,
    easing: CubicBezier,
}

impl BackgroundFade {
    pub fn new(initial: Rgb, duration_s: f32) -> Self {
        let color = initial.to_vec3();
        Self {
            from: color,
            to: color,
            start_s: 0.0,
            duration_s,
            easing: CubicBezier::STANDARD,
        }
    }

    /// Start fading towards `target` from whatever is on screen at `now_s`
    pub fn retarget(&mut self, target: Rgb, now_s: f32) {
        let target = target.to_vec3();
        if target == self.to {
            return;
        }
        self.from = self.sample(now_s);
        self.to = target;
        self.start_s = now_s;
    }

    /// Displayed colour (normalized sRGB) at `now_s`
    pub fn sample(&self, now_s: f32) -> Vec3 {
        if self.duration_s <= 0.0 {
            return self.to;
        }
        let progress = (now_s - self.start_s) / self.duration_s;
        self.from.lerp(self.to, self.easing.ease(progress))
    }

    pub fn is_settled(&self, now_s: f32) -> bool {
        now_s - self.start_s >= self.duration_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgb::parse("#1a2B3c"), Some(Rgb::new(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgb::parse("#fa0"), Some(Rgb::new(255, 170, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "#", "1a2b3c", "#12345", "#gg0000", "red", "#+1+2+3"] {
            assert_eq!(Rgb::parse(text), None, "{text:?}");
        }
    }

    #[test]
    fn test_easing_endpoints() {
        let ease = CubicBezier::STANDARD;
        assert!(ease.ease(0.0).abs() < 1e-4);
        assert!((ease.ease(1.0) - 1.0).abs() < 1e-4);
        assert!(ease.ease(-1.0).abs() < 1e-4);
        assert!((ease.ease(2.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_easing_is_ease_out_heavy() {
        let ease = CubicBezier::STANDARD;
        // The standard curve is well past halfway at the midpoint
        assert!(ease.ease(0.5) > 0.7);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = ease.ease(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_fade_reaches_target() {
        let mut fade = BackgroundFade::new(Rgb::new(0, 0, 0), 1.2);
        fade.retarget(Rgb::new(255, 255, 255), 10.0);

        assert!(fade.sample(10.0).length() < 1e-4);
        assert!(!fade.is_settled(10.5));
        let mid = fade.sample(10.6);
        assert!(mid.x > 0.0 && mid.x < 1.0);
        assert!((fade.sample(11.2) - Vec3::ONE).length() < 1e-4);
        assert!(fade.is_settled(11.3));
    }

    #[test]
    fn test_fade_retarget_starts_from_screen() {
        let mut fade = BackgroundFade::new(Rgb::new(0, 0, 0), 1.0);
        fade.retarget(Rgb::new(255, 0, 0), 0.0);
        let shown = fade.sample(0.5);

        fade.retarget(Rgb::new(0, 0, 255), 0.5);
        assert!((fade.sample(0.5) - shown).length() < 1e-5);
        assert!((fade.sample(1.5) - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut fade = BackgroundFade::new(Rgb::new(0, 0, 0), 1.0);
        fade.retarget(Rgb::new(255, 0, 0), 0.0);
        fade.retarget(Rgb::new(255, 0, 0), 0.9);
        assert!(fade.is_settled(1.0));
    }
}
