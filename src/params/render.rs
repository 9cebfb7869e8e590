//! Window and background rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Background colour transition length (seconds)
    pub background_fade_s: f32,

    /// Page scroll per mouse-wheel line or arrow key press (logical pixels)
    pub scroll_step_px: f32,

    /// Smooth scroll to a nav target (seconds)
    pub nav_glide_s: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            background_fade_s: 1.2,
            scroll_step_px: 60.0,
            nav_glide_s: 0.8,
        }
    }
}
