//! Pointer position mapped onto key bands across the window width.

use super::keys::KeyId;

/// Last known pointer position over the keyboard
#[derive(Debug, Clone)]
pub struct PointerTracker {
    cursor_x: Option<f64>,
    width_px: f64,
    key_count: usize,
}

impl PointerTracker {
    pub fn new(key_count: usize, width_px: f64) -> Self {
        Self {
            cursor_x: None,
            width_px,
            key_count,
        }
    }

    pub fn set_width(&mut self, width_px: f64) {
        self.width_px = width_px;
    }

    /// Record a pointer move and return the key now under it
    pub fn moved(&mut self, x_px: f64) -> Option<KeyId> {
        self.cursor_x = Some(x_px);
        self.key_under()
    }

    /// Pointer left the window
    pub fn left(&mut self) {
        self.cursor_x = None;
    }

    /// Key under the last known pointer position
    pub fn key_under(&self) -> Option<KeyId> {
        let x = self.cursor_x?;
        if self.width_px <= 0.0 || self.key_count == 0 || x < 0.0 {
            return None;
        }
        let index = (x / self.width_px * self.key_count as f64) as usize;
        (index < self.key_count).then_some(KeyId(index))
    }
}
