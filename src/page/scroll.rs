//! Virtual page scroll: wheel steps, eased jumps to sections and the
//! visibility reports they produce.

use super::color::CubicBezier;
use super::sections::SectionId;
use super::visibility::{VisibilityEntry, VisibilityObserver};
use crate::params::PageLayout;

#[derive(Debug, Clone, Copy)]
struct Glide {
    from_y: f32,
    to_y: f32,
    start_s: f32,
}

/// Scroll position over a stack of sections
#[derive(Debug, Clone)]
pub struct ScrollView {
    observer: VisibilityObserver,
    viewport_h: f32,
    scroll_y: f32,
    glide: Option<Glide>,
    glide_s: f32,
    easing: CubicBezier,
}

impl ScrollView {
    /// `glide_s` is the length of a smooth jump to a section (seconds)
    pub fn new(observer: VisibilityObserver, viewport_h: f32, glide_s: f32) -> Self {
        Self {
            observer,
            viewport_h: viewport_h.max(0.0),
            scroll_y: 0.0,
            glide: None,
            glide_s,
            easing: CubicBezier::STANDARD,
        }
    }

    pub fn from_layout(layout: &PageLayout, viewport_h: f32, glide_s: f32) -> Self {
        Self::new(VisibilityObserver::from_layout(layout), viewport_h, glide_s)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport_h(&self) -> f32 {
        self.viewport_h
    }

    /// Furthest scroll position that still fills the viewport
    pub fn max_scroll(&self) -> f32 {
        (self.observer.page_height() - self.viewport_h).max(0.0)
    }

    pub fn set_viewport(&mut self, viewport_h: f32) -> Vec<VisibilityEntry> {
        self.viewport_h = viewport_h.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        let max_scroll = self.max_scroll();
        if let Some(glide) = self.glide.as_mut() {
            glide.to_y = glide.to_y.min(max_scroll);
        }
        self.observe()
    }

    /// Immediate scroll (wheel, arrow keys). Cancels a running glide.
    pub fn scroll_by(&mut self, delta_px: f32) -> Vec<VisibilityEntry> {
        self.glide = None;
        self.scroll_y = (self.scroll_y + delta_px).clamp(0.0, self.max_scroll());
        self.observe()
    }

    /// Start a smooth scroll that brings the top of `section` to the top of
    /// the viewport, or as close as the page allows. Returns `false` for an
    /// unknown section.
    pub fn glide_to(&mut self, section: SectionId, now_s: f32) -> bool {
        let Some(top) = self.observer.section_top(section) else {
            return false;
        };
        self.glide = Some(Glide {
            from_y: self.scroll_y,
            to_y: top.clamp(0.0, self.max_scroll()),
            start_s: now_s,
        });
        true
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Advance a running glide to `now_s` and report visibility changes
    pub fn tick(&mut self, now_s: f32) -> Vec<VisibilityEntry> {
        let Some(glide) = self.glide else {
            return Vec::new();
        };

        let progress = if self.glide_s <= 0.0 {
            1.0
        } else {
            (now_s - glide.start_s) / self.glide_s
        };

        if progress >= 1.0 {
            self.scroll_y = glide.to_y;
            self.glide = None;
        } else {
            let eased = self.easing.ease(progress);
            self.scroll_y = glide.from_y + (glide.to_y - glide.from_y) * eased;
        }

        self.observe()
    }

    /// Report visibility for the current position (changes only after the
    /// first call)
    pub fn observe(&mut self) -> Vec<VisibilityEntry> {
        self.observer.update(self.scroll_y, self.viewport_h)
    }

    /// Hero fades out as it scrolls away: fully opaque at its top, clear once
    /// scrolled past its height
    pub fn hero_opacity(&self, hero: SectionId) -> f32 {
        let (Some(top), Some(height)) = (
            self.observer.section_top(hero),
            self.observer.section_height(hero),
        ) else {
            return 1.0;
        };
        if height <= 0.0 {
            return 1.0;
        }
        let scrolled = (self.scroll_y - top).max(0.0);
        (1.0 - scrolled / height).clamp(0.0, 1.0)
    }
}
