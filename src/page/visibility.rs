//! Scroll-driven visibility observer for vertically stacked sections.

use super::sections::SectionId;
use crate::params::{ObserverParams, PageLayout};

/// One visibility report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub section: SectionId,
    pub is_intersecting: bool,
    /// Visible fraction of the section (0..1)
    pub ratio: f32,
}

/// Reports sections crossing the visibility threshold as the page scrolls.
///
/// The first update reports every section; later updates only report the
/// sections whose intersecting state changed, in page order.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    tops: Vec<f32>,
    heights: Vec<f32>,
    params: ObserverParams,
    last: Vec<Option<bool>>,
}

impl VisibilityObserver {
    pub fn new(heights: Vec<f32>, params: ObserverParams) -> Self {
        let tops = heights
            .iter()
            .scan(0.0f32, |top, &h| {
                let this = *top;
                *top += h;
                Some(this)
            })
            .collect();
        let last = vec![None; heights.len()];
        Self {
            tops,
            heights,
            params,
            last,
        }
    }

    pub fn from_layout(layout: &PageLayout) -> Self {
        let heights = layout.sections.iter().map(|s| s.height_px).collect();
        Self::new(heights, layout.observer.clone())
    }

    /// Total scrollable height (logical pixels)
    pub fn page_height(&self) -> f32 {
        self.heights.iter().sum()
    }

    /// Page offset of a section's top edge (logical pixels)
    pub fn section_top(&self, id: SectionId) -> Option<f32> {
        self.tops.get(id.0).copied()
    }

    pub fn section_height(&self, id: SectionId) -> Option<f32> {
        self.heights.get(id.0).copied()
    }

    /// Visible fraction of section `index` for the given viewport
    pub fn ratio(&self, index: usize, scroll_y: f32, viewport_h: f32) -> f32 {
        let (Some(&top), Some(&height)) = (self.tops.get(index), self.heights.get(index)) else {
            return 0.0;
        };
        if height <= 0.0 {
            return 0.0;
        }

        let view_top = scroll_y + self.params.root_margin_px;
        let view_bottom = scroll_y + viewport_h - self.params.root_margin_px;
        let overlap = view_bottom.min(top + height) - view_top.max(top);
        (overlap / height).clamp(0.0, 1.0)
    }

    /// Recompute visibility for a scroll position and return the changes
    pub fn update(&mut self, scroll_y: f32, viewport_h: f32) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();

        for index in 0..self.heights.len() {
            let ratio = self.ratio(index, scroll_y, viewport_h);
            let is_intersecting = ratio > 0.0 && ratio >= self.params.threshold;

            if self.last[index] != Some(is_intersecting) {
                self.last[index] = Some(is_intersecting);
                entries.push(VisibilityEntry {
                    section: SectionId(index),
                    is_intersecting,
                    ratio,
                });
            }
        }

        entries
    }
}
