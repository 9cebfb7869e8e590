//! Page layout: the keys, sections and navigation the page is built from.
//!
//! A layout is plain TOML. The crate ships one (`page.toml`) which is used
//! unless a replacement file is given on the command line.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::LayoutError;
use crate::page::Rgb;

const DEFAULT_LAYOUT: &str = include_str!("../../page.toml");

/// One piano key on the page
#[derive(Debug, Clone, Deserialize)]
pub struct KeySpec {
    /// Note label printed on the key (single character, e.g. "C")
    pub label: String,

    /// Heading shown in the description region
    pub title: String,

    /// Body text shown in the description region
    pub skills: String,
}

/// One vertically stacked page section
#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    /// Section identifier, navigation targets refer to it as `#id`
    pub id: String,

    /// Page background applied while this section is active (`#rrggbb`)
    #[serde(default)]
    pub bg_color: Option<String>,

    /// Section height (logical pixels)
    #[serde(default = "default_section_height")]
    pub height_px: f32,
}

/// One navigation entry
#[derive(Debug, Clone, Deserialize)]
pub struct NavLinkSpec {
    pub label: String,

    /// Fragment target, `#section-id`
    pub target: String,
}

/// Visibility observer tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ObserverParams {
    /// Fraction of a section that must be visible to count as intersecting
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Viewport shrink applied to top and bottom edges (logical pixels)
    #[serde(default = "default_root_margin")]
    pub root_margin_px: f32,
}

impl Default for ObserverParams {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            root_margin_px: default_root_margin(),
        }
    }
}

/// Complete page description
#[derive(Debug, Clone, Deserialize)]
pub struct PageLayout {
    /// Description text shown when no key is hovered or locked
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Initial page background
    #[serde(default = "default_background")]
    pub background: String,

    /// Section revealed right after load
    #[serde(default)]
    pub hero_section: Option<String>,

    pub keys: Vec<KeySpec>,

    #[serde(default)]
    pub sections: Vec<SectionSpec>,

    #[serde(default)]
    pub nav: Vec<NavLinkSpec>,

    #[serde(default)]
    pub observer: ObserverParams,
}

fn default_section_height() -> f32 {
    720.0
}

fn default_threshold() -> f32 {
    0.1
}

fn default_root_margin() -> f32 {
    50.0
}

fn default_placeholder() -> String {
    "Hover or click a key to see the setlist".to_string()
}

fn default_background() -> String {
    "#0d0d0d".to_string()
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from_toml(DEFAULT_LAYOUT).expect("embedded page.toml is valid")
    }
}

impl PageLayout {
    /// Parse and validate a layout from TOML text
    pub fn from_toml(text: &str) -> Result<Self, LayoutError> {
        let layout: PageLayout = toml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load the layout at `path`, or the embedded one when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, LayoutError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::from_toml(&text)?;
        log::info!(target: "config", "loaded page layout from {}", path.display());
        Ok(layout)
    }

    /// Structural checks. Bad colours are only warned about: a section with
    /// an unreadable colour simply keeps the current background.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.keys.is_empty() {
            return Err(LayoutError::Invalid("layout has no keys".into()));
        }
        if let Some(key) = self.keys.iter().find(|k| k.label.trim().is_empty()) {
            return Err(LayoutError::Invalid(format!(
                "key '{}' has an empty label",
                key.title
            )));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(LayoutError::Invalid(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if !section.height_px.is_finite() || section.height_px <= 0.0 {
                return Err(LayoutError::Invalid(format!(
                    "section '{}' must have a positive height",
                    section.id
                )));
            }
            if let Some(color) = &section.bg_color {
                if Rgb::parse(color).is_none() {
                    log::warn!(target: "config", "section '{}' has unreadable colour '{}'", section.id, color);
                }
            }
        }

        if let Some(link) = self.nav.iter().find(|l| !l.target.starts_with('#')) {
            return Err(LayoutError::Invalid(format!(
                "nav target '{}' must be a #fragment",
                link.target
            )));
        }

        if let Some(hero) = &self.hero_section {
            if !seen.contains(hero.as_str()) {
                return Err(LayoutError::Invalid(format!(
                    "hero section '{}' is not a section",
                    hero
                )));
            }
        }

        if !self.observer.root_margin_px.is_finite() {
            return Err(LayoutError::Invalid(format!(
                "observer root margin {} is not a number of pixels",
                self.observer.root_margin_px
            )));
        }

        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(LayoutError::Invalid(format!(
                "observer threshold {} outside 0..=1",
                self.observer.threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r##"
        [[keys]]
        label = "C"
        title = "Keys"
        skills = "Piano"
    "##;

    #[test]
    fn test_embedded_layout_parses() {
        let layout = PageLayout::default();
        assert_eq!(layout.keys.len(), 7);
        let labels: Vec<&str> = layout.keys.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(labels, ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(layout.placeholder, "Hover or click a key to see the setlist");
        assert!(!layout.sections.is_empty());
    }

    #[test]
    fn test_minimal_layout_defaults() {
        let layout = PageLayout::from_toml(MINIMAL).unwrap();
        assert!(layout.sections.is_empty());
        assert!(layout.nav.is_empty());
        assert!((layout.observer.threshold - 0.1).abs() < 1e-6);
        assert_eq!(layout.background, "#0d0d0d");
    }

    #[test]
    fn test_rejects_empty_keys() {
        let err = PageLayout::from_toml("keys = []").unwrap_err();
        assert!(matches!(err, LayoutError::Invalid(_)));
    }

    #[test]
    fn test_rejects_duplicate_sections() {
        let text = format!(
            "{MINIMAL}\n[[sections]]\nid = \"tour\"\n[[sections]]\nid = \"tour\"\n"
        );
        assert!(matches!(
            PageLayout::from_toml(&text),
            Err(LayoutError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_bare_nav_target() {
        let text = format!(
            "{MINIMAL}\n[[sections]]\nid = \"tour\"\n[[nav]]\nlabel = \"Tour\"\ntarget = \"tour\"\n"
        );
        assert!(matches!(
            PageLayout::from_toml(&text),
            Err(LayoutError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_section_heights() {
        for height in ["0.0", "-20.0", "nan", "inf"] {
            let text = format!("{MINIMAL}\n[[sections]]\nid = \"tour\"\nheight_px = {height}\n");
            assert!(
                matches!(PageLayout::from_toml(&text), Err(LayoutError::Invalid(_))),
                "height {height} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_hero() {
        let text = format!("hero_section = \"nowhere\"\n{MINIMAL}");
        assert!(PageLayout::from_toml(&text).is_err());
    }

    #[test]
    fn test_bad_colour_is_not_fatal() {
        let text = format!("{MINIMAL}\n[[sections]]\nid = \"tour\"\nbg_color = \"teal-ish\"\n");
        assert!(PageLayout::from_toml(&text).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let layout = PageLayout::load(Some(file.path())).unwrap();
        assert_eq!(layout.keys.len(), 1);
        assert_eq!(layout.keys[0].title, "Keys");
    }

    #[test]
    fn test_load_missing_file() {
        let err = PageLayout::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn test_load_without_path_uses_embedded() {
        let layout = PageLayout::load(None).unwrap();
        assert_eq!(layout.keys.len(), 7);
    }
}
