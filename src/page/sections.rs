//! Section activity: which page region is in view, the navigation highlight
//! and the page background that follows it.

use super::color::Rgb;
use crate::params::PageLayout;

/// Index of a section in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub usize);

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub bg_color: Option<Rgb>,
    active: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, bg_color: Option<Rgb>) -> Self {
        Self {
            id: id.into(),
            bg_color,
            active: false,
        }
    }

    /// Set once the section has been seen; never cleared
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    /// `#section-id`
    pub target: String,
    active: bool,
}

impl NavLink {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Last-event-wins register of the active section.
///
/// Overlapping sections can both report intersecting; whichever event
/// arrives last owns the nav highlight and the background.
#[derive(Debug, Clone)]
pub struct SectionActivityTracker {
    sections: Vec<Section>,
    nav: Vec<NavLink>,
    active_section: Option<SectionId>,
    background: Option<Rgb>,
}

impl SectionActivityTracker {
    pub fn new(sections: Vec<Section>, nav: Vec<NavLink>, background: Option<Rgb>) -> Self {
        Self {
            sections,
            nav,
            active_section: None,
            background,
        }
    }

    pub fn from_layout(layout: &PageLayout) -> Self {
        let sections = layout
            .sections
            .iter()
            .map(|s| Section::new(s.id.clone(), s.bg_color.as_deref().and_then(Rgb::parse)))
            .collect();
        let nav = layout
            .nav
            .iter()
            .map(|l| NavLink::new(l.label.clone(), l.target.clone()))
            .collect();
        Self::new(sections, nav, Rgb::parse(&layout.background))
    }

    /// Visibility callback. Only intersecting entries do anything.
    pub fn on_visibility_change(&mut self, id: SectionId, is_intersecting: bool) {
        if !is_intersecting {
            return;
        }
        let Some(section) = self.sections.get_mut(id.0) else {
            return;
        };

        section.active = true;
        if let Some(color) = section.bg_color {
            self.background = Some(color);
        }
        self.active_section = Some(id);

        let target = format!("#{}", section.id);
        for link in &mut self.nav {
            link.active = link.target == target;
        }

        log::debug!(target: "page", "section '{}' active", section.id);
    }

    /// Mark a section active without touching navigation or background
    pub fn reveal(&mut self, id: SectionId) {
        if let Some(section) = self.sections.get_mut(id.0) {
            section.active = true;
        }
    }

    pub fn find(&self, id: &str) -> Option<SectionId> {
        self.sections.iter().position(|s| s.id == id).map(SectionId)
    }

    /// Section a nav link points at, resolving its `#id` target
    pub fn nav_section(&self, index: usize) -> Option<SectionId> {
        let link = self.nav.get(index)?;
        self.find(link.target.strip_prefix('#')?)
    }

    /// Nav link after the highlighted one, wrapping around. The first link
    /// when nothing is highlighted yet.
    pub fn next_nav(&self) -> Option<usize> {
        if self.nav.is_empty() {
            return None;
        }
        Some(match self.nav.iter().position(|l| l.active) {
            Some(index) => (index + 1) % self.nav.len(),
            None => 0,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.nav
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.active_section
    }

    pub fn active_nav(&self) -> Option<&NavLink> {
        self.nav.iter().find(|l| l.active)
    }

    /// Current page background
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn tracker() -> SectionActivityTracker {
        SectionActivityTracker::new(
            vec![
                Section::new("hero", Some(BLACK)),
                Section::new("about", Some(RED)),
                Section::new("tour", Some(BLUE)),
                Section::new("contact", None),
            ],
            vec![
                NavLink::new("About", "#about"),
                NavLink::new("Tour", "#tour"),
                NavLink::new("Contact", "#contact"),
            ],
            Some(BLACK),
        )
    }

    #[test]
    fn test_intersecting_section_becomes_active() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(1), true);

        assert_eq!(t.active_section(), Some(SectionId(1)));
        assert!(t.section(SectionId(1)).unwrap().is_active());
        assert_eq!(t.background(), Some(RED));
        assert_eq!(t.active_nav().unwrap().target, "#about");
    }

    #[test]
    fn test_non_intersecting_ignored() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(2), false);
        assert_eq!(t.active_section(), None);
        assert!(!t.section(SectionId(2)).unwrap().is_active());
        assert_eq!(t.background(), Some(BLACK));
    }

    #[test]
    fn test_last_event_wins() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(2), true);
        t.on_visibility_change(SectionId(1), true);

        assert_eq!(t.active_section(), Some(SectionId(1)));
        assert_eq!(t.background(), Some(RED));
        // Both sections keep their active flag
        assert!(t.section(SectionId(1)).unwrap().is_active());
        assert!(t.section(SectionId(2)).unwrap().is_active());
    }

    #[test]
    fn test_nav_highlight_is_exclusive() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(1), true);
        t.on_visibility_change(SectionId(2), true);
        let active: Vec<&str> = t
            .nav_links()
            .iter()
            .filter(|l| l.is_active())
            .map(|l| l.target.as_str())
            .collect();
        assert_eq!(active, ["#tour"]);
    }

    #[test]
    fn test_section_without_nav_clears_highlight() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(1), true);
        t.on_visibility_change(SectionId(0), true);
        assert!(t.active_nav().is_none());
    }

    #[test]
    fn test_missing_colour_keeps_background() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(2), true);
        t.on_visibility_change(SectionId(3), true);
        assert_eq!(t.background(), Some(BLUE));
        assert_eq!(t.active_nav().unwrap().target, "#contact");
    }

    #[test]
    fn test_reveal_only_marks_section() {
        let mut t = tracker();
        t.reveal(SectionId(0));
        assert!(t.section(SectionId(0)).unwrap().is_active());
        assert_eq!(t.active_section(), None);
        assert!(t.active_nav().is_none());
    }

    #[test]
    fn test_unknown_section_ignored() {
        let mut t = tracker();
        t.on_visibility_change(SectionId(42), true);
        t.reveal(SectionId(42));
        assert_eq!(t.active_section(), None);
    }

    #[test]
    fn test_nav_targets_resolve_to_sections() {
        let t = tracker();
        assert_eq!(t.nav_section(0), Some(SectionId(1)));
        assert_eq!(t.nav_section(1), Some(SectionId(2)));
        assert_eq!(t.nav_section(2), Some(SectionId(3)));
        assert_eq!(t.nav_section(3), None);
    }

    #[test]
    fn test_dangling_nav_target_resolves_to_nothing() {
        let t = SectionActivityTracker::new(
            vec![Section::new("hero", None)],
            vec![NavLink::new("Gone", "#gone"), NavLink::new("Bare", "hero")],
            None,
        );
        assert_eq!(t.nav_section(0), None);
        assert_eq!(t.nav_section(1), None);
    }

    #[test]
    fn test_next_nav_cycles_from_highlight() {
        let mut t = tracker();
        assert_eq!(t.next_nav(), Some(0));
        t.on_visibility_change(SectionId(2), true);
        assert_eq!(t.next_nav(), Some(2));
        t.on_visibility_change(SectionId(3), true);
        assert_eq!(t.next_nav(), Some(0));

        let empty = SectionActivityTracker::new(vec![], vec![], None);
        assert_eq!(empty.next_nav(), None);
    }

    #[test]
    fn test_from_layout() {
        let t = SectionActivityTracker::from_layout(&PageLayout::default());
        assert_eq!(t.find("hero"), Some(SectionId(0)));
        assert!(t.find("nowhere").is_none());
        assert_eq!(t.background(), Rgb::parse("#0d0d0d"));
        assert!(t.section(t.find("contact").unwrap()).unwrap().bg_color.is_none());
    }
}
