//! Page coordinator: owns all interactive page state and routes events to it.

use super::keys::{KeyId, KeyInteractionController};
use super::player::{BackgroundPlayerToggle, MediaPlayer};
use super::sections::{SectionActivityTracker, SectionId};
use crate::audio::SessionFactory;
use crate::error::AudioError;
use crate::params::{PageLayout, SynthParams};

/// Input delivered by the host, handled strictly in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Page finished loading
    Loaded,
    KeyHover(KeyId),
    KeyUnhover(KeyId),
    KeyClick(KeyId),
    Visibility {
        section: SectionId,
        is_intersecting: bool,
    },
    /// Click on the vinyl player icon
    PlayerClick,
    /// Window went to the background
    FocusLost,
}

/// Single owner of the piano, section and player state
pub struct PageCoordinator<F: SessionFactory, P: MediaPlayer> {
    keys: KeyInteractionController<F>,
    sections: SectionActivityTracker,
    player: BackgroundPlayerToggle<P>,
    hero: Option<SectionId>,
}

impl<F: SessionFactory, P: MediaPlayer> PageCoordinator<F, P> {
    pub fn new(layout: &PageLayout, factory: F, synth_params: SynthParams, player: P) -> Self {
        let sections = SectionActivityTracker::from_layout(layout);
        let hero = layout
            .hero_section
            .as_deref()
            .and_then(|id| sections.find(id));

        Self {
            keys: KeyInteractionController::from_layout(layout, factory, synth_params),
            sections,
            player: BackgroundPlayerToggle::new(player),
            hero,
        }
    }

    /// Route one event. Only a fatal audio failure on a key click is
    /// returned; every other problem is logged and absorbed.
    pub fn handle(&mut self, event: PageEvent) -> Result<(), AudioError> {
        match event {
            PageEvent::Loaded => {
                if let Some(hero) = self.hero {
                    self.sections.reveal(hero);
                }
            }
            PageEvent::KeyHover(id) => self.keys.on_hover(id),
            PageEvent::KeyUnhover(id) => self.keys.on_unhover(id),
            PageEvent::KeyClick(id) => self.keys.on_click(id)?,
            PageEvent::Visibility {
                section,
                is_intersecting,
            } => self.sections.on_visibility_change(section, is_intersecting),
            PageEvent::PlayerClick => self.player.toggle(),
            PageEvent::FocusLost => self.keys.suspend_audio(),
        }
        Ok(())
    }

    pub fn keys(&self) -> &KeyInteractionController<F> {
        &self.keys
    }

    pub fn sections(&self) -> &SectionActivityTracker {
        &self.sections
    }

    pub fn player(&self) -> &BackgroundPlayerToggle<P> {
        &self.player
    }

    /// Section revealed on load, if the layout names one
    pub fn hero(&self) -> Option<SectionId> {
        self.hero
    }
}
