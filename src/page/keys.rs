//! Piano key interaction: hover preview, click-to-lock and note playback.

use super::display::DisplayRegion;
use crate::audio::{AudioSession, NoteSynthesizer, SessionFactory};
use crate::error::AudioError;
use crate::params::{KeySpec, PageLayout, SynthParams};

/// Index of a key in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId(pub usize);

/// One piano key element
#[derive(Debug, Clone)]
pub struct Key {
    /// Note label printed on the key
    pub label: String,
    pub title: String,
    pub skills: String,
    locked: bool,
}

impl Key {
    pub fn from_spec(spec: &KeySpec) -> Self {
        Self {
            label: spec.label.clone(),
            title: spec.title.clone(),
            skills: spec.skills.clone(),
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Lazily created synthesizer
enum SynthSlot<S: AudioSession> {
    Unopened,
    Ready(NoteSynthesizer<S>),
    /// Session creation failed once; the piano stays silent from then on
    Halted,
}

/// Tracks which key is locked, drives the description region and owns the
/// note synthesizer (created on the first click).
pub struct KeyInteractionController<F: SessionFactory> {
    keys: Vec<Key>,
    locked_key: Option<KeyId>,
    display: Option<DisplayRegion>,
    placeholder: String,
    factory: F,
    synth_params: SynthParams,
    synth: SynthSlot<F::Session>,
}

impl<F: SessionFactory> KeyInteractionController<F> {
    /// `display` is `None` when the page has no description region
    pub fn new(
        keys: Vec<Key>,
        placeholder: impl Into<String>,
        display: Option<DisplayRegion>,
        factory: F,
        synth_params: SynthParams,
    ) -> Self {
        let placeholder = placeholder.into();
        let display = display.map(|mut region| {
            region.reset(&placeholder);
            region
        });

        Self {
            keys,
            locked_key: None,
            display,
            placeholder,
            factory,
            synth_params,
            synth: SynthSlot::Unopened,
        }
    }

    pub fn from_layout(layout: &PageLayout, factory: F, synth_params: SynthParams) -> Self {
        let keys = layout.keys.iter().map(Key::from_spec).collect();
        Self::new(
            keys,
            layout.placeholder.clone(),
            Some(DisplayRegion::default()),
            factory,
            synth_params,
        )
    }

    /// Preview a key's text. Lock state is untouched.
    pub fn on_hover(&mut self, id: KeyId) {
        if let Some(key) = self.keys.get(id.0) {
            if let Some(display) = self.display.as_mut() {
                display.show(&key.title, &key.skills);
            }
        }
    }

    /// Pointer left a key: fall back to the locked key, else the placeholder
    pub fn on_unhover(&mut self, _id: KeyId) {
        self.show_resting();
    }

    /// Play the key's note and lock it. Re-clicking the locked key only plays
    /// the note again.
    ///
    /// The first click creates the synthesizer. If the host refuses an audio
    /// session the error is returned, nothing is locked, and every later click
    /// fails with [`AudioError::EngineHalted`].
    pub fn on_click(&mut self, id: KeyId) -> Result<(), AudioError> {
        let Some(label) = self.keys.get(id.0).map(|k| k.label.clone()) else {
            return Ok(());
        };

        self.synthesizer_mut()?.play(&label);

        if self.keys[id.0].locked {
            return Ok(());
        }

        if let Some(previous) = self.locked_key.take() {
            self.keys[previous.0].locked = false;
        }
        self.keys[id.0].locked = true;
        self.locked_key = Some(id);
        log::debug!(target: "page", "locked key {}", label);

        self.show_resting();
        Ok(())
    }

    /// Suspend the note session if one is open
    pub fn suspend_audio(&mut self) {
        if let SynthSlot::Ready(synth) = &mut self.synth {
            if let Err(e) = synth.session_mut().suspend() {
                log::warn!(target: "audio", "could not suspend audio session: {}", e);
            }
        }
    }

    fn synthesizer_mut(&mut self) -> Result<&mut NoteSynthesizer<F::Session>, AudioError> {
        if matches!(self.synth, SynthSlot::Unopened) {
            let params = self.synth_params.clone();
            match self
                .factory
                .open()
                .and_then(|session| NoteSynthesizer::new(session, params))
            {
                Ok(synth) => {
                    log::info!(target: "audio", "note engine initialised");
                    self.synth = SynthSlot::Ready(synth);
                }
                Err(e) => {
                    self.synth = SynthSlot::Halted;
                    let err = if matches!(e, AudioError::SessionInit(_)) {
                        e
                    } else {
                        AudioError::SessionInit(e.to_string())
                    };
                    log::error!(target: "audio", "{}", err);
                    return Err(err);
                }
            }
        }

        match &mut self.synth {
            SynthSlot::Ready(synth) => Ok(synth),
            _ => Err(AudioError::EngineHalted),
        }
    }

    fn show_resting(&mut self) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        match self.locked_key.and_then(|id| self.keys.get(id.0)) {
            Some(key) => display.show(&key.title, &key.skills),
            None => display.reset(&self.placeholder),
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.0)
    }

    pub fn locked_key(&self) -> Option<KeyId> {
        self.locked_key
    }

    pub fn display(&self) -> Option<&DisplayRegion> {
        self.display.as_ref()
    }

    /// The synthesizer, once the first click has created it
    pub fn synthesizer(&self) -> Option<&NoteSynthesizer<F::Session>> {
        match &self.synth {
            SynthSlot::Ready(synth) => Some(synth),
            _ => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.synth, SynthSlot::Halted)
    }
}
