//! The seven natural notes of the fourth octave.

use std::fmt;

/// Note identifier printed on a piano key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteId {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteId {
    pub const ALL: [NoteId; 7] = [
        NoteId::C,
        NoteId::D,
        NoteId::E,
        NoteId::F,
        NoteId::G,
        NoteId::A,
        NoteId::B,
    ];

    /// Parse a key label. Only the single uppercase letters C..B are notes.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }

    /// Equal-tempered frequency (Hz), A4 = 440
    pub fn frequency_hz(self) -> f32 {
        match self {
            Self::C => 261.63,
            Self::D => 293.66,
            Self::E => 329.63,
            Self::F => 349.23,
            Self::G => 392.00,
            Self::A => 440.00,
            Self::B => 493.88,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}4", self.label())
    }
}
