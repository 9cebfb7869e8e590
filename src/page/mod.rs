//! Interactive page state: piano keys, section activity, the background
//! player and the coordinator that owns them.

mod color;
mod coordinator;
mod display;
mod keys;
mod player;
mod pointer;
mod scroll;
mod sections;
mod visibility;

// Re-export public types
pub use color::{BackgroundFade, CubicBezier, Rgb};
pub use coordinator::{PageCoordinator, PageEvent};
pub use display::DisplayRegion;
pub use keys::{Key, KeyId, KeyInteractionController};
pub use player::{BackgroundPlayerToggle, MediaPlayer};
pub use pointer::PointerTracker;
pub use scroll::ScrollView;
pub use sections::{NavLink, Section, SectionActivityTracker, SectionId};
pub use visibility::{VisibilityEntry, VisibilityObserver};
