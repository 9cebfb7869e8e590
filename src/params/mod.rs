//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (seconds, Hz, pixels, etc.)
//! - Documented ranges and meanings
//! - Type safety where possible

mod audio;
mod page;
mod render;

// Re-export all types
pub use audio::{OutputParams, SynthParams};
pub use page::{KeySpec, NavLinkSpec, ObserverParams, PageLayout, SectionSpec};
pub use render::RenderConfig;
