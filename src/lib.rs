//! Setlist library - interactive piano landing page with synthesized notes

pub mod audio;
pub mod cli;
pub mod error;
pub mod page;
pub mod params;
pub mod rendering;
