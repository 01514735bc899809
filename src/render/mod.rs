//! Scrim overlays drawn behind text.

pub mod gradient;
