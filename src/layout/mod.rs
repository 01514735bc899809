//! Text placement: region scoring, wrapping and glyph faces.

/// Glyph faces and script-keyed font sets.
pub mod font;
/// Region scoring for smart text placement.
pub mod region;
/// Measurement-driven wrapping and anchoring.
pub mod text;
