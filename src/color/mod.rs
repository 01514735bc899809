//! Color science, brand palettes and accessible text-color selection.

/// WCAG text-color selection against analyzed regions.
pub mod analyzer;
/// Parsed brand palettes.
pub mod palette;
/// sRGB luminance, contrast, distance and naming.
pub mod science;
