//! adcraft turns one product photo into brand-compliant, accessible social creatives.
//!
//! The pipeline for each output format:
//!
//! - Center-crop and resize the source ([`raster::crop`])
//! - Score regions and pick WCAG-compliant brand text colors ([`layout::region`], [`ColorAnalyzer`])
//! - Wrap and fit the message with a pre-resolved [`GlyphFace`]
//! - Composite a directional scrim and draw the text ([`GradientRenderer`])
//! - Optionally score the result for brand compliance ([`BrandComplianceValidator`])
#![forbid(unsafe_code)]

mod foundation;

pub mod color;
pub mod compliance;
pub mod compose;
pub mod config;
pub mod layout;
pub mod raster;
pub mod render;

pub use crate::foundation::core::{PixelRect, Rgb, Size};
pub use crate::foundation::error::{CreativeError, CreativeResult};

pub use crate::color::analyzer::{ColorAnalyzer, ColorSelection};
pub use crate::color::palette::BrandPalette;
pub use crate::color::science::{
    color_distance, color_name, color_similarity, contrast_ratio, hex_to_color_name, hex_to_rgb,
    relative_luminance, rgb_to_hex, rgb_to_hsl,
};
pub use crate::compliance::validator::{
    BrandComplianceValidator, ColorCheck, ComplianceReport, DominantColorEntry, ReadabilityCheck,
    extract_dominant_colors,
};
pub use crate::compose::composer::{
    CompositionReport, CreativeComposer, RenderedVariant, TextOverlayOutcome, VariantReport,
};
pub use crate::config::{ComplianceConfig, ComposerConfig};
pub use crate::layout::font::{FontSet, GlyphFace, ParleyFace, Script};
pub use crate::layout::region::{RegionAnalysis, RegionZone, analyze_text_region, find_best_text_region};
pub use crate::layout::text::{TextExtent, TextMeasure, TextPosition, position_text, wrap_text};
pub use crate::raster::composite::{Overlay, composite_overlay};
pub use crate::raster::crop::{AspectRatioSpec, resize_to, smart_crop};
pub use crate::raster::image::RasterImage;
pub use crate::render::gradient::{Edge, GradientRenderer, GradientSpec, VignetteSpec};
