//! Tunable thresholds for composition and compliance scoring.
//!
//! Both structs deserialize from partial JSON; missing fields take their defaults.

use std::path::Path;

use crate::color::analyzer::{OUTLINE_MIN_CONTRAST, WCAG_AAA};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::layout::text::DEFAULT_PADDING_PX;
use crate::raster::image::JPEG_QUALITY;
use crate::render::gradient::{GradientSpec, VignetteSpec};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub min_contrast_ratio: f64,
    pub outline_min_contrast: f64,
    pub padding_px: u32,
    pub min_font_px: f32,
    pub max_font_px: f32,
    /// Base font size is `image_width / font_scale_divisor`.
    pub font_scale_divisor: f32,
    pub shrink_factor: f32,
    pub max_fit_attempts: u32,
    pub jpeg_quality: u8,
    /// Render aspect-ratio variants on a rayon pool.
    pub parallel: bool,
    /// Worker threads for the variant pool. `None` uses rayon defaults.
    pub threads: Option<usize>,
    pub gradient: GradientSpec,
    pub vignette: Option<VignetteSpec>,
    /// When set, every variant gets a compliance report.
    pub compliance: Option<ComplianceConfig>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            min_contrast_ratio: WCAG_AAA,
            outline_min_contrast: OUTLINE_MIN_CONTRAST,
            padding_px: DEFAULT_PADDING_PX,
            min_font_px: 24.0,
            max_font_px: 72.0,
            font_scale_divisor: 15.0,
            shrink_factor: 0.85,
            max_fit_attempts: 3,
            jpeg_quality: JPEG_QUALITY,
            parallel: true,
            threads: None,
            gradient: GradientSpec::default(),
            vignette: None,
            compliance: None,
        }
    }
}

impl ComposerConfig {
    pub fn from_json_str(s: &str) -> CreativeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CreativeResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> CreativeResult<()> {
        if !(self.min_contrast_ratio >= 1.0 && self.min_contrast_ratio <= 21.0) {
            return Err(CreativeError::validation(
                "min_contrast_ratio must be within [1, 21]",
            ));
        }
        if !(self.outline_min_contrast >= 1.0 && self.outline_min_contrast <= 21.0) {
            return Err(CreativeError::validation(
                "outline_min_contrast must be within [1, 21]",
            ));
        }
        if !(self.min_font_px > 0.0 && self.min_font_px <= self.max_font_px) {
            return Err(CreativeError::validation(
                "font sizes must satisfy 0 < min_font_px <= max_font_px",
            ));
        }
        if !(self.font_scale_divisor > 0.0) {
            return Err(CreativeError::validation("font_scale_divisor must be > 0"));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(CreativeError::validation(
                "shrink_factor must be within (0, 1)",
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(CreativeError::validation(
                "jpeg_quality must be within [1, 100]",
            ));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(CreativeError::validation("threads must be >= 1 when set"));
        }
        self.gradient.validate()?;
        if let Some(c) = &self.compliance {
            c.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Similarity slack in percent; a match needs `similarity >= 100 - tolerance`.
    pub color_tolerance: f64,
    pub dominant_color_count: usize,
    /// Brand coverage (percent) needed for the color check to pass.
    pub coverage_threshold_pct: f64,
    /// Overall score needed for the creative to pass.
    pub pass_threshold: f64,
    /// Text-band brightness range `[low, high]` considered unreadable.
    pub readability_dead_zone: [f64; 2],
    pub thumbnail_edge_px: u32,
    pub palette_size: usize,
    /// Bottom fraction of the image inspected for readability.
    pub text_band_fraction: f64,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            color_tolerance: 25.0,
            dominant_color_count: 5,
            coverage_threshold_pct: 20.0,
            pass_threshold: 70.0,
            readability_dead_zone: [130.0, 145.0],
            thumbnail_edge_px: 150,
            palette_size: 32,
            text_band_fraction: 0.3,
        }
    }
}

impl ComplianceConfig {
    pub fn from_json_str(s: &str) -> CreativeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CreativeResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> CreativeResult<()> {
        if !(0.0..=100.0).contains(&self.color_tolerance) {
            return Err(CreativeError::validation(
                "color_tolerance must be within [0, 100]",
            ));
        }
        if self.dominant_color_count == 0 || self.palette_size == 0 {
            return Err(CreativeError::validation(
                "dominant_color_count and palette_size must be > 0",
            ));
        }
        if self.thumbnail_edge_px == 0 {
            return Err(CreativeError::validation("thumbnail_edge_px must be > 0"));
        }
        let [low, high] = self.readability_dead_zone;
        if !(low <= high) {
            return Err(CreativeError::validation(format!(
                "readability_dead_zone must be ordered, got [{low}, {high}]"
            )));
        }
        if !(self.text_band_fraction > 0.0 && self.text_band_fraction <= 1.0) {
            return Err(CreativeError::validation(
                "text_band_fraction must be within (0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
