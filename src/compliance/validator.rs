use std::path::Path;

use image::imageops;

use crate::color::palette::BrandPalette;
use crate::color::science::color_similarity;
use crate::compliance::quantize::median_cut;
use crate::config::ComplianceConfig;
use crate::foundation::core::{PixelRect, Rgb, Size};
use crate::foundation::error::CreativeResult;
use crate::raster::image::RasterImage;

const COLOR_POINTS: f64 = 50.0;
const READABILITY_POINTS: f64 = 50.0;

/// A quantized image color and the share of pixels it covers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DominantColorEntry {
    pub color: Rgb,
    /// Percent of thumbnail pixels, rounded to two decimals.
    pub coverage: f64,
}

/// A dominant image color matched to its closest brand color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorMatch {
    pub image_color: Rgb,
    pub brand_color: Rgb,
    /// Similarity percent, rounded to one decimal.
    pub similarity: f64,
    pub coverage: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ColorCheck {
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub compliant: bool,
    pub dominant_colors: Vec<DominantColorEntry>,
    pub brand_matches: Vec<ColorMatch>,
    /// Sum of matched coverage, rounded to one decimal.
    pub brand_color_coverage: f64,
    pub average_similarity: f64,
}

impl ColorCheck {
    fn unchecked(reason: &str) -> Self {
        Self {
            checked: false,
            reason: Some(reason.to_owned()),
            compliant: false,
            dominant_colors: Vec::new(),
            brand_matches: Vec::new(),
            brand_color_coverage: 0.0,
            average_similarity: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextRecommendation {
    #[serde(rename = "White text")]
    WhiteText,
    #[serde(rename = "Dark text")]
    DarkText,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ReadabilityCheck {
    pub checked: bool,
    pub readable: bool,
    /// Mean luma of the text band, rounded to one decimal.
    pub text_area_brightness: f64,
    pub recommendation: TextRecommendation,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ComplianceChecks {
    pub colors: ColorCheck,
    pub readability: ReadabilityCheck,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ComplianceReport {
    pub compliant: bool,
    /// `0..=100`, one decimal.
    pub overall_score: f64,
    pub checks: ComplianceChecks,
    pub summary: String,
}

/// Scores creatives for brand-color presence and text-band readability.
#[derive(Clone, Debug, Default)]
pub struct BrandComplianceValidator {
    palette: BrandPalette,
    config: ComplianceConfig,
}

impl BrandComplianceValidator {
    pub fn new(palette: BrandPalette, config: ComplianceConfig) -> Self {
        Self { palette, config }
    }

    pub fn palette(&self) -> &BrandPalette {
        &self.palette
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Top colors of `image` by coverage, using the configured count.
    pub fn extract_dominant_colors(&self, image: &RasterImage) -> Vec<DominantColorEntry> {
        dominant_colors(
            image,
            self.config.dominant_color_count,
            self.config.thumbnail_edge_px,
            self.config.palette_size,
        )
    }

    pub fn validate_colors(&self, image: &RasterImage) -> ColorCheck {
        if self.palette.is_empty() {
            return ColorCheck::unchecked("No brand colors configured");
        }

        let dominant = self.extract_dominant_colors(image);
        let min_similarity = 100.0 - self.config.color_tolerance;
        let mut matches = Vec::new();
        for entry in &dominant {
            let mut best: Option<(Rgb, f64)> = None;
            for &brand in self.palette.colors() {
                let similarity = color_similarity(entry.color, brand);
                if best.is_none_or(|(_, s)| similarity > s) {
                    best = Some((brand, similarity));
                }
            }
            if let Some((brand_color, similarity)) = best
                && similarity >= min_similarity
            {
                matches.push(ColorMatch {
                    image_color: entry.color,
                    brand_color,
                    similarity: round_to(similarity, 1),
                    coverage: entry.coverage,
                });
            }
        }

        let coverage: f64 = matches.iter().map(|m| m.coverage).sum();
        let average_similarity = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(|m| m.similarity).sum::<f64>() / matches.len() as f64
        };
        let compliant = !matches.is_empty() && coverage >= self.config.coverage_threshold_pct;
        tracing::debug!(matches = matches.len(), coverage, compliant, "color check");

        ColorCheck {
            checked: true,
            reason: None,
            compliant,
            dominant_colors: dominant,
            brand_matches: matches,
            brand_color_coverage: round_to(coverage, 1),
            average_similarity: round_to(average_similarity, 1),
        }
    }

    /// Mean brightness of the bottom band where text usually sits.
    pub fn validate_text_readability(&self, image: &RasterImage) -> CreativeResult<ReadabilityCheck> {
        let band = PixelRect::from_fractions(
            image.size(),
            0.0,
            1.0 - self.config.text_band_fraction,
            1.0,
            1.0,
        );
        let band = image.crop(band)?;

        let raw = band.as_raw();
        let mut sum = 0u64;
        for px in raw.chunks_exact(3) {
            sum += u64::from(luma(px[0], px[1], px[2]));
        }
        let brightness = sum as f64 / (raw.len() / 3).max(1) as f64;

        let [low, high] = self.config.readability_dead_zone;
        let readable = brightness < low || brightness > high;
        Ok(ReadabilityCheck {
            checked: true,
            readable,
            text_area_brightness: round_to(brightness, 1),
            recommendation: if brightness < 128.0 {
                TextRecommendation::WhiteText
            } else {
                TextRecommendation::DarkText
            },
        })
    }

    /// Color and readability checks on one raster.
    pub fn validate_creative(&self, image: &RasterImage) -> CreativeResult<ComplianceReport> {
        self.validate_creative_split(image, image)
    }

    /// Brand colors measured on `pre_overlay`, readability on `final_image`.
    ///
    /// Scrims and text cover part of the photo, so the pre-overlay raster gives the
    /// fairer color reading.
    pub fn validate_creative_split(
        &self,
        pre_overlay: &RasterImage,
        final_image: &RasterImage,
    ) -> CreativeResult<ComplianceReport> {
        let colors = self.validate_colors(pre_overlay);
        let readability = self.validate_text_readability(final_image)?;
        Ok(self.score(colors, readability))
    }

    /// Decode and validate files; `pre_overlay` defaults to `final_path`.
    pub fn validate_files(
        &self,
        final_path: impl AsRef<Path>,
        pre_overlay: Option<&Path>,
    ) -> CreativeResult<ComplianceReport> {
        let final_image = RasterImage::open(final_path)?;
        match pre_overlay {
            Some(p) => self.validate_creative_split(&RasterImage::open(p)?, &final_image),
            None => self.validate_creative(&final_image),
        }
    }

    fn score(&self, colors: ColorCheck, readability: ReadabilityCheck) -> ComplianceReport {
        let mut score = 0.0;
        if colors.checked {
            score += if colors.compliant {
                COLOR_POINTS
            } else {
                (colors.brand_color_coverage * 2.5).min(COLOR_POINTS)
            };
        }
        if readability.readable {
            score += READABILITY_POINTS;
        }
        let max_score = COLOR_POINTS + READABILITY_POINTS;
        let overall_score = round_to(score / max_score * 100.0, 1).clamp(0.0, 100.0);
        let summary = summarize(overall_score, &colors, &readability);

        ComplianceReport {
            compliant: overall_score >= self.config.pass_threshold,
            overall_score,
            checks: ComplianceChecks {
                colors,
                readability,
            },
            summary,
        }
    }
}

/// Top `count` colors of `image` by coverage with default thumbnail and palette sizes.
pub fn extract_dominant_colors(image: &RasterImage, count: usize) -> Vec<DominantColorEntry> {
    let defaults = ComplianceConfig::default();
    dominant_colors(image, count, defaults.thumbnail_edge_px, defaults.palette_size)
}

fn dominant_colors(
    image: &RasterImage,
    count: usize,
    thumbnail_edge: u32,
    palette_size: usize,
) -> Vec<DominantColorEntry> {
    let thumb = thumbnail_size(image.size(), thumbnail_edge);
    let pixels: Vec<[u8; 3]> = if thumb == image.size() {
        image.as_rgb().pixels().map(|p| p.0).collect()
    } else {
        imageops::thumbnail(image.as_rgb(), thumb.width, thumb.height)
            .pixels()
            .map(|p| p.0)
            .collect()
    };
    let total = pixels.len().max(1) as f64;

    let mut entries = median_cut(&pixels, palette_size);
    // Stable: equal counts keep palette order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
        .into_iter()
        .take(count)
        .map(|e| DominantColorEntry {
            color: e.color,
            coverage: round_to(e.count as f64 / total * 100.0, 2),
        })
        .collect()
}

/// Fit within `edge` x `edge`, keeping aspect ratio and never upscaling.
fn thumbnail_size(size: Size, edge: u32) -> Size {
    let long = size.width.max(size.height);
    if long <= edge {
        return size;
    }
    let scale = f64::from(edge) / f64::from(long);
    let fit = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, edge);
    Size::new(fit(size.width), fit(size.height))
}

fn luma(r: u8, g: u8, b: u8) -> u32 {
    (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

fn summarize(score: f64, colors: &ColorCheck, readability: &ReadabilityCheck) -> String {
    if score >= 90.0 {
        return "Excellent brand compliance".to_owned();
    }
    if score >= 70.0 {
        return "Good brand compliance".to_owned();
    }
    if score >= 50.0 {
        return "Acceptable - minor improvements needed".to_owned();
    }
    let mut issues = Vec::new();
    if !colors.compliant {
        issues.push("brand colors");
    }
    if !readability.readable {
        issues.push("text readability");
    }
    format!("Needs improvement: {}", issues.join(", "))
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/validator.rs"]
mod tests;
