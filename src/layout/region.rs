//! Scores image regions for how well they can carry overlaid text.

use crate::color::science::relative_luminance;
use crate::foundation::core::{PixelRect, Rgb, Size};
use crate::layout::text::{HorizontalAnchor, TextPosition, VerticalAnchor};
use crate::raster::image::RasterImage;

/// Weight of contrast potential in the region score; uniformity gets the rest.
pub const CONTRAST_WEIGHT: f64 = 0.7;
/// Variance normalizer for the uniformity score.
pub const VARIANCE_SCALE: f64 = 10_000.0;

/// Candidate zone scored during smart placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionZone {
    /// Lower-left 40% x 30%.
    BottomLeft,
    /// Lower-right 40% x 30%.
    BottomRight,
    /// Lower-middle 40% x 30%.
    BottomCenter,
    /// Upper-left 40% x 30%.
    TopLeft,
    /// Upper-right 40% x 30%.
    TopRight,
    /// Central 60% x 20% band.
    Center,
}

impl RegionZone {
    /// Text placement that corresponds to this zone.
    pub fn position(self) -> TextPosition {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        match self {
            Self::BottomLeft => TextPosition::new(V::Bottom, H::Left),
            Self::BottomRight => TextPosition::new(V::Bottom, H::Right),
            Self::BottomCenter => TextPosition::new(V::Bottom, H::Center),
            Self::TopLeft => TextPosition::new(V::Top, H::Left),
            Self::TopRight => TextPosition::new(V::Top, H::Right),
            Self::Center => TextPosition::CENTER,
        }
    }
}

/// Candidate zones as `(zone, [x0, y0, x1, y1])` fractions, in evaluation order.
/// Ties keep the earliest entry.
const CANDIDATES: [(RegionZone, [f64; 4]); 6] = [
    (RegionZone::BottomLeft, [0.0, 0.7, 0.4, 1.0]),
    (RegionZone::BottomRight, [0.6, 0.7, 1.0, 1.0]),
    (RegionZone::BottomCenter, [0.3, 0.7, 0.7, 1.0]),
    (RegionZone::TopLeft, [0.0, 0.0, 0.4, 0.3]),
    (RegionZone::TopRight, [0.6, 0.0, 1.0, 0.3]),
    (RegionZone::Center, [0.2, 0.4, 0.8, 0.6]),
];

/// Color statistics of the region chosen to carry text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RegionAnalysis {
    /// Mean color, channels truncated to integers.
    pub average_color: Rgb,
    /// Relative luminance of `average_color`.
    pub luminance: f64,
    /// `luminance > 0.5`.
    pub is_light: bool,
    /// Placement the region corresponds to.
    pub position: TextPosition,
}

impl RegionAnalysis {
    fn from_stats(stats: &RegionStats, position: TextPosition) -> Self {
        let luminance = relative_luminance(stats.average_color);
        Self {
            average_color: stats.average_color,
            luminance,
            is_light: luminance > 0.5,
            position,
        }
    }
}

/// One scored candidate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RegionScore {
    /// Zone that was scored.
    pub zone: RegionZone,
    /// `|L - 0.5| * 2`.
    pub contrast_potential: f64,
    /// `1 / (1 + variance / 10000)`.
    pub uniformity: f64,
    /// Weighted total.
    pub score: f64,
}

#[derive(Clone, Copy, Debug)]
struct RegionStats {
    average_color: Rgb,
    total_variance: f64,
}

/// Mean color and mean per-channel variance of `rect`.
fn region_stats(image: &RasterImage, rect: PixelRect) -> RegionStats {
    let width = image.width() as usize;
    let raw = image.as_raw();
    let n = f64::from(rect.width()) * f64::from(rect.height());

    let mut sum = [0f64; 3];
    let mut sum_sq = [0f64; 3];
    for y in rect.y0..rect.y1 {
        let row_start = ((y as usize) * width + rect.x0 as usize) * 3;
        let row_end = ((y as usize) * width + rect.x1 as usize) * 3;
        for px in raw[row_start..row_end].chunks_exact(3) {
            for c in 0..3 {
                let v = f64::from(px[c]);
                sum[c] += v;
                sum_sq[c] += v * v;
            }
        }
    }

    let mean = sum.map(|s| s / n);
    let mut variance = 0.0;
    for c in 0..3 {
        variance += (sum_sq[c] / n - mean[c] * mean[c]).max(0.0);
    }

    RegionStats {
        average_color: Rgb::new(mean[0] as u8, mean[1] as u8, mean[2] as u8),
        total_variance: variance / 3.0,
    }
}

fn score_stats(zone: RegionZone, stats: &RegionStats) -> RegionScore {
    let luminance = relative_luminance(stats.average_color);
    let contrast_potential = (luminance - 0.5).abs() * 2.0;
    let uniformity = 1.0 / (1.0 + stats.total_variance / VARIANCE_SCALE);
    RegionScore {
        zone,
        contrast_potential,
        uniformity,
        score: CONTRAST_WEIGHT * contrast_potential + (1.0 - CONTRAST_WEIGHT) * uniformity,
    }
}

/// Scores every candidate zone in evaluation order.
pub fn score_regions(image: &RasterImage) -> Vec<RegionScore> {
    let size = image.size();
    CANDIDATES
        .iter()
        .map(|(zone, f)| {
            let rect = PixelRect::from_fractions(size, f[0], f[1], f[2], f[3]);
            score_stats(*zone, &region_stats(image, rect))
        })
        .collect()
}

/// Best zone for text; the first zone wins ties.
pub fn find_best_text_region(image: &RasterImage) -> (RegionZone, RegionAnalysis) {
    let size = image.size();
    let scored = CANDIDATES.map(|(zone, f)| {
        let rect = PixelRect::from_fractions(size, f[0], f[1], f[2], f[3]);
        let stats = region_stats(image, rect);
        (zone, stats, score_stats(zone, &stats).score)
    });

    let mut best = scored[0];
    for candidate in &scored[1..] {
        if candidate.2 > best.2 {
            best = *candidate;
        }
    }

    let (zone, stats, score) = best;
    tracing::debug!(zone = ?zone, score, color = %stats.average_color, "picked text region");
    (zone, RegionAnalysis::from_stats(&stats, zone.position()))
}

/// Band extracted for an explicit placement hint.
fn hinted_rect(size: Size, position: TextPosition) -> PixelRect {
    match position.vertical {
        VerticalAnchor::Bottom => PixelRect::from_fractions(size, 0.0, 0.7, 1.0, 1.0),
        VerticalAnchor::Top => PixelRect::from_fractions(size, 0.0, 0.0, 1.0, 0.3),
        VerticalAnchor::Center => PixelRect::from_fractions(size, 0.2, 0.4, 0.8, 0.6),
    }
}

/// Analyze the region text will sit on.
///
/// With a hint the scoring pass is skipped: `top` reads the top 30% band, `bottom` the
/// bottom 30%, anything else the central band. The hinted horizontal anchor is kept;
/// `top`/`bottom` hints without one resolve to the centered placement.
pub fn analyze_text_region(image: &RasterImage, hint: Option<TextPosition>) -> RegionAnalysis {
    match hint {
        Some(position) => {
            let stats = region_stats(image, hinted_rect(image.size(), position));
            let position = match position.vertical {
                VerticalAnchor::Center => TextPosition::CENTER,
                _ => position,
            };
            RegionAnalysis::from_stats(&stats, position)
        }
        None => find_best_text_region(image).1,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/region.rs"]
mod tests;
