use crate::color::palette::BrandPalette;
use crate::color::science::{contrast_ratio, relative_luminance};
use crate::foundation::core::Rgb;
use crate::layout::region::RegionAnalysis;

/// WCAG AAA contrast for normal text.
pub const WCAG_AAA: f64 = 7.0;
/// WCAG AA contrast for normal text.
pub const WCAG_AA: f64 = 4.5;
/// Minimum contrast between text and its outline/scrim color.
pub const OUTLINE_MIN_CONTRAST: f64 = 3.0;

/// Text color plus the outline/scrim color drawn behind it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorSelection {
    /// Fill color for glyphs.
    pub text_color: Rgb,
    /// Outline and gradient scrim color.
    pub outline_color: Rgb,
    /// Measured contrast between `text_color` and the region background.
    pub contrast_ratio: f64,
    /// `true` when the text color came from the brand palette.
    pub from_palette: bool,
}

/// Picks brand-compliant, accessible text colors for a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorAnalyzer {
    min_contrast_ratio: f64,
    outline_min_contrast: f64,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new(WCAG_AAA)
    }
}

impl ColorAnalyzer {
    /// Analyzer requiring `min_contrast_ratio` between text and background.
    pub fn new(min_contrast_ratio: f64) -> Self {
        Self {
            min_contrast_ratio,
            outline_min_contrast: OUTLINE_MIN_CONTRAST,
        }
    }

    /// Override the text/outline contrast floor.
    pub fn with_outline_min_contrast(mut self, ratio: f64) -> Self {
        self.outline_min_contrast = ratio;
        self
    }

    /// Required text/background contrast.
    pub fn min_contrast_ratio(&self) -> f64 {
        self.min_contrast_ratio
    }

    /// Select text and outline colors for `region`.
    ///
    /// Light regions get dark text from the palette and dark regions get light text. The
    /// highest-contrast candidate meeting the minimum wins. Without one, the result is
    /// black on white for light regions and white on black for dark regions; the
    /// reported contrast is always the one actually achieved.
    pub fn select_text_colors(&self, region: &RegionAnalysis, palette: &BrandPalette) -> ColorSelection {
        let background = region.average_color;
        let (light, dark) = palette.partition_by_luminance();

        let (text_candidates, outline_candidates, fallback_text, fallback_outline) =
            if region.is_light {
                (dark, light, Rgb::BLACK, Rgb::WHITE)
            } else {
                (light, dark, Rgb::WHITE, Rgb::BLACK)
            };
        let from_palette = !text_candidates.is_empty();
        let text_candidates = non_empty_or(text_candidates, fallback_text);
        let outline_candidates = non_empty_or(outline_candidates, fallback_outline);

        let mut best: Option<(Rgb, f64)> = None;
        for &candidate in &text_candidates {
            let ratio = contrast_ratio(candidate, background);
            let beats_best = best.is_none_or(|(_, r)| ratio > r);
            if ratio >= self.min_contrast_ratio && beats_best {
                best = Some((candidate, ratio));
            }
        }

        match best {
            Some((text_color, ratio)) => {
                let outline_color = outline_candidates
                    .iter()
                    .copied()
                    .find(|&o| contrast_ratio(text_color, o) >= self.outline_min_contrast)
                    .unwrap_or_else(|| opposite_of(text_color));
                tracing::debug!(
                    text = %text_color,
                    outline = %outline_color,
                    ratio,
                    "selected text colors"
                );
                ColorSelection {
                    text_color,
                    outline_color,
                    contrast_ratio: ratio,
                    from_palette,
                }
            }
            None => {
                let (text_color, outline_color) = (fallback_text, fallback_outline);
                let ratio = contrast_ratio(text_color, background);
                tracing::debug!(
                    background = %background,
                    ratio,
                    min = self.min_contrast_ratio,
                    "no palette color meets the contrast floor, using black/white"
                );
                ColorSelection {
                    text_color,
                    outline_color,
                    contrast_ratio: ratio,
                    from_palette: false,
                }
            }
        }
    }

    /// Black for light backgrounds, white for dark ones.
    pub fn recommended_text_color(background: Rgb) -> Rgb {
        if relative_luminance(background) > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

fn non_empty_or(colors: Vec<Rgb>, fallback: Rgb) -> Vec<Rgb> {
    if colors.is_empty() {
        vec![fallback]
    } else {
        colors
    }
}

fn opposite_of(color: Rgb) -> Rgb {
    if relative_luminance(color) <= 0.5 {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/analyzer.rs"]
mod tests;
