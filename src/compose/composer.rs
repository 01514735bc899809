use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::color::analyzer::ColorAnalyzer;
use crate::color::palette::BrandPalette;
use crate::compliance::validator::{BrandComplianceValidator, ComplianceReport};
use crate::config::ComposerConfig;
use crate::foundation::core::Rgb;
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::layout::font::{FontSet, GlyphFace};
use crate::layout::region::analyze_text_region;
use crate::layout::text::{TextExtent, TextPosition, position_text, wrap_text};
use crate::raster::composite::composite_overlay;
use crate::raster::crop::{AspectRatioSpec, resize_to, smart_crop};
use crate::raster::image::RasterImage;
use crate::render::gradient::{Edge, GradientRenderer};

/// Contrast of white on black, reported when no palette drives the colors.
const MAX_CONTRAST: f64 = 21.0;

/// What `add_text_overlay` decided and drew.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextOverlayOutcome {
    pub position: TextPosition,
    pub text_color: Rgb,
    /// Gradient scrim color (the selected outline color).
    pub scrim_color: Rgb,
    pub contrast_ratio: f64,
    pub from_palette: bool,
    pub font_size_px: f32,
    pub wrapped_text: String,
    /// Top-left of the text block; negative when the block overflows the image.
    pub origin: (i64, i64),
    pub block_size: (u32, u32),
    pub gradient_edge: Edge,
    /// Shrink steps taken while fitting.
    pub fit_attempts: u32,
    /// The block still exceeds the safe area after every shrink attempt.
    pub overflow: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedVariant {
    pub label: String,
    pub final_path: PathBuf,
    pub pre_overlay_path: PathBuf,
    pub overlay: TextOverlayOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceReport>,
}

/// Result of one aspect-ratio render. A failure never aborts sibling variants.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VariantReport {
    Rendered(RenderedVariant),
    Failed { label: String, error: String },
}

impl VariantReport {
    pub fn label(&self) -> &str {
        match self {
            Self::Rendered(v) => &v.label,
            Self::Failed { label, .. } => label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub output_dir: PathBuf,
    pub variants: Vec<VariantReport>,
}

impl CompositionReport {
    pub fn rendered(&self) -> impl Iterator<Item = &RenderedVariant> {
        self.variants.iter().filter_map(|v| match v {
            VariantReport::Rendered(r) => Some(r),
            VariantReport::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> usize {
        self.variants
            .iter()
            .filter(|v| matches!(v, VariantReport::Failed { .. }))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.failures() == 0
    }
}

/// Turns one product photo into text-overlaid creatives for every output format.
#[derive(Clone, Debug)]
pub struct CreativeComposer {
    config: ComposerConfig,
    analyzer: ColorAnalyzer,
    gradient: GradientRenderer,
    position_hint: Option<TextPosition>,
    formats: Vec<AspectRatioSpec>,
}

impl Default for CreativeComposer {
    fn default() -> Self {
        Self::from_valid_config(ComposerConfig::default())
    }
}

impl CreativeComposer {
    pub fn new(config: ComposerConfig) -> CreativeResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ComposerConfig) -> Self {
        let analyzer = ColorAnalyzer::new(config.min_contrast_ratio)
            .with_outline_min_contrast(config.outline_min_contrast);
        let gradient = GradientRenderer::new(config.gradient);
        Self {
            config,
            analyzer,
            gradient,
            position_hint: None,
            formats: AspectRatioSpec::all().to_vec(),
        }
    }

    /// Place text at `hint` in every variant instead of scoring regions.
    pub fn with_position_hint(mut self, hint: Option<TextPosition>) -> Self {
        self.position_hint = hint;
        self
    }

    /// Replace the output formats rendered by `create_variations`.
    pub fn with_formats(mut self, formats: Vec<AspectRatioSpec>) -> Self {
        self.formats = formats;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn formats(&self) -> &[AspectRatioSpec] {
        &self.formats
    }

    /// Base font size for an image `width` pixels wide.
    pub fn base_font_size(&self, width: u32) -> f32 {
        (width as f32 / self.config.font_scale_divisor)
            .floor()
            .clamp(self.config.min_font_px, self.config.max_font_px)
    }

    /// Draw `message` over `image` with a legibility scrim.
    ///
    /// With a palette, colors come from region analysis and the placement is scored
    /// unless `position_hint` is given. Without one the text is white on a black scrim.
    /// Text that still does not fit after shrinking is drawn anyway and flagged.
    pub fn add_text_overlay(
        &self,
        image: &RasterImage,
        message: &str,
        position_hint: Option<TextPosition>,
        palette: &BrandPalette,
        face: &dyn GlyphFace,
    ) -> CreativeResult<(RasterImage, TextOverlayOutcome)> {
        let size = image.size().validate()?;

        let (position, text_color, scrim_color, contrast_ratio, from_palette) =
            if palette.is_empty() {
                (
                    position_hint.unwrap_or_default(),
                    Rgb::WHITE,
                    Rgb::BLACK,
                    MAX_CONTRAST,
                    false,
                )
            } else {
                let region = analyze_text_region(image, position_hint);
                let sel = self.analyzer.select_text_colors(&region, palette);
                (
                    region.position,
                    sel.text_color,
                    sel.outline_color,
                    sel.contrast_ratio,
                    sel.from_palette,
                )
            };

        let padding = self.config.padding_px;
        let max_width = size.width.saturating_sub(2 * padding) as f32;
        let max_height = size.height.saturating_sub(4 * padding) as f32;
        let exceeds = |e: TextExtent| e.width > max_width || e.height > max_height;

        let mut font_size = self.base_font_size(size.width);
        let mut wrapped = wrap_text(message, face, font_size, max_width)?;
        let mut extent = face.measure(&wrapped, font_size)?;
        let mut fit_attempts = 0;
        while exceeds(extent) && fit_attempts < self.config.max_fit_attempts {
            font_size = (font_size * self.config.shrink_factor).floor().max(1.0);
            wrapped = wrap_text(message, face, font_size, max_width)?;
            extent = face.measure(&wrapped, font_size)?;
            fit_attempts += 1;
        }
        let overflow = exceeds(extent);
        if overflow {
            tracing::warn!(
                font_size,
                width = extent.width,
                height = extent.height,
                max_width,
                max_height,
                "text still overflows the safe area after shrinking"
            );
        }

        let block_size = extent.ceil_px();
        let origin = position_text(block_size, size, position, padding);
        let gradient_edge = Edge::nearest(size, origin, block_size);

        let scrim = self
            .gradient
            .create_directional_gradient(size, origin, block_size, scrim_color)?;
        let layer = match self.config.vignette {
            Some(spec) => {
                let mut layer = GradientRenderer::vignette(size, spec)?;
                layer.stack(&scrim)?;
                layer
            }
            None => scrim,
        };
        let mut out = composite_overlay(image, &layer)?;
        if !wrapped.is_empty() {
            face.draw(&mut out, &wrapped, origin, font_size, text_color)?;
        }

        if from_palette {
            tracing::debug!(contrast_ratio, position = %position, "text overlay contrast");
        }

        Ok((
            out,
            TextOverlayOutcome {
                position,
                text_color,
                scrim_color,
                contrast_ratio,
                from_palette,
                font_size_px: font_size,
                wrapped_text: wrapped,
                origin,
                block_size,
                gradient_edge,
                fit_attempts,
                overflow,
            },
        ))
    }

    /// Render every configured format into `out_dir`.
    ///
    /// Each format gets `.<label>_pre_overlay.jpg` and `<label>.jpg`. Only a failure to
    /// create `out_dir` is an error; per-format failures are reported in the result.
    #[tracing::instrument(skip_all, fields(out_dir = %out_dir.as_ref().display()))]
    pub fn create_variations(
        &self,
        source: &RasterImage,
        message: &str,
        out_dir: impl AsRef<Path>,
        palette: &BrandPalette,
        face: &dyn GlyphFace,
    ) -> CreativeResult<CompositionReport> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir)?;

        let render = |format: &AspectRatioSpec| -> VariantReport {
            match self.render_variant(source, *format, message, out_dir, palette, face) {
                Ok(v) => VariantReport::Rendered(v),
                Err(e) => {
                    tracing::warn!(label = format.label, error = %e, "variant failed");
                    VariantReport::Failed {
                        label: format.label.to_owned(),
                        error: e.to_string(),
                    }
                }
            }
        };

        let variants = if self.config.parallel && self.formats.len() > 1 {
            let pool = build_thread_pool(self.config.threads)?;
            pool.install(|| self.formats.par_iter().map(render).collect())
        } else {
            self.formats.iter().map(render).collect()
        };

        Ok(CompositionReport {
            language: None,
            output_dir: out_dir.to_path_buf(),
            variants,
        })
    }

    /// Decode `image_path` and render every format. Undecodable input is an error.
    pub fn process_from_path(
        &self,
        image_path: impl AsRef<Path>,
        message: &str,
        out_dir: impl AsRef<Path>,
        palette: &BrandPalette,
        face: &dyn GlyphFace,
    ) -> CreativeResult<CompositionReport> {
        let source = RasterImage::open(image_path)?;
        self.create_variations(&source, message, out_dir, palette, face)
    }

    /// One `create_variations` run per `(language, message)` into `out_dir/<language>`.
    ///
    /// The face for each language is picked from `fonts` by script.
    #[tracing::instrument(skip_all, fields(languages = messages.len()))]
    pub fn create_localized_variations(
        &self,
        source: &RasterImage,
        messages: &[(String, String)],
        out_dir: impl AsRef<Path>,
        palette: &BrandPalette,
        fonts: &FontSet,
    ) -> CreativeResult<Vec<CompositionReport>> {
        let out_dir = out_dir.as_ref();
        for (language, _) in messages {
            validate_language_dir(language)?;
        }

        let mut reports = Vec::with_capacity(messages.len());
        for (language, message) in messages {
            let _span = tracing::info_span!("language", %language).entered();
            let face = fonts.face_for_language(Some(language.as_str()));
            let mut report = self.create_variations(
                source,
                message,
                out_dir.join(language),
                palette,
                face.as_ref(),
            )?;
            report.language = Some(language.clone());
            reports.push(report);
        }
        Ok(reports)
    }

    fn render_variant(
        &self,
        source: &RasterImage,
        format: AspectRatioSpec,
        message: &str,
        out_dir: &Path,
        palette: &BrandPalette,
        face: &dyn GlyphFace,
    ) -> CreativeResult<RenderedVariant> {
        let cropped = smart_crop(source, format.ratio)?;
        let resized = resize_to(&cropped, format.dimensions)?;

        let pre_overlay_path = out_dir.join(format.pre_overlay_file_name());
        resized.save_jpeg(&pre_overlay_path, self.config.jpeg_quality)?;

        let (final_image, overlay) =
            self.add_text_overlay(&resized, message, self.position_hint, palette, face)?;
        let final_path = out_dir.join(format.final_file_name());
        final_image.save_jpeg(&final_path, self.config.jpeg_quality)?;

        // Scored from the written JPEGs.
        let compliance = match &self.config.compliance {
            Some(cfg) => Some(
                BrandComplianceValidator::new(palette.clone(), cfg.clone())
                    .validate_files(&final_path, Some(pre_overlay_path.as_path()))?,
            ),
            None => None,
        };

        tracing::info!(
            label = format.label,
            path = %final_path.display(),
            contrast = overlay.contrast_ratio,
            "saved variant"
        );
        Ok(RenderedVariant {
            label: format.label.to_owned(),
            final_path,
            pre_overlay_path,
            overlay,
            compliance,
        })
    }
}

fn validate_language_dir(language: &str) -> CreativeResult<()> {
    let ok = !language.is_empty()
        && language != "."
        && language != ".."
        && !language.contains(['/', '\\']);
    if ok {
        Ok(())
    } else {
        Err(CreativeError::validation(format!(
            "language tag '{language}' cannot be used as a directory name"
        )))
    }
}

fn build_thread_pool(threads: Option<usize>) -> CreativeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CreativeError::validation(
            "variant 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
