use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgb;
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::layout::text::{TextExtent, TextMeasure};
use crate::raster::composite::composite_premul_in_place;
use crate::raster::image::RasterImage;

/// A pre-resolved font: measures and draws text.
///
/// Faces are shared across parallel variant renders, so they must be `Send + Sync`.
pub trait GlyphFace: TextMeasure + Send + Sync {
    /// Draw `text` (may contain newlines) with its top-left at `origin`.
    fn draw(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        origin: (i64, i64),
        size_px: f32,
        color: Rgb,
    ) -> CreativeResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Glyph face backed by raw TrueType/OpenType bytes.
///
/// Shaping goes through `parley`; drawing rasterizes glyph runs with `vello_cpu`.
/// Shaping contexts are created per call so one face can serve several threads.
#[derive(Clone)]
pub struct ParleyFace {
    /// Shared font bytes; clones bump a refcount.
    blob: parley::fontique::Blob<u8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for ParleyFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyFace")
            .field("family_name", &self.family_name)
            .field("bytes", &self.blob.len())
            .finish()
    }
}

impl ParleyFace {
    /// Load from font bytes. Fails when no font family can be registered from them.
    pub fn from_bytes(bytes: Vec<u8>) -> CreativeResult<Self> {
        if bytes.is_empty() {
            return Err(CreativeError::font("font data is empty"));
        }
        let blob = parley::fontique::Blob::from(bytes);
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &blob)?;
        let font = vello_cpu::peniko::FontData::new(blob.clone(), 0);
        Ok(Self {
            blob,
            family_name,
            font,
        })
    }

    /// Read a font file and load it.
    pub fn from_path(path: impl AsRef<Path>) -> CreativeResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Family name registered from the font bytes.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(
        &self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CreativeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CreativeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &self.blob)?;
        let mut layout_ctx: parley::LayoutContext<TextBrushRgba8> = parley::LayoutContext::new();

        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    blob: &parley::fontique::Blob<u8>,
) -> CreativeResult<String> {
    let families = font_ctx.collection.register_fonts(blob.clone(), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CreativeError::font("no font families registered from font bytes"))?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_owned)
        .ok_or_else(|| CreativeError::font("registered font family has no name"))
}

impl TextMeasure for ParleyFace {
    fn measure(&self, text: &str, size_px: f32) -> CreativeResult<TextExtent> {
        let layout = self.layout(text, size_px, TextBrushRgba8::default())?;
        Ok(TextExtent {
            width: layout.width(),
            height: layout.height(),
        })
    }
}

impl GlyphFace for ParleyFace {
    fn draw(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        origin: (i64, i64),
        size_px: f32,
        color: Rgb,
    ) -> CreativeResult<()> {
        let size = canvas.size();
        let w: u16 = size
            .width
            .try_into()
            .map_err(|_| CreativeError::validation("canvas width exceeds u16"))?;
        let h: u16 = size
            .height
            .try_into()
            .map_err(|_| CreativeError::validation("canvas height exceeds u16"))?;

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };
        let layout = self.layout(text, size_px, brush)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.0 as f64,
            origin.1 as f64,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry the run offset and line baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        composite_premul_in_place(canvas, pixmap.data_as_u8_slice())
    }
}

/// Writing system family used to pick a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin and other scripts covered by the default face.
    Latin,
    /// Arabic, Farsi, Urdu.
    Arabic,
    /// Hebrew.
    Hebrew,
    /// Chinese, Japanese, Korean.
    Cjk,
}

impl Script {
    /// Script for a BCP-47-ish language tag such as `ar`, `zh-Hans` or `ja_JP`.
    pub fn from_language_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::Latin;
        };
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ar" | "fa" | "ur" => Self::Arabic,
            "he" | "iw" => Self::Hebrew,
            "zh" | "ja" | "ko" => Self::Cjk,
            _ => Self::Latin,
        }
    }
}

/// Faces keyed by script with a mandatory default.
#[derive(Clone)]
pub struct FontSet {
    default: Arc<dyn GlyphFace>,
    by_script: HashMap<Script, Arc<dyn GlyphFace>>,
}

impl FontSet {
    /// Set whose every lookup resolves to `default` until overridden.
    pub fn new(default: Arc<dyn GlyphFace>) -> Self {
        Self {
            default,
            by_script: HashMap::new(),
        }
    }

    /// Register a face for `script`.
    pub fn with_face(mut self, script: Script, face: Arc<dyn GlyphFace>) -> Self {
        self.by_script.insert(script, face);
        self
    }

    /// Face for `script`, falling back to the default face.
    pub fn face_for(&self, script: Script) -> &Arc<dyn GlyphFace> {
        self.by_script.get(&script).unwrap_or(&self.default)
    }

    /// Face for a language tag.
    pub fn face_for_language(&self, tag: Option<&str>) -> &Arc<dyn GlyphFace> {
        self.face_for(Script::from_language_tag(tag))
    }

    /// `true` when `script` has its own face.
    pub fn has_dedicated_face(&self, script: Script) -> bool {
        self.by_script.contains_key(&script)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/font.rs"]
mod tests;
