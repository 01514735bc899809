use crate::foundation::core::{Rgb, Size};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::raster::composite::Overlay;

/// Shape of the directional scrim behind text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientSpec {
    /// Alpha at the anchor edge.
    pub max_alpha: u8,
    /// Exponent of the `(1 - d)` fade curve.
    pub fade_exponent: f64,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            max_alpha: 150,
            fade_exponent: 2.0,
        }
    }
}

impl GradientSpec {
    pub fn validate(&self) -> CreativeResult<()> {
        if !self.fade_exponent.is_finite() || self.fade_exponent <= 0.0 {
            return Err(CreativeError::validation(format!(
                "gradient fade_exponent must be finite and > 0, got {}",
                self.fade_exponent
            )));
        }
        Ok(())
    }
}

/// Optional radial darkening applied before the directional scrim.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VignetteSpec {
    pub color: Rgb,
    /// Clamped to `[0, 1]` when rendered.
    pub strength: f64,
}

impl Default for VignetteSpec {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            strength: 0.7,
        }
    }
}

/// Image edge a directional gradient emanates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Edge nearest to the center of a text block. Ties resolve top, bottom, left, right.
    pub fn nearest(image: Size, text_origin: (i64, i64), text_size: (u32, u32)) -> Self {
        let cx = text_origin.0 + i64::from(text_size.0 / 2);
        let cy = text_origin.1 + i64::from(text_size.1 / 2);
        let w = i64::from(image.width);
        let h = i64::from(image.height);

        let mut best = (Self::Top, cy);
        for candidate in [(Self::Bottom, h - cy), (Self::Left, cx), (Self::Right, w - cx)] {
            if candidate.1 < best.1 {
                best = candidate;
            }
        }
        best.0
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Normalized distance of row/column `i` (out of `extent`) from this edge.
    fn distance(self, i: u32, extent: u32) -> f64 {
        let extent = f64::from(extent);
        let i = f64::from(i);
        let d = match self {
            Self::Top | Self::Left => i / extent,
            Self::Bottom | Self::Right => (extent - i) / extent,
        };
        d.clamp(0.0, 1.0)
    }
}

/// Builds scrim overlays that keep text legible over photographs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientRenderer {
    spec: GradientSpec,
}

impl GradientRenderer {
    pub fn new(spec: GradientSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> GradientSpec {
        self.spec
    }

    /// Alpha for a normalized edge distance `d`.
    pub fn alpha_at(&self, d: f64) -> u8 {
        let fade = (1.0 - d.clamp(0.0, 1.0)).powf(self.spec.fade_exponent);
        (fade * f64::from(self.spec.max_alpha)).round().clamp(0.0, 255.0) as u8
    }

    /// Scrim that is strongest at the image edge nearest the text and fades across the image.
    ///
    /// Alpha varies along one axis only, so it is computed once per row (or column).
    pub fn create_directional_gradient(
        &self,
        image_size: Size,
        text_origin: (i64, i64),
        text_size: (u32, u32),
        scrim: Rgb,
    ) -> CreativeResult<Overlay> {
        let size = image_size.validate()?;
        let edge = Edge::nearest(size, text_origin, text_size);
        let w = size.width as usize;

        let mut mask = vec![0u8; size.area()];
        if edge.is_horizontal() {
            for (y, row) in mask.chunks_exact_mut(w).enumerate() {
                row.fill(self.alpha_at(edge.distance(y as u32, size.height)));
            }
        } else {
            let columns: Vec<u8> = (0..size.width)
                .map(|x| self.alpha_at(edge.distance(x, size.width)))
                .collect();
            for row in mask.chunks_exact_mut(w) {
                row.copy_from_slice(&columns);
            }
        }

        tracing::debug!(?edge, max_alpha = self.spec.max_alpha, "directional gradient");
        Overlay::from_alpha_mask(size, scrim, &mask)
    }

    /// Radial vignette: clear at the center, `strength` of full opacity at the corners.
    pub fn create_vignette(size: Size, color: Rgb, strength: f64) -> CreativeResult<Overlay> {
        let size = size.validate()?;
        let strength = if strength.is_finite() {
            strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cx = f64::from(size.width) / 2.0;
        let cy = f64::from(size.height) / 2.0;
        let max_sq = cx * cx + cy * cy;

        let dx_sq: Vec<f64> = (0..size.width)
            .map(|x| {
                let dx = f64::from(x) - cx;
                dx * dx
            })
            .collect();

        let mut mask = vec![0u8; size.area()];
        for (y, row) in mask.chunks_exact_mut(size.width as usize).enumerate() {
            let dy = y as f64 - cy;
            let dy_sq = dy * dy;
            for (a, &dx2) in row.iter_mut().zip(&dx_sq) {
                // d^2 with d = dist / max_dist
                let d_sq = (dx2 + dy_sq) / max_sq;
                *a = (d_sq * strength * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        }
        Overlay::from_alpha_mask(size, color, &mask)
    }

    pub fn vignette(size: Size, spec: VignetteSpec) -> CreativeResult<Overlay> {
        Self::create_vignette(size, spec.color, spec.strength)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
