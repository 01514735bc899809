use crate::foundation::core::{PixelRect, Size};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::raster::image::RasterImage;

/// Ratios closer than this are treated as already matching.
const RATIO_EPSILON: f64 = 0.01;

/// One social-media output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AspectRatioSpec {
    /// File-name label, e.g. `"9x16"`.
    pub label: &'static str,
    /// Nominal ratio as `(w, h)`.
    pub ratio: (u32, u32),
    /// Target pixel dimensions.
    pub dimensions: Size,
}

impl AspectRatioSpec {
    /// Square feed post.
    pub const SQUARE: Self = Self {
        label: "1x1",
        ratio: (1, 1),
        dimensions: Size::new(1080, 1080),
    };
    /// Stories / reels.
    pub const PORTRAIT: Self = Self {
        label: "9x16",
        ratio: (9, 16),
        dimensions: Size::new(1080, 1920),
    };
    /// Landscape video cover.
    pub const LANDSCAPE: Self = Self {
        label: "16x9",
        ratio: (16, 9),
        dimensions: Size::new(1920, 1080),
    };

    /// Every required variant, in output order.
    pub const fn all() -> [Self; 3] {
        [Self::SQUARE, Self::PORTRAIT, Self::LANDSCAPE]
    }

    /// Look a variant up by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.label == label)
    }

    /// Ratio as `w / h`.
    pub fn ratio_value(self) -> f64 {
        f64::from(self.ratio.0) / f64::from(self.ratio.1)
    }

    /// Final artifact file name.
    pub fn final_file_name(self) -> String {
        format!("{}.jpg", self.label)
    }

    /// Hidden pre-overlay artifact file name.
    pub fn pre_overlay_file_name(self) -> String {
        format!(".{}_pre_overlay.jpg", self.label)
    }
}

/// Centered crop rectangle bringing `size` to `ratio` (`w / h`).
///
/// Equal margins are removed from both sides of the shrunk axis; an odd leftover pixel
/// goes to the right/bottom margin.
pub fn center_crop_rect(size: Size, ratio: f64) -> CreativeResult<PixelRect> {
    let size = size.validate()?;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(CreativeError::validation(format!(
            "target ratio must be finite and > 0, got {ratio}"
        )));
    }

    let (w, h) = (size.width, size.height);
    let current = f64::from(w) / f64::from(h);
    if (current - ratio).abs() < RATIO_EPSILON {
        return Ok(PixelRect { x0: 0, y0: 0, x1: w, y1: h });
    }

    if current > ratio {
        let new_w = ((f64::from(h) * ratio) as u32).clamp(1, w);
        let left = (w - new_w) / 2;
        Ok(PixelRect { x0: left, y0: 0, x1: left + new_w, y1: h })
    } else {
        let new_h = ((f64::from(w) / ratio) as u32).clamp(1, h);
        let top = (h - new_h) / 2;
        Ok(PixelRect { x0: 0, y0: top, x1: w, y1: top + new_h })
    }
}

/// Center-crop `image` to the `(w, h)` ratio.
pub fn smart_crop(image: &RasterImage, ratio: (u32, u32)) -> CreativeResult<RasterImage> {
    if ratio.0 == 0 || ratio.1 == 0 {
        return Err(CreativeError::validation(format!(
            "aspect ratio terms must be non-zero, got {}:{}",
            ratio.0, ratio.1
        )));
    }
    let rect = center_crop_rect(image.size(), f64::from(ratio.0) / f64::from(ratio.1))?;
    image.crop(rect)
}

/// Resample to exact dimensions with Lanczos3.
pub fn resize_to(image: &RasterImage, dimensions: Size) -> CreativeResult<RasterImage> {
    let dimensions = dimensions.validate()?;
    if image.size() == dimensions {
        return Ok(image.clone());
    }
    Ok(RasterImage::from_rgb(image::imageops::resize(
        image.as_rgb(),
        dimensions.width,
        dimensions.height,
        image::imageops::FilterType::Lanczos3,
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/crop.rs"]
mod tests;
