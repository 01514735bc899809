use crate::foundation::core::{Rgb, Size};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::raster::image::{RasterImage, mul_div255};

/// Straight-alpha RGBA8 layer the size of a target image.
///
/// Pixels with alpha 0 are fully transparent and leave the target untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    size: Size,
    rgba: Vec<u8>,
}

impl Overlay {
    /// Fully transparent layer.
    pub fn transparent(size: Size) -> CreativeResult<Self> {
        let size = size.validate()?;
        Ok(Self {
            size,
            rgba: vec![0; size.area() * 4],
        })
    }

    /// Layer where every pixel is `color` with its own alpha from `alpha`.
    pub(crate) fn from_alpha_mask(size: Size, color: Rgb, alpha: &[u8]) -> CreativeResult<Self> {
        let size = size.validate()?;
        if alpha.len() != size.area() {
            return Err(CreativeError::validation(format!(
                "alpha mask has {} entries for {}x{}",
                alpha.len(),
                size.width,
                size.height
            )));
        }
        let mut rgba = vec![0u8; size.area() * 4];
        for (px, &a) in rgba.chunks_exact_mut(4).zip(alpha) {
            if a > 0 {
                px.copy_from_slice(&[color.r, color.g, color.b, a]);
            }
        }
        Ok(Self { size, rgba })
    }

    /// Layer dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Straight-alpha RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    /// Alpha at `(x, y)`.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y)[3]
    }

    /// Row-major straight RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.rgba
    }

    /// Source-over of `other` onto this layer (both straight alpha).
    pub fn stack(&mut self, other: &Overlay) -> CreativeResult<()> {
        ensure_same_size(self.size, other.size)?;
        for (d, s) in self.rgba.chunks_exact_mut(4).zip(other.rgba.chunks_exact(4)) {
            let out = over_straight(
                [d[0], d[1], d[2], d[3]],
                [s[0], s[1], s[2], s[3]],
            );
            d.copy_from_slice(&out);
        }
        Ok(())
    }
}

/// Source-over of a straight-alpha layer onto an opaque image, returning a new image.
pub fn composite_overlay(image: &RasterImage, overlay: &Overlay) -> CreativeResult<RasterImage> {
    ensure_same_size(image.size(), overlay.size)?;
    let mut out = image.clone();
    for (d, s) in out
        .as_raw_mut()
        .chunks_exact_mut(3)
        .zip(overlay.rgba.chunks_exact(4))
    {
        let a = u16::from(s[3]);
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        for i in 0..3 {
            d[i] = mul_div255(u16::from(s[i]), a).saturating_add(mul_div255(u16::from(d[i]), inv));
        }
    }
    Ok(out)
}

/// Source-over of premultiplied RGBA8 bytes onto an opaque image in place.
pub(crate) fn composite_premul_in_place(
    image: &mut RasterImage,
    premul_rgba: &[u8],
) -> CreativeResult<()> {
    if premul_rgba.len() != image.size().area() * 4 {
        return Err(CreativeError::validation(
            "premultiplied layer must match the image size",
        ));
    }
    for (d, s) in image
        .as_raw_mut()
        .chunks_exact_mut(3)
        .zip(premul_rgba.chunks_exact(4))
    {
        let a = u16::from(s[3]);
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        for i in 0..3 {
            d[i] = s[i].saturating_add(mul_div255(u16::from(d[i]), inv));
        }
    }
    Ok(())
}

fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let da = u32::from(dst[3]);
    // out_a = sa + da * (1 - sa), all in /255 fixed point.
    let da_eff = (da * (255 - sa) + 127) / 255;
    let out_a = sa + da_eff;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (u32::from(src[i]) * sa + u32::from(dst[i]) * da_eff + out_a / 2) / out_a;
        out[i] = c.min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

fn ensure_same_size(a: Size, b: Size) -> CreativeResult<()> {
    if a != b {
        return Err(CreativeError::validation(format!(
            "layer size {}x{} does not match {}x{}",
            b.width, b.height, a.width, a.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
