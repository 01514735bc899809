use std::io::{BufWriter, Cursor};
use std::path::Path;

use anyhow::Context as _;
use image::{DynamicImage, ImageReader, RgbImage};

use crate::foundation::core::{PixelRect, Rgb, Size};
use crate::foundation::error::{CreativeError, CreativeResult};

/// JPEG quality used for every written artifact.
pub const JPEG_QUALITY: u8 = 95;

/// Owned RGB8 raster.
///
/// Every transforming operation returns a new image; the source buffer is never aliased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    /// Wrap an `image` crate RGB buffer.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Solid-color image.
    pub fn filled(size: Size, color: Rgb) -> CreativeResult<Self> {
        let size = size.validate()?;
        Ok(Self {
            pixels: RgbImage::from_pixel(size.width, size.height, image::Rgb(color.to_array())),
        })
    }

    /// Build from raw row-major RGB8 bytes.
    pub fn from_raw(size: Size, data: Vec<u8>) -> CreativeResult<Self> {
        let size = size.validate()?;
        let expected = size.area() * 3;
        let got = data.len();
        RgbImage::from_raw(size.width, size.height, data)
            .map(Self::from_rgb)
            .ok_or_else(|| {
                CreativeError::validation(format!(
                    "rgb buffer for {}x{} needs {expected} bytes, got {got}",
                    size.width, size.height
                ))
            })
    }

    /// Normalize any decoded image to RGB. Alpha is composited against white.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if !img.color().has_alpha() {
            return Self::from_rgb(img.into_rgb8());
        }

        let rgba = img.into_rgba8();
        let (w, h) = rgba.dimensions();
        let mut out = RgbImage::new(w, h);
        for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
            let a = u16::from(src[3]);
            let inv = 255 - a;
            for i in 0..3 {
                dst[i] = mul_div255(u16::from(src[i]), a).saturating_add(mul_div255(255, inv));
            }
        }
        Self::from_rgb(out)
    }

    /// Decode from encoded bytes (any format the `image` crate recognizes).
    pub fn decode(bytes: &[u8]) -> CreativeResult<Self> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CreativeError::decode(format!("sniff image format: {e}")))?;
        let img = reader
            .decode()
            .map_err(|e| CreativeError::decode(format!("decode image: {e}")))?;
        Ok(Self::from_dynamic(img))
    }

    /// Read and decode a file.
    pub fn open(path: impl AsRef<Path>) -> CreativeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes).map_err(|e| match e {
            CreativeError::Decode(msg) => {
                CreativeError::decode(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Pixel dimensions.
    pub fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size::new(width, height)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        Rgb::from(self.pixels.get_pixel(x, y).0)
    }

    /// Borrow the underlying buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Row-major RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Paint `rect` (clipped to the image) with an opaque color.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let x1 = rect.x1.min(self.width());
        let y1 = rect.y1.min(self.height());
        for y in rect.y0..y1 {
            for x in rect.x0..x1 {
                self.pixels.put_pixel(x, y, image::Rgb(color.to_array()));
            }
        }
    }

    /// Copy of a sub-rectangle. The rectangle is clipped to the image bounds.
    pub fn crop(&self, rect: PixelRect) -> CreativeResult<Self> {
        let size = self.size();
        let x0 = rect.x0.min(size.width);
        let y0 = rect.y0.min(size.height);
        let w = rect.x1.min(size.width).saturating_sub(x0);
        let h = rect.y1.min(size.height).saturating_sub(y0);
        if w == 0 || h == 0 {
            return Err(CreativeError::validation(format!(
                "crop {rect:?} is empty inside {}x{}",
                size.width, size.height
            )));
        }
        Ok(Self::from_rgb(
            image::imageops::crop_imm(&self.pixels, x0, y0, w, h).to_image(),
        ))
    }

    /// Encode as baseline JPEG at `quality`.
    pub fn encode_jpeg(&self, quality: u8) -> CreativeResult<Vec<u8>> {
        let mut out = Vec::new();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
        self.pixels.write_with_encoder(encoder)?;
        Ok(out)
    }

    /// Write a JPEG file at `quality`, creating parent directories.
    pub fn save_jpeg(&self, path: impl AsRef<Path>, quality: u8) -> CreativeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            BufWriter::new(file),
            quality.clamp(1, 100),
        );
        self.pixels.write_with_encoder(encoder)?;
        Ok(())
    }

    /// Dimensions stored in an encoded file header, without decoding pixels.
    pub fn probe_size(path: impl AsRef<Path>) -> CreativeResult<Size> {
        let (w, h) = image::image_dimensions(path.as_ref())?;
        Ok(Size::new(w, h))
    }
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
