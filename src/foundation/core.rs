use crate::foundation::error::{CreativeError, CreativeResult};

/// Opaque 8-bit sRGB color.
///
/// Serializes as a lowercase `#rrggbb` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rrggbb` / `rrggbb`.
    pub fn from_hex(s: &str) -> CreativeResult<Self> {
        crate::color::science::hex_to_rgb(s)
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        crate::color::science::rgb_to_hex(self)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject zero-area sizes.
    pub fn validate(self) -> CreativeResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(CreativeError::validation(format!(
                "size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(self)
    }

    /// Number of pixels.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Integer pixel rectangle, half-open on the right/bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x0: u32,
    /// Top edge.
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Bottom edge (exclusive).
    pub y1: u32,
}

impl PixelRect {
    /// Rectangle from fractional coordinates of `size`, truncating like integer pixel
    /// math and growing degenerate rectangles to at least one pixel.
    pub fn from_fractions(size: Size, fx0: f64, fy0: f64, fx1: f64, fy1: f64) -> Self {
        let w = size.width;
        let h = size.height;
        let at = |extent: u32, f: f64| -> u32 { ((extent as f64) * f) as u32 };

        let x0 = at(w, fx0).min(w.saturating_sub(1));
        let y0 = at(h, fy0).min(h.saturating_sub(1));
        let x1 = at(w, fx1).clamp(x0 + 1, w.max(1));
        let y1 = at(h, fy1).clamp(y0 + 1, h.max(1));
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
