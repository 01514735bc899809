use crate::foundation::core::Size;
use crate::foundation::error::CreativeResult;

/// Default distance between a text block and the image edges it is anchored to.
pub const DEFAULT_PADDING_PX: u32 = 40;

/// Rendered extent of a (possibly multi-line) string.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TextExtent {
    /// Ink/advance width in pixels.
    pub width: f32,
    /// Line-box height in pixels.
    pub height: f32,
}

impl TextExtent {
    /// Width and height rounded up to whole pixels.
    pub fn ceil_px(self) -> (u32, u32) {
        (
            self.width.max(0.0).ceil() as u32,
            self.height.max(0.0).ceil() as u32,
        )
    }
}

/// Glyph measurement capability.
///
/// Implementations measure actual shaped glyph advances so wrapping is correct for
/// variable-width and non-Latin scripts.
pub trait TextMeasure {
    /// Extent of `text` at `size_px`. Newlines start new lines.
    fn measure(&self, text: &str, size_px: f32) -> CreativeResult<TextExtent>;
}

/// Greedy word wrap against a pixel-width budget.
///
/// Words are appended while the measured line stays within `max_width_px`. A single
/// word wider than the budget is placed alone on its own line rather than split.
/// Returns lines joined by `\n`.
pub fn wrap_text(
    text: &str,
    measure: &dyn TextMeasure,
    size_px: f32,
    max_width_px: f32,
) -> CreativeResult<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            if measure.measure(&current, size_px)?.width > max_width_px {
                lines.push(std::mem::take(&mut current));
            }
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, size_px)?.width <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
            if measure.measure(&current, size_px)?.width > max_width_px {
                lines.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines.join("\n"))
}

/// Vertical anchor of a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    /// Top edge.
    Top,
    /// Vertically centered.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Horizontal anchor of a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    /// Left edge.
    Left,
    /// Horizontally centered.
    Center,
    /// Right edge.
    Right,
}

/// Named text placement, e.g. `bottom-center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextPosition {
    /// Vertical anchor.
    pub vertical: VerticalAnchor,
    /// Horizontal anchor.
    pub horizontal: HorizontalAnchor,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::BOTTOM_CENTER
    }
}

impl TextPosition {
    /// Fallback placement.
    pub const BOTTOM_CENTER: Self = Self::new(VerticalAnchor::Bottom, HorizontalAnchor::Center);
    /// Top band, centered.
    pub const TOP_CENTER: Self = Self::new(VerticalAnchor::Top, HorizontalAnchor::Center);
    /// Middle of the image.
    pub const CENTER: Self = Self::new(VerticalAnchor::Center, HorizontalAnchor::Center);

    /// Construct from anchors.
    pub const fn new(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Parse `top`, `bottom-left`, `center`, `center-right`, ...; unrecognized input
    /// falls back to bottom-center.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Strict parse of a position name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        let (v, h) = match s.split_once('-') {
            Some((v, h)) => (v, Some(h)),
            None => (s.as_str(), None),
        };
        let vertical = match v {
            "top" => VerticalAnchor::Top,
            "center" | "middle" => VerticalAnchor::Center,
            "bottom" => VerticalAnchor::Bottom,
            _ => return None,
        };
        let horizontal = match h {
            None | Some("center") => HorizontalAnchor::Center,
            Some("left") => HorizontalAnchor::Left,
            Some("right") => HorizontalAnchor::Right,
            Some(_) => return None,
        };
        Some(Self::new(vertical, horizontal))
    }

    /// Canonical name, e.g. `"bottom-center"` or `"center"`.
    pub fn name(self) -> &'static str {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        match (self.vertical, self.horizontal) {
            (V::Top, H::Left) => "top-left",
            (V::Top, H::Center) => "top-center",
            (V::Top, H::Right) => "top-right",
            (V::Center, H::Left) => "center-left",
            (V::Center, H::Center) => "center",
            (V::Center, H::Right) => "center-right",
            (V::Bottom, H::Left) => "bottom-left",
            (V::Bottom, H::Center) => "bottom-center",
            (V::Bottom, H::Right) => "bottom-right",
        }
    }
}

impl std::fmt::Display for TextPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for TextPosition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for TextPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown text position \"{s}\"")))
    }
}

/// Top-left draw origin of a `block` inside `image` at `position`.
///
/// Left/top blocks sit `padding` from their edge, right blocks `padding` from the right
/// edge, bottom blocks `2 * padding` from the bottom edge. Oversized blocks can produce
/// negative coordinates.
pub fn position_text(
    block: (u32, u32),
    image: Size,
    position: TextPosition,
    padding: u32,
) -> (i64, i64) {
    let (bw, bh) = (i64::from(block.0), i64::from(block.1));
    let (iw, ih) = (i64::from(image.width), i64::from(image.height));
    let pad = i64::from(padding);

    let x = match position.horizontal {
        HorizontalAnchor::Left => pad,
        HorizontalAnchor::Center => (iw - bw).div_euclid(2),
        HorizontalAnchor::Right => iw - bw - pad,
    };
    let y = match position.vertical {
        VerticalAnchor::Top => pad,
        VerticalAnchor::Center => (ih - bh).div_euclid(2),
        VerticalAnchor::Bottom => ih - bh - 2 * pad,
    };
    (x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
