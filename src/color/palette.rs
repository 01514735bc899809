use crate::color::science::{hex_to_rgb, relative_luminance};
use crate::foundation::core::Rgb;

/// Ordered brand colors parsed from hex strings.
///
/// Entries that fail to parse are dropped with a warning instead of failing the
/// whole campaign.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct BrandPalette {
    colors: Vec<Rgb>,
}

impl BrandPalette {
    /// Palette from already-parsed colors.
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Parse hex strings, skipping invalid entries.
    pub fn from_hex<S: AsRef<str>>(hex_colors: &[S]) -> Self {
        let colors = hex_colors
            .iter()
            .filter_map(|h| match hex_to_rgb(h.as_ref()) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(entry = h.as_ref(), error = %e, "dropping brand color");
                    None
                }
            })
            .collect();
        Self { colors }
    }

    /// Colors in the order they were given.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// `true` when no usable color survived parsing.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of usable colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Split into `(light, dark)` by relative luminance above/at-or-below 0.5,
    /// preserving palette order inside each group.
    pub fn partition_by_luminance(&self) -> (Vec<Rgb>, Vec<Rgb>) {
        self.colors
            .iter()
            .copied()
            .partition(|c| relative_luminance(*c) > 0.5)
    }
}

impl<'de> serde::Deserialize<'de> for BrandPalette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_hex(&raw))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
