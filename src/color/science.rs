//! Pure color conversions and WCAG math.

use crate::foundation::core::Rgb;
use crate::foundation::error::{CreativeError, CreativeResult};

/// Largest Euclidean distance between two RGB colors (`sqrt(3 * 255^2)`).
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// Distance units per similarity percentage point.
const DISTANCE_PER_SIMILARITY_POINT: f64 = 4.41;

/// Parse a 6-digit hex color with an optional leading `#`.
pub fn hex_to_rgb(hex: &str) -> CreativeResult<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CreativeError::invalid_color(format!(
            "\"{hex}\" must be 6 hex digits with an optional '#'"
        )));
    }

    let byte = |i: usize| -> CreativeResult<u8> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| CreativeError::invalid_color(format!("\"{hex}\": {e}")))
    };
    Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
}

/// Format as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Convert to HSL: hue in degrees `[0, 360)`, saturation and lightness in percent.
pub fn rgb_to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;
    let l = (max + min) / 2.0;

    if diff == 0.0 {
        return (0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        diff / (2.0 - max - min)
    } else {
        diff / (max + min)
    };

    let h = if max == r {
        ((g - b) / diff + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / diff + 2.0) / 6.0
    } else {
        ((r - g) / diff + 4.0) / 6.0
    };

    (h * 360.0, s * 100.0, l * 100.0)
}

/// WCAG 2.x relative luminance in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn linearize(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Euclidean distance in RGB space, `[0, MAX_RGB_DISTANCE]`.
///
/// Not perceptually uniform; carried as a known approximation.
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Similarity percentage: 100 for identical colors, 0 at the maximum distance.
pub fn color_similarity(a: Rgb, b: Rgb) -> f64 {
    (100.0 - color_distance(a, b) / DISTANCE_PER_SIMILARITY_POINT).max(0.0)
}

/// Descriptive name for a hex color such as `"vibrant red"` or `"light gray"`.
///
/// Input that does not parse is returned without its leading `#`.
pub fn hex_to_color_name(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Ok(rgb) => color_name(rgb),
        Err(_) => hex.trim_start_matches('#').to_owned(),
    }
}

/// Descriptive name for a color. Stable for a given input.
pub fn color_name(rgb: Rgb) -> String {
    let (h, s, l) = rgb_to_hsl(rgb);

    if s < 10.0 {
        let gray = match l {
            l if l < 10.0 => "black",
            l if l < 25.0 => "very dark gray",
            l if l < 45.0 => "dark gray",
            l if l < 65.0 => "gray",
            l if l < 85.0 => "light gray",
            _ => "white",
        };
        return gray.to_owned();
    }

    let mut base = match h {
        h if !(15.0..345.0).contains(&h) => "red",
        h if h < 45.0 => "orange",
        h if h < 75.0 => "yellow",
        h if h < 150.0 => "green",
        h if h < 200.0 => "cyan",
        h if h < 245.0 => "blue",
        h if h < 290.0 => "purple",
        h if h < 320.0 => "magenta",
        _ => "pink",
    };

    let mut modifiers: Vec<&str> = Vec::with_capacity(2);
    if l < 20.0 {
        modifiers.push("very dark");
    } else if l < 35.0 {
        modifiers.push("dark");
    } else if l > 80.0 {
        modifiers.push("very light");
    } else if l > 65.0 {
        modifiers.push("light");
    }
    if 30.0 < l && l < 70.0 && s > 80.0 {
        modifiers.push("vibrant");
    }

    match base {
        "pink" if l > 60.0 && s > 70.0 => {
            base = "hot pink";
            modifiers.clear();
        }
        "yellow" if l > 70.0 => {
            base = "golden";
            modifiers.clear();
        }
        "yellow" if 40.0 < l && l < 70.0 => {
            base = "golden yellow";
            modifiers.retain(|m| !m.contains("dark"));
        }
        "orange" if 35.0 < h && h < 65.0 && l > 60.0 => {
            base = "golden";
            modifiers.clear();
        }
        "orange" if s > 60.0 && l < 50.0 => {
            base = "burnt orange";
            modifiers.clear();
        }
        "cyan" if h < 180.0 => base = "teal",
        _ => {}
    }

    if modifiers.is_empty() {
        base.to_owned()
    } else {
        format!("{} {base}", modifiers.join(" "))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/science.rs"]
mod tests;
