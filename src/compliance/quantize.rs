//! Median-cut color quantization.
//!
//! The box holding the most pixels is split first, along its widest channel, until
//! `max_colors` boxes exist or no box holds more than one distinct color.

use crate::foundation::core::Rgb;

/// Quantized color and the number of pixels it represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub count: usize,
}

struct ColorBox {
    pixels: Vec<[u8; 3]>,
}

impl ColorBox {
    /// Widest channel and its range, preferring red, then green, then blue.
    fn widest_channel(&self) -> (usize, u8) {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for px in &self.pixels {
            for c in 0..3 {
                lo[c] = lo[c].min(px[c]);
                hi[c] = hi[c].max(px[c]);
            }
        }
        let mut best = (0, hi[0].saturating_sub(lo[0]));
        for c in 1..3 {
            let range = hi[c].saturating_sub(lo[c]);
            if range > best.1 {
                best = (c, range);
            }
        }
        best
    }

    fn is_splittable(&self) -> bool {
        self.pixels.len() > 1 && self.widest_channel().1 > 0
    }

    /// Split at the value boundary nearest the median so equal values stay together.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|px| (px[channel], px[0], px[1], px[2]));

        let len = self.pixels.len();
        let mid = len / 2;
        let v = self.pixels[mid][channel];
        let lower = self.pixels[..mid]
            .iter()
            .rposition(|px| px[channel] != v)
            .map(|i| i + 1);
        let upper = self.pixels[mid..]
            .iter()
            .position(|px| px[channel] != v)
            .map(|i| i + mid);
        let at = match (lower, upper) {
            (Some(l), Some(u)) => {
                if mid - l <= u - mid {
                    l
                } else {
                    u
                }
            }
            (Some(l), None) => l,
            (None, Some(u)) => u,
            // Unreachable for a box with a non-zero channel range.
            (None, None) => mid.max(1),
        };

        let upper_pixels = self.pixels.split_off(at);
        (
            ColorBox {
                pixels: self.pixels,
            },
            ColorBox {
                pixels: upper_pixels,
            },
        )
    }

    fn mean(&self) -> Rgb {
        let n = self.pixels.len().max(1) as u64;
        let mut sum = [0u64; 3];
        for px in &self.pixels {
            for c in 0..3 {
                sum[c] += u64::from(px[c]);
            }
        }
        let avg = |s: u64| ((s + n / 2) / n) as u8;
        Rgb::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
    }
}

/// Reduce `pixels` to at most `max_colors` representative colors.
///
/// Entries keep box order; boxes that collapse to the same representative are merged
/// into the first one.
pub fn median_cut(pixels: &[[u8; 3]], max_colors: usize) -> Vec<PaletteEntry> {
    if pixels.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox {
        pixels: pixels.to_vec(),
    }];
    while boxes.len() < max_colors {
        let mut target: Option<usize> = None;
        for (i, b) in boxes.iter().enumerate() {
            let larger = target.is_none_or(|t| b.pixels.len() > boxes[t].pixels.len());
            if larger && b.is_splittable() {
                target = Some(i);
            }
        }
        let Some(i) = target else { break };
        let (lo, hi) = boxes.remove(i).split();
        boxes.insert(i, hi);
        boxes.insert(i, lo);
    }

    let mut entries: Vec<PaletteEntry> = Vec::with_capacity(boxes.len());
    for b in &boxes {
        let color = b.mean();
        match entries.iter_mut().find(|e| e.color == color) {
            Some(e) => e.count += b.pixels.len(),
            None => entries.push(PaletteEntry {
                color,
                count: b.pixels.len(),
            }),
        }
    }
    entries
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/quantize.rs"]
mod tests;
