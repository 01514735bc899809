use std::sync::atomic::{AtomicUsize, Ordering};

use adcraft::{
    CreativeResult, GlyphFace, PixelRect, RasterImage, Rgb, Size, TextExtent, TextMeasure,
};

/// Deterministic monospace face: every visible character is a solid block.
#[derive(Default)]
pub struct BlockFace {
    draws: AtomicUsize,
}

impl BlockFace {
    const ADVANCE: f32 = 0.5;
    const LINE: f32 = 1.2;

    #[allow(dead_code)]
    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl TextMeasure for BlockFace {
    fn measure(&self, text: &str, size_px: f32) -> CreativeResult<TextExtent> {
        if text.is_empty() {
            return Ok(TextExtent::default());
        }
        let widest = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = text.split('\n').count();
        Ok(TextExtent {
            width: widest as f32 * size_px * Self::ADVANCE,
            height: lines as f32 * size_px * Self::LINE,
        })
    }
}

impl GlyphFace for BlockFace {
    fn draw(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        origin: (i64, i64),
        size_px: f32,
        color: Rgb,
    ) -> CreativeResult<()> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        let adv = size_px * Self::ADVANCE;
        for (i, line) in text.split('\n').enumerate() {
            for (j, ch) in line.chars().enumerate() {
                let x = origin.0 as f32 + j as f32 * adv;
                let y = origin.1 as f32 + i as f32 * size_px * Self::LINE;
                if ch.is_whitespace() || x < 0.0 || y < 0.0 {
                    continue;
                }
                canvas.fill_rect(
                    PixelRect {
                        x0: x as u32,
                        y0: y as u32,
                        x1: (x + adv) as u32,
                        y1: (y + size_px) as u32,
                    },
                    color,
                );
            }
        }
        Ok(())
    }
}

/// Left `split` columns of `left`, the rest `right`.
#[allow(dead_code)]
pub fn two_tone(w: u32, h: u32, split: u32, left: Rgb, right: Rgb) -> RasterImage {
    let mut img = RasterImage::filled(Size::new(w, h), right).expect("non-zero size");
    img.fill_rect(
        PixelRect {
            x0: 0,
            y0: 0,
            x1: split,
            y1: h,
        },
        left,
    );
    img
}
