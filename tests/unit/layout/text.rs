use super::*;

/// ASCII glyphs advance `size/2`, everything else `size` (wide CJK-like glyphs).
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, size_px: f32) -> CreativeResult<TextExtent> {
        let width = text
            .lines()
            .map(|l| {
                l.chars()
                    .map(|c| if c.is_ascii() { size_px * 0.5 } else { size_px })
                    .sum::<f32>()
            })
            .fold(0.0f32, f32::max);
        let lines = text.lines().count().max(1) as f32;
        Ok(TextExtent {
            width,
            height: lines * size_px * 1.2,
        })
    }
}

fn words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

#[test]
fn wraps_greedily_at_width() {
    // 10px per ASCII char at size 20; 100px budget = 10 chars.
    let out = wrap_text("Shop now and save big today", &FixedAdvance, 20.0, 100.0).unwrap();
    assert_eq!(out, "Shop now\nand save\nbig today");
}

#[test]
fn long_word_sits_alone_and_terminates() {
    let out = wrap_text("a supercalifragilistic b", &FixedAdvance, 20.0, 100.0).unwrap();
    assert_eq!(out, "a\nsupercalifragilistic\nb");
}

#[test]
fn empty_and_whitespace_only_input() {
    assert_eq!(wrap_text("", &FixedAdvance, 20.0, 100.0).unwrap(), "");
    assert_eq!(wrap_text("  \n\t ", &FixedAdvance, 20.0, 100.0).unwrap(), "");
}

#[test]
fn wrap_properties_hold_across_widths() {
    let texts = [
        "Fresh summer flavors for the whole family",
        "限定 セール 今すぐ 購入 してください",
        "x",
        "Unbelievably-long-hyphenated-product-name on sale",
    ];
    for text in texts {
        for max in [30.0f32, 75.0, 120.0, 400.0] {
            let out = wrap_text(text, &FixedAdvance, 20.0, max).unwrap();
            assert_eq!(words(&out), words(text), "words preserved for {text:?} @ {max}");

            for line in out.lines() {
                let w = FixedAdvance.measure(line, 20.0).unwrap().width;
                assert!(
                    w <= max || !line.contains(' '),
                    "line {line:?} is {w}px over {max}"
                );
            }

            let again = wrap_text(&out, &FixedAdvance, 20.0, max).unwrap();
            assert_eq!(again, out, "idempotent for {text:?} @ {max}");
        }
    }
}

#[test]
fn wide_glyphs_are_measured_not_counted() {
    // Four CJK glyphs = 80px; two fit per 50px line even though the char count is small.
    let out = wrap_text("限定 セール", &FixedAdvance, 20.0, 50.0).unwrap();
    assert_eq!(out, "限定\nセール");
}

#[test]
fn position_parsing() {
    assert_eq!(TextPosition::parse("bottom"), Some(TextPosition::BOTTOM_CENTER));
    assert_eq!(TextPosition::parse("top"), Some(TextPosition::TOP_CENTER));
    assert_eq!(TextPosition::parse("Center"), Some(TextPosition::CENTER));
    assert_eq!(
        TextPosition::parse("top-left"),
        Some(TextPosition::new(VerticalAnchor::Top, HorizontalAnchor::Left))
    );
    assert_eq!(TextPosition::parse("diagonal"), None);
    assert_eq!(TextPosition::parse_lenient("diagonal"), TextPosition::BOTTOM_CENTER);
    assert_eq!(TextPosition::parse_lenient("bottom-sideways"), TextPosition::BOTTOM_CENTER);
}

#[test]
fn position_names_round_trip() {
    for v in [VerticalAnchor::Top, VerticalAnchor::Center, VerticalAnchor::Bottom] {
        for h in [HorizontalAnchor::Left, HorizontalAnchor::Center, HorizontalAnchor::Right] {
            let p = TextPosition::new(v, h);
            assert_eq!(TextPosition::parse(p.name()), Some(p));
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(serde_json::from_str::<TextPosition>(&json).unwrap(), p);
        }
    }
}

#[test]
fn coordinates_follow_padding_rules() {
    let img = Size::new(1080, 1080);
    let block = (400, 100);
    let pad = DEFAULT_PADDING_PX;
    let at = |s: &str| position_text(block, img, TextPosition::parse_lenient(s), pad);

    assert_eq!(at("bottom-center"), (340, 1080 - 100 - 80));
    assert_eq!(at("bottom-left"), (40, 900));
    assert_eq!(at("bottom-right"), (1080 - 400 - 40, 900));
    assert_eq!(at("top-left"), (40, 40));
    assert_eq!(at("top-right"), (640, 40));
    assert_eq!(at("top"), (340, 40));
    assert_eq!(at("center"), (340, 490));
    assert_eq!(at("nonsense"), at("bottom-center"));
}

#[test]
fn oversized_block_goes_negative_instead_of_panicking() {
    let (x, y) = position_text((2000, 50), Size::new(1000, 1000), TextPosition::CENTER, 40);
    assert_eq!(x, -500);
    assert_eq!(y, 475);
}
