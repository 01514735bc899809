use super::*;
use crate::layout::text::TextPosition;

fn region(color: Rgb) -> RegionAnalysis {
    let luminance = relative_luminance(color);
    RegionAnalysis {
        average_color: color,
        luminance,
        is_light: luminance > 0.5,
        position: TextPosition::default(),
    }
}

#[test]
fn light_region_gets_dark_brand_text() {
    let palette = BrandPalette::from_hex(&["#000000", "#FFFFFF"]);
    let sel = ColorAnalyzer::default().select_text_colors(&region(Rgb::new(240, 240, 240)), &palette);
    assert_eq!(sel.text_color, Rgb::BLACK);
    assert_eq!(sel.outline_color, Rgb::WHITE);
    assert!(sel.contrast_ratio >= 18.0, "{}", sel.contrast_ratio);
    assert!(sel.from_palette);
}

#[test]
fn dark_region_gets_light_brand_text() {
    let palette = BrandPalette::from_hex(&["#004E89", "#F7F7F7"]);
    let sel = ColorAnalyzer::default().select_text_colors(&region(Rgb::new(10, 10, 10)), &palette);
    assert_eq!(sel.text_color, Rgb::new(247, 247, 247));
    assert_eq!(sel.outline_color, Rgb::new(0, 78, 137));
    assert!(sel.contrast_ratio >= 7.0);
}

#[test]
fn highest_contrast_candidate_wins() {
    let palette = BrandPalette::from_hex(&["#333333", "#000000", "#FFFFFF"]);
    let sel = ColorAnalyzer::default().select_text_colors(&region(Rgb::WHITE), &palette);
    assert_eq!(sel.text_color, Rgb::BLACK);
}

#[test]
fn weak_palette_falls_back_to_black_and_white() {
    // Mid-gray brand color cannot reach 7:1 on a light gray background.
    let palette = BrandPalette::from_hex(&["#777777"]);
    let bg = Rgb::new(200, 200, 200);
    let sel = ColorAnalyzer::default().select_text_colors(&region(bg), &palette);
    assert_eq!(sel.text_color, Rgb::BLACK);
    assert_eq!(sel.outline_color, Rgb::WHITE);
    assert!(!sel.from_palette);
    assert!((sel.contrast_ratio - contrast_ratio(Rgb::BLACK, bg)).abs() < 1e-9);
}

#[test]
fn fallback_reports_the_achieved_contrast_even_below_minimum() {
    let bg = Rgb::new(120, 120, 120);
    let sel = ColorAnalyzer::new(21.0).select_text_colors(&region(bg), &BrandPalette::default());
    assert_eq!(sel.text_color, Rgb::WHITE);
    assert!(sel.contrast_ratio < 21.0);
    assert!((sel.contrast_ratio - contrast_ratio(Rgb::WHITE, bg)).abs() < 1e-9);
}

#[test]
fn outline_falls_back_when_no_candidate_separates_from_text() {
    // The only light palette color is too close to white text for an outline.
    let palette = BrandPalette::from_hex(&["#FFFFFF"]);
    let analyzer = ColorAnalyzer::default().with_outline_min_contrast(3.0);
    let sel = analyzer.select_text_colors(&region(Rgb::BLACK), &palette);
    assert_eq!(sel.text_color, Rgb::WHITE);
    // Black is the fallback outline candidate for a dark region.
    assert_eq!(sel.outline_color, Rgb::BLACK);
}

#[test]
fn outline_uses_opposite_when_candidates_too_close() {
    // #AAAAAA is dark by luminance but only ~2.3:1 against white text.
    let palette = BrandPalette::from_hex(&["#FFFFFF", "#AAAAAA"]);
    let sel = ColorAnalyzer::default().select_text_colors(&region(Rgb::new(30, 30, 30)), &palette);
    assert_eq!(sel.text_color, Rgb::WHITE);
    assert_eq!(sel.outline_color, Rgb::BLACK);
}

#[test]
fn recommended_text_color_by_luminance() {
    assert_eq!(ColorAnalyzer::recommended_text_color(Rgb::WHITE), Rgb::BLACK);
    assert_eq!(ColorAnalyzer::recommended_text_color(Rgb::new(20, 30, 40)), Rgb::WHITE);
}
