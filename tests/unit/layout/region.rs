use super::*;

fn paint(img: &mut RasterImage, x0: u32, y0: u32, x1: u32, y1: u32, c: Rgb) {
    let w = img.width() as usize;
    let raw = img.as_raw_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let i = ((y as usize) * w + x as usize) * 3;
            raw[i..i + 3].copy_from_slice(&c.to_array());
        }
    }
}

#[test]
fn uniform_image_ties_resolve_to_first_candidate() {
    let img = RasterImage::filled(Size::new(100, 100), Rgb::new(30, 30, 30)).unwrap();
    let (zone, analysis) = find_best_text_region(&img);
    assert_eq!(zone, RegionZone::BottomLeft);
    assert_eq!(analysis.position.name(), "bottom-left");
    assert_eq!(analysis.average_color, Rgb::new(30, 30, 30));
    assert!(!analysis.is_light);
}

#[test]
fn flat_white_corner_beats_mid_gray() {
    let mut img = RasterImage::filled(Size::new(100, 100), Rgb::new(128, 128, 128)).unwrap();
    paint(&mut img, 60, 0, 100, 30, Rgb::WHITE);
    let (zone, analysis) = find_best_text_region(&img);
    assert_eq!(zone, RegionZone::TopRight);
    assert_eq!(analysis.average_color, Rgb::WHITE);
    assert!(analysis.is_light);
    assert!((analysis.luminance - 1.0).abs() < 1e-9);
}

#[test]
fn busy_region_scores_lower_uniformity() {
    let mut img = RasterImage::filled(Size::new(100, 100), Rgb::BLACK).unwrap();
    for y in 70..100 {
        for x in 0..40 {
            if (x + y) % 2 == 0 {
                paint(&mut img, x, y, x + 1, y + 1, Rgb::WHITE);
            }
        }
    }
    let scores = score_regions(&img);
    assert_eq!(scores.len(), 6);
    assert_eq!(scores[0].zone, RegionZone::BottomLeft);
    assert!(scores[0].uniformity < 0.45, "{:?}", scores[0]);
    assert!((scores[3].uniformity - 1.0).abs() < 1e-12);
    assert!((scores[3].score - 1.0).abs() < 1e-12);
    let (zone, _) = find_best_text_region(&img);
    assert_ne!(zone, RegionZone::BottomLeft);
}

#[test]
fn hint_skips_scoring() {
    let mut img = RasterImage::filled(Size::new(50, 100), Rgb::WHITE).unwrap();
    paint(&mut img, 0, 70, 50, 100, Rgb::BLACK);

    let bottom = analyze_text_region(&img, Some(TextPosition::parse_lenient("bottom")));
    assert_eq!(bottom.average_color, Rgb::BLACK);
    assert_eq!(bottom.position, TextPosition::BOTTOM_CENTER);
    assert!(!bottom.is_light);

    let top = analyze_text_region(&img, Some(TextPosition::TOP_CENTER));
    assert_eq!(top.average_color, Rgb::WHITE);
    assert_eq!(top.position, TextPosition::TOP_CENTER);

    let center = analyze_text_region(&img, TextPosition::parse("center-left"));
    assert_eq!(center.position, TextPosition::CENTER);
    assert_eq!(center.average_color, Rgb::WHITE);
}

#[test]
fn no_hint_uses_scoring() {
    let mut img = RasterImage::filled(Size::new(100, 100), Rgb::new(128, 128, 128)).unwrap();
    paint(&mut img, 0, 0, 40, 30, Rgb::BLACK);
    let analysis = analyze_text_region(&img, None);
    assert_eq!(analysis.position.name(), "top-left");
}

#[test]
fn tiny_images_do_not_panic() {
    let img = RasterImage::filled(Size::new(1, 1), Rgb::new(200, 10, 10)).unwrap();
    let (_, analysis) = find_best_text_region(&img);
    assert_eq!(analysis.average_color, Rgb::new(200, 10, 10));
    let hinted = analyze_text_region(&img, Some(TextPosition::CENTER));
    assert_eq!(hinted.average_color, Rgb::new(200, 10, 10));
}
