use super::*;

const SAMPLES: [Rgb; 8] = [
    Rgb::BLACK,
    Rgb::WHITE,
    Rgb::new(255, 0, 0),
    Rgb::new(0, 78, 137),
    Rgb::new(255, 107, 53),
    Rgb::new(128, 128, 128),
    Rgb::new(17, 200, 33),
    Rgb::new(240, 240, 240),
];

#[test]
fn hex_parses_with_and_without_hash() {
    assert_eq!(hex_to_rgb("#FF0000").unwrap(), Rgb::new(255, 0, 0));
    assert_eq!(hex_to_rgb("00ff00").unwrap(), Rgb::new(0, 255, 0));
    assert_eq!(hex_to_rgb("#004E89").unwrap(), Rgb::new(0, 78, 137));
}

#[test]
fn hex_rejects_malformed_input() {
    for bad in ["", "#", "#fff", "#12345", "#1234567", "zzzzzz", "#+fffff", "#ééé", "##ff0000"] {
        let err = hex_to_rgb(bad).unwrap_err();
        assert!(
            matches!(err, CreativeError::InvalidColorFormat(_)),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn hex_round_trip_is_lowercase() {
    for h in ["#FF6B35", "#004e89", "#AbCdEf", "#000000", "#ffffff"] {
        assert_eq!(rgb_to_hex(hex_to_rgb(h).unwrap()), h.to_lowercase());
    }
}

#[test]
fn luminance_endpoints() {
    assert_eq!(relative_luminance(Rgb::BLACK), 0.0);
    assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-12);
    let mid = relative_luminance(Rgb::new(128, 128, 128));
    assert!(mid > 0.2 && mid < 0.23, "{mid}");
}

#[test]
fn contrast_identities() {
    for c in SAMPLES {
        assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-12);
    }
    assert!((contrast_ratio(Rgb::BLACK, Rgb::WHITE) - 21.0).abs() < 1e-6);
    assert!((contrast_ratio(Rgb::WHITE, Rgb::BLACK) - 21.0).abs() < 1e-6);
}

#[test]
fn contrast_is_symmetric_and_bounded() {
    for a in SAMPLES {
        for b in SAMPLES {
            let ab = contrast_ratio(a, b);
            assert!((ab - contrast_ratio(b, a)).abs() < 1e-12);
            assert!((1.0..=21.0 + 1e-9).contains(&ab));
        }
    }
}

#[test]
fn distance_properties() {
    for a in SAMPLES {
        assert_eq!(color_distance(a, a), 0.0);
        for b in SAMPLES {
            assert_eq!(color_distance(a, b), color_distance(b, a));
        }
    }
    let max = color_distance(Rgb::BLACK, Rgb::WHITE);
    assert!((max - MAX_RGB_DISTANCE).abs() < 1e-9);
}

#[test]
fn similarity_scale() {
    assert_eq!(color_similarity(Rgb::WHITE, Rgb::WHITE), 100.0);
    assert!(color_similarity(Rgb::BLACK, Rgb::WHITE) < 0.2);
    let near = color_similarity(Rgb::new(255, 0, 0), Rgb::new(250, 5, 5));
    assert!(near > 98.0 && near < 100.0);
}

#[test]
fn hsl_of_primaries_and_gray() {
    let (h, s, l) = rgb_to_hsl(Rgb::new(255, 0, 0));
    assert_eq!((h, s, l), (0.0, 100.0, 50.0));

    let (h, s, _) = rgb_to_hsl(Rgb::new(0, 0, 255));
    assert!((h - 240.0).abs() < 1e-9);
    assert_eq!(s, 100.0);

    let (_, s, l) = rgb_to_hsl(Rgb::new(128, 128, 128));
    assert_eq!(s, 0.0);
    assert!((l - 50.196).abs() < 0.01);
}

#[test]
fn color_names_cover_the_ladders() {
    assert_eq!(hex_to_color_name("#FF0000"), "vibrant red");
    assert_eq!(hex_to_color_name("#808080"), "gray");
    assert_eq!(hex_to_color_name("#000000"), "black");
    assert_eq!(hex_to_color_name("#FFFFFF"), "white");
    assert_eq!(hex_to_color_name("#000080"), "dark blue");
    assert_eq!(hex_to_color_name("#20B2AA"), "teal");
    assert_eq!(hex_to_color_name("#FFD700"), "vibrant golden yellow");
    assert_eq!(hex_to_color_name("#FF69B4"), "hot pink");
}

#[test]
fn color_name_is_stable_and_tolerates_garbage() {
    assert_eq!(hex_to_color_name("#004E89"), hex_to_color_name("#004e89"));
    assert_eq!(hex_to_color_name("#nothex"), "nothex");
}
