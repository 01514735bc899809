use super::*;

struct Tagged(f32);

impl TextMeasure for Tagged {
    fn measure(&self, text: &str, _size_px: f32) -> CreativeResult<TextExtent> {
        Ok(TextExtent {
            width: self.0 * text.chars().count() as f32,
            height: self.0,
        })
    }
}

impl GlyphFace for Tagged {
    fn draw(&self, _: &mut RasterImage, _: &str, _: (i64, i64), _: f32, _: Rgb) -> CreativeResult<()> {
        Ok(())
    }
}

#[test]
fn language_tags_map_to_scripts() {
    assert_eq!(Script::from_language_tag(None), Script::Latin);
    assert_eq!(Script::from_language_tag(Some("en-US")), Script::Latin);
    assert_eq!(Script::from_language_tag(Some("ar")), Script::Arabic);
    assert_eq!(Script::from_language_tag(Some("fa_IR")), Script::Arabic);
    assert_eq!(Script::from_language_tag(Some("ur")), Script::Arabic);
    assert_eq!(Script::from_language_tag(Some("he")), Script::Hebrew);
    assert_eq!(Script::from_language_tag(Some("zh-Hans")), Script::Cjk);
    assert_eq!(Script::from_language_tag(Some("JA")), Script::Cjk);
    assert_eq!(Script::from_language_tag(Some("ko")), Script::Cjk);
    assert_eq!(Script::from_language_tag(Some("hero")), Script::Latin);
}

#[test]
fn font_set_falls_back_to_default() {
    let fonts = FontSet::new(Arc::new(Tagged(1.0))).with_face(Script::Cjk, Arc::new(Tagged(2.0)));
    let w = |face: &Arc<dyn GlyphFace>| face.measure("ab", 10.0).unwrap().width;

    assert_eq!(w(fonts.face_for(Script::Latin)), 2.0);
    assert_eq!(w(fonts.face_for(Script::Arabic)), 2.0);
    assert_eq!(w(fonts.face_for_language(Some("zh"))), 4.0);
    assert!(fonts.has_dedicated_face(Script::Cjk));
    assert!(!fonts.has_dedicated_face(Script::Hebrew));
}

#[test]
fn parley_face_rejects_unusable_bytes() {
    assert!(matches!(
        ParleyFace::from_bytes(Vec::new()),
        Err(CreativeError::Font(_))
    ));
    assert!(matches!(
        ParleyFace::from_bytes(b"not a font at all".to_vec()),
        Err(CreativeError::Font(_))
    ));
}

#[test]
fn parley_face_missing_file_is_an_error() {
    assert!(ParleyFace::from_path("/definitely/missing/font.ttf").is_err());
}

#[test]
fn parley_face_shares_one_font_blob() {
    let face = ParleyFace::from_path("tests/data/fonts/DejaVuSansMono.ttf").unwrap();
    let copy = face.clone();

    assert_eq!(face.font.data.id(), face.blob.id());
    assert_eq!(copy.blob.id(), face.blob.id());
    assert!(face.measure("shared bytes", 20.0).unwrap().width > 0.0);
    assert_eq!(face.blob.id(), copy.font.data.id());
}
