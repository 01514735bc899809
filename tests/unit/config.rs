use super::*;

#[test]
fn defaults_validate() {
    ComposerConfig::default().validate().unwrap();
    ComplianceConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = ComposerConfig::from_json_str(
        r##"{"padding_px": 24, "parallel": false, "compliance": {"color_tolerance": 10},
            "vignette": {"color": "#101010"}}"##,
    )
    .unwrap();
    assert_eq!(cfg.padding_px, 24);
    assert!(!cfg.parallel);
    assert_eq!(cfg.min_contrast_ratio, 7.0);
    assert_eq!(cfg.gradient, GradientSpec::default());
    let compliance = cfg.compliance.unwrap();
    assert_eq!(compliance.color_tolerance, 10.0);
    assert_eq!(compliance.pass_threshold, 70.0);
    let vignette = cfg.vignette.unwrap();
    assert_eq!(vignette.color, crate::foundation::core::Rgb::new(16, 16, 16));
    assert_eq!(vignette.strength, 0.7);
}

#[test]
fn invalid_values_are_rejected() {
    let err = ComposerConfig::from_json_str(r#"{"shrink_factor": 1.5}"#).unwrap_err();
    assert!(matches!(err, CreativeError::Validation(_)));

    let err = ComposerConfig::from_json_str(r#"{"min_font_px": 80}"#).unwrap_err();
    assert!(matches!(err, CreativeError::Validation(_)));

    let err = ComplianceConfig::from_json_str(r#"{"readability_dead_zone": [150, 120]}"#)
        .unwrap_err();
    assert!(matches!(err, CreativeError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ComposerConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, CreativeError::Serde(_)));
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("composer.json");
    std::fs::write(&path, r#"{"jpeg_quality": 90}"#).unwrap();
    assert_eq!(ComposerConfig::from_path(&path).unwrap().jpeg_quality, 90);
    assert!(matches!(
        ComposerConfig::from_path(dir.path().join("missing.json")),
        Err(CreativeError::Io(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let err = ComposerConfig::from_json_str(r#"{"threads": 0}"#).unwrap_err();
    assert!(matches!(err, CreativeError::Validation(_)));
    assert_eq!(
        ComposerConfig::from_json_str(r#"{"threads": 2}"#).unwrap().threads,
        Some(2)
    );
}
