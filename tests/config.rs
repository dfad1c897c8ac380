use numlabel::config::MAX_TEXTURE_SIZE;
use numlabel::error::{AtlasError, ConfigError};
use numlabel::renderer::atlas::AtlasBuilder;
use numlabel::renderer::raster::SegmentRasterizer;
use numlabel::AtlasConfig;

#[test]
fn defaults_match_the_classic_digit_style() {
    let c = AtlasConfig::default();
    assert_eq!(c.texture_size, 256);
    assert_eq!(c.font_size, 40.0);
    assert_eq!(c.padding, 8);
    assert_eq!(c.stroke_width, 4.0);
    assert_eq!(c.advance_extra, 2);
    assert_eq!(c.outline_color, [0.0, 0.0, 0.0]);
    assert_eq!(c.fill_color, [0.4, 0.4, 0.8]);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_json_gives_defaults() {
    assert_eq!(AtlasConfig::from_json("{}").unwrap(), AtlasConfig::default());
}

#[test]
fn json_overrides_only_listed_fields() {
    let c = AtlasConfig::from_json(r#"{ "font_size": 32.0, "fill_color": [1.0, 0.8, 0.1] }"#)
        .unwrap();
    assert_eq!(c.font_size, 32.0);
    assert_eq!(c.fill_color, [1.0, 0.8, 0.1]);
    assert_eq!(c.texture_size, 256);
    assert_eq!(c.padding, 8);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = AtlasConfig::from_json(r#"{ "font_sise": 32.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "{err:?}");
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(AtlasConfig::from_json("{ texture_size: 1"), Err(ConfigError::Json(_))));
}

#[test]
fn invalid_values_fail_validation() {
    for json in [
        r#"{ "texture_size": 0 }"#,
        r#"{ "font_size": 0.0 }"#,
        r#"{ "stroke_width": -1.0 }"#,
    ] {
        let err = AtlasConfig::from_json(json).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid(AtlasError::Config(_))),
            "{json}: {err:?}"
        );
    }
}

#[test]
fn zero_stroke_is_allowed() {
    let c = AtlasConfig { stroke_width: 0.0, ..AtlasConfig::default() };
    assert!(c.validate().is_ok());
    assert_eq!(c.glyph_style().stroke_width, 0.0);
}

#[test]
fn glyph_style_uses_byte_colours() {
    let style = AtlasConfig::default().glyph_style();
    assert_eq!(style.outline, [0, 0, 0]);
    assert_eq!(style.fill, [102, 102, 204]);
    assert_eq!(style.stroke_width, 4.0);
}

#[test]
fn oversized_canvas_is_rejected() {
    for size in [MAX_TEXTURE_SIZE + 1, 70_000, u32::MAX] {
        let err = AtlasConfig::from_json(&format!(r#"{{ "texture_size": {size} }}"#)).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid(AtlasError::Config(_))),
            "{size}: {err:?}"
        );
    }
    let largest = AtlasConfig { texture_size: MAX_TEXTURE_SIZE, ..AtlasConfig::default() };
    assert!(largest.validate().is_ok());
}

#[test]
fn builder_refuses_oversized_canvas_without_allocating() {
    let config = AtlasConfig { texture_size: u32::MAX, ..AtlasConfig::default() };
    let r = SegmentRasterizer::new(config.font_size);
    let err = AtlasBuilder::new(config).rasterize(&r).unwrap_err();
    assert!(matches!(err, AtlasError::Config(_)), "{err:?}");
}
