use super::*;

#[test]
fn parse_hex_accepts_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#000000").unwrap(), Rgba8::BLACK);
    assert_eq!(
        Rgba8::parse_hex("FF8000").unwrap(),
        Rgba8::opaque(255, 128, 0)
    );
    assert_eq!(
        Rgba8::parse_hex("#ff800080").unwrap(),
        Rgba8::new(255, 128, 0, 128)
    );
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
}

#[test]
fn hex_display_omits_opaque_alpha() {
    assert_eq!(Rgba8::opaque(1, 2, 3).to_hex(), "#010203");
    assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
}

#[test]
fn premul_of_opaque_color_is_unchanged() {
    let c = Rgba8::opaque(200, 100, 50);
    assert_eq!(c.to_premul(), [200, 100, 50, 255]);
    assert_eq!(Rgba8::from_premul(c.to_premul()), c);
}

#[test]
fn premul_of_half_alpha_scales_channels() {
    let c = Rgba8::new(200, 100, 0, 128);
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
}

#[test]
fn deserializes_hex_object_and_array_forms() {
    let a: Rgba8 = serde_json::from_str("\"#102030\"").unwrap();
    let b: Rgba8 = serde_json::from_str(r#"{"r":16,"g":32,"b":48}"#).unwrap();
    let c: Rgba8 = serde_json::from_str("[16,32,48]").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(serde_json::from_str::<Rgba8>("[1,2]").is_err());
}

#[test]
fn canvas_size_rejects_zero() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    assert_eq!(CanvasSize::new(3, 4).unwrap().width, 3);
}

#[test]
fn export_format_parses_and_names_extension() {
    assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
    assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
    assert_eq!(ExportFormat::Jpeg.extension(), "jpeg");
    assert!("gif".parse::<ExportFormat>().is_err());
}

#[test]
fn with_opacity_scales_alpha_only() {
    let c = Rgba8::new(10, 20, 30, 255);
    assert_eq!(c.with_opacity(0.25), Rgba8::new(10, 20, 30, 64));
    assert_eq!(c.with_opacity(1.5), c);
    assert_eq!(Rgba8::new(255, 255, 255, 179).with_opacity(0.75).a, 134);
    assert_eq!(c.with_opacity(-1.0).a, 0);
}
