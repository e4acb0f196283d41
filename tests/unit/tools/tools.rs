use super::*;

#[test]
fn brush_then_eraser_leaves_transparent_pixels() {
    let mut s = RasterSurface::new(10, 3);
    let from = Point::new(0.5, 1.5);
    let to = Point::new(9.5, 1.5);
    stroke(&mut s, from, to, Rgba8::opaque(255, 0, 0), 1.0);
    assert_eq!(s.pixel(4, 1), Some([255, 0, 0, 255]));

    // Partially covered cap pixels only lose part of their alpha, so erase past both ends.
    erase(&mut s, Point::new(-2.0, 1.5), Point::new(12.0, 1.5), 1.0);
    assert!(s.is_blank());
}

#[test]
fn eyedropper_reports_opaque_color_without_mutation() {
    let mut s = RasterSurface::new(2, 2);
    s.set_pixel(1, 1, Rgba8::new(0, 0, 255, 128).to_premul());
    let before = s.clone();
    let picked = eyedropper(&s, Point::new(1.2, 1.9)).unwrap();
    assert_eq!(picked.a, 255);
    assert!(picked.b >= 254);
    assert_eq!(s, before);
    assert_eq!(eyedropper(&s, Point::new(5.0, 5.0)), None);
}

#[test]
fn shape_tools_map_to_shape_kinds() {
    assert_eq!(Tool::Line.shape(), Some(ShapeKind::Line));
    assert_eq!(Tool::Rectangle.shape(), Some(ShapeKind::Rectangle));
    assert_eq!(Tool::Circle.shape(), Some(ShapeKind::Circle));
    assert_eq!(Tool::Brush.shape(), None);
    assert_eq!(Tool::Fill.shape(), None);
}

#[test]
fn rectangle_shape_accepts_reversed_corners() {
    let mut a = RasterSurface::new(10, 10);
    let mut b = RasterSurface::new(10, 10);
    let (p, q) = (Point::new(1.5, 1.5), Point::new(7.5, 6.5));
    draw_shape(&mut a, ShapeKind::Rectangle, p, q, Rgba8::BLACK, 1.0);
    draw_shape(&mut b, ShapeKind::Rectangle, q, p, Rgba8::BLACK, 1.0);
    assert_eq!(a, b);
    assert!(!a.is_blank());
}

#[test]
fn circle_shape_radius_follows_drag_distance() {
    let mut s = RasterSurface::new(20, 20);
    draw_shape(
        &mut s,
        ShapeKind::Circle,
        Point::new(10.5, 10.5),
        Point::new(15.5, 10.5),
        Rgba8::BLACK,
        1.0,
    );
    assert!(s.pixel(15, 10).is_some_and(|px| px[3] > 192));
    assert_eq!(s.pixel(10, 10), Some([0, 0, 0, 0]));
}

#[test]
fn settings_default_and_validate() {
    let s = ToolSettings::default();
    assert_eq!(s.tool, Tool::Brush);
    assert_eq!(s.color, Rgba8::BLACK);
    assert_eq!(s.size, 5.0);
    assert!(s.validate().is_ok());
    assert!(ToolSettings { size: 0.0, ..s }.validate().is_err());
}

#[test]
fn settings_deserialize_with_defaults() {
    let s: ToolSettings = serde_json::from_str(r##"{"tool":"fill","color":"#ff0000"}"##).unwrap();
    assert_eq!(s.tool, Tool::Fill);
    assert_eq!(s.color, Rgba8::opaque(255, 0, 0));
    assert_eq!(s.size, 5.0);
}
