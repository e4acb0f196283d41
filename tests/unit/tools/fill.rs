use super::*;

fn painted_with(s: &RasterSurface, c: Rgba8) -> usize {
    let px = c.to_premul();
    s.data().chunks_exact(4).filter(|p| *p == px).count()
}

#[test]
fn fill_uniform_surface_replaces_every_pixel() {
    let n = 16u32;
    let mut s = RasterSurface::new(n, n);
    s.fill(Rgba8::WHITE);
    let red = Rgba8::opaque(255, 0, 0);
    assert!(flood_fill(&mut s, Point::new(3.0, 7.0), red));
    assert_eq!(painted_with(&s, red), (n * n) as usize);
}

#[test]
fn fill_with_same_color_is_noop() {
    let mut s = RasterSurface::new(8, 8);
    s.fill(Rgba8::WHITE);
    let before = s.clone();
    assert!(!flood_fill(&mut s, Point::new(1.0, 1.0), Rgba8::WHITE));
    assert_eq!(s, before);
}

#[test]
fn fill_stops_at_boundary_and_ignores_diagonals() {
    // Vertical wall at x = 2 splits the surface.
    let mut s = RasterSurface::new(5, 5);
    for y in 0..5 {
        s.set_pixel(2, y, Rgba8::BLACK.to_premul());
    }
    let green = Rgba8::opaque(0, 255, 0);
    assert!(flood_fill(&mut s, Point::new(0.0, 0.0), green));
    assert_eq!(painted_with(&s, green), 10);
    assert_eq!(s.pixel(3, 0), Some([0, 0, 0, 0]));

    // A diagonal gap is not a 4-connected path.
    let mut d = RasterSurface::new(2, 2);
    d.set_pixel(1, 0, Rgba8::BLACK.to_premul());
    d.set_pixel(0, 1, Rgba8::BLACK.to_premul());
    flood_fill(&mut d, Point::new(0.0, 0.0), green);
    assert_eq!(d.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn fill_matches_exact_rgba_only() {
    let mut s = RasterSurface::new(3, 1);
    s.set_pixel(0, 0, [10, 10, 10, 255]);
    s.set_pixel(1, 0, [11, 10, 10, 255]);
    s.set_pixel(2, 0, [10, 10, 10, 255]);
    flood_fill(&mut s, Point::new(0.0, 0.0), Rgba8::WHITE);
    assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(1, 0), Some([11, 10, 10, 255]));
    assert_eq!(s.pixel(2, 0), Some([10, 10, 10, 255]));
}

#[test]
fn fill_outside_surface_is_noop() {
    let mut s = RasterSurface::new(2, 2);
    assert!(!flood_fill(&mut s, Point::new(-1.0, 0.0), Rgba8::WHITE));
    assert!(!flood_fill(&mut s, Point::new(0.0, 9.0), Rgba8::WHITE));
    assert!(s.is_blank());
}

#[test]
fn fill_large_region_terminates() {
    let mut s = RasterSurface::new(512, 512);
    assert!(flood_fill(&mut s, Point::new(256.0, 256.0), Rgba8::BLACK));
    assert_eq!(painted_with(&s, Rgba8::BLACK), 512 * 512);
}
