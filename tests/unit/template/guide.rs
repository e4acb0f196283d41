use super::*;

fn one_part(x: f64, y: f64, w: f64, h: f64) -> Template {
    Template::from_json_slice(
        format!(
            r#"{{"name":"t","frames":[{{"id":1,"parts":{{
                "body":{{"position":{{"x":{x},"y":{y}}},"size":{{"width":{w},"height":{h}}}}}}}}}]}}"#
        )
        .as_bytes(),
    )
    .unwrap()
}

#[test]
fn large_template_fits_within_eighty_percent() {
    let t = one_part(0.0, 0.0, 2000.0, 1000.0);
    let canvas = CanvasSize {
        width: 800,
        height: 600,
    };
    let layout = GuideLayout::fit(&t, canvas).unwrap();
    assert!((layout.scale - 0.32).abs() < 1e-12);
    let b = layout.canvas_bounds();
    assert!(b.width() <= 0.8 * 800.0 + 1e-9);
    assert!(b.height() <= 0.8 * 600.0 + 1e-9);
    assert!((b.x0 - 80.0).abs() < 1e-9);
    // Centred vertically, then lifted by 5% of the canvas height.
    assert!((b.y0 - 110.0).abs() < 1e-9);
}

#[test]
fn tiny_template_is_capped() {
    let t = one_part(10.0, 10.0, 10.0, 10.0);
    let layout = GuideLayout::fit(
        &t,
        CanvasSize {
            width: 800,
            height: 600,
        },
    )
    .unwrap();
    assert_eq!(layout.scale, MAX_SCALE);
    let c = layout.canvas_bounds().center();
    assert!((c.x - 400.0).abs() < 1e-9);
    assert!((c.y - 270.0).abs() < 1e-9);
}

#[test]
fn fit_needs_parts() {
    let t = Template::from_json_slice(br#"{"name":"e","frames":[{"id":1,"parts":{}}]}"#).unwrap();
    assert_eq!(GuideLayout::fit(&t, CanvasSize::default()), None);
}

#[test]
fn underlay_is_faint_and_filled() {
    let t = one_part(0.0, 0.0, 100.0, 100.0);
    let mut s = RasterSurface::new(100, 100);
    render_underlay(&mut s, &t);
    assert!(!s.is_blank());
    let b = GuideLayout::fit(&t, CanvasSize { width: 100, height: 100 })
        .unwrap()
        .canvas_bounds();
    // A point inside the box, away from the centred label.
    let px = s.pixel(b.x0 as i64 + 6, b.y0 as i64 + 6).unwrap();
    assert!(px[3] > 0 && px[3] < 128, "{px:?}");
}

#[test]
fn overlay_leaves_interior_away_from_label_untouched() {
    let t = one_part(0.0, 0.0, 100.0, 100.0);
    let mut s = RasterSurface::new(100, 100);
    render_overlay(&mut s, &t);
    let b = GuideLayout::fit(&t, CanvasSize { width: 100, height: 100 })
        .unwrap()
        .canvas_bounds();
    assert_eq!(s.pixel(b.x0 as i64 + 6, b.y0 as i64 + 6), Some([0, 0, 0, 0]));
    let outline = s.pixel(b.x0 as i64 + 1, b.y0 as i64).unwrap();
    assert!(outline[3] > 128, "{outline:?}");
}

#[test]
fn guide_on_empty_template_draws_nothing() {
    let t = Template::from_json_slice(br#"{"name":"e","frames":[{"id":1,"parts":{}}]}"#).unwrap();
    let mut s = RasterSurface::new(10, 10);
    render_overlay(&mut s, &t);
    assert!(s.is_blank());
}

#[test]
fn overlay_labels_sit_on_a_light_box_at_the_part_center() {
    let t = one_part(0.0, 0.0, 20.0, 20.0);
    let mut s = RasterSurface::new(200, 200);
    render_overlay(&mut s, &t);
    let layout = GuideLayout::fit(&t, CanvasSize { width: 200, height: 200 }).unwrap();
    assert_eq!(layout.scale, MAX_SCALE);
    let c = layout.canvas_bounds().center();
    let (cx, cy) = (c.x as i64, c.y as i64);

    let mut light = 0;
    let mut dark = 0;
    for y in cy - 12..cy + 12 {
        for x in cx - 40..cx + 40 {
            let Some(px) = s.color_at(x, y) else {
                continue;
            };
            if px.a > 100 && px.r > 200 {
                light += 1;
            }
            if px.a > 150 && px.r < 100 {
                dark += 1;
            }
        }
    }
    assert!(light > 0, "no label background");
    assert!(dark > 0, "no label text");
}
