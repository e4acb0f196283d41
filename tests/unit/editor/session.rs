use super::*;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

fn editor(w: u32, h: u32) -> Editor {
    Editor::new(EditorOptions {
        canvas: CanvasSize {
            width: w,
            height: h,
        },
        ..Default::default()
    })
    .unwrap()
}

fn template() -> Template {
    Template::from_json_slice(
        br#"{"name":"t","frames":[{"id":1,"parts":{
            "head":{"position":{"x":0,"y":0},"size":{"width":10,"height":10}},
            "body":{"position":{"x":0,"y":10},"size":{"width":10,"height":20}}}}]}"#,
    )
    .unwrap()
}

#[test]
fn rejects_bad_options() {
    let zero = EditorOptions {
        canvas: CanvasSize {
            width: 0,
            height: 10,
        },
        ..Default::default()
    };
    assert!(Editor::new(zero).is_err());
    let mut bad_brush = EditorOptions::default();
    bad_brush.tools.size = 0.0;
    assert!(Editor::new(bad_brush).is_err());
}

#[test]
fn brush_drag_paints_layer_and_display() {
    let mut ed = editor(20, 20);
    ed.settings_mut().color = RED;
    ed.settings_mut().size = 2.0;
    ed.pointer_down(Point::new(2.5, 10.5));
    ed.pointer_move(Point::new(17.5, 10.5));
    ed.pointer_up(Point::new(17.5, 10.5));

    let layer = &ed.layers().active_layer().surface;
    assert_eq!(layer.pixel(10, 10), Some(RED.to_premul()));
    assert_eq!(ed.display().pixel(10, 10), Some(RED.to_premul()));
    assert_eq!(layer.pixel(10, 2), Some([0, 0, 0, 0]));
}

#[test]
fn move_without_pointer_down_is_ignored() {
    let mut ed = editor(10, 10);
    assert_eq!(ed.pointer_move(Point::new(5.0, 5.0)), None);
    assert_eq!(ed.pointer_up(Point::new(5.0, 5.0)), None);
    assert!(ed.layers().flatten().is_blank());
}

#[test]
fn eraser_clears_to_transparent() {
    let mut ed = editor(10, 10);
    ed.layers_mut().active_surface_mut().fill(RED);
    ed.settings_mut().tool = Tool::Eraser;
    ed.settings_mut().size = 3.0;
    ed.pointer_down(Point::new(5.5, 5.5));
    ed.pointer_up(Point::new(5.5, 5.5));
    assert_eq!(ed.layers().active_layer().surface.pixel(5, 5), Some([0, 0, 0, 0]));
    assert_eq!(ed.display().pixel(5, 5), Some([0, 0, 0, 0]));
    assert_eq!(ed.display().pixel(0, 0), Some(RED.to_premul()));
}

#[test]
fn fill_and_eyedropper_round_trip() {
    let mut ed = editor(8, 8);
    ed.settings_mut().tool = Tool::Fill;
    ed.settings_mut().color = Rgba8::opaque(10, 20, 30);
    ed.pointer_down(Point::new(1.0, 1.0));
    ed.pointer_up(Point::new(1.0, 1.0));

    ed.settings_mut().color = Rgba8::WHITE;
    ed.settings_mut().tool = Tool::Eyedropper;
    let ev = ed.pointer_down(Point::new(4.0, 4.0));
    assert_eq!(ev, Some(EditorEvent::ColorPicked(Rgba8::opaque(10, 20, 30))));
    assert_eq!(ed.settings().color, Rgba8::opaque(10, 20, 30));
    ed.pointer_up(Point::new(4.0, 4.0));
}

#[test]
fn shape_preview_stays_off_the_layer_until_release() {
    let mut ed = editor(20, 20);
    ed.settings_mut().tool = Tool::Line;
    ed.settings_mut().size = 1.0;
    ed.pointer_down(Point::new(0.5, 5.5));
    ed.pointer_move(Point::new(19.5, 5.5));
    assert!(ed.layers().flatten().is_blank());
    assert_ne!(ed.display().pixel(10, 5), Some([0, 0, 0, 0]));

    // Moving again replaces the preview instead of accumulating it.
    ed.pointer_move(Point::new(19.5, 15.5));
    assert_eq!(ed.display().pixel(18, 5), Some([0, 0, 0, 0]));

    ed.pointer_up(Point::new(19.5, 15.5));
    let layer = &ed.layers().active_layer().surface;
    // The round cap leaves the end pixel mostly, not fully, covered.
    assert!(layer.pixel(19, 15).is_some_and(|px| px[..3] == [0, 0, 0] && px[3] > 128));
    assert_eq!(layer.pixel(18, 5), Some([0, 0, 0, 0]));
}

#[test]
fn template_guides_frame_the_layers() {
    let mut ed = editor(100, 100);
    ed.set_template(Some(template()));
    assert!(!ed.display().is_blank());
    assert!(ed.layers().flatten().is_blank());

    ed.set_guides(false, false);
    assert!(ed.display().is_blank());
    ed.set_template(None);
    assert!(ed.template().is_none());
}

#[test]
fn capture_requires_template() {
    let mut ed = editor(16, 16);
    assert!(ed.capture_sprite_parts().unwrap_err().is_precondition());
    assert!(
        ed.generate_animation_frames(&SpriteParts::new())
            .unwrap_err()
            .is_precondition()
    );

    ed.layers_mut().active_surface_mut().fill(RED);
    ed.set_template(Some(template()));
    let parts = ed.capture_sprite_parts().unwrap();
    assert_eq!(parts.len(), 2);
    let img = RasterSurface::decode(&parts["head"].image).unwrap();
    assert_eq!((img.width(), img.height()), (16, 16));
    // The guide is never baked into captured art.
    assert_eq!(img.pixel(0, 0), Some(RED.to_premul()));

    let frames = ed.generate_animation_frames(&parts).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].parts().len(), 2);
}

#[test]
fn layer_wrappers_recomposite() {
    let mut ed = editor(4, 4);
    ed.layers_mut().active_surface_mut().fill(RED);
    ed.recomposite();
    ed.toggle_layer_visibility(0).unwrap();
    assert!(ed.display().is_blank());
    ed.add_layer();
    assert_eq!(ed.layers().len(), 2);
    ed.delete_layer(0).unwrap();
    assert!(ed.delete_layer(0).unwrap_err().is_precondition());
    assert!(ed.set_active_layer(3).is_err());
}

#[test]
fn clear_active_layer_leaves_other_layers() {
    let mut ed = editor(4, 4);
    ed.layers_mut().active_surface_mut().fill(RED);
    ed.add_layer();
    ed.layers_mut().active_surface_mut().fill(Rgba8::WHITE);
    ed.recomposite();
    assert_eq!(ed.display().pixel(1, 1), Some([255, 255, 255, 255]));

    ed.clear_active_layer();
    assert!(ed.layers().active_layer().surface.is_blank());
    assert_eq!(ed.display().pixel(1, 1), Some(RED.to_premul()));
}

#[test]
fn timeline_operations_reload_display() {
    let mut ed = editor(4, 4);
    ed.layers_mut().active_surface_mut().fill(RED);
    ed.recomposite();
    let exports = ed.add_frame();
    assert_eq!(exports.len(), 2);
    assert!(ed.display().is_blank());

    ed.switch_frame(0).unwrap();
    assert_eq!(ed.display().pixel(0, 0), Some(RED.to_premul()));
    ed.duplicate_frame().unwrap();
    assert_eq!(ed.timeline().len(), 3);
    ed.set_frame_duration(1, 40).unwrap();
    let anim = ed.timeline_animation();
    assert_eq!(anim.len(), 3);
    assert_eq!(anim[1].duration_ms, 40);
    ed.delete_frame(2).unwrap();
    assert_eq!(ed.frame_exports().len(), 2);
}

#[test]
fn animation_without_frames_uses_live_drawing() {
    let mut ed = editor(4, 4);
    ed.layers_mut().active_surface_mut().fill(RED);
    let anim = ed.timeline_animation();
    assert_eq!(anim.len(), 1);
    assert!(ed.timeline().is_empty());
}
