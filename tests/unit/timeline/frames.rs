use super::*;
use crate::foundation::core::Rgba8;

fn paint(live: &mut LayerStack, color: Rgba8) {
    live.active_surface_mut().fill(color);
}

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);
const GREEN: Rgba8 = Rgba8::opaque(0, 255, 0);

#[test]
fn first_add_keeps_drawing_and_starts_blank_frame() {
    let mut live = LayerStack::new(4, 4);
    let mut tl = Timeline::new();
    assert!(tl.is_empty());
    assert_eq!(tl.current(), None);

    paint(&mut live, RED);
    let exports = tl.add_frame(&mut live);
    assert_eq!(exports.len(), 2);
    assert_eq!(tl.current(), Some(1));
    assert!(live.flatten().is_blank());
    assert_eq!(exports[0].image.pixel(0, 0), Some(RED.to_premul()));
    assert!(exports[1].image.is_blank());
    assert_ne!(exports[0].id, exports[1].id);
    assert!(exports.iter().all(|e| e.duration_ms == 100));
}

#[test]
fn round_trip_navigation_preserves_pixels() {
    let mut live = LayerStack::new(4, 4);
    let mut tl = Timeline::new();
    paint(&mut live, RED);
    tl.add_frame(&mut live);
    paint(&mut live, BLUE);
    let before = live.snapshot();

    tl.switch_to(&mut live, 0).unwrap();
    assert_eq!(live.flatten().pixel(2, 2), Some(RED.to_premul()));

    let last = tl.len() - 1;
    tl.switch_to(&mut live, last).unwrap();
    assert_eq!(live.snapshot(), before);
}

#[test]
fn frames_never_alias() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    paint(&mut live, RED);
    tl.add_frame(&mut live);
    tl.switch_to(&mut live, 0).unwrap();
    tl.duplicate_frame(&mut live).unwrap();
    assert_eq!(tl.current(), Some(1));
    assert_eq!(live.flatten().pixel(0, 0), Some(RED.to_premul()));

    // Editing the copy leaves the original untouched.
    paint(&mut live, GREEN);
    let exports = tl.sync(&live);
    assert_eq!(exports[0].image.pixel(0, 0), Some(RED.to_premul()));
    assert_eq!(exports[1].image.pixel(0, 0), Some(GREEN.to_premul()));
    assert_eq!(exports.len(), 3);
}

#[test]
fn duplicate_inserts_after_current() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    tl.add_frame(&mut live);
    assert_eq!(tl.len(), 3);
    tl.switch_to(&mut live, 0).unwrap();
    let ids_before: Vec<u64> = tl.frames().iter().map(|f| f.id).collect();
    tl.duplicate_frame(&mut live).unwrap();
    let ids: Vec<u64> = tl.frames().iter().map(|f| f.id).collect();
    assert_eq!(ids[0], ids_before[0]);
    assert_eq!(&ids[2..], &ids_before[1..]);
    assert_eq!(tl.current(), Some(1));
}

#[test]
fn duplicate_on_empty_timeline_is_rejected() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    assert!(tl.duplicate_frame(&mut live).unwrap_err().is_precondition());
    assert!(tl.is_empty());
}

#[test]
fn switch_restores_saved_active_layer() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    live.add_layer();
    live.set_active(0).unwrap();
    tl.add_frame(&mut live);
    live.set_active(1).unwrap();
    tl.switch_to(&mut live, 0).unwrap();
    assert_eq!(live.active_index(), 0);
    tl.switch_to(&mut live, 1).unwrap();
    assert_eq!(live.active_index(), 1);
}

#[test]
fn switch_out_of_range_changes_nothing() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    paint(&mut live, RED);
    assert!(matches!(
        tl.switch_to(&mut live, 5),
        Err(SpriteError::Validation(_))
    ));
    assert_eq!(tl.current(), Some(1));
    assert_eq!(live.flatten().pixel(0, 0), Some(RED.to_premul()));
}

#[test]
fn delete_current_loads_predecessor() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    paint(&mut live, RED);
    tl.add_frame(&mut live);
    paint(&mut live, BLUE);
    tl.add_frame(&mut live);
    paint(&mut live, GREEN);
    assert_eq!(tl.current(), Some(2));

    let exports = tl.delete_frame(&mut live, 2).unwrap();
    assert_eq!(exports.len(), 2);
    assert_eq!(tl.current(), Some(1));
    assert_eq!(live.flatten().pixel(0, 0), Some(BLUE.to_premul()));

    tl.switch_to(&mut live, 0).unwrap();
    tl.delete_frame(&mut live, 0).unwrap();
    assert_eq!(tl.current(), Some(0));
    assert_eq!(live.flatten().pixel(0, 0), Some(BLUE.to_premul()));
}

#[test]
fn delete_below_current_keeps_live_frame() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    paint(&mut live, GREEN);
    tl.delete_frame(&mut live, 0).unwrap();
    assert_eq!(tl.current(), Some(0));
    assert_eq!(tl.exports()[0].image.pixel(0, 0), Some(GREEN.to_premul()));
}

#[test]
fn deleting_only_frame_empties_timeline() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    tl.delete_frame(&mut live, 0).unwrap();
    paint(&mut live, RED);
    assert!(tl.delete_frame(&mut live, 0).unwrap().is_empty());
    assert!(tl.is_empty());
    assert_eq!(tl.current(), None);
    assert_eq!(live.flatten().pixel(0, 0), Some(RED.to_premul()));
}

#[test]
fn set_duration_validates() {
    let mut live = LayerStack::new(2, 2);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    let exports = tl.set_duration(1, 250).unwrap();
    assert_eq!(exports[1].duration_ms, 250);
    assert!(tl.set_duration(1, 0).is_err());
    assert!(tl.set_duration(9, 10).is_err());
    assert_eq!(tl.frames()[1].duration_ms, 250);
}

#[test]
fn exports_regenerate_missing_previews() {
    let mut live = LayerStack::new(3, 3);
    let mut tl = Timeline::new();
    tl.add_frame(&mut live);
    // The fresh frame has no cached preview yet.
    let exports = tl.exports();
    assert_eq!(exports[1].image.width(), 3);
    assert!(exports[1].image.is_blank());

    let frame: AnimationFrame = exports[0].clone().into();
    assert_eq!(frame.id, exports[0].id.to_string());
}
