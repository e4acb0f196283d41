use super::*;
use crate::foundation::core::ExportFormat;
use crate::foundation::error::SpriteError;

#[test]
fn two_frame_resource_text_is_exact() {
    let cfg = SpritesheetExportConfig {
        columns: 1,
        frame_width: 32,
        frame_height: 48,
        padding: 2,
        ..Default::default()
    };
    let expected = "[gd_resource type=\"SpriteFrames\" load_steps=3 format=2]

[ext_resource path=\"res://spritesheet.png\" type=\"Texture\" id=1]

[resource]
animations = [ {
\"frames\": [ SubResource( 2 ), SubResource( 3 ) ],
\"loop\": true,
\"name\": \"default\",
\"speed\": 10.0
} ]

[sub_resource type=\"AtlasTexture\" id=2]
atlas = ExtResource( 1 )
region = Rect2( 0, 0, 32, 48 )

[sub_resource type=\"AtlasTexture\" id=3]
atlas = ExtResource( 1 )
region = Rect2( 0, 50, 32, 48 )
";
    assert_eq!(godot_sprite_frames(2, &cfg).unwrap(), expected);
}

#[test]
fn regions_follow_grid_and_format() {
    let cfg = SpritesheetExportConfig {
        columns: 4,
        format: ExportFormat::Jpeg,
        fps: 24,
        animation_name: "walk".to_owned(),
        ..Default::default()
    };
    let text = godot_sprite_frames(10, &cfg).unwrap();
    assert!(text.starts_with("[gd_resource type=\"SpriteFrames\" load_steps=11 format=2]\n"));
    assert!(text.contains("res://spritesheet.jpeg"));
    assert!(text.contains("\"name\": \"walk\",\n\"speed\": 24.0\n"));
    assert!(text.contains("id=11]\natlas = ExtResource( 1 )\nregion = Rect2( 66, 132, 64, 64 )\n"));
    assert_eq!(text.matches("[sub_resource").count(), 10);
    assert!(text.ends_with(")\n"));
}

#[test]
fn oversized_layouts_are_rejected_instead_of_overflowing() {
    let cfg = SpritesheetExportConfig {
        frame_width: 70_000,
        frame_height: 70_000,
        columns: 70_000,
        ..Default::default()
    };
    assert!(matches!(
        godot_sprite_frames(3, &cfg),
        Err(SpriteError::Validation(_))
    ));
    // Valid cells, but far too many rows for one sheet.
    let cfg = SpritesheetExportConfig {
        frame_height: 512,
        columns: 1,
        ..Default::default()
    };
    assert!(matches!(
        godot_sprite_frames(1_000, &cfg),
        Err(SpriteError::Validation(_))
    ));
}
