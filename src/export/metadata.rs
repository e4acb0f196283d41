//! Godot `SpriteFrames` resource text describing each sheet cell as an atlas region.

use crate::export::config::SpritesheetExportConfig;
use crate::export::grid::GridLayout;
use crate::foundation::error::SpriteResult;

/// File name the resource is written under.
pub const METADATA_FILE_NAME: &str = "spritesheet.tres";

/// Resource text for a `frame_count`-frame sheet laid out by `cfg`.
///
/// Sub-resource ids start at 2 (id 1 is the sheet texture). The output is consumed by the
/// engine as-is, so spacing and line breaks are fixed. Fails for configs that do not validate
/// or whose sheet would be too large.
pub fn godot_sprite_frames(
    frame_count: usize,
    cfg: &SpritesheetExportConfig,
) -> SpriteResult<String> {
    cfg.validate()?;
    let grid = GridLayout::new(frame_count, cfg)?;
    let refs = (0..frame_count)
        .map(|i| format!("SubResource( {} )", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    let regions = (0..frame_count)
        .map(|i| {
            let (x, y) = grid.cell_origin(i);
            format!(
                "[sub_resource type=\"AtlasTexture\" id={}]\natlas = ExtResource( 1 )\nregion = Rect2( {x}, {y}, {}, {} )",
                i + 2,
                cfg.frame_width,
                cfg.frame_height
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!(
        "[gd_resource type=\"SpriteFrames\" load_steps={steps} format=2]\n\
         \n\
         [ext_resource path=\"res://spritesheet.{ext}\" type=\"Texture\" id=1]\n\
         \n\
         [resource]\n\
         animations = [ {{\n\
         \"frames\": [ {refs} ],\n\
         \"loop\": true,\n\
         \"name\": \"{name}\",\n\
         \"speed\": {fps}.0\n\
         }} ]\n\
         \n\
         {regions}\n",
        steps = frame_count + 1,
        ext = cfg.format.extension(),
        name = cfg.animation_name,
        fps = cfg.fps,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/export/metadata.rs"]
mod tests;
