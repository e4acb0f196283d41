//! Frame rendering and sheet tiling.
//!
//! Part images decode in parallel; `collect()` over every decode is the barrier, after which
//! parts composite in declared order no matter which decode finished first.

use rayon::prelude::*;

use crate::animation::frames::{AnimationFrame, FrameContent, RenderedPart};
use crate::export::config::SpritesheetExportConfig;
use crate::export::grid::GridLayout;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::surface::RasterSurface;

/// Decode every part image, in parallel, keeping declared order. Failures come back as `None`.
fn decode_parts(parts: &[(String, RenderedPart)]) -> Vec<Option<RasterSurface>> {
    let decoded = parts
        .par_iter()
        .enumerate()
        .map(|(i, (name, part))| (i, name, RasterSurface::decode(&part.image)))
        .collect::<Vec<_>>();

    let mut out = vec![None; parts.len()];
    for (i, name, res) in decoded {
        match res {
            Ok(img) => out[i] = Some(img),
            Err(e) => tracing::warn!(part = %name, error = %e, "skipping undecodable part"),
        }
    }
    out
}

/// Draw `frame` onto `dest` without clearing it.
///
/// Flattened images stretch to the whole surface. Parts draw through their own transforms;
/// parts that fail to decode or draw are skipped and the rest still draw.
pub(crate) fn render_frame_into(dest: &mut RasterSurface, frame: &AnimationFrame) {
    match &frame.content {
        FrameContent::Flattened(img) => {
            let bounds = dest.bounds();
            if let Err(e) = dest.draw_surface_scaled(img, bounds) {
                tracing::warn!(frame = %frame.id, error = %e, "skipping frame image");
            }
        }
        FrameContent::Parts(parts) => {
            for ((name, part), img) in parts.iter().zip(decode_parts(parts)) {
                let Some(img) = img else {
                    continue;
                };
                if let Err(e) = dest.draw_surface_transformed(&img, part.transform()) {
                    tracing::warn!(part = %name, error = %e, "skipping part image");
                }
            }
        }
    }
}

/// Render one frame onto a fresh transparent `width` x `height` surface.
pub fn render_frame(frame: &AnimationFrame, width: u32, height: u32) -> RasterSurface {
    let mut out = RasterSurface::new(width, height);
    render_frame_into(&mut out, frame);
    out
}

/// Render every frame at cell size, in parallel. Returned in frame order.
pub fn render_cells(
    frames: &[AnimationFrame],
    cfg: &SpritesheetExportConfig,
) -> Vec<RasterSurface> {
    let (w, h) = (cfg.frame_width, cfg.frame_height);
    frames
        .par_iter()
        .map(|f| render_frame(f, w, h))
        .collect()
}

/// Tile `frames` row-major into one sheet. The sheet exists only once every cell has rendered.
#[tracing::instrument(skip(frames, cfg), fields(frames = frames.len()))]
pub fn compose_spritesheet(
    frames: &[AnimationFrame],
    cfg: &SpritesheetExportConfig,
) -> SpriteResult<RasterSurface> {
    cfg.validate()?;
    if frames.is_empty() {
        return Err(SpriteError::precondition("no frames to compose"));
    }
    let grid = GridLayout::new(frames.len(), cfg)?;
    let cells = render_cells(frames, cfg);

    let mut sheet = RasterSurface::new(grid.width(), grid.height());
    for (i, cell) in cells.iter().enumerate() {
        let (x, y) = grid.cell_origin(i);
        sheet.draw_surface(cell, i64::from(x), i64::from(y));
    }
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        rows = grid.rows,
        "composed spritesheet"
    );
    Ok(sheet)
}

#[cfg(test)]
#[path = "../../tests/unit/export/compose.rs"]
mod tests;
