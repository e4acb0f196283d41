//! `vello_cpu` bridge.
//!
//! Geometry and images are rasterized into a scratch pixmap that covers only the touched
//! pixels, then blended onto the [`RasterSurface`] with the exact premultiplied operators in
//! [`blend`](crate::raster::blend). Keeping the final write on our side is what lets the eraser
//! stay a true `destination-out`.

use std::sync::Arc;

use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::blend::BlendMode;
use crate::raster::surface::RasterSurface;

/// Largest scratch pixmap edge. Larger areas render tile by tile.
const TILE: u32 = 1024;

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Render `draw` over `area` (surface pixel space) and blend the result onto `surface`.
///
/// `draw` gets the context plus the transform from surface space to the current tile, and must
/// install it (optionally followed by its own transform) before emitting anything. It runs once
/// per tile.
pub(crate) fn rasterize<F>(surface: &mut RasterSurface, area: Rect, mode: BlendMode, draw: F)
where
    F: Fn(&mut vello_cpu::RenderContext, vello_cpu::kurbo::Affine),
{
    if !area.is_finite() {
        return;
    }
    let area = area.abs().intersect(surface.bounds());
    if !(area.width() > 0.0 && area.height() > 0.0) {
        return;
    }
    let x0 = area.x0.floor() as u32;
    let y0 = area.y0.floor() as u32;
    let x1 = (area.x1.ceil() as u32).min(surface.width());
    let y1 = (area.y1.ceil() as u32).min(surface.height());

    let mut ty = y0;
    while ty < y1 {
        let th = (y1 - ty).min(TILE);
        let mut tx = x0;
        while tx < x1 {
            let tw = (x1 - tx).min(TILE);
            render_tile(surface, (tx, ty), (tw, th), mode, &draw);
            tx += tw;
        }
        ty += th;
    }
}

fn render_tile<F>(
    surface: &mut RasterSurface,
    (tx, ty): (u32, u32),
    (tw, th): (u32, u32),
    mode: BlendMode,
    draw: &F,
) where
    F: Fn(&mut vello_cpu::RenderContext, vello_cpu::kurbo::Affine),
{
    // Both edges are at most TILE.
    let (w, h) = (tw as u16, th as u16);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let base = vello_cpu::kurbo::Affine::translate((-f64::from(tx), -f64::from(ty)));
    draw(&mut ctx, base);

    let mut scratch = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut scratch);

    let row = usize::from(w);
    for (i, px) in scratch.data().iter().enumerate() {
        if px.a == 0 {
            continue;
        }
        let x = i64::from(tx) + (i % row) as i64;
        let y = i64::from(ty) + (i / row) as i64;
        surface.blend_pixel(x, y, [px.r, px.g, px.b, px.a], 255, mode);
    }
}

/// Nearest-sampled image paint over a surface's premultiplied pixels.
pub(crate) fn surface_image(src: &RasterSurface) -> SpriteResult<vello_cpu::Image> {
    let w: u16 = src
        .width()
        .try_into()
        .map_err(|_| SpriteError::validation("image width exceeds u16"))?;
    let h: u16 = src
        .height()
        .try_into()
        .map_err(|_| SpriteError::validation("image height exceeds u16"))?;
    // Pixmap stores PremulRgba8; surface bytes are already premultiplied.
    let pixels = src
        .data()
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler {
            quality: vello_cpu::peniko::ImageQuality::Low,
            ..Default::default()
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/cpu.rs"]
mod tests;
