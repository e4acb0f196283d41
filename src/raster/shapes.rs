//! Stroked and filled primitives behind the tools and the template guide.
//!
//! Each call builds its geometry once and hands it to `vello_cpu` (see [`cpu`](super::cpu)),
//! so overlapping parts of a single shape never paint twice.

use vello_cpu::kurbo::{Cap, Circle, Join, Line, Shape, Stroke};

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::raster::blend::BlendMode;
use crate::raster::cpu::{color_to_cpu, point_to_cpu, rasterize, rect_to_cpu};
use crate::raster::surface::RasterSurface;

const PATH_TOLERANCE: f64 = 0.1;

/// Color and blend mode for a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgba8,
    pub mode: BlendMode,
}

impl Paint {
    pub fn color(color: Rgba8) -> Self {
        Self {
            color,
            mode: BlendMode::SourceOver,
        }
    }

    /// Paint that removes pixels (`destination-out` with an opaque source).
    pub fn eraser() -> Self {
        Self {
            color: Rgba8::WHITE,
            mode: BlendMode::DestinationOut,
        }
    }
}

/// Dash pattern in pixels: `on` painted, `off` skipped, starting at the path origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub on: f64,
    pub off: f64,
}

impl Dash {
    fn is_solid(self) -> bool {
        !(self.on > 0.0 && self.off > 0.0)
    }
}

/// Widths below one pixel (or non-finite) draw as a one-pixel hairline.
fn line_width(width: f64) -> f64 {
    if width.is_finite() && width >= 1.0 {
        width
    } else {
        1.0
    }
}

/// Round-capped line from `a` to `b` with the given `width`. A zero-length segment is a dot.
pub fn stroke_segment(surface: &mut RasterSurface, a: Point, b: Point, width: f64, paint: Paint) {
    let width = line_width(width);
    let area = Rect::from_points(a, b).inflate(width, width);
    rasterize(surface, area, paint.mode, |ctx, base| {
        ctx.set_transform(base);
        ctx.set_paint(color_to_cpu(paint.color));
        if a == b {
            let dot = Circle::new(point_to_cpu(a), width / 2.0);
            ctx.fill_path(&dot.to_path(PATH_TOLERANCE));
        } else {
            ctx.set_stroke(
                Stroke::new(width)
                    .with_caps(Cap::Round)
                    .with_join(Join::Round),
            );
            let line = Line::new(point_to_cpu(a), point_to_cpu(b));
            ctx.stroke_path(&line.to_path(PATH_TOLERANCE));
        }
    });
}

pub fn fill_rect(surface: &mut RasterSurface, rect: Rect, paint: Paint) {
    let rect = rect.abs();
    rasterize(surface, rect, paint.mode, |ctx, base| {
        ctx.set_transform(base);
        ctx.set_paint(color_to_cpu(paint.color));
        ctx.fill_rect(&rect_to_cpu(rect));
    });
}

/// Rectangle outline centered on the edges of `rect`, with square corners.
pub fn stroke_rect(surface: &mut RasterSurface, rect: Rect, width: f64, paint: Paint) {
    stroke_rect_inner(surface, rect, width, None, paint);
}

/// Dashed rectangle outline. The dash runs clockwise from the top-left corner.
pub fn stroke_rect_dashed(
    surface: &mut RasterSurface,
    rect: Rect,
    width: f64,
    dash: Dash,
    paint: Paint,
) {
    stroke_rect_inner(surface, rect, width, Some(dash), paint);
}

fn stroke_rect_inner(
    surface: &mut RasterSurface,
    rect: Rect,
    width: f64,
    dash: Option<Dash>,
    paint: Paint,
) {
    let rect = rect.abs();
    let width = line_width(width);
    let mut stroke = Stroke::new(width).with_join(Join::Miter);
    if let Some(d) = dash.filter(|d| !d.is_solid()) {
        stroke = stroke.with_dashes(0.0, [d.on, d.off]);
    }
    rasterize(surface, rect.inflate(width, width), paint.mode, |ctx, base| {
        ctx.set_transform(base);
        ctx.set_paint(color_to_cpu(paint.color));
        ctx.set_stroke(stroke.clone());
        ctx.stroke_rect(&rect_to_cpu(rect));
    });
}

/// Circle outline of `radius` around `c`.
pub fn stroke_circle(surface: &mut RasterSurface, c: Point, radius: f64, width: f64, paint: Paint) {
    let width = line_width(width);
    let radius = radius.abs();
    let reach = radius + width;
    let area = Rect::new(c.x - reach, c.y - reach, c.x + reach, c.y + reach);
    rasterize(surface, area, paint.mode, |ctx, base| {
        ctx.set_transform(base);
        ctx.set_paint(color_to_cpu(paint.color));
        ctx.set_stroke(Stroke::new(width));
        let circle = Circle::new(point_to_cpu(c), radius);
        ctx.stroke_path(&circle.to_path(PATH_TOLERANCE));
    });
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shapes.rs"]
mod tests;
