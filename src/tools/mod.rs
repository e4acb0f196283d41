//! Pixel-level drawing tools. Each operation targets one surface and takes the previous
//! pointer position (`from`) and the current one (`to`).

mod fill;

pub use fill::flood_fill;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::shapes::{self, Paint};
use crate::raster::surface::RasterSurface;

/// Active tool in the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
    Eyedropper,
    Line,
    Rectangle,
    Circle,
}

impl Tool {
    /// Shape tools preview on the display while dragging and commit once on release.
    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            Self::Line => Some(ShapeKind::Line),
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Segment from the gesture start to the current point.
    Line,
    /// Outline of the box spanned by start and current point.
    Rectangle,
    /// Ring centered on the start point through the current point.
    Circle,
}

/// Current tool, color and brush width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: Rgba8,
    pub size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Rgba8::BLACK,
            size: 5.0,
        }
    }
}

impl ToolSettings {
    pub fn validate(&self) -> SpriteResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(SpriteError::validation(format!(
                "brush size must be positive, got {}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Brush stroke: round-capped line `from`→`to`.
pub fn stroke(surface: &mut RasterSurface, from: Point, to: Point, color: Rgba8, width: f64) {
    shapes::stroke_segment(surface, from, to, width, Paint::color(color));
}

/// Eraser stroke: pixels under the line become transparent (not white).
pub fn erase(surface: &mut RasterSurface, from: Point, to: Point, width: f64) {
    shapes::stroke_segment(surface, from, to, width, Paint::eraser());
}

/// Color under `at` as a new opaque brush color; `None` off-surface. Never mutates.
pub fn eyedropper(surface: &RasterSurface, at: Point) -> Option<Rgba8> {
    let c = surface.color_at(at.x.floor() as i64, at.y.floor() as i64)?;
    Some(Rgba8::opaque(c.r, c.g, c.b))
}

pub fn draw_shape(
    surface: &mut RasterSurface,
    kind: ShapeKind,
    start: Point,
    end: Point,
    color: Rgba8,
    width: f64,
) {
    let paint = Paint::color(color);
    match kind {
        ShapeKind::Line => shapes::stroke_segment(surface, start, end, width, paint),
        ShapeKind::Rectangle => {
            shapes::stroke_rect(surface, Rect::from_points(start, end), width, paint)
        }
        ShapeKind::Circle => {
            let radius = (end - start).hypot();
            shapes::stroke_circle(surface, start, radius, width, paint)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tools/tools.rs"]
mod tests;
