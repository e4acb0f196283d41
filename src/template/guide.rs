//! Non-destructive template guide drawn under (tracing aid) or over (outline) the layers.
//!
//! Styles are passed to the rasterizers per call, so nothing a guide sets can carry over
//! into later draws on the same surface.

use crate::foundation::core::{Affine, CanvasSize, Point, Rect, Rgba8, Vec2};
use crate::raster::shapes::{Dash, Paint, fill_rect, stroke_rect, stroke_rect_dashed};
use crate::raster::surface::RasterSurface;
use crate::raster::text::TextLabel;
use crate::template::model::Template;

/// Fraction of each canvas dimension the guide may occupy.
pub const FIT_RATIO: f64 = 0.8;
/// Upper bound on the template-to-canvas scale (base 6.0 with 20% headroom).
pub const MAX_SCALE: f64 = 6.0 * 1.2;
/// Upward shift as a fraction of canvas height, leaving room below for legs and feet.
pub const UPWARD_BIAS: f64 = 0.05;

/// Label font size in template units.
const LABEL_SIZE: f64 = 4.0;
const LABEL_PADDING: f64 = 2.0;

/// Underlay / overlay appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideStyle {
    pub opacity: f32,
    pub stroke: Rgba8,
    pub fill: Option<Rgba8>,
    /// In template units; scaled with the guide.
    pub line_width: f64,
    /// In template units.
    pub dash: Option<Dash>,
    pub text: Rgba8,
    pub label_background: Option<Rgba8>,
}

impl GuideStyle {
    pub const UNDERLAY: Self = Self {
        opacity: 0.25,
        stroke: Rgba8::opaque(0x44, 0x44, 0x44),
        fill: Some(Rgba8::opaque(0xf0, 0xf0, 0xf0)),
        line_width: 1.5,
        dash: None,
        text: Rgba8::opaque(0x44, 0x44, 0x44),
        label_background: None,
    };

    pub const OVERLAY: Self = Self {
        opacity: 0.75,
        stroke: Rgba8::opaque(0x22, 0x22, 0x22),
        fill: None,
        line_width: 2.0,
        dash: Some(Dash { on: 5.0, off: 5.0 }),
        text: Rgba8::BLACK,
        // rgba(255,255,255,0.7)
        label_background: Some(Rgba8::new(255, 255, 255, 179)),
    };
}

/// Uniform scale plus translation mapping template units onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLayout {
    pub scale: f64,
    pub translate: Vec2,
    /// Template-space bounding box of the reference frame.
    pub bounds: Rect,
}

impl GuideLayout {
    /// Fit the template's first frame into `canvas`. `None` when there is nothing to draw.
    pub fn fit(template: &Template, canvas: CanvasSize) -> Option<Self> {
        let bounds = template.first_frame()?.bounds()?;
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        let (tw, th) = (bounds.width(), bounds.height());

        let width_scale = cw * FIT_RATIO / tw;
        let height_scale = ch * FIT_RATIO / th;
        let scale = width_scale.min(height_scale).min(MAX_SCALE);

        let translate = Vec2::new(
            (cw - tw * scale) / 2.0 - bounds.x0 * scale,
            (ch - th * scale) / 2.0 - bounds.y0 * scale - ch * UPWARD_BIAS,
        );
        Some(Self {
            scale,
            translate,
            bounds,
        })
    }

    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    pub fn to_canvas(&self, p: Point) -> Point {
        self.transform() * p
    }

    pub fn rect_to_canvas(&self, r: Rect) -> Rect {
        Rect::from_points(self.to_canvas(r.origin()), self.to_canvas(Point::new(r.x1, r.y1)))
    }

    /// Canvas-space box of the whole reference pose.
    pub fn canvas_bounds(&self) -> Rect {
        self.rect_to_canvas(self.bounds)
    }
}

/// Faint filled boxes drawn before the layers.
pub fn render_underlay(surface: &mut RasterSurface, template: &Template) {
    render_guide(surface, template, GuideStyle::UNDERLAY);
}

/// Dashed outlines with readable labels drawn after the layers.
pub fn render_overlay(surface: &mut RasterSurface, template: &Template) {
    render_guide(surface, template, GuideStyle::OVERLAY);
}

pub fn render_guide(surface: &mut RasterSurface, template: &Template, style: GuideStyle) {
    let canvas = CanvasSize {
        width: surface.width(),
        height: surface.height(),
    };
    let (Some(layout), Some(frame)) = (GuideLayout::fit(template, canvas), template.first_frame())
    else {
        tracing::warn!(template = %template.name, "template has no parts to draw");
        return;
    };

    let s = layout.scale;
    let stroke = Paint::color(style.stroke.with_opacity(style.opacity));
    let text = style.text.with_opacity(style.opacity);

    for (name, part) in frame.parts.iter() {
        let rect = layout.rect_to_canvas(part.rect());
        if let Some(fill) = style.fill {
            fill_rect(surface, rect, Paint::color(fill.with_opacity(style.opacity)));
        }
        match style.dash {
            Some(d) => stroke_rect_dashed(
                surface,
                rect,
                style.line_width * s,
                Dash {
                    on: d.on * s,
                    off: d.off * s,
                },
                stroke,
            ),
            None => stroke_rect(surface, rect, style.line_width * s, stroke),
        }

        let label = match TextLabel::new(name, (LABEL_SIZE * s) as f32, text) {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(part = %name, error = %e, "skipping part label");
                continue;
            }
        };
        let center = rect.center();
        let tw = label.width();
        if let Some(bg) = style.label_background {
            let pad = LABEL_PADDING * s;
            let top = center.y - LABEL_SIZE * s - pad;
            let label_box = Rect::new(
                center.x - tw / 2.0 - pad,
                top,
                center.x + tw / 2.0 + pad,
                top + (2.0 * LABEL_SIZE) * s + 2.0 * pad,
            );
            fill_rect(surface, label_box, Paint::color(bg.with_opacity(style.opacity)));
        }
        let origin = Point::new(center.x - tw / 2.0, center.y - label.height() / 2.0);
        label.draw(surface, origin);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/guide.rs"]
mod tests;
