//! Label text: parley shapes it against the bundled DejaVu Sans, `vello_cpu` fills the glyph
//! runs.

use std::{borrow::Cow, cell::RefCell};

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::blend::BlendMode;
use crate::raster::cpu::{color_to_cpu, rasterize};
use crate::raster::surface::RasterSurface;

static LABEL_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Glyph overhang allowance around the layout box, in pixels.
const INK_MARGIN: f64 = 2.0;

/// Per-run text color carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

struct LabelFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    font: Option<LabelFont>,
}

impl TextLayoutEngine {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font: None,
        }
    }

    /// Register the bundled face on first use.
    fn label_font(&mut self) -> SpriteResult<(String, vello_cpu::peniko::FontData)> {
        if let Some(f) = &self.font {
            return Ok((f.family.clone(), f.data.clone()));
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(LABEL_FONT.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SpriteError::resource_load("no font families in bundled label font"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SpriteError::resource_load("bundled label font family has no name"))?
            .to_string();
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(LABEL_FONT.to_vec()), 0);
        tracing::debug!(family = %family, "registered label font");
        self.font = Some(LabelFont {
            family: family.clone(),
            data: data.clone(),
        });
        Ok((family, data))
    }

    fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SpriteResult<(parley::Layout<TextBrushRgba8>, vello_cpu::peniko::FontData)> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SpriteError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let (family, data) = self.label_font()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok((layout, data))
    }
}

thread_local! {
    static ENGINE: RefCell<TextLayoutEngine> = RefCell::new(TextLayoutEngine::new());
}

/// One line of shaped text, positioned by its top-left corner when drawn.
pub struct TextLabel {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLabel")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl TextLabel {
    pub fn new(text: &str, size_px: f32, color: Rgba8) -> SpriteResult<Self> {
        let (layout, font) =
            ENGINE.with(|e| e.borrow_mut().layout_plain(text, size_px, color.into()))?;
        Ok(Self { layout, font })
    }

    /// Advance width in pixels.
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    /// Line box height in pixels.
    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }

    /// Fill the glyphs with the top-left of the layout box at `origin`.
    pub fn draw(&self, surface: &mut RasterSurface, origin: Point) {
        let area = Rect::from_origin_size(origin, (self.width(), self.height()))
            .inflate(INK_MARGIN, INK_MARGIN);
        let offset = vello_cpu::kurbo::Affine::translate((origin.x, origin.y));
        rasterize(surface, area, BlendMode::SourceOver, |ctx, base| {
            ctx.set_transform(base * offset);
            for line in self.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(color_to_cpu(Rgba8::new(brush.r, brush.g, brush.b, brush.a)));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/text.rs"]
mod tests;
