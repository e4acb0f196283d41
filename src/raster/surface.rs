use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::{Affine, ExportFormat, Rect, Rgba8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::foundation::math::{premul_channel, unpremul_channel};
use crate::raster::blend::{self, BlendMode, PremulRgba8};
use crate::raster::cpu;

/// Owned, fixed-size pixel buffer in row-major premultiplied RGBA8.
///
/// Each layer owns exactly one surface; copies are explicit `clone()`s and never alias.
/// Coordinates are signed so callers can address off-surface points: reads there return
/// `None` and writes are dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RasterSurface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> SpriteResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(SpriteError::validation(format!(
                "surface {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> SpriteResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<PremulRgba8> {
        let i = self.index(x, y)?;
        let d = &self.data[i..i + 4];
        Some([d[0], d[1], d[2], d[3]])
    }

    /// Straight color at a pixel, `None` off-surface.
    pub fn color_at(&self, x: i64, y: i64) -> Option<Rgba8> {
        self.pixel(x, y).map(Rgba8::from_premul)
    }

    /// Replace a pixel without blending. Returns `false` when off-surface.
    pub fn set_pixel(&mut self, x: i64, y: i64, px: PremulRgba8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i..i + 4].copy_from_slice(&px);
                true
            }
            None => false,
        }
    }

    pub fn blend_pixel(&mut self, x: i64, y: i64, src: PremulRgba8, coverage: u8, mode: BlendMode) {
        if let Some(i) = self.index(x, y) {
            let d = &mut self.data[i..i + 4];
            let out = blend::blend([d[0], d[1], d[2], d[3]], src, coverage, mode);
            d.copy_from_slice(&out);
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Source-over `src` with its top-left at `(dx, dy)`, clipped to this surface.
    pub fn draw_surface(&mut self, src: &RasterSurface, dx: i64, dy: i64) {
        self.draw_surface_with_opacity(src, dx, dy, 255);
    }

    pub fn draw_surface_with_opacity(
        &mut self,
        src: &RasterSurface,
        dx: i64,
        dy: i64,
        opacity: u8,
    ) {
        if opacity == 0 {
            return;
        }
        if dx == 0 && dy == 0 && src.width == self.width && src.height == self.height {
            // Same-size blit at the origin is the hot path for layer compositing.
            for (d, s) in self.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
                let out = blend::over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
                d.copy_from_slice(&out);
            }
            return;
        }
        for sy in 0..i64::from(src.height) {
            for sx in 0..i64::from(src.width) {
                let Some(px) = src.pixel(sx, sy) else {
                    continue;
                };
                if px[3] == 0 {
                    continue;
                }
                self.blend_pixel(dx + sx, dy + sy, px, opacity, BlendMode::SourceOver);
            }
        }
    }

    /// Nearest-neighbour scale of `src` into `dst` (in this surface's pixel space).
    pub fn draw_surface_scaled(&mut self, src: &RasterSurface, dst: Rect) -> SpriteResult<()> {
        if src.width == 0 || src.height == 0 || dst.width() <= 0.0 || dst.height() <= 0.0 {
            return Ok(());
        }
        let xf = Affine::translate(dst.origin().to_vec2())
            * Affine::scale_non_uniform(
                dst.width() / f64::from(src.width),
                dst.height() / f64::from(src.height),
            );
        self.draw_surface_transformed(src, xf)
    }

    /// Draw `src` (local space at origin) through `xf`, sampling nearest source pixels.
    pub fn draw_surface_transformed(
        &mut self,
        src: &RasterSurface,
        xf: Affine,
    ) -> SpriteResult<()> {
        if src.width == 0 || src.height == 0 || xf.determinant().abs() < 1e-12 {
            return Ok(());
        }
        let image = cpu::surface_image(src)?;
        let local = cpu::rect_to_cpu(src.bounds());
        let bbox = xf.transform_rect_bbox(src.bounds());
        cpu::rasterize(self, bbox, BlendMode::SourceOver, |ctx, base| {
            ctx.set_transform(base * cpu::affine_to_cpu(xf));
            ctx.set_paint(image.clone());
            ctx.fill_rect(&local);
        });
        Ok(())
    }

    /// Unpremultiplied copy of the pixel bytes.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_channel(px[0], a);
            px[1] = unpremul_channel(px[1], a);
            px[2] = unpremul_channel(px[2], a);
        }
        out
    }

    /// Encode as PNG (with alpha) or JPEG (alpha dropped over black).
    pub fn encode(&self, format: ExportFormat) -> SpriteResult<Vec<u8>> {
        let mut buf = Vec::new();
        match format {
            ExportFormat::Png => {
                let img =
                    image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
                        .context("build rgba image")?;
                image::DynamicImage::ImageRgba8(img)
                    .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
                    .context("encode png")?;
            }
            ExportFormat::Jpeg => {
                // Premultiplied color channels are already composited over black.
                let rgb: Vec<u8> = self
                    .data
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                let img = image::RgbImage::from_raw(self.width, self.height, rgb)
                    .context("build rgb image")?;
                image::DynamicImage::ImageRgb8(img)
                    .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
                    .context("encode jpeg")?;
            }
        }
        Ok(buf)
    }

    /// Decode encoded image bytes (any format the `image` crate reads) into a surface.
    pub fn decode(bytes: &[u8]) -> SpriteResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| SpriteError::decode(format!("decode image from memory: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = premul_channel(px[0], a);
        px[1] = premul_channel(px[1], a);
        px[2] = premul_channel(px[2], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
