use crate::animation::frames::AnimationFrame;
use crate::export::compose::render_frame_into;
use crate::playback::player::Playback;
use crate::raster::surface::RasterSurface;

/// Square preview edge in pixels.
pub const DEFAULT_PREVIEW_SIZE: u32 = 200;

/// Draws the playback cursor's frame onto a fixed-size preview surface.
#[derive(Clone, Debug)]
pub struct PreviewRenderer {
    surface: RasterSurface,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_SIZE, DEFAULT_PREVIEW_SIZE)
    }
}

impl PreviewRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: RasterSurface::new(width, height),
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Clear, then draw `frame`: flattened images stretch to the preview, parts draw with
    /// their own transforms. `None` leaves the preview blank.
    pub fn render(&mut self, frame: Option<&AnimationFrame>) -> &RasterSurface {
        self.surface.clear();
        if let Some(frame) = frame {
            render_frame_into(&mut self.surface, frame);
        }
        &self.surface
    }

    /// Draw whichever frame `playback` points at. An out-of-range cursor falls back to frame 0.
    pub fn render_current(
        &mut self,
        frames: &[AnimationFrame],
        playback: &Playback,
    ) -> &RasterSurface {
        let frame = frames.get(playback.current()).or_else(|| frames.first());
        self.render(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/preview.rs"]
mod tests;
