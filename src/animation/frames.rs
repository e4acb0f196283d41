use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, Point, Size, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::surface::RasterSurface;
use crate::template::model::{Template, part_transform};

/// Milliseconds per generated frame when the template frame sets none.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Encoded image bytes (PNG or JPEG). Cheap to clone and share between frames.
pub type EncodedImage = Arc<[u8]>;

/// User-drawn content for one named part.
#[derive(Clone, Debug, PartialEq)]
pub struct SpritePart {
    pub image: EncodedImage,
    pub position: Point,
    pub size: Size,
}

/// Part images keyed by part name.
pub type SpriteParts = BTreeMap<String, SpritePart>;

/// A part image placed for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPart {
    pub image: EncodedImage,
    pub position: Point,
    pub rotation_deg: f64,
    pub scale: Vec2,
    /// Rotation pivot relative to `position`.
    pub pivot: Point,
}

impl RenderedPart {
    /// Maps part-image pixels into frame space.
    pub fn transform(&self) -> Affine {
        part_transform(self.position, self.rotation_deg, self.pivot, self.scale)
    }
}

/// What a frame draws: one flattened picture, or named parts in compositing order.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameContent {
    Flattened(RasterSurface),
    Parts(Vec<(String, RenderedPart)>),
}

/// A generated, immutable frame consumed by preview and export.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    pub id: String,
    pub duration_ms: u32,
    pub content: FrameContent,
}

impl AnimationFrame {
    pub fn flattened(id: impl Into<String>, duration_ms: u32, image: RasterSurface) -> Self {
        Self {
            id: id.into(),
            duration_ms,
            content: FrameContent::Flattened(image),
        }
    }

    pub fn parts(&self) -> &[(String, RenderedPart)] {
        match &self.content {
            FrameContent::Parts(parts) => parts,
            FrameContent::Flattened(_) => &[],
        }
    }

    pub fn part(&self, name: &str) -> Option<&RenderedPart> {
        self.parts().iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }
}

/// One frame per template frame, placing every drawn part at the template's pose.
///
/// Parts without user content are skipped. Rotation defaults to 0, scale to (1, 1), and
/// duration to [`DEFAULT_FRAME_DURATION_MS`].
pub fn generate_animation_frames(template: &Template, parts: &SpriteParts) -> Vec<AnimationFrame> {
    let frames: Vec<AnimationFrame> = template
        .frames
        .iter()
        .map(|frame| {
            let placed = frame
                .parts
                .iter()
                .filter_map(|(name, tp)| {
                    let drawn = parts.get(name)?;
                    Some((
                        name.to_owned(),
                        RenderedPart {
                            image: Arc::clone(&drawn.image),
                            position: tp.position,
                            rotation_deg: tp.rotation_deg(),
                            scale: tp.scale_or_identity(),
                            pivot: tp.pivot.unwrap_or(Point::ZERO),
                        },
                    ))
                })
                .collect();
            AnimationFrame {
                id: frame.id.to_string(),
                duration_ms: frame.duration.unwrap_or(DEFAULT_FRAME_DURATION_MS),
                content: FrameContent::Parts(placed),
            }
        })
        .collect();
    tracing::debug!(
        template = %template.name,
        frames = frames.len(),
        drawn_parts = parts.len(),
        "generated animation frames"
    );
    frames
}

/// Give every part of the first template frame the whole flattened canvas image,
/// positioned at the origin and sized as the template part.
pub fn capture_sprite_parts(template: &Template, image: EncodedImage) -> SpriteResult<SpriteParts> {
    let frame = template.first_frame().ok_or_else(|| {
        SpriteError::precondition(format!("template \"{}\" has no frames", template.name))
    })?;
    Ok(frame
        .parts
        .iter()
        .map(|(name, tp)| {
            (
                name.to_owned(),
                SpritePart {
                    image: Arc::clone(&image),
                    position: Point::ZERO,
                    size: tp.size,
                },
            )
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frames.rs"]
mod tests;
