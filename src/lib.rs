//! Spritegen is a layered pixel-art sprite editor core with template-guided animation and
//! spritesheet export.
//!
//! The public API is built around a few owned state objects:
//!
//! - An [`Editor`] holds the tools, the [`LayerStack`], an optional [`Template`] guide and the
//!   frame [`Timeline`]
//! - [`Playback`] and [`PreviewRenderer`] cycle through frames on a caller-supplied clock
//! - [`export_frames`] lays frames out on a grid and writes them into an [`ExportSink`]
#![forbid(unsafe_code)]
// Raster helpers are crate-internal building blocks; not all of them are reached from the
// public surface.
#![allow(dead_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod editor;
pub(crate) mod export;
pub(crate) mod layers;
pub(crate) mod playback;
pub(crate) mod raster;
pub(crate) mod template;
pub(crate) mod timeline;
/// Pixel-level drawing tools.
pub mod tools;

pub use crate::foundation::core::{
    Affine, CanvasSize, ExportFormat, Point, Rect, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{SpriteError, SpriteResult};

pub use crate::raster::blend::{BlendMode, PremulRgba8};
pub use crate::raster::surface::RasterSurface;
pub use crate::tools::{ShapeKind, Tool, ToolSettings};

pub use crate::layers::{Layer, LayerId, LayerStack};

pub use crate::template::guide::{
    GuideLayout, GuideStyle, render_guide, render_overlay, render_underlay,
};
pub use crate::template::model::{PartMap, Template, TemplateFrame, TemplatePart, part_transform};
pub use crate::template::source::{
    DirTemplateSource, StaticTemplateSource, TemplateLibrary, TemplateSource,
};

pub use crate::animation::frames::{
    AnimationFrame, DEFAULT_FRAME_DURATION_MS, EncodedImage, FrameContent, RenderedPart,
    SpritePart, SpriteParts, capture_sprite_parts, generate_animation_frames,
};
pub use crate::animation::procedural::{
    AnimationKind, generate as generate_procedural, idle as idle_cycle,
    interpolate as interpolate_frames, run as run_cycle, walk as walk_cycle,
};

pub use crate::editor::{Editor, EditorEvent, EditorOptions};
pub use crate::timeline::{EditorFrame, FrameExport, Timeline};

pub use crate::playback::{
    DEFAULT_FPS, DEFAULT_PREVIEW_SIZE, MAX_FPS, MIN_FPS, Playback, PreviewRenderer,
};

pub use crate::export::compose::{compose_spritesheet, render_cells, render_frame};
pub use crate::export::config::{
    ExportMode, MAX_COLUMNS, MAX_FRAME_SIZE, MAX_PADDING, SpritesheetExportConfig,
};
pub use crate::export::grid::{GridLayout, MAX_SHEET_DIMENSION};
pub use crate::export::metadata::{METADATA_FILE_NAME, godot_sprite_frames};
pub use crate::export::sink::{DirSink, ExportSink, ExportSummary, InMemorySink, export_frames};
