use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::frames::{self, AnimationFrame, SpriteParts};
use crate::foundation::core::{CanvasSize, ExportFormat, Point, Rgba8};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::layers::stack::{LayerId, LayerStack};
use crate::raster::surface::RasterSurface;
use crate::template::guide::{render_overlay, render_underlay};
use crate::template::model::Template;
use crate::timeline::{FrameExport, Timeline};
use crate::tools::{self, Tool, ToolSettings};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Construction options for an [`Editor`].
pub struct EditorOptions {
    pub canvas: CanvasSize,
    pub tools: ToolSettings,
    /// Draw the faint template guide under the layers.
    pub show_underlay: bool,
    /// Draw the dashed template outline over the layers.
    pub show_overlay: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            tools: ToolSettings::default(),
            show_underlay: true,
            show_overlay: true,
        }
    }
}

/// Something the UI should react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// The eyedropper picked a color; it is already the active color.
    ColorPicked(Rgba8),
}

#[derive(Clone, Copy, Debug)]
struct Gesture {
    tool: Tool,
    start: Point,
    last: Point,
}

/// One drawing session.
///
/// Tools write to the active layer; the display surface is rebuilt from scratch (underlay,
/// visible layers, overlay) after every mutation. Shape tools preview on the display only
/// and reach the layer once, on pointer-up.
#[derive(Clone, Debug)]
pub struct Editor {
    options: EditorOptions,
    settings: ToolSettings,
    layers: LayerStack,
    display: RasterSurface,
    template: Option<Template>,
    timeline: Timeline,
    gesture: Option<Gesture>,
}

impl Editor {
    pub fn new(options: EditorOptions) -> SpriteResult<Self> {
        let canvas = CanvasSize::new(options.canvas.width, options.canvas.height)?;
        options.tools.validate()?;
        let mut out = Self {
            settings: options.tools,
            layers: LayerStack::new(canvas.width, canvas.height),
            display: RasterSurface::new(canvas.width, canvas.height),
            template: None,
            timeline: Timeline::new(),
            gesture: None,
            options,
        };
        out.recomposite();
        Ok(out)
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Tool, color and size used by subsequent gestures.
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Replace the guide template (`None` removes it) and redraw.
    pub fn set_template(&mut self, template: Option<Template>) {
        self.template = template;
        self.recomposite();
    }

    pub fn set_guides(&mut self, underlay: bool, overlay: bool) {
        self.options.show_underlay = underlay;
        self.options.show_overlay = overlay;
        self.recomposite();
    }

    /// What the user sees: guide plus visible layers (plus any shape preview).
    pub fn display(&self) -> &RasterSurface {
        &self.display
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Direct access to the live stack. Call [`Editor::recomposite`] after mutating it.
    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Rebuild the display: clear, underlay, visible layers bottom to top, overlay.
    pub fn recomposite(&mut self) {
        self.display.clear();
        if let Some(t) = &self.template
            && self.options.show_underlay
        {
            render_underlay(&mut self.display, t);
        }
        self.layers.draw_visible(&mut self.display);
        if let Some(t) = &self.template
            && self.options.show_overlay
        {
            render_overlay(&mut self.display, t);
        }
    }

    pub fn pointer_down(&mut self, p: Point) -> Option<EditorEvent> {
        let ToolSettings { tool, color, size } = self.settings;
        self.gesture = Some(Gesture {
            tool,
            start: p,
            last: p,
        });
        let event = match tool {
            Tool::Brush => {
                tools::stroke(self.layers.active_surface_mut(), p, p, color, size);
                None
            }
            Tool::Eraser => {
                tools::erase(self.layers.active_surface_mut(), p, p, size);
                None
            }
            Tool::Fill => {
                tools::flood_fill(self.layers.active_surface_mut(), p, color);
                None
            }
            Tool::Eyedropper => self.pick(p),
            Tool::Line | Tool::Rectangle | Tool::Circle => None,
        };
        self.recomposite();
        event
    }

    /// Continue the gesture. Ignored when no pointer is down.
    pub fn pointer_move(&mut self, p: Point) -> Option<EditorEvent> {
        let gesture = self.gesture.as_mut()?;
        let from = gesture.last;
        gesture.last = p;
        let Gesture { tool, start, .. } = *gesture;
        let ToolSettings { color, size, .. } = self.settings;
        match tool {
            Tool::Brush => {
                tools::stroke(self.layers.active_surface_mut(), from, p, color, size);
                self.recomposite();
                None
            }
            Tool::Eraser => {
                tools::erase(self.layers.active_surface_mut(), from, p, size);
                self.recomposite();
                None
            }
            Tool::Fill => None,
            Tool::Eyedropper => self.pick(p),
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                self.recomposite();
                if let Some(kind) = tool.shape() {
                    tools::draw_shape(&mut self.display, kind, start, p, color, size);
                }
                None
            }
        }
    }

    /// End the gesture; shape tools commit onto the active layer here.
    pub fn pointer_up(&mut self, p: Point) -> Option<EditorEvent> {
        let gesture = self.gesture.take()?;
        let ToolSettings { color, size, .. } = self.settings;
        match gesture.tool {
            Tool::Brush if p != gesture.last => {
                tools::stroke(self.layers.active_surface_mut(), gesture.last, p, color, size);
            }
            Tool::Eraser if p != gesture.last => {
                tools::erase(self.layers.active_surface_mut(), gesture.last, p, size);
            }
            tool => {
                if let Some(kind) = tool.shape() {
                    tools::draw_shape(
                        self.layers.active_surface_mut(),
                        kind,
                        gesture.start,
                        p,
                        color,
                        size,
                    );
                }
            }
        }
        self.recomposite();
        None
    }

    /// Read the active layer under `p` and make it the brush color.
    fn pick(&mut self, p: Point) -> Option<EditorEvent> {
        let color = tools::eyedropper(&self.layers.active_layer().surface, p)?;
        self.settings.color = color;
        Some(EditorEvent::ColorPicked(color))
    }

    pub fn clear_active_layer(&mut self) {
        self.layers.clear_active();
        self.recomposite();
    }

    pub fn add_layer(&mut self) -> LayerId {
        let id = self.layers.add_layer();
        self.recomposite();
        id
    }

    pub fn set_active_layer(&mut self, index: usize) -> SpriteResult<()> {
        self.layers.set_active(index)
    }

    pub fn toggle_layer_visibility(&mut self, index: usize) -> SpriteResult<bool> {
        let visible = self.layers.toggle_visibility(index)?;
        self.recomposite();
        Ok(visible)
    }

    pub fn delete_layer(&mut self, index: usize) -> SpriteResult<()> {
        self.layers.delete_layer(index)?;
        self.recomposite();
        Ok(())
    }

    /// Visible layers only, without any template guide, as PNG bytes.
    pub fn export_flattened_png(&self) -> SpriteResult<Vec<u8>> {
        self.layers.flatten().encode(ExportFormat::Png)
    }

    /// Use the whole flattened drawing as the image of every template part.
    pub fn capture_sprite_parts(&self) -> SpriteResult<SpriteParts> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| SpriteError::precondition("select a template before capturing parts"))?;
        let image: Arc<[u8]> = Arc::from(self.export_flattened_png()?);
        frames::capture_sprite_parts(template, image)
    }

    /// Template-posed frames for `parts`. Requires a template.
    pub fn generate_animation_frames(
        &self,
        parts: &SpriteParts,
    ) -> SpriteResult<Vec<AnimationFrame>> {
        let template = self.template.as_ref().ok_or_else(|| {
            SpriteError::precondition("select a template before generating frames")
        })?;
        Ok(frames::generate_animation_frames(template, parts))
    }

    pub fn add_frame(&mut self) -> Vec<FrameExport> {
        self.gesture = None;
        let out = self.timeline.add_frame(&mut self.layers);
        self.recomposite();
        out
    }

    pub fn duplicate_frame(&mut self) -> SpriteResult<Vec<FrameExport>> {
        self.gesture = None;
        let out = self.timeline.duplicate_frame(&mut self.layers)?;
        self.recomposite();
        Ok(out)
    }

    pub fn switch_frame(&mut self, index: usize) -> SpriteResult<Vec<FrameExport>> {
        self.gesture = None;
        let out = self.timeline.switch_to(&mut self.layers, index)?;
        self.recomposite();
        Ok(out)
    }

    pub fn delete_frame(&mut self, index: usize) -> SpriteResult<Vec<FrameExport>> {
        self.gesture = None;
        let out = self.timeline.delete_frame(&mut self.layers, index)?;
        self.recomposite();
        Ok(out)
    }

    pub fn set_frame_duration(
        &mut self,
        index: usize,
        duration_ms: u32,
    ) -> SpriteResult<Vec<FrameExport>> {
        self.timeline.set_duration(index, duration_ms)
    }

    /// Flush live edits into the current frame and list every frame for preview or export.
    pub fn frame_exports(&mut self) -> Vec<FrameExport> {
        self.timeline.sync(&self.layers)
    }

    /// Timeline frames as flattened animation frames; the live drawing alone when no
    /// frame has been captured.
    pub fn timeline_animation(&mut self) -> Vec<AnimationFrame> {
        if self.timeline.is_empty() {
            return vec![AnimationFrame::flattened(
                "1",
                frames::DEFAULT_FRAME_DURATION_MS,
                self.layers.flatten(),
            )];
        }
        self.frame_exports().into_iter().map(AnimationFrame::from).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
