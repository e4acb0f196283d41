use crate::animation::frames::{AnimationFrame, DEFAULT_FRAME_DURATION_MS};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::layers::stack::{Layer, LayerStack, flatten_layers};
use crate::raster::surface::RasterSurface;

/// Snapshot of every layer (pixels included) at capture time.
#[derive(Clone, Debug)]
pub struct EditorFrame {
    pub id: u64,
    pub duration_ms: u32,
    layers: Vec<Layer>,
    active: usize,
    /// Flattened image, rebuilt from `layers` when missing.
    preview: Option<RasterSurface>,
}

impl EditorFrame {
    fn capture(id: u64, duration_ms: u32, live: &LayerStack) -> Self {
        Self {
            id,
            duration_ms,
            layers: live.snapshot(),
            active: live.active_index(),
            preview: Some(live.flatten()),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    fn size(&self) -> (u32, u32) {
        self.layers
            .first()
            .map_or((0, 0), |l| (l.surface.width(), l.surface.height()))
    }

    /// Stored preview, or a fresh composite of the stored layers.
    pub fn preview(&self) -> RasterSurface {
        match &self.preview {
            Some(p) => p.clone(),
            None => {
                let (w, h) = self.size();
                flatten_layers(&self.layers, w, h)
            }
        }
    }

    /// Independent copy with its own pixel buffers and a freshly flattened preview.
    fn deep_copy(&self, id: u64) -> Self {
        let (w, h) = self.size();
        Self {
            id,
            duration_ms: self.duration_ms,
            layers: self.layers.clone(),
            active: self.active,
            preview: Some(flatten_layers(&self.layers, w, h)),
        }
    }
}

/// Normalized per-frame record handed to timeline consumers.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameExport {
    pub id: u64,
    pub duration_ms: u32,
    pub image: RasterSurface,
}

impl From<FrameExport> for AnimationFrame {
    fn from(f: FrameExport) -> Self {
        AnimationFrame::flattened(f.id.to_string(), f.duration_ms, f.image)
    }
}

/// Ordered editor frames plus the current index.
///
/// `Empty` is `current == None`. Every operation flushes the live stack into the current
/// frame before reading or replacing it, so live edits are never lost on navigation.
/// Operations validate their arguments before touching either side.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    frames: Vec<EditorFrame>,
    current: Option<usize>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            current: None,
            next_id: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn frames(&self) -> &[EditorFrame] {
        &self.frames
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    fn check_index(&self, index: usize) -> SpriteResult<()> {
        if index >= self.frames.len() {
            return Err(SpriteError::validation(format!(
                "frame index {index} out of range (len {})",
                self.frames.len()
            )));
        }
        Ok(())
    }

    /// Write the live stack into the current frame. No-op when empty.
    pub fn persist(&mut self, live: &LayerStack) {
        if let Some(cur) = self.current
            && let Some(frame) = self.frames.get_mut(cur)
        {
            frame.layers = live.snapshot();
            frame.active = live.active_index();
            frame.preview = Some(live.flatten());
        }
    }

    /// Flush live edits and return the export list.
    pub fn sync(&mut self, live: &LayerStack) -> Vec<FrameExport> {
        self.persist(live);
        self.exports()
    }

    /// Append a blank frame and start drawing on it.
    ///
    /// The live drawing is kept first: flushed into the current frame, or, when the
    /// timeline is empty, captured as the first frame. The new frame has the same layer
    /// structure with cleared pixels, and becomes current.
    #[tracing::instrument(skip(self, live))]
    pub fn add_frame(&mut self, live: &mut LayerStack) -> Vec<FrameExport> {
        if self.current.is_some() {
            self.persist(live);
        } else {
            let id = self.alloc_id();
            self.frames
                .push(EditorFrame::capture(id, DEFAULT_FRAME_DURATION_MS, live));
        }

        let blank = live.blank_like();
        let id = self.alloc_id();
        let mut frame = EditorFrame::capture(id, DEFAULT_FRAME_DURATION_MS, &blank);
        frame.preview = None;
        self.frames.push(frame);
        self.current = Some(self.frames.len() - 1);
        *live = blank;

        tracing::debug!(frame = id, count = self.frames.len(), "added frame");
        self.exports()
    }

    /// Insert a deep copy of the current frame right after it and load the copy.
    #[tracing::instrument(skip(self, live))]
    pub fn duplicate_frame(&mut self, live: &mut LayerStack) -> SpriteResult<Vec<FrameExport>> {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return Err(SpriteError::precondition("no frame to duplicate"));
        };
        let src = self.current.unwrap_or(last);
        self.persist(live);

        let id = self.alloc_id();
        let copy = self.frames[src].deep_copy(id);
        live.replace_layers(copy.layers.clone(), copy.active)?;
        self.frames.insert(src + 1, copy);
        self.current = Some(src + 1);

        tracing::debug!(source = src, frame = id, "duplicated frame");
        Ok(self.exports())
    }

    /// Flush the current frame, then load frame `index` into the live stack.
    #[tracing::instrument(skip(self, live))]
    pub fn switch_to(
        &mut self,
        live: &mut LayerStack,
        index: usize,
    ) -> SpriteResult<Vec<FrameExport>> {
        self.check_index(index)?;
        self.persist(live);
        let target = &self.frames[index];
        live.replace_layers(target.layers.clone(), target.active)?;
        self.current = Some(index);
        tracing::debug!(index, frame = target.id, "switched frame");
        Ok(self.exports())
    }

    /// Remove frame `index`.
    ///
    /// Removing the current frame loads its predecessor (or the new first frame). Removing
    /// the only frame returns the timeline to empty and leaves the live stack as it is.
    pub fn delete_frame(
        &mut self,
        live: &mut LayerStack,
        index: usize,
    ) -> SpriteResult<Vec<FrameExport>> {
        self.check_index(index)?;
        if self.current != Some(index) {
            self.persist(live);
        }
        if self.frames.len() == 1 {
            self.frames.clear();
            self.current = None;
            tracing::debug!("deleted last frame");
            return Ok(Vec::new());
        }

        let cur = self.current.unwrap_or(0);
        let next = if cur == index {
            index.saturating_sub(1)
        } else if cur > index {
            cur - 1
        } else {
            cur
        };
        if cur == index {
            let target = &self.frames[if index == 0 { 1 } else { index - 1 }];
            live.replace_layers(target.layers.clone(), target.active)?;
        }
        let removed = self.frames.remove(index);
        self.current = Some(next);
        tracing::debug!(frame = removed.id, current = next, "deleted frame");
        Ok(self.exports())
    }

    pub fn set_duration(
        &mut self,
        index: usize,
        duration_ms: u32,
    ) -> SpriteResult<Vec<FrameExport>> {
        self.check_index(index)?;
        if duration_ms == 0 {
            return Err(SpriteError::validation("frame duration must be at least 1 ms"));
        }
        self.frames[index].duration_ms = duration_ms;
        Ok(self.exports())
    }

    /// `{ id, duration, image }` per frame, compositing stored layers where no preview is cached.
    pub fn exports(&self) -> Vec<FrameExport> {
        self.frames
            .iter()
            .map(|f| FrameExport {
                id: f.id,
                duration_ms: f.duration_ms,
                image: f.preview(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frames.rs"]
mod tests;
