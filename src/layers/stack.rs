use crate::foundation::error::{SpriteError, SpriteResult};
use crate::raster::surface::RasterSurface;

/// Session-unique layer identifier. Frame snapshots keep the id of the layer they copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// A named, independently visible surface. Z-order is its position in the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub id: LayerId,
    /// Cosmetic only; never used as a lookup key.
    pub name: String,
    pub visible: bool,
    pub surface: RasterSurface,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            surface: RasterSurface::new(width, height),
        }
    }
}

/// Bottom-to-top list of layers plus the active layer index.
///
/// Invariants: at least one layer, and `active < layers.len()`.
#[derive(Clone, Debug)]
pub struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active: usize,
    next_id: u64,
}

impl LayerStack {
    /// Stack holding one transparent `"Layer 1"`.
    pub fn new(width: u32, height: u32) -> Self {
        let mut out = Self {
            width,
            height,
            layers: Vec::new(),
            active: 0,
            next_id: 1,
        };
        out.add_layer();
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always `false`; the stack never drops below one layer.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    /// Write target for tools.
    pub fn active_surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.layers[self.active].surface
    }

    fn alloc_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn check_index(&self, index: usize) -> SpriteResult<()> {
        if index >= self.layers.len() {
            return Err(SpriteError::validation(format!(
                "layer index {index} out of range (len {})",
                self.layers.len()
            )));
        }
        Ok(())
    }

    /// Append a transparent canvas-sized layer and make it active.
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.alloc_id();
        let name = format!("Layer {}", self.layers.len() + 1);
        self.layers.push(Layer::new(id, name, self.width, self.height));
        self.active = self.layers.len() - 1;
        tracing::debug!(layer = id.0, index = self.active, "added layer");
        id
    }

    pub fn set_active(&mut self, index: usize) -> SpriteResult<()> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Flip visibility, returning the new flag.
    pub fn toggle_visibility(&mut self, index: usize) -> SpriteResult<bool> {
        self.check_index(index)?;
        let layer = &mut self.layers[index];
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Remove a layer. Rejected when it is the only one.
    ///
    /// Deleting the active layer selects the one below it (clamped at 0); deleting a layer
    /// below the active one shifts the active index down so the same layer stays active.
    pub fn delete_layer(&mut self, index: usize) -> SpriteResult<Layer> {
        self.check_index(index)?;
        if self.layers.len() == 1 {
            return Err(SpriteError::precondition("cannot delete the only layer"));
        }
        let removed = self.layers.remove(index);
        if self.active == index {
            self.active = index.saturating_sub(1);
        } else if self.active > index {
            self.active -= 1;
        }
        tracing::debug!(layer = removed.id.0, active = self.active, "deleted layer");
        Ok(removed)
    }

    pub fn clear_active(&mut self) {
        self.active_surface_mut().clear();
    }

    /// Clear `dest` and source-over every visible layer onto it, bottom to top.
    pub fn composite(&self, dest: &mut RasterSurface) {
        dest.clear();
        self.draw_visible(dest);
    }

    /// Source-over visible layers onto `dest` without clearing it first.
    pub fn draw_visible(&self, dest: &mut RasterSurface) {
        for layer in self.layers.iter().filter(|l| l.visible) {
            dest.draw_surface(&layer.surface, 0, 0);
        }
    }

    /// Composite of visible layers on a fresh transparent surface.
    pub fn flatten(&self) -> RasterSurface {
        flatten_layers(&self.layers, self.width, self.height)
    }

    /// Deep copy of every layer (pixels included).
    pub fn snapshot(&self) -> Vec<Layer> {
        self.layers.clone()
    }

    /// Replace the layers wholesale (e.g. when switching frames).
    pub fn replace_layers(&mut self, layers: Vec<Layer>, active: usize) -> SpriteResult<()> {
        if layers.is_empty() {
            return Err(SpriteError::validation("layer list must not be empty"));
        }
        if active >= layers.len() {
            return Err(SpriteError::validation(format!(
                "active index {active} out of range (len {})",
                layers.len()
            )));
        }
        if let Some(bad) = layers
            .iter()
            .find(|l| l.surface.width() != self.width || l.surface.height() != self.height)
        {
            return Err(SpriteError::validation(format!(
                "layer '{}' is {}x{}, stack is {}x{}",
                bad.name,
                bad.surface.width(),
                bad.surface.height(),
                self.width,
                self.height
            )));
        }
        if let Some(max) = layers.iter().map(|l| l.id.0).max() {
            self.next_id = self.next_id.max(max + 1);
        }
        self.layers = layers;
        self.active = active;
        Ok(())
    }

    /// Same layer structure (ids, names, visibility, active index) with every surface cleared.
    pub fn blank_like(&self) -> LayerStack {
        let mut out = self.clone();
        for layer in &mut out.layers {
            layer.surface.clear();
        }
        out
    }
}

/// Flatten any layer list (visible layers only) onto a new `width`x`height` surface.
pub(crate) fn flatten_layers(layers: &[Layer], width: u32, height: u32) -> RasterSurface {
    let mut out = RasterSurface::new(width, height);
    for layer in layers.iter().filter(|l| l.visible) {
        out.draw_surface(&layer.surface, 0, 0);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layers/stack.rs"]
mod tests;
