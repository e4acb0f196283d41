use crate::export::config::SpritesheetExportConfig;
use crate::foundation::core::Rect;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Largest sheet edge produced, the usual engine texture limit.
pub const MAX_SHEET_DIMENSION: u32 = 16_384;

/// Cell placement for `frame_count` frames tiled row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub frame_count: usize,
    pub columns: u32,
    pub rows: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub padding: u32,
}

impl GridLayout {
    /// `rows = ceil(frame_count / columns)`. Columns of 0 are treated as 1.
    ///
    /// Fails when either sheet edge would exceed [`MAX_SHEET_DIMENSION`].
    pub fn new(frame_count: usize, cfg: &SpritesheetExportConfig) -> SpriteResult<Self> {
        let columns = cfg.columns.max(1);
        let rows = u32::try_from(frame_count.div_ceil(columns as usize))
            .map_err(|_| SpriteError::validation(format!("{frame_count} frames is too many")))?;
        let grid = Self {
            frame_count,
            columns,
            rows,
            frame_width: cfg.frame_width,
            frame_height: cfg.frame_height,
            padding: cfg.padding,
        };
        let (w, h) = (grid.extent_x(), grid.extent_y());
        let max = u64::from(MAX_SHEET_DIMENSION);
        if w > max || h > max {
            return Err(SpriteError::validation(format!(
                "spritesheet {w}x{h} exceeds {MAX_SHEET_DIMENSION} pixels per side"
            )));
        }
        Ok(grid)
    }

    fn extent(count: u32, cell: u32, padding: u32) -> u64 {
        let stride = u64::from(cell) + u64::from(padding);
        u64::from(count)
            .saturating_mul(stride)
            .saturating_sub(u64::from(padding))
    }

    fn extent_x(&self) -> u64 {
        Self::extent(self.columns, self.frame_width, self.padding)
    }

    fn extent_y(&self) -> u64 {
        Self::extent(self.rows, self.frame_height, self.padding)
    }

    /// Sheet width: `columns * (frame_width + padding) - padding`.
    pub fn width(&self) -> u32 {
        u32::try_from(self.extent_x()).unwrap_or(u32::MAX)
    }

    /// Sheet height: `rows * (frame_height + padding) - padding`.
    pub fn height(&self) -> u32 {
        u32::try_from(self.extent_y()).unwrap_or(u32::MAX)
    }

    /// Top-left pixel of cell `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let cols = self.columns.max(1) as usize;
        let col = (index % cols) as u64;
        let row = (index / cols) as u64;
        let x = col.saturating_mul(u64::from(self.frame_width) + u64::from(self.padding));
        let y = row.saturating_mul(u64::from(self.frame_height) + u64::from(self.padding));
        (
            u32::try_from(x).unwrap_or(u32::MAX),
            u32::try_from(y).unwrap_or(u32::MAX),
        )
    }

    pub fn cell_rect(&self, index: usize) -> Rect {
        let (x, y) = self.cell_origin(index);
        Rect::new(
            f64::from(x),
            f64::from(y),
            f64::from(x) + f64::from(self.frame_width),
            f64::from(y) + f64::from(self.frame_height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/grid.rs"]
mod tests;
