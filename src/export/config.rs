use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::core::ExportFormat;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Largest accepted cell edge in pixels.
pub const MAX_FRAME_SIZE: u32 = 512;
pub const MAX_PADDING: u32 = 20;
pub const MAX_COLUMNS: u32 = 16;

/// Whether frames are tiled into one sheet or written one file each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    #[default]
    Spritesheet,
    IndividualFrames,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Spritesheet export settings. Missing JSON keys take the defaults.
pub struct SpritesheetExportConfig {
    /// Cell width in pixels.
    pub frame_width: u32,
    /// Cell height in pixels.
    pub frame_height: u32,
    /// Gap between cells; none after the last row or column.
    pub padding: u32,
    pub columns: u32,
    pub format: ExportFormat,
    /// Write `spritesheet.tres` next to the sheet.
    pub include_metadata: bool,
    pub mode: ExportMode,
    /// Playback speed written to the metadata.
    pub fps: u32,
    pub animation_name: String,
}

impl Default for SpritesheetExportConfig {
    fn default() -> Self {
        Self {
            frame_width: 64,
            frame_height: 64,
            padding: 2,
            columns: 8,
            format: ExportFormat::Png,
            include_metadata: true,
            mode: ExportMode::Spritesheet,
            fps: 10,
            animation_name: "default".to_owned(),
        }
    }
}

impl SpritesheetExportConfig {
    pub fn validate(&self) -> SpriteResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(SpriteError::validation(format!(
                "frame size must be positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if self.frame_width > MAX_FRAME_SIZE || self.frame_height > MAX_FRAME_SIZE {
            return Err(SpriteError::validation(format!(
                "frame size must be at most {MAX_FRAME_SIZE}x{MAX_FRAME_SIZE}, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if self.padding > MAX_PADDING {
            return Err(SpriteError::validation(format!(
                "padding must be at most {MAX_PADDING}, got {}",
                self.padding
            )));
        }
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(SpriteError::validation(format!(
                "columns must be in 1..={MAX_COLUMNS}, got {}",
                self.columns
            )));
        }
        if self.fps == 0 {
            return Err(SpriteError::validation("fps must be >= 1"));
        }
        if self.animation_name.contains(['"', '\n']) {
            return Err(SpriteError::validation(
                "animation name must not contain quotes or newlines",
            ));
        }
        Ok(())
    }

    pub fn from_json_slice(bytes: &[u8]) -> SpriteResult<Self> {
        let cfg: Self =
            serde_json::from_slice(bytes).map_err(|e| SpriteError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read export config \"{}\"", path.display()))?;
        Self::from_json_slice(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/config.rs"]
mod tests;
