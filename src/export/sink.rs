use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::animation::frames::AnimationFrame;
use crate::export::compose::{compose_spritesheet, render_cells};
use crate::export::config::{ExportMode, SpritesheetExportConfig};
use crate::export::metadata::{METADATA_FILE_NAME, godot_sprite_frames};
use crate::foundation::error::{SpriteError, SpriteResult};

/// Destination for exported artifacts (a directory, a download, memory).
pub trait ExportSink {
    /// Store `bytes` under the file name `name`.
    fn save_bytes(&mut self, name: &str, bytes: &[u8]) -> SpriteResult<()>;
}

/// Writes files into a directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirSink {
    fn save_bytes(&mut self, name: &str, bytes: &[u8]) -> SpriteResult<()> {
        if name.contains(['/', '\\']) {
            return Err(SpriteError::validation(format!(
                "export file name \"{name}\" must not contain path separators"
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export dir '{}'", self.dir.display()))?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("write export file '{}'", path.display()))?;
        Ok(())
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Saved files in write order.
    pub(crate) files: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Most recent bytes saved under `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b.as_slice())
    }
}

impl ExportSink for InMemorySink {
    fn save_bytes(&mut self, name: &str, bytes: &[u8]) -> SpriteResult<()> {
        self.files.push((name.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

/// What an export wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<String>,
    /// Size of the sheet, or of each individual frame image.
    pub width: u32,
    pub height: u32,
}

/// Render `frames` per `cfg` and hand the results to `sink`.
///
/// Sheet mode writes `spritesheet.<ext>`, then `spritesheet.tres` when metadata is on.
/// Individual mode writes `frame_<n>.<ext>` numbered from 1. Nothing is written unless
/// every frame rendered and encoded.
#[tracing::instrument(skip(frames, cfg, sink), fields(frames = frames.len(), mode = ?cfg.mode))]
pub fn export_frames(
    frames: &[AnimationFrame],
    cfg: &SpritesheetExportConfig,
    sink: &mut dyn ExportSink,
) -> SpriteResult<ExportSummary> {
    cfg.validate()?;
    if frames.is_empty() {
        return Err(SpriteError::precondition("no frames to export"));
    }
    let ext = cfg.format.extension();

    let (outputs, width, height) = match cfg.mode {
        ExportMode::Spritesheet => {
            let sheet = compose_spritesheet(frames, cfg)?;
            let mut outputs = vec![(format!("spritesheet.{ext}"), sheet.encode(cfg.format)?)];
            if cfg.include_metadata {
                outputs.push((
                    METADATA_FILE_NAME.to_owned(),
                    godot_sprite_frames(frames.len(), cfg)?.into_bytes(),
                ));
            }
            (outputs, sheet.width(), sheet.height())
        }
        ExportMode::IndividualFrames => {
            let outputs = render_cells(frames, cfg)
                .iter()
                .enumerate()
                .map(|(i, cell)| Ok((format!("frame_{}.{ext}", i + 1), cell.encode(cfg.format)?)))
                .collect::<SpriteResult<Vec<_>>>()?;
            (outputs, cfg.frame_width, cfg.frame_height)
        }
    };

    let mut files = Vec::with_capacity(outputs.len());
    for (name, bytes) in outputs {
        sink.save_bytes(&name, &bytes)?;
        files.push(name);
    }
    tracing::info!(files = files.len(), width, height, "export complete");
    Ok(ExportSummary {
        files,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
