//! Editor frame timeline: deep snapshots of the whole layer stack per frame.

mod frames;

pub use frames::{EditorFrame, FrameExport, Timeline};
