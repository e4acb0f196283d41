//! Cyclic preview playback driven by a caller-supplied monotonic clock.

mod player;
mod preview;

pub use player::{DEFAULT_FPS, MAX_FPS, MIN_FPS, Playback};
pub use preview::{DEFAULT_PREVIEW_SIZE, PreviewRenderer};
