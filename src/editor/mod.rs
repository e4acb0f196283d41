//! Application state for one drawing session: tools, layers, template guide and timeline.

mod session;

pub use session::{Editor, EditorEvent, EditorOptions};
