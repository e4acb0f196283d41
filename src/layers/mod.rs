//! Ordered layer stack with visibility and an active (write-target) layer.

pub(crate) mod stack;

pub use stack::{Layer, LayerId, LayerStack};
