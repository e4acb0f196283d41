//! Spritesheet export: grid layout, frame compositing, engine metadata and output sinks.

pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod grid;
pub(crate) mod metadata;
pub(crate) mod sink;
