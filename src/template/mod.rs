//! Pose templates: JSON model, named sources, and the on-canvas guide.

pub(crate) mod guide;
pub(crate) mod model;
pub(crate) mod source;
