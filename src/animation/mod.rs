//! Template-positioned animation frames and procedural motion generators.

pub(crate) mod frames;
pub(crate) mod procedural;
