//! Premultiplied RGBA8 raster surfaces and the drawing primitives behind every tool.

pub(crate) mod blend;
pub(crate) mod cpu;
pub(crate) mod shapes;
pub(crate) mod surface;
pub(crate) mod text;
