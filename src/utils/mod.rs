//! Output helpers shared by the render pipeline.

pub mod minify;
pub mod page;
pub mod slug;
pub mod xml;
