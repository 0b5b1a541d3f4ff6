//! Geometry value types shared by nodes, atlases and the draw stream.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Texture rects use the same convention, measured in texture pixels.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
