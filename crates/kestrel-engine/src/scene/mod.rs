//! Draw stream types.
//!
//! Responsibilities:
//! - record renderer-agnostic quad draws
//! - provide deterministic ordering (z-index + insertion order)
//! - fold the recorded stream into per-texture batches for a quad renderer

mod batch;
mod cmd;
mod list;
mod order;

pub use batch::{QuadBatch, QuadInstance};
pub use cmd::{DrawCmd, QuadCmd};
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
