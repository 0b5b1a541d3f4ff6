//! Kestrel engine crate.
//!
//! 2D sprite bookkeeping: nodes, texture atlases, quads and the draw stream a
//! batching renderer consumes. Graphics API calls live outside this crate.

pub mod atlas;
pub mod coords;
pub mod error;
pub mod frame;
pub mod logging;
pub mod node;
pub mod scene;
pub mod sheet;
pub mod sprite;
pub mod texture;

pub use atlas::{AtlasSource, Quad, QuadKey, TextureAtlas};
pub use error::SpriteError;
pub use frame::SpriteFrame;
pub use sheet::SpriteSheet;
pub use sprite::{Sprite, SpriteOptions};
pub use texture::Texture;
