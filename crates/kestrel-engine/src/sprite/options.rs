use std::path::PathBuf;

use crate::atlas::TextureAtlas;
use crate::coords::Rect;
use crate::frame::SpriteFrame;
use crate::sheet::SpriteSheet;
use crate::texture::Texture;

/// Construction options for [`Sprite`](super::Sprite).
///
/// At least one texture source is required. When several are given they
/// resolve in this order: `frame`, then `file`/`texture`, then `spritesheet`,
/// then `texture_atlas`.
///
/// ```rust,ignore
/// let sprite = Sprite::new(
///     SpriteOptions::new()
///         .spritesheet(&sheet)
///         .rect(Rect::new(0.0, 0.0, 32.0, 32.0)),
/// )?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpriteOptions {
    pub(super) file: Option<PathBuf>,
    pub(super) texture: Option<Texture>,
    pub(super) frame: Option<SpriteFrame>,
    pub(super) spritesheet: Option<SpriteSheet>,
    pub(super) texture_atlas: Option<TextureAtlas>,
    pub(super) rect: Option<Rect>,
}

impl SpriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image file to open as a new atlas.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Already loaded texture to wrap in a new atlas.
    pub fn texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Frame providing both texture and rect. Also becomes the display frame.
    pub fn frame(mut self, frame: SpriteFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Sheet whose atlas the sprite joins for batched rendering.
    pub fn spritesheet(mut self, sheet: &SpriteSheet) -> Self {
        self.spritesheet = Some(sheet.clone());
        self
    }

    pub fn texture_atlas(mut self, atlas: &TextureAtlas) -> Self {
        self.texture_atlas = Some(atlas.clone());
        self
    }

    /// Source region in the atlas texture. Defaults to the whole texture.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}
