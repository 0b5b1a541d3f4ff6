use crate::coords::Rect;
use crate::texture::Texture;

/// A region of a texture used as one displayable image (typically an
/// animation frame cut from a sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    texture: Texture,
    rect: Rect,
    name: Option<String>,
}

impl SpriteFrame {
    pub fn new(texture: Texture, rect: Rect) -> Self {
        Self { texture, rect, name: None }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
