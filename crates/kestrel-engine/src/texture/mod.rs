//! Texture handles.
//!
//! A [`Texture`] here is bookkeeping only: identity, name and pixel size.
//! Pixel upload belongs to whichever renderer consumes the draw stream.

use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::{Rect, Size};

/// Process-unique texture identity. Batching groups quads by this id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct TextureInfo {
    id: TextureId,
    name: String,
    size: Size,
}

/// Shared, immutable texture handle. Clones refer to the same texture.
#[derive(Debug, Clone)]
pub struct Texture {
    info: Rc<TextureInfo>,
}

impl Texture {
    /// Texture with known dimensions (procedural textures, render targets, tests).
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        let info = TextureInfo {
            id: TextureId::next(),
            name: name.into(),
            size,
        };
        log::trace!(
            "texture {:?} '{}' created ({}x{})",
            info.id,
            info.name,
            size.width,
            size.height
        );
        Self { info: Rc::new(info) }
    }

    /// Texture backed by an image file. Only the header is decoded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        let dims = image::image_dimensions(path)?;
        log::debug!("loaded texture header {} ({}x{})", path.display(), dims.0, dims.1);
        Ok(Self::new(path.display().to_string(), Size::from(dims)))
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.info.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.info.size
    }

    /// Full texture bounds at (0, 0).
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.info.size)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.info.id == other.info.id
    }
}

impl Eq for Texture {}
