//! Texture atlases and the quads that sample them.
//!
//! An atlas is shared by every sprite cut from its texture. Sprites own their
//! quads; the atlas only keeps non-owning slots so it can submit every live
//! quad in one batch.

mod quad;
mod slots;

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use crate::scene::{DrawList, ZIndex};
use crate::texture::Texture;

pub use quad::{Quad, SharedQuad};
pub use slots::QuadKey;

use slots::QuadSlots;

/// Where an atlas gets its texture from.
#[derive(Debug, Clone)]
pub enum AtlasSource {
    File(PathBuf),
    Texture(Texture),
}

struct AtlasShared {
    texture: Texture,
    slots: RefCell<QuadSlots>,
}

/// Shared atlas handle. Clones refer to the same atlas.
#[derive(Clone)]
pub struct TextureAtlas {
    shared: Rc<AtlasShared>,
}

impl TextureAtlas {
    /// Opens an atlas over a texture file or an already loaded texture.
    pub fn create(source: AtlasSource) -> Result<Self, image::ImageError> {
        let texture = match source {
            AtlasSource::File(path) => Texture::from_file(path)?,
            AtlasSource::Texture(texture) => texture,
        };
        Ok(Self::with_texture(texture))
    }

    pub fn with_texture(texture: Texture) -> Self {
        log::debug!("atlas created over texture '{}'", texture.name());
        Self {
            shared: Rc::new(AtlasShared {
                texture,
                slots: RefCell::new(QuadSlots::default()),
            }),
        }
    }

    #[inline]
    pub fn texture(&self) -> &Texture {
        &self.shared.texture
    }

    /// Whether `a` and `b` are handles to the same atlas.
    #[inline]
    pub fn same(a: &TextureAtlas, b: &TextureAtlas) -> bool {
        Rc::ptr_eq(&a.shared, &b.shared)
    }

    /// Registers `quad` for batched drawing.
    ///
    /// Inserting a quad that is already registered returns its existing key.
    pub fn insert_quad(&self, quad: &SharedQuad) -> QuadKey {
        let key = self.shared.slots.borrow_mut().insert(quad);
        log::trace!("atlas '{}': quad slot {} in use", self.texture().name(), key.index());
        key
    }

    /// Releases the slot behind `key`. Returns `false` for stale or unknown keys.
    pub fn remove_quad(&self, key: QuadKey) -> bool {
        let removed = self.shared.slots.borrow_mut().remove(key);
        if removed {
            log::trace!("atlas '{}': quad slot {} released", self.texture().name(), key.index());
        }
        removed
    }

    #[inline]
    pub fn contains(&self, key: QuadKey) -> bool {
        self.shared.slots.borrow().contains(key)
    }

    /// Current value of the quad behind `key`.
    pub fn quad(&self, key: QuadKey) -> Option<Quad> {
        let quad = self.shared.slots.borrow().resolve(key)?;
        let value = *quad.borrow();
        Some(value)
    }

    /// Number of registered quads.
    #[inline]
    pub fn len(&self) -> usize {
        self.shared.slots.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records a single quad sampled from this atlas' texture.
    #[inline]
    pub fn draw_quad(&self, list: &mut DrawList, z: ZIndex, quad: &Quad) {
        list.push_quad(z, self.texture(), *quad);
    }

    /// Records every live quad in slot order. Returns how many were recorded.
    pub fn draw_quads(&self, list: &mut DrawList, z: ZIndex) -> usize {
        let slots = self.shared.slots.borrow();
        let mut drawn = 0;
        for quad in slots.iter_live() {
            list.push_quad(z, self.texture(), *quad.borrow());
            drawn += 1;
        }
        drawn
    }
}

impl fmt::Debug for TextureAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureAtlas")
            .field("texture", &self.texture().name())
            .field("quads", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Size};
    use crate::scene::DrawCmd;

    fn atlas() -> TextureAtlas {
        TextureAtlas::with_texture(Texture::new("sheet", Size::new(64.0, 64.0)))
    }

    fn shared(rect: Rect) -> SharedQuad {
        Rc::new(RefCell::new(Quad::for_rect(rect)))
    }

    // ── insert / remove ───────────────────────────────────────────────────

    #[test]
    fn reinserting_same_quad_is_idempotent() {
        let atlas = atlas();
        let q = shared(Rect::new(0.0, 0.0, 16.0, 16.0));

        let a = atlas.insert_quad(&q);
        let b = atlas.insert_quad(&q);
        assert_eq!(a, b);
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn removing_twice_is_a_noop() {
        let atlas = atlas();
        let q = shared(Rect::new(0.0, 0.0, 16.0, 16.0));
        let key = atlas.insert_quad(&q);

        assert!(atlas.remove_quad(key));
        assert!(!atlas.remove_quad(key));
        assert!(atlas.is_empty());
    }

    #[test]
    fn keys_are_scoped_to_their_atlas() {
        let a = atlas();
        let b = atlas();
        let q = shared(Rect::new(0.0, 0.0, 16.0, 16.0));
        let key = a.insert_quad(&q);

        assert!(!b.remove_quad(key));
        assert!(a.contains(key));
    }

    #[test]
    fn atlas_sees_owner_mutations() {
        let atlas = atlas();
        let q = shared(Rect::new(0.0, 0.0, 16.0, 16.0));
        let key = atlas.insert_quad(&q);

        q.borrow_mut().draw_rect.origin.x = 100.0;
        assert_eq!(atlas.quad(key).unwrap().draw_rect.origin.x, 100.0);
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn clones_are_the_same_atlas() {
        let a = atlas();
        let b = a.clone();
        assert!(TextureAtlas::same(&a, &b));
        assert!(!TextureAtlas::same(&a, &atlas()));
    }

    #[test]
    fn create_from_texture_keeps_texture() {
        let tex = Texture::new("hero", Size::new(32.0, 32.0));
        let atlas = TextureAtlas::create(AtlasSource::Texture(tex.clone())).unwrap();
        assert_eq!(atlas.texture(), &tex);
    }

    #[test]
    fn create_from_missing_file_fails() {
        let src = AtlasSource::File(PathBuf::from("/no/such/sheet.png"));
        assert!(TextureAtlas::create(src).is_err());
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_quads_records_live_quads_in_slot_order() {
        let atlas = atlas();
        let first = shared(Rect::new(0.0, 0.0, 16.0, 16.0));
        let second = shared(Rect::new(16.0, 0.0, 16.0, 16.0));
        atlas.insert_quad(&first);
        atlas.insert_quad(&second);
        {
            let dropped = shared(Rect::new(32.0, 0.0, 16.0, 16.0));
            atlas.insert_quad(&dropped);
        }

        let mut list = DrawList::new();
        assert_eq!(atlas.draw_quads(&mut list, ZIndex(0)), 2);

        let xs: Vec<f32> = list
            .items()
            .iter()
            .map(|item| {
                let DrawCmd::Quad(cmd) = &item.cmd;
                cmd.quad.texture_rect.origin.x
            })
            .collect();
        assert_eq!(xs, vec![0.0, 16.0]);
    }

    #[test]
    fn draw_quad_tags_the_atlas_texture() {
        let atlas = atlas();
        let mut list = DrawList::new();
        atlas.draw_quad(&mut list, ZIndex(3), &Quad::for_rect(Rect::new(0.0, 0.0, 8.0, 8.0)));

        let DrawCmd::Quad(cmd) = &list.items()[0].cmd;
        assert_eq!(cmd.texture, atlas.texture().id());
        assert_eq!(list.items()[0].key.z, ZIndex(3));
    }
}
