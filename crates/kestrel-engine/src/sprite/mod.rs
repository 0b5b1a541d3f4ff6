//! Sprites: nodes that display one rectangle of a shared texture atlas.
//!
//! A sprite owns its [`Quad`] and registers it with exactly one atlas at a
//! time. Property setters go through a per-instance [`Reactions`] table, so
//! the quad and the atlas registration are current before any setter returns.

mod options;
mod reactions;

use std::cell::RefCell;
use std::rc::Rc;

use crate::atlas::{AtlasSource, Quad, QuadKey, SharedQuad, TextureAtlas};
use crate::coords::{Rect, Vec2};
use crate::error::SpriteError;
use crate::frame::SpriteFrame;
use crate::node::Node;
use crate::scene::{DrawList, ZIndex};

pub use options::SpriteOptions;
pub use reactions::{Property, Reaction, Reactions};

/// Where the quad is currently registered.
#[derive(Debug)]
struct Attachment {
    atlas: TextureAtlas,
    key: QuadKey,
}

#[derive(Debug)]
pub struct Sprite {
    node: Node,
    rect: Rect,
    quad: SharedQuad,
    texture_atlas: TextureAtlas,
    attachment: Option<Attachment>,
    flip_x: bool,
    flip_y: bool,
    use_sprite_sheet: bool,
    display_frame: Option<SpriteFrame>,
    reactions: Reactions,
}

impl Sprite {
    /// Builds a sprite from `opts`.
    ///
    /// Fails with [`SpriteError::NoTexture`] when no texture source is given,
    /// and with [`SpriteError::Image`] when `file` cannot be read.
    pub fn new(opts: SpriteOptions) -> Result<Self, SpriteError> {
        let SpriteOptions {
            file,
            mut texture,
            frame,
            spritesheet,
            texture_atlas,
            mut rect,
        } = opts;

        if let Some(frame) = &frame {
            texture = Some(frame.texture().clone());
            rect = Some(frame.rect());
        }

        let mut use_sprite_sheet = false;
        let atlas = if let Some(path) = file {
            TextureAtlas::create(AtlasSource::File(path))?
        } else if let Some(texture) = texture {
            TextureAtlas::with_texture(texture)
        } else if let Some(sheet) = spritesheet {
            use_sprite_sheet = true;
            sheet.texture_atlas().clone()
        } else {
            texture_atlas.ok_or(SpriteError::NoTexture)?
        };

        let rect = rect.unwrap_or_else(|| atlas.texture().bounds());

        let mut node = Node::new();
        node.set_content_size(rect.size);

        let mut sprite = Self {
            node,
            rect,
            quad: Rc::new(RefCell::new(Quad::for_rect(rect))),
            texture_atlas: atlas,
            attachment: None,
            flip_x: false,
            flip_y: false,
            use_sprite_sheet,
            display_frame: None,
            reactions: Reactions::sprite(),
        };
        sprite.notify(Property::TEXTURE_ATLAS);

        if let Some(frame) = frame {
            sprite.set_display_frame(frame);
        }

        log::trace!(
            "sprite created on '{}' (rect {:?}, sheet: {})",
            sprite.texture_atlas.texture().name(),
            sprite.rect,
            sprite.use_sprite_sheet
        );
        Ok(sprite)
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Source region in the atlas texture.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Snapshot of the current quad.
    #[inline]
    pub fn quad(&self) -> Quad {
        *self.quad.borrow()
    }

    /// Slot of the quad in the current atlas.
    #[inline]
    pub fn quad_key(&self) -> Option<QuadKey> {
        self.attachment.as_ref().map(|a| a.key)
    }

    #[inline]
    pub fn texture_atlas(&self) -> &TextureAtlas {
        &self.texture_atlas
    }

    #[inline]
    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    #[inline]
    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    /// Whether this sprite renders through a sprite sheet's shared atlas.
    #[inline]
    pub fn uses_sprite_sheet(&self) -> bool {
        self.use_sprite_sheet
    }

    // ── properties ────────────────────────────────────────────────────────

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.notify(Property::RECT);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.node.set_scale(scale);
        self.notify(Property::SCALE);
    }

    pub fn set_scale_x(&mut self, scale_x: f32) {
        self.node.set_scale_x(scale_x);
        self.notify(Property::SCALE_X);
    }

    pub fn set_scale_y(&mut self, scale_y: f32) {
        self.node.set_scale_y(scale_y);
        self.notify(Property::SCALE_Y);
    }

    pub fn set_flip_x(&mut self, flip_x: bool) {
        self.flip_x = flip_x;
        self.notify(Property::FLIP_X);
    }

    pub fn set_flip_y(&mut self, flip_y: bool) {
        self.flip_y = flip_y;
        self.notify(Property::FLIP_Y);
    }

    /// Sets both flips with a single quad rebuild.
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self.notify(Property::FLIP_X | Property::FLIP_Y);
    }

    /// Moves the quad registration to `atlas`. Reassigning the current atlas
    /// leaves the registration untouched.
    pub fn set_texture_atlas(&mut self, atlas: TextureAtlas) {
        self.texture_atlas = atlas;
        self.notify(Property::TEXTURE_ATLAS);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.node.set_position(position);
        self.notify(Property::POSITION);
    }

    pub fn set_anchor_point(&mut self, anchor_point: Vec2) {
        self.node.set_anchor_point(anchor_point);
        self.notify(Property::ANCHOR_POINT);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.node.set_visible(visible);
        self.notify(Property::VISIBLE);
    }

    pub fn set_z_index(&mut self, z_index: ZIndex) {
        self.node.set_z_index(z_index);
        self.notify(Property::Z_INDEX);
    }

    /// Runs every reaction watching any of `changed`.
    pub fn notify(&mut self, changed: Property) {
        for reaction in self.reactions.triggered(changed) {
            match reaction {
                Reaction::UpdateTextureQuad => self.update_texture_quad(),
                Reaction::UpdateQuad => self.update_quad(),
            }
        }
    }

    fn update_texture_quad(&mut self) {
        if let Some(current) = &self.attachment {
            if TextureAtlas::same(&current.atlas, &self.texture_atlas)
                && current.atlas.contains(current.key)
            {
                return;
            }
        }

        if let Some(old) = self.attachment.take() {
            old.atlas.remove_quad(old.key);
        }

        let key = self.texture_atlas.insert_quad(&self.quad);
        self.attachment = Some(Attachment {
            atlas: self.texture_atlas.clone(),
            key,
        });
    }

    /// Rebuilds the quad from `rect` and the flip flags.
    ///
    /// Scale is a trigger but not an input here; the sprite-sheet path
    /// applies scale in [`update_transform`](Self::update_transform).
    fn update_quad(&mut self) {
        let rect = self.rect;
        let mut quad = self.quad.borrow_mut();

        quad.texture_rect = rect;
        quad.draw_rect = Rect::from_size(rect.size);

        if self.flip_x {
            quad.draw_rect.size.width = -quad.draw_rect.size.width;
            quad.draw_rect.origin.x = -rect.size.width;
        }
        if self.flip_y {
            quad.draw_rect.size.height = -quad.draw_rect.size.height;
            quad.draw_rect.origin.y = -rect.size.height;
        }
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Writes the node transform into the quad the sheet's atlas batches.
    ///
    /// Hidden sprites only have their dirty flags cleared; their quad keeps
    /// its last computed value. Flips are not applied on this path.
    pub fn update_transform(&mut self) -> Result<(), SpriteError> {
        if !self.use_sprite_sheet {
            return Err(SpriteError::InvalidContext);
        }

        if !self.node.visible() {
            self.node.clear_dirty();
            return Ok(());
        }

        let sx = self.node.scale_x();
        let sy = self.node.scale_y();
        let anchor = self.node.anchor_point_in_pixels().scale_by(sx, sy);

        {
            let mut quad = self.quad.borrow_mut();
            quad.draw_rect.origin = self.node.position() - anchor;
            quad.draw_rect.size = self.rect.size.scale_by(sx, sy);
        }

        self.node.clear_dirty();
        Ok(())
    }

    /// Records this sprite's quad through its atlas.
    pub fn draw(&self, list: &mut DrawList) {
        self.texture_atlas
            .draw_quad(list, self.node.z_index(), &self.quad.borrow());
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Whether `frame` covers exactly the rect this sprite displays.
    ///
    /// Only geometry is compared; a same-sized region of another texture
    /// also matches.
    pub fn is_frame_displayed(&self, frame: &SpriteFrame) -> bool {
        frame.rect() == self.rect
    }

    #[inline]
    pub fn display_frame(&self) -> Option<&SpriteFrame> {
        self.display_frame.as_ref()
    }

    /// Shows `frame` by adopting its rect. The atlas is not swapped.
    pub fn set_display_frame(&mut self, frame: SpriteFrame) {
        if frame.texture() != self.texture_atlas.texture() {
            log::debug!(
                "display frame from texture '{}' shown on atlas '{}'; texture not swapped",
                frame.texture().name(),
                self.texture_atlas.texture().name()
            );
        }
        let rect = frame.rect();
        self.display_frame = Some(frame);
        self.set_rect(rect);
    }
}

impl Drop for Sprite {
    fn drop(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.atlas.remove_quad(attachment.key);
        }
    }
}
