//! Sprite sheets: one shared atlas rendered as a single batch.

use crate::atlas::TextureAtlas;
use crate::coords::{Rect, Size};
use crate::error::SpriteError;
use crate::frame::SpriteFrame;
use crate::scene::{DrawList, ZIndex};
use crate::sprite::Sprite;
use crate::texture::Texture;

/// Upper bound on the number of frames [`SpriteSheet::frames_grid`] produces.
pub const MAX_GRID_FRAMES: u64 = 1 << 16;

/// A texture whose atlas is shared by every sprite created from the sheet.
///
/// Cloning a sheet clones the handle; both refer to the same atlas.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    atlas: TextureAtlas,
    z_index: ZIndex,
}

impl SpriteSheet {
    pub fn new(texture: Texture) -> Self {
        Self::from_atlas(TextureAtlas::with_texture(texture))
    }

    pub fn from_atlas(atlas: TextureAtlas) -> Self {
        Self { atlas, z_index: ZIndex::default() }
    }

    pub fn with_z_index(mut self, z_index: ZIndex) -> Self {
        self.z_index = z_index;
        self
    }

    #[inline]
    pub fn texture_atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z_index
    }

    /// Frame for `rect` of the sheet texture.
    pub fn frame(&self, rect: Rect) -> SpriteFrame {
        SpriteFrame::new(self.atlas.texture().clone(), rect)
    }

    /// Cuts the texture into `cell`-sized frames, row-major from the top-left.
    ///
    /// Partial cells at the right/bottom edges are dropped. Grids of more than
    /// [`MAX_GRID_FRAMES`] cells yield no frames.
    pub fn frames_grid(&self, cell: Size) -> Vec<SpriteFrame> {
        if !(cell.width > 0.0 && cell.height > 0.0) {
            log::debug!("frames_grid: non-positive cell {cell:?}; no frames");
            return Vec::new();
        }

        let tex = self.atlas.texture().size();
        let cols = (tex.width / cell.width).floor() as u64;
        let rows = (tex.height / cell.height).floor() as u64;

        let count = match cols.checked_mul(rows) {
            Some(count) if count <= MAX_GRID_FRAMES => count,
            _ => {
                log::debug!("frames_grid: {cols}x{rows} cells of {cell:?} over limit; no frames");
                return Vec::new();
            }
        };

        let mut frames = Vec::with_capacity(count as usize);
        for row in 0..rows {
            for col in 0..cols {
                let rect = Rect::new(
                    col as f32 * cell.width,
                    row as f32 * cell.height,
                    cell.width,
                    cell.height,
                );
                let name = format!("{}#{}", self.atlas.texture().name(), row * cols + col);
                frames.push(self.frame(rect).named(name));
            }
        }
        frames
    }

    /// Sprite-sheet update + draw pass over `sprites`.
    ///
    /// Sprites of other atlases are skipped. Every sprite of this sheet gets
    /// `update_transform`, then the visible ones are recorded in slice order;
    /// they share the sheet texture, so they form one batch. Returns how many
    /// quads were recorded.
    ///
    /// Fails with [`SpriteError::InvalidContext`] before touching any sprite
    /// or `list` if one of this atlas' sprites is not sheet-backed.
    pub fn render(
        &self,
        sprites: &mut [Sprite],
        list: &mut DrawList,
    ) -> Result<usize, SpriteError> {
        if sprites
            .iter()
            .any(|sprite| self.owns(sprite) && !sprite.uses_sprite_sheet())
        {
            return Err(SpriteError::InvalidContext);
        }

        let mut drawn = 0;
        for sprite in sprites.iter_mut() {
            if !self.owns(sprite) {
                log::debug!(
                    "render: skipping sprite from atlas '{}'",
                    sprite.texture_atlas().texture().name()
                );
                continue;
            }

            sprite.update_transform()?;

            if sprite.node().visible() {
                self.atlas.draw_quad(list, self.z_index, &sprite.quad());
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// Whether `sprite` is registered with this sheet's atlas.
    #[inline]
    fn owns(&self, sprite: &Sprite) -> bool {
        TextureAtlas::same(sprite.texture_atlas(), &self.atlas)
    }

    /// Records every quad registered with the sheet's atlas, visible or not.
    pub fn draw_all(&self, list: &mut DrawList) -> usize {
        self.atlas.draw_quads(list, self.z_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::DrawCmd;
    use crate::sprite::SpriteOptions;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(Texture::new("walk", Size::new(96.0, 64.0)))
    }

    fn drawn_rects(list: &DrawList) -> Vec<Rect> {
        list.items()
            .iter()
            .map(|item| {
                let DrawCmd::Quad(cmd) = &item.cmd;
                cmd.quad.draw_rect
            })
            .collect()
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frames_grid_is_row_major_and_drops_partial_cells() {
        let frames = sheet().frames_grid(Size::new(40.0, 32.0));
        let rects: Vec<Rect> = frames.iter().map(SpriteFrame::rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 40.0, 32.0),
                Rect::new(40.0, 0.0, 40.0, 32.0),
                Rect::new(0.0, 32.0, 40.0, 32.0),
                Rect::new(40.0, 32.0, 40.0, 32.0),
            ]
        );
        assert_eq!(frames[3].name(), Some("walk#3"));
    }

    #[test]
    fn frames_grid_rejects_empty_cell() {
        assert!(sheet().frames_grid(Size::new(0.0, 16.0)).is_empty());
    }

    #[test]
    fn frames_share_sheet_texture() {
        let s = sheet();
        let f = s.frame(Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(f.texture(), s.texture_atlas().texture());
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_updates_and_records_visible_sprites() {
        let s = sheet();
        let mut sprites: Vec<Sprite> = (0..3)
            .map(|i| {
                let mut sp = Sprite::new(
                    SpriteOptions::new()
                        .spritesheet(&s)
                        .rect(Rect::new(i as f32 * 32.0, 0.0, 32.0, 32.0)),
                )
                .unwrap();
                sp.set_anchor_point(Vec2::zero());
                sp.set_position(Vec2::new(i as f32 * 40.0, 0.0));
                sp
            })
            .collect();
        sprites[1].set_visible(false);

        let mut list = DrawList::new();
        assert_eq!(s.render(&mut sprites, &mut list).unwrap(), 2);
        assert_eq!(
            drawn_rects(&list),
            vec![Rect::new(0.0, 0.0, 32.0, 32.0), Rect::new(80.0, 0.0, 32.0, 32.0)]
        );
        assert!(sprites.iter().all(|sp| !sp.node().is_dirty()));
    }

    #[test]
    fn render_skips_sprites_of_other_atlases() {
        let s = sheet();
        let mut sprites = vec![
            Sprite::new(
                SpriteOptions::new().texture(Texture::new("other", Size::new(8.0, 8.0))),
            )
            .unwrap(),
        ];

        let mut list = DrawList::new();
        assert_eq!(s.render(&mut sprites, &mut list).unwrap(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn render_propagates_invalid_context() {
        let s = sheet();
        // Joined the sheet's atlas explicitly, so not sheet-backed.
        let mut sprites =
            vec![Sprite::new(SpriteOptions::new().texture_atlas(s.texture_atlas())).unwrap()];

        let mut list = DrawList::new();
        let err = s.render(&mut sprites, &mut list).unwrap_err();
        assert!(matches!(err, SpriteError::InvalidContext));
    }

    #[test]
    fn failed_render_leaves_list_and_sprites_untouched() {
        let s = sheet();
        let mut backed = Sprite::new(SpriteOptions::new().spritesheet(&s)).unwrap();
        backed.set_position(Vec2::new(40.0, 40.0));
        let before = backed.quad();
        let joined = Sprite::new(SpriteOptions::new().texture_atlas(s.texture_atlas())).unwrap();
        let mut sprites = vec![backed, joined];

        let mut list = DrawList::new();
        assert!(s.render(&mut sprites, &mut list).is_err());

        assert!(list.is_empty());
        assert_eq!(sprites[0].quad(), before);
        assert!(sprites[0].node().is_dirty());
    }

    #[test]
    fn render_records_at_sheet_z_index() {
        let s = sheet().with_z_index(ZIndex(7));
        let mut sprites = vec![Sprite::new(SpriteOptions::new().spritesheet(&s)).unwrap()];

        let mut list = DrawList::new();
        s.render(&mut sprites, &mut list).unwrap();
        assert_eq!(list.items()[0].key.z, ZIndex(7));
    }

    #[test]
    fn frames_grid_refuses_oversized_grids() {
        let s = SpriteSheet::new(Texture::new("blank", Size::new(256.0, 64.0)));
        assert!(s.frames_grid(Size::new(0.001, 0.001)).is_empty());
        assert!(s.frames_grid(Size::new(f32::NAN, 8.0)).is_empty());
        assert_eq!(s.frames_grid(Size::new(1.0, 1.0)).len(), 256 * 64);
    }

    #[test]
    fn draw_all_includes_hidden_sprites() {
        let s = sheet();
        let mut hidden = Sprite::new(SpriteOptions::new().spritesheet(&s)).unwrap();
        hidden.set_visible(false);
        let _shown = Sprite::new(SpriteOptions::new().spritesheet(&s)).unwrap();

        let mut list = DrawList::new();
        assert_eq!(s.draw_all(&mut list), 2);
    }
}
