use crate::atlas::Quad;
use crate::texture::Texture;

use super::{DrawCmd, QuadCmd, SortKey, ZIndex};

/// A single recorded draw: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Records `quad` sampled from `texture`.
    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, texture: &Texture, quad: Quad) {
        self.push(
            z,
            DrawCmd::Quad(QuadCmd {
                texture: texture.id(),
                texture_size: texture.size(),
                quad,
            }),
        );
    }

    /// Iterates items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Size};

    fn quad_at(x: f32) -> Quad {
        Quad::for_rect(Rect::new(x, 0.0, 8.0, 8.0))
    }

    fn texture_x(item: &DrawItem) -> f32 {
        let DrawCmd::Quad(cmd) = &item.cmd;
        cmd.quad.texture_rect.origin.x
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let tex = Texture::new("t", Size::new(64.0, 64.0));
        let mut list = DrawList::new();
        list.push_quad(ZIndex(1), &tex, quad_at(0.0));
        list.push_quad(ZIndex(0), &tex, quad_at(8.0));
        list.push_quad(ZIndex(1), &tex, quad_at(16.0));

        let xs: Vec<f32> = list.iter_in_paint_order().map(texture_x).collect();
        assert_eq!(xs, vec![8.0, 0.0, 16.0]);
    }

    #[test]
    fn clear_resets_insertion_order() {
        let tex = Texture::new("t", Size::new(64.0, 64.0));
        let mut list = DrawList::new();
        list.push_quad(ZIndex(0), &tex, quad_at(0.0));
        list.clear();
        assert!(list.is_empty());

        list.push_quad(ZIndex(0), &tex, quad_at(0.0));
        assert_eq!(list.items()[0].key.order, 0);
    }

    #[test]
    fn recorded_quad_is_a_snapshot() {
        let tex = Texture::new("t", Size::new(64.0, 64.0));
        let mut list = DrawList::new();
        let mut q = quad_at(0.0);
        list.push_quad(ZIndex(0), &tex, q);
        q.texture_rect.origin.x = 32.0;

        assert_eq!(texture_x(&list.items()[0]), 0.0);
    }
}
