//! Scene-graph node state shared by every visual node type.
//!
//! Traversal and parent/child bookkeeping live with the graph owner; a node
//! only carries its own transform inputs plus the dirty markers the update
//! pass consumes.

use crate::coords::{Size, Vec2};
use crate::scene::ZIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: Vec2,
    scale_x: f32,
    scale_y: f32,
    /// Normalized (0..1) pivot inside `content_size`.
    anchor_point: Vec2,
    content_size: Size,
    visible: bool,
    z_index: ZIndex,
    dirty: bool,
    recursive_dirty: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_point: Vec2::new(0.5, 0.5),
            content_size: Size::zero(),
            visible: true,
            z_index: ZIndex::default(),
            dirty: true,
            recursive_dirty: true,
        }
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    #[inline]
    pub fn anchor_point(&self) -> Vec2 {
        self.anchor_point
    }

    /// Anchor point expressed in content pixels.
    #[inline]
    pub fn anchor_point_in_pixels(&self) -> Vec2 {
        Vec2::new(
            self.anchor_point.x * self.content_size.width,
            self.anchor_point.y * self.content_size.height,
        )
    }

    #[inline]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z_index
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_recursive_dirty(&self) -> bool {
        self.recursive_dirty
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.mark_dirty();
    }

    /// Uniform scale on both axes.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale_x = scale;
        self.scale_y = scale;
        self.mark_dirty();
    }

    pub fn set_scale_x(&mut self, scale_x: f32) {
        self.scale_x = scale_x;
        self.mark_dirty();
    }

    pub fn set_scale_y(&mut self, scale_y: f32) {
        self.scale_y = scale_y;
        self.mark_dirty();
    }

    pub fn set_anchor_point(&mut self, anchor_point: Vec2) {
        self.anchor_point = anchor_point;
        self.mark_dirty();
    }

    pub fn set_content_size(&mut self, content_size: Size) {
        self.content_size = content_size;
        self.mark_dirty();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.mark_dirty();
    }

    pub fn set_z_index(&mut self, z_index: ZIndex) {
        self.z_index = z_index;
        self.mark_dirty();
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.recursive_dirty = true;
    }

    /// Called by the update pass once this node's render state is current.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        self.recursive_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_identity_transform_and_dirty() {
        let n = Node::new();
        assert_eq!(n.position(), Vec2::zero());
        assert_eq!((n.scale_x(), n.scale_y()), (1.0, 1.0));
        assert!(n.visible());
        assert!(n.is_dirty() && n.is_recursive_dirty());
    }

    #[test]
    fn anchor_in_pixels_scales_with_content() {
        let mut n = Node::new();
        n.set_content_size(Size::new(32.0, 16.0));
        assert_eq!(n.anchor_point_in_pixels(), Vec2::new(16.0, 8.0));

        n.set_anchor_point(Vec2::new(0.0, 1.0));
        assert_eq!(n.anchor_point_in_pixels(), Vec2::new(0.0, 16.0));
    }

    #[test]
    fn set_scale_touches_both_axes() {
        let mut n = Node::new();
        n.set_scale(2.5);
        assert_eq!((n.scale_x(), n.scale_y()), (2.5, 2.5));
    }

    #[test]
    fn mutation_after_clear_marks_dirty_again() {
        let mut n = Node::new();
        n.clear_dirty();
        assert!(!n.is_dirty() && !n.is_recursive_dirty());

        n.set_position(Vec2::new(1.0, 2.0));
        assert!(n.is_dirty() && n.is_recursive_dirty());
    }
}
