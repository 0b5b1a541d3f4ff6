use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::Rect;

/// Draw rect (where on screen) paired with texture rect (where in the atlas).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Quad {
    pub draw_rect: Rect,
    pub texture_rect: Rect,
}

impl Quad {
    #[inline]
    pub const fn new(draw_rect: Rect, texture_rect: Rect) -> Self {
        Self { draw_rect, texture_rect }
    }

    /// Unflipped, unscaled quad for `rect`: drawn at (0, 0) with the rect's size.
    #[inline]
    pub const fn for_rect(rect: Rect) -> Self {
        Self::new(Rect::from_size(rect.size), rect)
    }
}

/// A quad owned by one sprite and observed by at most one atlas.
///
/// The owner holds the only strong reference. Atlases keep a `Weak` so a quad
/// never outlives its sprite through an atlas slot.
pub type SharedQuad = Rc<RefCell<Quad>>;
