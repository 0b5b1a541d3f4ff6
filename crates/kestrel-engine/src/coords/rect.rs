use super::{Size, Vec2};

/// Axis-aligned rectangle: origin + size.
///
/// `Rect` is a plain value. Copying it into a quad never aliases the source,
/// so later edits to a sprite's rect only reach the quad through a recompute.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Size::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rect at (0, 0) covering `size`.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::from_origin_size(Vec2::zero(), size)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.width == 0.0 || self.size.height == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── equality ──────────────────────────────────────────────────────────

    #[test]
    fn equality_compares_every_component() {
        let base = r(4.0, 8.0, 16.0, 32.0);
        assert_eq!(base, r(4.0, 8.0, 16.0, 32.0));
        assert_ne!(base, r(5.0, 8.0, 16.0, 32.0));
        assert_ne!(base, r(4.0, 9.0, 16.0, 32.0));
        assert_ne!(base, r(4.0, 8.0, 17.0, 32.0));
        assert_ne!(base, r(4.0, 8.0, 16.0, 33.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!r(0.0, 0.0, -5.0, 5.0).is_empty());
    }

    #[test]
    fn from_size_sits_at_origin() {
        let rect = Rect::from_size(Size::new(64.0, 48.0));
        assert_eq!(rect, r(0.0, 0.0, 64.0, 48.0));
        assert_eq!(rect.origin, Vec2::zero());
    }
}
