use core::ops::Sub;

/// 2D point or offset in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Per-axis product, used for scaling anchor offsets by `(scale_x, scale_y)`.
    #[inline]
    pub fn scale_by(self, sx: f32, sy: f32) -> Vec2 {
        Vec2::new(self.x * sx, self.y * sy)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
