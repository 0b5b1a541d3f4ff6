/// Width/height pair.
///
/// Sizes are allowed to go negative: a flipped draw rect carries a negative
/// width or height and renderers mirror the texture accordingly.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn scale_by(self, sx: f32, sy: f32) -> Size {
        Size::new(self.width * sx, self.height * sy)
    }
}

impl From<(u32, u32)> for Size {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Size::new(width as f32, height as f32)
    }
}
