use crate::atlas::Quad;
use crate::coords::Size;
use crate::texture::TextureId;

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
}

/// One textured quad, captured by value at record time.
///
/// The texture size travels with the command so batching can compute UVs
/// without looking the texture up again.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadCmd {
    pub texture: TextureId,
    pub texture_size: Size,
    pub quad: Quad,
}
