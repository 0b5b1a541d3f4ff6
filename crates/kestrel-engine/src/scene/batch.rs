//! Folding a draw stream into per-texture instance batches.

use bytemuck::{Pod, Zeroable};

use crate::atlas::Quad;
use crate::coords::Size;
use crate::texture::TextureId;

use super::{DrawCmd, DrawList};

/// GPU-ready instance record for one quad.
///
/// `origin`/`size` are in logical pixels and keep their sign: a flipped sprite
/// arrives with a negative size and the vertex shader mirrors it.
/// `uv_origin`/`uv_size` are normalized to the texture (0..1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub uv_origin: [f32; 2],
    pub uv_size: [f32; 2],
}

impl QuadInstance {
    /// `None` when the quad would not cover any pixels or the texture has no area.
    pub fn from_quad(quad: &Quad, texture_size: Size) -> Option<Self> {
        if quad.draw_rect.is_empty() || texture_size.width <= 0.0 || texture_size.height <= 0.0 {
            return None;
        }

        let d = quad.draw_rect;
        let t = quad.texture_rect;
        Some(Self {
            origin: [d.origin.x, d.origin.y],
            size: [d.size.width, d.size.height],
            uv_origin: [
                t.origin.x / texture_size.width,
                t.origin.y / texture_size.height,
            ],
            uv_size: [
                t.size.width / texture_size.width,
                t.size.height / texture_size.height,
            ],
        })
    }
}

/// Consecutive quads (in paint order) sharing one texture: one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadBatch {
    pub texture: TextureId,
    pub instances: Vec<QuadInstance>,
}

impl QuadBatch {
    /// Raw instance bytes for a vertex buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl DrawList {
    /// Groups recorded quads into batches.
    ///
    /// Paint order is preserved: a texture change always starts a new batch,
    /// even if that texture appeared earlier in the frame.
    pub fn batches(&mut self) -> Vec<QuadBatch> {
        let mut batches: Vec<QuadBatch> = Vec::new();
        let mut skipped = 0usize;

        for item in self.iter_in_paint_order() {
            let DrawCmd::Quad(cmd) = &item.cmd;
            let Some(instance) = QuadInstance::from_quad(&cmd.quad, cmd.texture_size) else {
                skipped += 1;
                continue;
            };

            match batches.last_mut() {
                Some(batch) if batch.texture == cmd.texture => batch.instances.push(instance),
                _ => batches.push(QuadBatch {
                    texture: cmd.texture,
                    instances: vec![instance],
                }),
            }
        }

        if skipped > 0 {
            log::trace!("batching skipped {skipped} zero-area quads");
        }
        batches
    }
}
