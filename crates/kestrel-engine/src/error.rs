use thiserror::Error;

/// Failures raised by sprite construction and the sprite-sheet render path.
///
/// Both non-IO variants are configuration mistakes by the caller; nothing is
/// retried.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite has no texture")]
    NoTexture,

    #[error("update_transform is only valid when the sprite is rendered through a sprite sheet")]
    InvalidContext,

    #[error("failed to load sprite texture: {0}")]
    Image(#[from] image::ImageError),
}
