use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use kestrel_engine::coords::{Size, Vec2};
use kestrel_engine::logging::{init_logging, LoggingConfig};
use kestrel_engine::scene::{DrawList, ZIndex};
use kestrel_engine::{Sprite, SpriteOptions, SpriteSheet, Texture};

/// Cuts a sheet into frames, lays them out as sprites and reports the
/// batches a quad renderer would receive.
#[derive(Debug, Parser)]
#[command(name = "kestrel-studio", version)]
struct Args {
    /// Sheet image. Without it a blank texture of --width x --height is used.
    #[arg(long)]
    sheet: Option<PathBuf>,

    #[arg(long, default_value_t = 256)]
    width: u32,

    #[arg(long, default_value_t = 64)]
    height: u32,

    /// Frame cell size, e.g. 32x32.
    #[arg(long, default_value = "32x32", value_parser = parse_cell)]
    cell: Size,

    /// Uniform scale applied to every sheet sprite.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Flip the standalone preview sprite horizontally.
    #[arg(long)]
    flip_x: bool,

    /// Flip the standalone preview sprite vertically.
    #[arg(long)]
    flip_y: bool,

    /// env_logger filter, e.g. "kestrel_engine=trace".
    #[arg(long)]
    log: Option<String>,
}

fn parse_cell(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected <width>x<height>, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("cell must be positive, got {w}x{h}"));
    }
    Ok(Size::new(w, h))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    let texture = match &args.sheet {
        Some(path) => Texture::from_file(path)
            .with_context(|| format!("reading sheet {}", path.display()))?,
        None => Texture::new("blank", Size::from((args.width, args.height))),
    };

    let sheet = SpriteSheet::new(texture.clone()).with_z_index(ZIndex(1));
    let frames = sheet.frames_grid(args.cell);
    if frames.is_empty() {
        let tex = texture.size();
        bail!(
            "cell {}x{} yields no frames for a {}x{} texture",
            args.cell.width,
            args.cell.height,
            tex.width,
            tex.height
        );
    }

    let step = args.cell.width * args.scale;
    let mut sprites = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let mut sprite = Sprite::new(SpriteOptions::new().spritesheet(&sheet).rect(frame.rect()))
            .with_context(|| format!("building sprite for frame {i}"))?;
        sprite.set_display_frame(frame.clone());
        sprite.set_anchor_point(Vec2::zero());
        sprite.set_scale(args.scale);
        sprite.set_position(Vec2::new(i as f32 * step, 0.0));
        sprites.push(sprite);
    }

    let mut list = DrawList::new();
    let drawn = sheet
        .render(&mut sprites, &mut list)
        .context("sprite sheet render pass")?;

    let mut preview = Sprite::new(SpriteOptions::new().frame(frames[0].clone()))
        .context("building preview sprite")?;
    preview.set_flip(args.flip_x, args.flip_y);
    preview.set_z_index(ZIndex(2));
    preview.draw(&mut list);

    log::info!(
        "texture '{}' ({}x{}): {} frames, {} sheet quads, atlas slots {}",
        texture.name(),
        texture.size().width,
        texture.size().height,
        frames.len(),
        drawn,
        sheet.texture_atlas().len()
    );
    log::info!("preview draw rect {:?}", preview.quad().draw_rect);

    for (i, batch) in list.batches().iter().enumerate() {
        log::info!(
            "batch {i}: texture {} | {} instances | {} bytes",
            batch.texture.get(),
            batch.instances.len(),
            batch.as_bytes().len()
        );
    }

    Ok(())
}
