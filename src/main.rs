mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use bmpcanvas::{codec, PixelBuffer, Scene};
use clap::Parser;
use log::info;

use cli::{Cli, Command, Transform};

fn render(scene_path: &Path, output: &Path) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    let image = scene
        .render()
        .with_context(|| format!("rendering scene '{}'", scene.name))?;
    image.save(output)?;
    info!(
        "rendered '{}' ({} shapes, {}x{}) to {}",
        scene.name,
        scene.shapes.len(),
        image.width(),
        image.height(),
        output.display()
    );
    Ok(())
}

fn print_info(file: &Path) -> Result<()> {
    let h = codec::read_header(file)?;
    println!("{}", file.display());
    println!("  file size:      {}", h.file_size);
    println!("  pixel offset:   {}", h.offset_bits);
    println!("  info size:      {}", h.size);
    println!(
        "  dimensions:     {}x{} ({})",
        h.width,
        h.rows(),
        if h.is_bottom_up() { "bottom-up" } else { "top-down" }
    );
    println!("  bits per pixel: {}", h.bits_per_pixel);
    println!("  image size:     {}", h.size_image);
    println!("  row size:       {}", codec::row_size(h.width as usize));
    Ok(())
}

fn transform(input: &Path, output: &Path, op: Transform) -> Result<()> {
    let image = PixelBuffer::open(input)?;
    let result = match op {
        Transform::FlipH => image.flip_horizontal(),
        Transform::FlipV => image.flip_vertical(),
        Transform::RotateLeft => image.rotate_90_left(),
        Transform::RotateRight => image.rotate_90_right(),
    };
    result.save(output)?;
    info!("{:?}: {} -> {}", op, input.display(), output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render { scene, output } => render(scene, output),
        Command::Info { file } => print_info(file),
        Command::Transform { input, output, op } => transform(input, output, *op),
    }
}
