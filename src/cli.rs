// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "bmpcanvas")]
#[command(about = "Render, inspect and transform 24-bit BMP files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a JSON scene to a bitmap
    Render {
        /// Scene description
        scene: PathBuf,
        /// Output bitmap
        #[arg(short, long, default_value = "scene.bmp")]
        output: PathBuf,
    },
    /// Print the header fields of a bitmap
    Info {
        file: PathBuf,
    },
    /// Flip or rotate a bitmap
    Transform {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum)]
        op: Transform,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    FlipH,
    FlipV,
    RotateLeft,
    RotateRight,
}
