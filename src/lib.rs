//! # bmpcanvas
//!
//! An in-memory 24-bit raster canvas, integer drawing primitives that refuse
//! to write outside it, and a byte-exact codec for uncompressed 24bpp BMP
//! files.
//!
//! ```no_run
//! use bmpcanvas::{named, PixelBuffer};
//!
//! # fn main() -> bmpcanvas::Result<()> {
//! let mut image = PixelBuffer::new(512, 240)?;
//! image.clear(bmpcanvas::Pixel::from_rgb(0x25292e));
//! image.draw_line(250, 50, 500, 50, named::YELLOW)?;
//! image.fill_rect(120, 10, 100, 100, named::WHITE)?;
//! image.fill_triangle(180, 120, 130, 220, 245, 220, named::MAGENTA)?;
//! image.draw_circle(300, 170, 50, named::GRAY)?;
//! image.save("primitives.bmp")?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod codec;
pub mod color;
pub mod error;
pub mod shapes;

pub use canvas::PixelBuffer;
pub use codec::{decode, encode, BitmapHeader};
pub use color::{named, Pixel};
pub use error::{Error, ErrorKind, Result};
pub use shapes::{Scene, Shape, Style};
