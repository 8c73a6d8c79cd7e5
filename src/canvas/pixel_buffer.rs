use std::ops::{Index, IndexMut};

use crate::color::Pixel;
use crate::error::{Error, Result};

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major RGB canvas with `i32` dimensions.
///
/// `(x, y)` lives at index `x + width * y`; `y` grows downward. The default
/// buffer is empty (`0 x 0`) and only becomes non-empty through [`new`] or a
/// decode that replaces it wholesale.
///
/// [`new`]: PixelBuffer::new
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: i32,
    height: i32,
}

impl PixelBuffer {
    /// Create a black buffer. Both dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            pixels: vec![Pixel::default(); len],
            width,
            height,
        })
    }

    /// Wrap an existing row-major pixel vector
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Pixel>) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        if pixels.len() != len {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub(crate) fn checked_len(width: i32, height: i32) -> Result<usize> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of pixels (`width * height`)
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True for the default `0 x 0` buffer
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Linear offset of `(x, y)`; callers must have checked bounds
    #[inline]
    pub(crate) fn index_of(&self, x: i32, y: i32) -> usize {
        x as usize + self.width as usize * y as usize
    }

    pub(crate) fn check(&self, operation: &'static str, x: i32, y: i32) -> Result<()> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(Error::out_of_bounds(operation, x, y))
        }
    }

    /// Read the pixel at `(x, y)`
    pub fn get(&self, x: i32, y: i32) -> Result<Pixel> {
        self.check("get", x, y)?;
        Ok(self.pixels[self.index_of(x, y)])
    }

    /// Mutable reference to the pixel at `(x, y)`
    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut Pixel> {
        self.check("get", x, y)?;
        let idx = self.index_of(x, y);
        Ok(&mut self.pixels[idx])
    }

    /// Write the pixel at `(x, y)`
    pub fn set(&mut self, x: i32, y: i32, color: Pixel) -> Result<()> {
        self.check("set", x, y)?;
        let idx = self.index_of(x, y);
        self.pixels[idx] = color;
        Ok(())
    }

    /// Write without a bounds check; `(x, y)` must already be validated
    #[inline]
    pub(crate) fn put(&mut self, x: i32, y: i32, color: Pixel) {
        let idx = self.index_of(x, y);
        self.pixels[idx] = color;
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }

    /// Pixels in row-major storage order
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// One storage row
    pub(crate) fn row(&self, y: i32) -> &[Pixel] {
        let start = self.index_of(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    pub(crate) fn row_mut(&mut self, y: i32) -> &mut [Pixel] {
        let start = self.index_of(0, y);
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Pixel> {
        self.pixels.iter_mut()
    }

    // ========================================================================
    // Whole-image transforms
    // ========================================================================

    /// Mirror top to bottom
    pub fn flip_vertical(&self) -> Self {
        let mut flipped = self.clone();
        for y in 0..self.height {
            flipped
                .row_mut(self.height - 1 - y)
                .copy_from_slice(self.row(y));
        }
        flipped
    }

    /// Mirror left to right
    pub fn flip_horizontal(&self) -> Self {
        let mut flipped = self.clone();
        for y in 0..self.height {
            flipped.row_mut(y).reverse();
        }
        flipped
    }

    /// Rotate 90 degrees clockwise. Output dimensions are swapped.
    pub fn rotate_90_right(&self) -> Self {
        let mut rotated = self.swapped();
        for y in 0..self.height {
            for x in 0..self.width {
                // (x, y) -> (height - 1 - y, x)
                rotated.put(self.height - 1 - y, x, self.pixels[self.index_of(x, y)]);
            }
        }
        rotated
    }

    /// Rotate 90 degrees counter-clockwise. Output dimensions are swapped.
    pub fn rotate_90_left(&self) -> Self {
        let mut rotated = self.swapped();
        for y in 0..self.height {
            for x in 0..self.width {
                // (x, y) -> (y, width - 1 - x)
                rotated.put(y, self.width - 1 - x, self.pixels[self.index_of(x, y)]);
            }
        }
        rotated
    }

    /// Black buffer with width and height exchanged
    fn swapped(&self) -> Self {
        Self {
            pixels: vec![Pixel::default(); self.pixels.len()],
            width: self.height,
            height: self.width,
        }
    }
}

impl Index<usize> for PixelBuffer {
    type Output = Pixel;

    fn index(&self, i: usize) -> &Pixel {
        &self.pixels[i]
    }
}

impl IndexMut<usize> for PixelBuffer {
    fn index_mut(&mut self, i: usize) -> &mut Pixel {
        &mut self.pixels[i]
    }
}

impl<'a> IntoIterator for &'a PixelBuffer {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

impl<'a> IntoIterator for &'a mut PixelBuffer {
    type Item = &'a mut Pixel;
    type IntoIter = std::slice::IterMut<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter_mut()
    }
}
