use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// `"BM"` read as a little-endian u16
pub const BITMAP_MAGIC: u16 = 0x4D42;
/// File header (14) plus BITMAPINFOHEADER (40)
pub const HEADER_SIZE: usize = 54;
/// Size of the BITMAPINFOHEADER part
pub const INFO_HEADER_SIZE: u32 = 40;
pub const BITS_PER_PIXEL: u16 = 24;

/// The 54-byte header of an uncompressed 24bpp bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    /* file header */
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset_bits: u32,
    /* info header */
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// Bytes per stored row: three per pixel, padded to a multiple of four.
///
/// Equal to `width * 3 + width % 4` for every width, since `3w` and `-w`
/// agree modulo 4.
#[inline]
pub fn row_size(width: usize) -> usize {
    (width * 3 + 3) / 4 * 4
}

impl BitmapHeader {
    /// Header for a bottom-up `width x height` image with pixels right after it
    pub fn for_image(width: i32, height: i32) -> Result<Self> {
        let invalid = || Error::InvalidDimension { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }
        let bitmap_size = row_size(width as usize)
            .checked_mul(height as usize)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?;
        let file_size = bitmap_size
            .checked_add(HEADER_SIZE as u32)
            .ok_or_else(invalid)?;

        Ok(Self {
            magic: BITMAP_MAGIC,
            file_size,
            reserved1: 0,
            reserved2: 0,
            offset_bits: HEADER_SIZE as u32,
            size: INFO_HEADER_SIZE,
            width,
            height,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: 0,
            size_image: bitmap_size,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        })
    }

    /// Parse the fixed 54 bytes without validating them
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; HEADER_SIZE];
        reader.read_exact(&mut raw).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::format("truncated header")
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&raw).map_err(Error::from)
    }

    fn parse(mut raw: &[u8]) -> io::Result<Self> {
        let r = &mut raw;
        Ok(Self {
            magic: r.read_u16::<LittleEndian>()?,
            file_size: r.read_u32::<LittleEndian>()?,
            reserved1: r.read_u16::<LittleEndian>()?,
            reserved2: r.read_u16::<LittleEndian>()?,
            offset_bits: r.read_u32::<LittleEndian>()?,
            size: r.read_u32::<LittleEndian>()?,
            width: r.read_i32::<LittleEndian>()?,
            height: r.read_i32::<LittleEndian>()?,
            planes: r.read_u16::<LittleEndian>()?,
            bits_per_pixel: r.read_u16::<LittleEndian>()?,
            compression: r.read_u32::<LittleEndian>()?,
            size_image: r.read_u32::<LittleEndian>()?,
            x_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            y_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            colors_used: r.read_u32::<LittleEndian>()?,
            colors_important: r.read_u32::<LittleEndian>()?,
        })
    }

    /// Emit the 54 bytes, little-endian and tightly packed
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u16::<LittleEndian>(self.magic)?;
        w.write_u32::<LittleEndian>(self.file_size)?;
        w.write_u16::<LittleEndian>(self.reserved1)?;
        w.write_u16::<LittleEndian>(self.reserved2)?;
        w.write_u32::<LittleEndian>(self.offset_bits)?;
        w.write_u32::<LittleEndian>(self.size)?;
        w.write_i32::<LittleEndian>(self.width)?;
        w.write_i32::<LittleEndian>(self.height)?;
        w.write_u16::<LittleEndian>(self.planes)?;
        w.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        w.write_u32::<LittleEndian>(self.compression)?;
        w.write_u32::<LittleEndian>(self.size_image)?;
        w.write_i32::<LittleEndian>(self.x_pixels_per_meter)?;
        w.write_i32::<LittleEndian>(self.y_pixels_per_meter)?;
        w.write_u32::<LittleEndian>(self.colors_used)?;
        w.write_u32::<LittleEndian>(self.colors_important)
    }

    /// Reject anything other than an uncompressed 24bpp image
    pub fn validate(&self) -> Result<()> {
        if self.magic != BITMAP_MAGIC {
            return Err(Error::format("bad magic"));
        }
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(Error::format(format!(
                "unsupported depth: {} bits per pixel",
                self.bits_per_pixel
            )));
        }
        if self.compression != 0 {
            return Err(Error::format(format!(
                "unsupported compression: {}",
                self.compression
            )));
        }
        if self.size < INFO_HEADER_SIZE {
            return Err(Error::format(format!("info header too small: {}", self.size)));
        }
        if self.width <= 0 || self.height == 0 || self.height == i32::MIN {
            return Err(Error::format(format!(
                "bad dimensions: {}x{}",
                self.width, self.height
            )));
        }
        if (self.offset_bits as usize) < HEADER_SIZE {
            return Err(Error::format(format!(
                "pixel data offset {} inside header",
                self.offset_bits
            )));
        }
        Ok(())
    }

    /// Rows are stored bottom-up unless the height is negative
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Row count regardless of storage direction
    pub fn rows(&self) -> i32 {
        self.height.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_row_size_matches_legacy_formula() {
        for width in 1..=4096usize {
            assert_eq!(row_size(width), width * 3 + width % 4, "width {}", width);
            assert_eq!(row_size(width) % 4, 0);
        }
    }

    #[test]
    fn test_header_layout() {
        let header = BitmapHeader::for_image(2, 2).unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..2], &[0x42, 0x4D]);
        // file size: 54 + 8 * 2
        assert_eq!(&bytes[2..6], &70u32.to_le_bytes());
        assert_eq!(&bytes[10..14], &54u32.to_le_bytes());
        assert_eq!(&bytes[14..18], &40u32.to_le_bytes());
        assert_eq!(&bytes[18..22], &2i32.to_le_bytes());
        assert_eq!(&bytes[26..28], &1u16.to_le_bytes());
        assert_eq!(bytes[28], 24);
        assert_eq!(&bytes[34..38], &16u32.to_le_bytes());
        assert!(bytes[38..].iter().all(|&b| b == 0));

        let parsed = BitmapHeader::read_from(&mut bytes.as_slice()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_truncated_header_is_format_error() {
        let err = BitmapHeader::read_from(&mut &[0x42u8, 0x4D, 0, 0][..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_validate() {
        let good = BitmapHeader::for_image(3, 3).unwrap();
        assert!(good.validate().is_ok());

        let cases = [
            BitmapHeader { magic: 0x4D43, ..good },
            BitmapHeader { bits_per_pixel: 8, ..good },
            BitmapHeader { compression: 1, ..good },
            BitmapHeader { size: 12, ..good },
            BitmapHeader { width: 0, ..good },
            BitmapHeader { height: 0, ..good },
            BitmapHeader { offset_bits: 14, ..good },
        ];
        for header in cases {
            assert_eq!(header.validate().unwrap_err().kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn test_for_image_rejects_oversized() {
        let err = BitmapHeader::for_image(i32::MAX, i32::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    }
}
