//! Uncompressed 24bpp BMP encode/decode.
//!
//! Rows are stored bottom-up, each pixel as blue, green, red, and every row is
//! zero-padded to a multiple of four bytes. The decoder seeks to the header's
//! pixel-data offset, so files with extra bytes after the 54-byte header (for
//! example V4/V5 info headers) load correctly.

mod header;

pub use header::{row_size, BitmapHeader, BITMAP_MAGIC, BITS_PER_PIXEL, HEADER_SIZE};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::canvas::PixelBuffer;
use crate::color::Pixel;
use crate::error::{Error, Result};

/// Write `buffer` as a BMP stream
pub fn encode<W: Write>(buffer: &PixelBuffer, writer: &mut W) -> Result<()> {
    let header = BitmapHeader::for_image(buffer.width(), buffer.height())?;
    header.write_to(writer)?;

    let mut line = vec![0u8; row_size(buffer.width() as usize)];
    for y in (0..buffer.height()).rev() {
        for (cell, color) in line.chunks_exact_mut(3).zip(buffer.row(y)) {
            cell[0] = color.b;
            cell[1] = color.g;
            cell[2] = color.r;
        }
        writer.write_all(&line)?;
    }
    Ok(())
}

/// Encode into a fresh byte vector
pub fn encode_to_vec(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(
        HEADER_SIZE + row_size(buffer.width().max(0) as usize) * buffer.height().max(0) as usize,
    );
    encode(buffer, &mut out)?;
    Ok(out)
}

/// Read a BMP stream into a new buffer.
///
/// The whole pixel area promised by the header must be present; a short
/// stream fails with an `UnexpectedEof` I/O error before anything is
/// allocated for the pixels.
pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<PixelBuffer> {
    let header = BitmapHeader::read_from(reader)?;
    header.validate()?;

    let width = header.width;
    let rows = header.rows();
    let len = PixelBuffer::checked_len(width, rows)
        .map_err(|_| Error::format(format!("bad dimensions: {}x{}", width, header.height)))?;
    let stride = row_size(width as usize);

    let end = reader.seek(SeekFrom::End(0))?;
    let needed = (stride as u64).saturating_mul(rows as u64);
    let available = end.saturating_sub(u64::from(header.offset_bits));
    if available < needed {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "truncated pixel data: header promises {} bytes, {} available",
                needed, available
            ),
        )
        .into());
    }
    reader.seek(SeekFrom::Start(u64::from(header.offset_bits)))?;

    let mut pixels = vec![Pixel::default(); len];
    let mut line = vec![0u8; stride];
    for i in 0..rows {
        let y = if header.is_bottom_up() { rows - 1 - i } else { i };
        reader.read_exact(&mut line)?;
        let start = y as usize * width as usize;
        let row = &mut pixels[start..start + width as usize];
        for (color, cell) in row.iter_mut().zip(line.chunks_exact(3)) {
            *color = Pixel::new(cell[2], cell[1], cell[0]);
        }
    }

    debug!(
        "decoded {}x{} bitmap ({})",
        width,
        rows,
        if header.is_bottom_up() { "bottom-up" } else { "top-down" }
    );
    PixelBuffer::from_pixels(width, rows, pixels)
}

/// Decode from an in-memory byte slice
pub fn decode_from_slice(bytes: &[u8]) -> Result<PixelBuffer> {
    decode(&mut Cursor::new(bytes))
}

/// Read only the header of a file, validated
pub fn read_header(path: impl AsRef<Path>) -> Result<BitmapHeader> {
    let path = path.as_ref();
    let run = || -> Result<BitmapHeader> {
        let mut file = File::open(path)?;
        let header = BitmapHeader::read_from(&mut file)?;
        header.validate()?;
        Ok(header)
    };
    run().map_err(|e| e.in_file("read_header", path))
}

// ============================================================================
// File helpers
// ============================================================================

impl PixelBuffer {
    /// Load a bitmap file into a new buffer
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let run = || -> Result<Self> {
            let mut reader = BufReader::new(File::open(path)?);
            decode(&mut reader)
        };
        let buffer = run().map_err(|e| e.in_file("open", path))?;
        debug!("loaded {}", path.display());
        Ok(buffer)
    }

    /// Replace this buffer with the contents of a bitmap file.
    ///
    /// On failure the buffer keeps its previous dimensions and pixels.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let run = || -> Result<Self> {
            let mut reader = BufReader::new(File::open(path)?);
            decode(&mut reader)
        };
        *self = run().map_err(|e| e.in_file("load", path))?;
        debug!("loaded {} into existing buffer", path.display());
        Ok(())
    }

    /// Write this buffer as a bitmap file, creating or truncating it
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let run = || -> Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            encode(self, &mut writer)?;
            writer.flush()?;
            Ok(())
        };
        run().map_err(|e| e.in_file("save", path))?;
        debug!(
            "saved {}x{} bitmap to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::named::{BLUE, GREEN, RED, WHITE};
    use crate::error::ErrorKind;

    fn sample() -> PixelBuffer {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set(0, 0, RED).unwrap();
        buf.set(1, 0, GREEN).unwrap();
        buf.set(2, 0, BLUE).unwrap();
        buf.set(0, 1, WHITE).unwrap();
        buf
    }

    #[test]
    fn test_encode_2x2_size() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let bytes = encode_to_vec(&buf).unwrap();
        assert_eq!(bytes.len(), 54 + 8 * 2);
        assert_eq!(&bytes[0..2], &[0x42, 0x4D]);
        assert_eq!(bytes[28], 24);
    }

    #[test]
    fn test_encode_bottom_up_bgr_padded() {
        let bytes = encode_to_vec(&sample()).unwrap();
        // row size for width 3 is 12: 9 pixel bytes + 3 padding
        assert_eq!(bytes.len(), 54 + 12 * 2);
        let first = &bytes[54..66];
        // first stored row is y = 1: white, black, black
        assert_eq!(first, &[255, 255, 255, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let second = &bytes[66..78];
        // y = 0: red, green, blue in BGR order
        assert_eq!(second, &[0, 0, 255, 0, 255, 0, 255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_round_trip() {
        let buf = sample();
        let back = decode_from_slice(&encode_to_vec(&buf).unwrap()).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_encode_empty_buffer_fails() {
        let err = encode_to_vec(&PixelBuffer::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    }

    #[test]
    fn test_decode_honours_offset_gap() {
        let buf = sample();
        let bytes = encode_to_vec(&buf).unwrap();
        let gap = 14usize;
        let mut shifted = bytes[..HEADER_SIZE].to_vec();
        shifted[10..14].copy_from_slice(&((HEADER_SIZE + gap) as u32).to_le_bytes());
        shifted.extend(std::iter::repeat(0xAB).take(gap));
        shifted.extend_from_slice(&bytes[HEADER_SIZE..]);
        assert_eq!(decode_from_slice(&shifted).unwrap(), buf);
    }

    #[test]
    fn test_decode_top_down() {
        let buf = sample();
        let mut bytes = encode_to_vec(&buf.flip_vertical()).unwrap();
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        assert_eq!(decode_from_slice(&bytes).unwrap(), buf);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = encode_to_vec(&sample()).unwrap();
        bytes[0] = b'P';
        let err = decode_from_slice(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_decode_rejects_8bpp() {
        let mut bytes = encode_to_vec(&sample()).unwrap();
        bytes[28..30].copy_from_slice(&8u16.to_le_bytes());
        let err = decode_from_slice(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_decode_truncated_pixels_is_io_error() {
        let bytes = encode_to_vec(&sample()).unwrap();
        let err = decode_from_slice(&bytes[..bytes.len() - 1]).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_truncated_header_is_format_error() {
        let bytes = encode_to_vec(&sample()).unwrap();
        let err = decode_from_slice(&bytes[..20]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_decode_huge_dimensions_without_data() {
        let mut bytes = encode_to_vec(&sample()).unwrap();
        bytes[18..22].copy_from_slice(&100_000i32.to_le_bytes());
        bytes[22..26].copy_from_slice(&100_000i32.to_le_bytes());
        let err = decode_from_slice(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
