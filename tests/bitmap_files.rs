use std::fs;

use bmpcanvas::codec::{decode_from_slice, encode_to_vec, read_header, row_size};
use bmpcanvas::{named, ErrorKind, Pixel, PixelBuffer, Scene};
use tempfile::tempdir;

/// Deterministic xorshift64 so failures reproduce
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn next_pixel(&mut self) -> Pixel {
        Pixel::from_rgb(self.next_u64() as u32)
    }
}

fn noise(width: i32, height: i32, rng: &mut Rng) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height).unwrap();
    for p in &mut buf {
        *p = rng.next_pixel();
    }
    buf
}

#[test]
fn round_trip_dimension_grid() {
    let mut rng = Rng::new(0x5eed);
    for width in [1, 2, 3, 4, 5, 679] {
        for height in [1, 2, 3, 679] {
            let buf = noise(width, height, &mut rng);
            let bytes = encode_to_vec(&buf).unwrap();
            assert_eq!(
                bytes.len(),
                54 + (width as usize * 3 + width as usize % 4) * height as usize
            );
            let back = decode_from_slice(&bytes).unwrap();
            assert_eq!(back, buf, "{}x{}", width, height);
        }
    }
}

#[test]
fn save_then_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.bmp");
    let buf = noise(37, 11, &mut Rng::new(7));
    buf.save(&path).unwrap();

    let on_disk = fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), 54 + row_size(37) * 11);
    assert_eq!(PixelBuffer::open(&path).unwrap(), buf);

    let header = read_header(&path).unwrap();
    assert_eq!((header.width, header.height), (37, 11));
    assert_eq!(header.size_image as usize, row_size(37) * 11);
}

#[test]
fn failed_load_keeps_previous_buffer() {
    let dir = tempdir().unwrap();
    let mut buf = PixelBuffer::new(4, 4).unwrap();
    buf.clear(named::ORANGE);
    let before = buf.clone();

    let truncated = dir.path().join("truncated.bmp");
    let bytes = encode_to_vec(&noise(8, 8, &mut Rng::new(3))).unwrap();
    fs::write(&truncated, &bytes[..bytes.len() - 10]).unwrap();
    let err = buf.load(&truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("truncated.bmp"));
    assert_eq!(buf, before);

    let missing = dir.path().join("missing.bmp");
    assert_eq!(buf.load(&missing).unwrap_err().kind(), ErrorKind::Io);
    assert_eq!(buf, before);

    let good = dir.path().join("good.bmp");
    let replacement = noise(9, 2, &mut Rng::new(11));
    replacement.save(&good).unwrap();
    buf.load(&good).unwrap();
    assert_eq!(buf, replacement);
}

#[test]
fn open_rejects_foreign_headers() {
    let dir = tempdir().unwrap();
    let bytes = encode_to_vec(&noise(2, 2, &mut Rng::new(5))).unwrap();

    let mut magic = bytes.clone();
    magic[0..2].copy_from_slice(b"PN");
    let path = dir.path().join("magic.bmp");
    fs::write(&path, &magic).unwrap();
    assert_eq!(PixelBuffer::open(&path).unwrap_err().kind(), ErrorKind::Format);

    let mut depth = bytes;
    depth[28..30].copy_from_slice(&8u16.to_le_bytes());
    let path = dir.path().join("depth.bmp");
    fs::write(&path, &depth).unwrap();
    assert_eq!(PixelBuffer::open(&path).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn save_to_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.bmp");
    let err = PixelBuffer::new(1, 1).unwrap().save(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn render_scene_to_file() {
    let dir = tempdir().unwrap();
    let scene: Scene = r##"{
        "name": "primitives",
        "width": 512,
        "height": 240,
        "background": "#25292e",
        "shapes": [
            {"kind": "line", "from": [250, 50], "to": [500, 50], "color": "yellow"},
            {"kind": "rect", "x": 10, "y": 10, "width": 100, "height": 100, "color": "red", "style": "outline"},
            {"kind": "rect", "x": 120, "y": 10, "width": 100, "height": 100, "color": "white"},
            {"kind": "triangle", "points": [[60, 120], [10, 220], [120, 220]], "color": "cyan", "style": "outline"},
            {"kind": "triangle", "points": [[180, 120], [130, 220], [245, 220]], "color": "magenta"},
            {"kind": "circle", "x": 300, "y": 170, "radius": 50, "color": "gray", "style": "outline"},
            {"kind": "circle", "x": 420, "y": 170, "radius": 50, "color": "lime"}
        ]
    }"##
    .parse()
    .unwrap();

    let path = dir.path().join("primitives.bmp");
    scene.render().unwrap().save(&path).unwrap();
    let image = PixelBuffer::open(&path).unwrap();

    assert_eq!(image.get(0, 0).unwrap(), Pixel::from_rgb(0x25292e));
    assert_eq!(image.get(375, 50).unwrap(), named::YELLOW);
    assert_eq!(image.get(10, 60).unwrap(), named::RED);
    assert_eq!(image.get(60, 60).unwrap(), Pixel::from_rgb(0x25292e));
    assert_eq!(image.get(170, 60).unwrap(), named::WHITE);
    assert_eq!(image.get(185, 200).unwrap(), named::MAGENTA);
    assert_eq!(image.get(300, 170).unwrap(), Pixel::from_rgb(0x25292e));
    assert_eq!(image.get(420, 170).unwrap(), named::LIME);
}
