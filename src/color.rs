//! 24-bit color cells and the named color table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One RGB cell of a [`PixelBuffer`](crate::PixelBuffer).
///
/// Channels are named red/green/blue; the BMP codec writes them to disk in
/// blue, green, red order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "ColorSpec")]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value; bits above 24 are ignored
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub const fn to_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is neither `#rrggbb` nor a known name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color '{0}'")]
pub struct ParseColorError(String);

impl FromStr for Pixel {
    type Err = ParseColorError;

    /// Accepts `#rrggbb`, `rrggbb` or a name from [`named`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(color) = named::lookup(trimmed) {
            return Ok(color);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Pixel::from_rgb)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

/// Serialized forms of a color in scene files
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Text(String),
    Channels([u8; 3]),
}

impl TryFrom<ColorSpec> for Pixel {
    type Error = ParseColorError;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Text(text) => text.parse(),
            ColorSpec::Channels([r, g, b]) => Ok(Pixel::new(r, g, b)),
        }
    }
}

impl From<Pixel> for ColorSpec {
    fn from(color: Pixel) -> Self {
        ColorSpec::Text(color.to_string())
    }
}

/// Named color constants
pub mod named {
    use super::Pixel;

    pub const BLACK: Pixel = Pixel::from_rgb(0x000000);
    pub const WHITE: Pixel = Pixel::from_rgb(0xffffff);
    pub const RED: Pixel = Pixel::from_rgb(0xff0000);
    pub const GREEN: Pixel = Pixel::from_rgb(0x00ff00);
    pub const BLUE: Pixel = Pixel::from_rgb(0x0000ff);
    pub const YELLOW: Pixel = Pixel::from_rgb(0xffff00);
    pub const CYAN: Pixel = Pixel::from_rgb(0x00ffff);
    pub const MAGENTA: Pixel = Pixel::from_rgb(0xff00ff);
    pub const SILVER: Pixel = Pixel::from_rgb(0xc0c0c0);
    pub const GRAY: Pixel = Pixel::from_rgb(0x808080);
    pub const MAROON: Pixel = Pixel::from_rgb(0x800000);
    pub const OLIVE: Pixel = Pixel::from_rgb(0x808000);
    pub const LIME: Pixel = Pixel::from_rgb(0x00ff00);
    pub const PURPLE: Pixel = Pixel::from_rgb(0x800080);
    pub const TEAL: Pixel = Pixel::from_rgb(0x008080);
    pub const NAVY: Pixel = Pixel::from_rgb(0x000080);
    pub const ORANGE: Pixel = Pixel::from_rgb(0xffa500);
    pub const GOLD: Pixel = Pixel::from_rgb(0xffd700);
    pub const VIOLET: Pixel = Pixel::from_rgb(0xee82ee);
    pub const CORAL: Pixel = Pixel::from_rgb(0xff7f50);
    pub const PINK: Pixel = Pixel::from_rgb(0xffc0cb);
    pub const BROWN: Pixel = Pixel::from_rgb(0xa52a2a);

    const TABLE: &[(&str, Pixel)] = &[
        ("black", BLACK),
        ("white", WHITE),
        ("red", RED),
        ("green", GREEN),
        ("blue", BLUE),
        ("yellow", YELLOW),
        ("cyan", CYAN),
        ("magenta", MAGENTA),
        ("silver", SILVER),
        ("gray", GRAY),
        ("grey", GRAY),
        ("maroon", MAROON),
        ("olive", OLIVE),
        ("lime", LIME),
        ("purple", PURPLE),
        ("teal", TEAL),
        ("navy", NAVY),
        ("orange", ORANGE),
        ("gold", GOLD),
        ("violet", VIOLET),
        ("coral", CORAL),
        ("pink", PINK),
        ("brown", BROWN),
    ];

    /// Case-insensitive lookup by name
    pub fn lookup(name: &str) -> Option<Pixel> {
        TABLE
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }
}
