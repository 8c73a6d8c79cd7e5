mod scene;

pub use scene::Scene;

use serde::{Deserialize, Serialize};

use crate::canvas::PixelBuffer;
use crate::color::Pixel;
use crate::error::Result;

/// Whether a closed shape is filled or only outlined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Fill,
    Outline,
}

/// A drawable primitive as it appears in a scene file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Line {
        from: [i32; 2],
        to: [i32; 2],
        color: Pixel,
    },
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Pixel,
        #[serde(default)]
        style: Style,
    },
    Triangle {
        points: [[i32; 2]; 3],
        color: Pixel,
        #[serde(default)]
        style: Style,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        color: Pixel,
        #[serde(default)]
        style: Style,
    },
}

impl Shape {
    /// Rasterize onto `image`
    pub fn draw(&self, image: &mut PixelBuffer) -> Result<()> {
        match *self {
            Shape::Line {
                from: [x1, y1],
                to: [x2, y2],
                color,
            } => image.draw_line(x1, y1, x2, y2, color),
            Shape::Rect {
                x,
                y,
                width,
                height,
                color,
                style,
            } => match style {
                Style::Fill => image.fill_rect(x, y, width, height, color),
                Style::Outline => image.draw_rect(x, y, width, height, color),
            },
            Shape::Triangle {
                points: [[x1, y1], [x2, y2], [x3, y3]],
                color,
                style,
            } => match style {
                Style::Fill => image.fill_triangle(x1, y1, x2, y2, x3, y3, color),
                Style::Outline => image.draw_triangle(x1, y1, x2, y2, x3, y3, color),
            },
            Shape::Circle {
                x,
                y,
                radius,
                color,
                style,
            } => match style {
                Style::Fill => image.fill_circle(x, y, radius, color),
                Style::Outline => image.draw_circle(x, y, radius, color),
            },
        }
    }

    pub fn color(&self) -> Pixel {
        match *self {
            Shape::Line { color, .. }
            | Shape::Rect { color, .. }
            | Shape::Triangle { color, .. }
            | Shape::Circle { color, .. } => color,
        }
    }
}
