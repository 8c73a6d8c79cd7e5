use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Shape;
use crate::canvas::PixelBuffer;
use crate::color::Pixel;
use crate::error::{Error, Result};

/// A canvas size, a background and the shapes painted over it in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub background: Pixel,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: Pixel::default(),
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Pixel) -> Self {
        self.background = background;
        self
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Paint the scene into a new buffer, stopping at the first failing shape
    pub fn render(&self) -> Result<PixelBuffer> {
        let mut image = PixelBuffer::new(self.width, self.height)?;
        image.clear(self.background);
        for shape in &self.shapes {
            shape.draw(&mut image)?;
        }
        Ok(image)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let run = || -> Result<()> {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
            Ok(())
        };
        run().map_err(|e| e.in_file("save_scene", path))
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let run = || -> Result<Self> {
            let json = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        };
        run().map_err(|e| e.in_file("load_scene", path))
    }
}

impl std::str::FromStr for Scene {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
