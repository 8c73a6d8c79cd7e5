//! Error type shared by the canvas, the drawing primitives and the BMP codec.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for bmpcanvas operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Width, height or radius outside the accepted range
    #[error("invalid dimension: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Coordinate outside the buffer
    #[error("{operation}({x}, {y}): x,y out of bounds")]
    OutOfBounds {
        operation: &'static str,
        x: i32,
        y: i32,
    },

    /// Malformed or unsupported bitmap data
    #[error("format error: {0}")]
    Format(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Scene description could not be parsed or written
    #[error("scene error: {0}")]
    Scene(#[from] serde_json::Error),

    /// Any of the above, raised while working on a named file
    #[error("{operation}(\"{}\"): {source}", .path.display())]
    File {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Coarse classification of an [`Error`], ignoring file context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidDimension,
    OutOfBounds,
    Format,
    Io,
    Scene,
}

impl Error {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format(reason.into())
    }

    pub(crate) fn out_of_bounds(operation: &'static str, x: i32, y: i32) -> Self {
        Self::OutOfBounds { operation, x, y }
    }

    /// Attach the file and operation that produced this error
    pub(crate) fn in_file(self, operation: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::File {
            operation,
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The kind of the underlying error, looking through file context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::Format(_) => ErrorKind::Format,
            Self::Io(_) => ErrorKind::Io,
            Self::Scene(_) => ErrorKind::Scene,
            Self::File { source, .. } => source.kind(),
        }
    }
}

/// Result type for bmpcanvas operations.
pub type Result<T> = std::result::Result<T, Error>;
