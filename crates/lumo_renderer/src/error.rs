//! Errors raised while preparing a scene or writing results.

use thiserror::Error;

/// The mesh can't be rendered.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Scene has no triangles")]
    NoTriangles,

    #[error("Scene has no emissive triangles")]
    NoEmitters,
}

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image buffer holds {found} pixels, expected {expected}")]
    BufferSize { found: usize, expected: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;
