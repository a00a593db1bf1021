//! Errors raised while loading scene inputs.

use thiserror::Error;

/// Errors that can occur while loading a mesh or a camera description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No triangles found in {0}")]
    NoTriangles(String),

    #[error("Orbiter line {line}: {message}")]
    OrbiterSyntax { line: usize, message: String },

    #[error("Orbiter is missing the '{0}' entry")]
    OrbiterMissing(&'static str),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
