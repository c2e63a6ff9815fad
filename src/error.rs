//! Error types.
//!
//! [`ResourceError`] covers everything a GPU wrapper can fail on while
//! loading; [`AppError`] covers startup failures that end the process.

use std::path::PathBuf;

/// Failure while loading or creating a GPU resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to compile shader {path:?}: {log}")]
    Compile { path: PathBuf, log: String },
    #[error("GL error: {0}")]
    Gl(String),
}

/// Failure during application startup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("GL error: {0}")]
    Gl(String),
    #[error("overlay error: {0}")]
    Overlay(String),
}
