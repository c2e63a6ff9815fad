//! This module contains the thin GPU abstractions: application setup, shaders,
//! textures and the decoded images they are built from.

pub mod app;
pub mod image_data;
pub mod shader;
pub mod texture;

pub use app::*;
pub use image_data::*;
pub use shader::*;
pub use texture::*;
