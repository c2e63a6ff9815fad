//! A small OpenGL application scaffold: an SDL2 window with a GL context, an
//! egui overlay, a drag-to-fly camera, and owning wrappers for shader and
//! texture objects.

pub mod abs;
pub mod camera;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod overlay;
