//! Per-window application state.
//!
//! [`Context`] receives input events from the host loop and owns the camera and
//! the viewport. It is the place a rendering pipeline would hang off.

use std::sync::Arc;

use glam::Vec2;
use glow::HasContext;
use sdl2::mouse::MouseButton;

use crate::camera::Camera;
use crate::input::{Action, KeyboardState};

/// Current framebuffer dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Records new dimensions. Non-positive sizes are stored as given.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}

pub struct Context {
    gl: Arc<glow::Context>,
    camera: Camera,
    viewport: Viewport,
}

impl Context {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            camera: Camera::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Moves the camera for the held movement keys. Called once per frame.
    pub fn process_input(&mut self, keyboard: &KeyboardState) {
        self.camera.process_input(|m| keyboard.movement_down(m));
    }

    /// Stores the new framebuffer size and matches the GL viewport to it.
    pub fn reshape(&mut self, width: i32, height: i32) {
        self.viewport.resize(width, height);
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    pub fn mouse_move(&mut self, x: f64, y: f64) {
        self.camera.mouse_move(Vec2::new(x as f32, y as f32));
    }

    pub fn mouse_button(&mut self, button: MouseButton, action: Action, x: f64, y: f64) {
        self.camera.mouse_button(button, action, Vec2::new(x as f32, y as f32));
    }

    /// Draws the current frame. Nothing is drawn yet.
    pub fn render(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_resize() {
        let mut viewport = Viewport::default();
        viewport.resize(0, 0);
        assert_eq!(viewport, Viewport { width: 0, height: 0 });
        viewport.resize(800, 600);
        assert_eq!(viewport, Viewport { width: 800, height: 600 });
    }

    #[test]
    fn test_negative_size_stored() {
        let mut viewport = Viewport::default();
        viewport.resize(-1, 5);
        assert_eq!(viewport.width, -1);
        assert_eq!(viewport.height, 5);
    }
}
