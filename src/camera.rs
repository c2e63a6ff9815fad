//! Free-fly camera driven by a mouse drag.
//!
//! The camera only reacts while the control button is held. Rotation comes
//! from cursor deltas between consecutive motion events; translation comes
//! from the movement keys polled once per frame.

use glam::{Vec2, Vec3};
use sdl2::mouse::MouseButton;

use crate::input::Action;

/// Distance moved per frame for each held movement key.
pub const MOVE_SPEED: f32 = 0.05;
/// Degrees of rotation per pixel of cursor motion.
pub const ROTATE_SPEED: f32 = 0.6;
/// Pitch limit in degrees, keeps the camera from flipping over the poles.
pub const PITCH_LIMIT: f32 = 89.0;
/// The mouse button that enables camera control while held.
pub const CONTROL_BUTTON: MouseButton = MouseButton::Right;

/// Camera control state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Control {
    #[default]
    Idle,
    Dragging,
}

/// Movement directions, one pair per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Right,
    Left,
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Forward axis used for movement. Not derived from `yaw`/`pitch`.
    pub front: Vec3,
    pub up: Vec3,
    /// Degrees, always in `[0, 360)`.
    pub yaw: f32,
    /// Degrees, always in `[-89, 89]`.
    pub pitch: f32,
    control: Control,
    prev_mouse_pos: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            yaw: 0.0,
            pitch: 0.0,
            control: Control::Idle,
            prev_mouse_pos: Vec2::ZERO,
        }
    }
}

impl Camera {
    pub fn control(&self) -> Control {
        self.control
    }

    pub fn is_dragging(&self) -> bool {
        self.control == Control::Dragging
    }

    /// Moves the camera for every held movement key. Does nothing unless dragging.
    ///
    /// Each key contributes its own step, so diagonal movement is faster than
    /// movement along a single axis.
    pub fn process_input(&mut self, is_down: impl Fn(Movement) -> bool) {
        if !self.is_dragging() {
            return;
        }

        if is_down(Movement::Forward) {
            self.position += MOVE_SPEED * self.front;
        }
        if is_down(Movement::Backward) {
            self.position -= MOVE_SPEED * self.front;
        }

        let right = self.up.cross(-self.front).normalize();
        if is_down(Movement::Right) {
            self.position += MOVE_SPEED * right;
        }
        if is_down(Movement::Left) {
            self.position -= MOVE_SPEED * right;
        }

        let up = (-self.front).cross(right).normalize();
        if is_down(Movement::Up) {
            self.position += MOVE_SPEED * up;
        }
        if is_down(Movement::Down) {
            self.position -= MOVE_SPEED * up;
        }
    }

    /// Rotates by the cursor delta since the last event. Does nothing unless dragging.
    pub fn mouse_move(&mut self, pos: Vec2) {
        if !self.is_dragging() {
            return;
        }

        let delta = pos - self.prev_mouse_pos;
        self.yaw = wrap_degrees(self.yaw - delta.x * ROTATE_SPEED);
        self.pitch = (self.pitch - delta.y * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.prev_mouse_pos = pos;
    }

    /// Starts or stops dragging. Buttons other than [`CONTROL_BUTTON`] are ignored.
    pub fn mouse_button(&mut self, button: MouseButton, action: Action, pos: Vec2) {
        if button != CONTROL_BUTTON {
            return;
        }

        match action {
            Action::Press => {
                self.prev_mouse_pos = pos;
                self.control = Control::Dragging;
            }
            Action::Release => self.control = Control::Idle,
            Action::Repeat => {}
        }
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
