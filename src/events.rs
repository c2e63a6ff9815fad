//! Routing of window events to the application state.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

use crate::context::Context;
use crate::input::{self, Action, KeyboardState};

/// Receiver of the events the host loop forwards.
pub trait InputHandler {
    fn reshape(&mut self, width: i32, height: i32);
    fn mouse_move(&mut self, x: f64, y: f64);
    fn mouse_button(&mut self, button: MouseButton, action: Action, x: f64, y: f64);
}

impl InputHandler for Context {
    fn reshape(&mut self, width: i32, height: i32) {
        Context::reshape(self, width, height);
    }

    fn mouse_move(&mut self, x: f64, y: f64) {
        Context::mouse_move(self, x, y);
    }

    fn mouse_button(&mut self, button: MouseButton, action: Action, x: f64, y: f64) {
        Context::mouse_button(self, button, action, x, y);
    }
}

/// Logs the new framebuffer size and passes it on.
pub fn framebuffer_size_changed(handler: &mut impl InputHandler, width: i32, height: i32) {
    log::info!("framebuffer size changed: ({width} x {height})");
    handler.reshape(width, height);
}

/// Routes one event. Returns `false` when the loop should stop.
///
/// `drawable_size` is queried on resize, since window events report the size
/// in points rather than framebuffer pixels.
pub fn dispatch(
    event: &Event,
    handler: &mut impl InputHandler,
    keyboard: &mut KeyboardState,
    drawable_size: impl FnOnce() -> (u32, u32),
) -> bool {
    match *event {
        Event::Quit { .. } => return false,
        Event::Window {
            win_event: WindowEvent::SizeChanged(..),
            ..
        } => {
            let (width, height) = drawable_size();
            framebuffer_size_changed(handler, width as i32, height as i32);
        }
        Event::MouseMotion { x, y, .. } => handler.mouse_move(x as f64, y as f64),
        Event::MouseButtonDown { mouse_btn, x, y, .. } => {
            handler.mouse_button(mouse_btn, Action::Press, x as f64, y as f64)
        }
        Event::MouseButtonUp { mouse_btn, x, y, .. } => {
            handler.mouse_button(mouse_btn, Action::Release, x as f64, y as f64)
        }
        Event::KeyDown {
            keycode,
            scancode,
            keymod,
            repeat,
            ..
        } => {
            let action = if repeat { Action::Repeat } else { Action::Press };
            log::info!("{}", input::describe_key(keycode, scancode, action, keymod));
            if let Some(keycode) = keycode {
                keyboard.key_down(keycode);
                if keycode == Keycode::Escape && !repeat {
                    return false;
                }
            }
        }
        Event::KeyUp {
            keycode,
            scancode,
            keymod,
            ..
        } => {
            log::info!("{}", input::describe_key(keycode, scancode, Action::Release, keymod));
            if let Some(keycode) = keycode {
                keyboard.key_up(keycode);
            }
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::{Mod, Scancode};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        sizes: Vec<(i32, i32)>,
        buttons: Vec<(MouseButton, Action, f64, f64)>,
    }

    impl InputHandler for Recorder {
        fn reshape(&mut self, width: i32, height: i32) {
            self.sizes.push((width, height));
        }

        fn mouse_move(&mut self, _x: f64, _y: f64) {}

        fn mouse_button(&mut self, button: MouseButton, action: Action, x: f64, y: f64) {
            self.buttons.push((button, action, x, y));
        }
    }

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    fn no_resize() -> (u32, u32) {
        panic!("drawable size queried without a resize")
    }

    #[test]
    fn test_escape_stops_loop() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let event = key_down(Keycode::Escape, false);
        assert!(!dispatch(&event, &mut recorder, &mut keyboard, no_resize));
    }

    #[test]
    fn test_repeated_escape_keeps_running() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let event = key_down(Keycode::Escape, true);
        assert!(dispatch(&event, &mut recorder, &mut keyboard, no_resize));
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let event = Event::Quit { timestamp: 0 };
        assert!(!dispatch(&event, &mut recorder, &mut keyboard, no_resize));
    }

    #[test]
    fn test_keys_tracked() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let down = key_down(Keycode::W, false);
        assert!(dispatch(&down, &mut recorder, &mut keyboard, no_resize));
        assert!(keyboard.is_down(Keycode::W));

        let up = Event::KeyUp {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::W),
            scancode: Some(Scancode::W),
            keymod: Mod::NOMOD,
            repeat: false,
        };
        assert!(dispatch(&up, &mut recorder, &mut keyboard, no_resize));
        assert!(!keyboard.is_down(Keycode::W));
    }

    #[test]
    fn test_mouse_buttons_routed() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let down = Event::MouseButtonDown {
            timestamp: 0,
            window_id: 1,
            which: 0,
            mouse_btn: MouseButton::Right,
            clicks: 1,
            x: 100,
            y: 100,
        };
        let up = Event::MouseButtonUp {
            timestamp: 0,
            window_id: 1,
            which: 0,
            mouse_btn: MouseButton::Right,
            clicks: 1,
            x: 110,
            y: 100,
        };
        assert!(dispatch(&down, &mut recorder, &mut keyboard, no_resize));
        assert!(dispatch(&up, &mut recorder, &mut keyboard, no_resize));
        assert_eq!(
            recorder.buttons,
            vec![
                (MouseButton::Right, Action::Press, 100.0, 100.0),
                (MouseButton::Right, Action::Release, 110.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_resize_uses_drawable_size() {
        let mut recorder = Recorder::default();
        let mut keyboard = KeyboardState::default();
        let event = Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: WindowEvent::SizeChanged(400, 300),
        };
        assert!(dispatch(&event, &mut recorder, &mut keyboard, || (800, 600)));
        assert_eq!(recorder.sizes, vec![(800, 600)]);
    }
}
