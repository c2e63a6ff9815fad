//! Immediate mode UI overlay.
//!
//! SDL events are translated into egui input, and each frame is painted with
//! `egui_glow` on top of whatever was rendered before it.

use std::sync::Arc;
use std::time::Instant;

use egui::{Modifiers, PointerButton, Pos2};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod};
use sdl2::mouse::MouseButton;

use crate::error::AppError;

pub struct Overlay {
    ctx: egui::Context,
    painter: egui_glow::Painter,
    events: Vec<egui::Event>,
    modifiers: Modifiers,
    start: Instant,
}

impl Overlay {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, AppError> {
        let painter = egui_glow::Painter::new(Arc::clone(gl), "", None, false)
            .map_err(|e| AppError::Overlay(e.to_string()))?;
        Ok(Self {
            ctx: egui::Context::default(),
            painter,
            events: Vec::new(),
            modifiers: Modifiers::default(),
            start: Instant::now(),
        })
    }

    /// Queues an SDL event as input for the next frame.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::KeyDown { keymod, .. } | Event::KeyUp { keymod, .. } = event {
            self.modifiers = modifiers_from(*keymod);
        }
        if let Some(event) = translate(event, self.modifiers) {
            self.events.push(event);
        }
    }

    /// Builds the UI with `ui` and paints it over a `size` pixel framebuffer.
    pub fn run(&mut self, size: (u32, u32), ui: impl FnMut(&egui::Context)) {
        let (width, height) = size;
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(width as f32, height as f32),
            )),
            time: Some(self.start.elapsed().as_secs_f64()),
            modifiers: self.modifiers,
            events: std::mem::take(&mut self.events),
            ..Default::default()
        };

        let output = self.ctx.run(raw_input, ui);
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.painter.paint_and_update_textures(
            [width, height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );
    }

    /// Releases GPU resources. Must run while the GL context is still alive.
    pub fn destroy(&mut self) {
        self.painter.destroy();
    }
}

fn modifiers_from(keymod: Mod) -> Modifiers {
    let ctrl = keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD);
    Modifiers {
        alt: keymod.intersects(Mod::LALTMOD | Mod::RALTMOD),
        ctrl,
        shift: keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD),
        mac_cmd: false,
        command: ctrl,
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::X1 => Some(PointerButton::Extra1),
        MouseButton::X2 => Some(PointerButton::Extra2),
        _ => None,
    }
}

fn key(keycode: Keycode) -> Option<egui::Key> {
    let key = match keycode {
        Keycode::Left => egui::Key::ArrowLeft,
        Keycode::Right => egui::Key::ArrowRight,
        Keycode::Up => egui::Key::ArrowUp,
        Keycode::Down => egui::Key::ArrowDown,
        Keycode::Escape => egui::Key::Escape,
        Keycode::Tab => egui::Key::Tab,
        Keycode::Backspace => egui::Key::Backspace,
        Keycode::Return | Keycode::KpEnter => egui::Key::Enter,
        Keycode::Space => egui::Key::Space,
        Keycode::Insert => egui::Key::Insert,
        Keycode::Delete => egui::Key::Delete,
        Keycode::Home => egui::Key::Home,
        Keycode::End => egui::Key::End,
        Keycode::PageUp => egui::Key::PageUp,
        Keycode::PageDown => egui::Key::PageDown,
        _ => return egui::Key::from_name(&keycode.name()),
    };
    Some(key)
}

/// Translates one SDL event into an egui event, if egui cares about it.
fn translate(event: &Event, modifiers: Modifiers) -> Option<egui::Event> {
    match event {
        Event::MouseMotion { x, y, .. } => {
            Some(egui::Event::PointerMoved(Pos2::new(*x as f32, *y as f32)))
        }
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        }
        | Event::MouseButtonUp {
            mouse_btn, x, y, ..
        } => Some(egui::Event::PointerButton {
            pos: Pos2::new(*x as f32, *y as f32),
            button: pointer_button(*mouse_btn)?,
            pressed: matches!(event, Event::MouseButtonDown { .. }),
            modifiers,
        }),
        Event::MouseWheel { x, y, .. } => Some(egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(*x as f32, *y as f32),
            modifiers,
        }),
        Event::KeyDown {
            keycode: Some(keycode),
            repeat,
            ..
        } => Some(egui::Event::Key {
            key: key(*keycode)?,
            physical_key: None,
            pressed: true,
            repeat: *repeat,
            modifiers,
        }),
        Event::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(egui::Event::Key {
            key: key(*keycode)?,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers,
        }),
        Event::TextInput { text, .. } => Some(egui::Event::Text(text.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let event = Event::TextInput {
            timestamp: 0,
            window_id: 1,
            text: "hi".to_string(),
        };
        assert_eq!(
            translate(&event, Modifiers::default()),
            Some(egui::Event::Text("hi".to_string()))
        );
    }

    #[test]
    fn test_mouse_button() {
        let event = Event::MouseButtonDown {
            timestamp: 0,
            window_id: 1,
            which: 0,
            mouse_btn: MouseButton::Right,
            clicks: 1,
            x: 12,
            y: 34,
        };
        assert_eq!(
            translate(&event, Modifiers::default()),
            Some(egui::Event::PointerButton {
                pos: Pos2::new(12.0, 34.0),
                button: PointerButton::Secondary,
                pressed: true,
                modifiers: Modifiers::default(),
            })
        );
    }

    #[test]
    fn test_modifiers() {
        let modifiers = modifiers_from(Mod::RCTRLMOD | Mod::LSHIFTMOD);
        assert!(modifiers.ctrl && modifiers.command && modifiers.shift);
        assert!(!modifiers.alt);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(key(Keycode::Return), Some(egui::Key::Enter));
        assert_eq!(key(Keycode::Left), Some(egui::Key::ArrowLeft));
    }
}
