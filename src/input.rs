use std::collections::HashSet;

use sdl2::keyboard::{Keycode, Mod, Scancode};

use crate::camera::Movement;

/// What happened to a key or button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    Repeat,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Press => "Pressed",
            Action::Release => "Released",
            Action::Repeat => "Repeat",
        }
    }
}

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
}

impl KeyboardState {
    pub fn key_down(&mut self, keycode: Keycode) {
        self.down.insert(keycode);
    }

    pub fn key_up(&mut self, keycode: Keycode) {
        self.down.remove(&keycode);
    }

    pub fn is_down(&self, keycode: Keycode) -> bool {
        self.down.contains(&keycode)
    }

    /// Whether a key bound to the given camera movement is held.
    pub fn movement_down(&self, movement: Movement) -> bool {
        self.is_down(movement_key(movement))
    }
}

/// The key bound to each camera movement.
pub fn movement_key(movement: Movement) -> Keycode {
    match movement {
        Movement::Forward => Keycode::W,
        Movement::Backward => Keycode::S,
        Movement::Right => Keycode::D,
        Movement::Left => Keycode::A,
        Movement::Up => Keycode::E,
        Movement::Down => Keycode::Q,
    }
}

/// Formats a key event for the log, modifiers as `C`/`S`/`A` or `-`.
pub fn describe_key(
    keycode: Option<Keycode>,
    scancode: Option<Scancode>,
    action: Action,
    keymod: Mod,
) -> String {
    let key = keycode.map_or_else(|| "Unknown".to_string(), |k| k.name());
    let scancode = scancode.map_or(-1, |s| s as i32);
    let flag = |mask: Mod, c: char| if keymod.intersects(mask) { c } else { '-' };
    format!(
        "key: {}, scancode: {}, action: {}, mods: {}{}{}",
        key,
        scancode,
        action.name(),
        flag(Mod::LCTRLMOD | Mod::RCTRLMOD, 'C'),
        flag(Mod::LSHIFTMOD | Mod::RSHIFTMOD, 'S'),
        flag(Mod::LALTMOD | Mod::RALTMOD, 'A'),
    )
}
