//! Pointer, key and modifier events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event, positions in canvas (screen) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Wheel; negative `delta.y` scrolls forward.
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// Pointer left the canvas.
    Leave,
}

/// Keyboard event, carrying the key's printed value (`"Escape"`, `"1"`, `"²"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Pointer and modifier state carried between events.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Last pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Whether the pointer is over the canvas.
    pub pointer_inside: bool,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => {
                self.pointer_position = position;
                self.pointer_inside = true;
            }
            PointerEvent::Leave => self.pointer_inside = false,
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }
}
