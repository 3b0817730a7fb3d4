//! Input abstraction layer.
//!
//! Normalizes mouse, trackpad and keyboard events into a unified
//! `InputEvent` enum. Pointer coordinates are in screen pixels.

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// Wheel / pinch. `dx`, `dy` scroll the canvas; `zoom` is a factor
    /// applied around the pointer (1.0 = no change; >1 = zoom in).
    Scroll {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        zoom: f32,
    },

    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Scroll { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
