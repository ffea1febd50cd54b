//! Raw pointer input types, independent of any windowing library.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// All buttons, in slot order.
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Slot index of this button (left = 0, right = 1, middle = 2).
    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }

    /// Button for a slot index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The button that shares manipulation duty with this one.
    ///
    /// Left and right are mutually exclusive in the transform modes; the
    /// middle button has no partner.
    pub fn partner(self) -> Option<Self> {
        match self {
            MouseButton::Left => Some(MouseButton::Right),
            MouseButton::Right => Some(MouseButton::Left),
            MouseButton::Middle => None,
        }
    }
}

/// Raw pointer event delivered by the input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// The button's gesture was interrupted (e.g. focus moved to the UI).
    Cancel {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Wheel notches; positive zooms in.
    Wheel {
        delta: i32,
    },
}

impl PointerEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Cancel { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Wheel { .. } => None,
        }
    }
}
