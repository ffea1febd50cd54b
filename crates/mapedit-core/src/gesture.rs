//! Per-button click/drag disambiguation.
//!
//! A press followed by a release with no movement beyond the click
//! threshold is a click. Any movement past the threshold turns the whole
//! gesture into a drag, and drag updates are emitted on every move while
//! the button is held so modes can give live feedback. Cancelling a drag
//! emits one last update that collapses back to the start point, which
//! modes treat as "revert".

use crate::input::MouseButton;
use kurbo::Point;

/// Maximum displacement (scene units) for a press/release to count as a click.
pub const CLICK_THRESHOLD: f64 = 1.0;

/// Tracking state for a single mouse button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonState {
    /// Whether the button is currently held.
    pub pressed: bool,
    /// Pointer position when the button went down.
    pub down_position: Point,
    /// Whether the pointer has left the click threshold since the press.
    pub moved: bool,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            pressed: false,
            down_position: Point::ZERO,
            moved: false,
        }
    }
}

/// A semantically classified mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Press and release without meaningful movement.
    Click {
        button: MouseButton,
        start: Point,
        end: Point,
    },
    /// Live or final drag update. `end == start` on a cancelled drag.
    Drag {
        button: MouseButton,
        start: Point,
        end: Point,
    },
}

impl Gesture {
    /// Button the gesture belongs to.
    pub fn button(&self) -> MouseButton {
        match self {
            Gesture::Click { button, .. } | Gesture::Drag { button, .. } => *button,
        }
    }
}

/// Converts raw down/move/up/cancel events into gestures.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    buttons: [ButtonState; 3],
    threshold: f64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    /// Create a tracker with the standard click threshold.
    pub fn new() -> Self {
        Self::with_threshold(CLICK_THRESHOLD)
    }

    /// Create a tracker with a custom click threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            buttons: [ButtonState::default(); 3],
            threshold,
        }
    }

    /// Click/drag threshold in scene units.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// State of a button.
    pub fn state(&self, button: MouseButton) -> &ButtonState {
        &self.buttons[button.index()]
    }

    /// Whether a button is currently held.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.state(button).pressed
    }

    /// Whether any button is currently held.
    pub fn any_pressed(&self) -> bool {
        self.buttons.iter().any(|state| state.pressed)
    }

    /// Buttons currently held, in slot order.
    pub fn pressed_buttons(&self) -> Vec<MouseButton> {
        MouseButton::ALL
            .into_iter()
            .filter(|&button| self.is_pressed(button))
            .collect()
    }

    /// Start tracking a press.
    ///
    /// Returns false and leaves the open gesture untouched if the button is
    /// already held.
    pub fn press(&mut self, button: MouseButton, position: Point) -> bool {
        let state = &mut self.buttons[button.index()];
        if state.pressed {
            log::warn!("Ignoring {button:?} press while already pressed");
            return false;
        }
        *state = ButtonState {
            pressed: true,
            down_position: position,
            moved: false,
        };
        true
    }

    /// Pointer moved: one drag update per held button.
    pub fn motion(&mut self, position: Point) -> Vec<Gesture> {
        let threshold = self.threshold;
        MouseButton::ALL
            .into_iter()
            .filter_map(|button| {
                let state = &mut self.buttons[button.index()];
                if !state.pressed {
                    return None;
                }
                if state.down_position.distance(position) > threshold {
                    state.moved = true;
                }
                Some(Gesture::Drag {
                    button,
                    start: state.down_position,
                    end: position,
                })
            })
            .collect()
    }

    /// Finish a gesture: a click if the pointer stayed put, otherwise the
    /// final drag update.
    pub fn release(&mut self, button: MouseButton, position: Point) -> Option<Gesture> {
        let state = &mut self.buttons[button.index()];
        if !state.pressed {
            log::debug!("Ignoring {button:?} release without press");
            return None;
        }
        state.pressed = false;
        let start = state.down_position;
        if state.moved {
            Some(Gesture::Drag {
                button,
                start,
                end: position,
            })
        } else {
            Some(Gesture::Click {
                button,
                start,
                end: position,
            })
        }
    }

    /// Abort a gesture. A drag in progress is resolved with an update back
    /// to its start point; an unmoved press is dropped silently.
    pub fn cancel(&mut self, button: MouseButton) -> Option<Gesture> {
        let state = &mut self.buttons[button.index()];
        if !state.pressed {
            return None;
        }
        state.pressed = false;
        state.moved.then_some(Gesture::Drag {
            button,
            start: state.down_position,
            end: state.down_position,
        })
    }
}
