//! MapEdit Core Library
//!
//! Turns raw pointer events into click and drag gestures and dispatches
//! them to the active editing mode of the MapEdit level editor.

pub mod camera;
pub mod config;
pub mod context;
pub mod gesture;
pub mod host;
pub mod input;
pub mod modes;
pub mod registry;
pub mod scene;
pub mod ui;

pub use camera::Camera;
pub use config::{ConfigError, EditorConfig};
pub use context::{Editor, EditorContext, within_reach};
pub use gesture::{ButtonState, Gesture, GestureTracker, CLICK_THRESHOLD};
pub use host::ModeHost;
pub use input::{MouseButton, PointerEvent};
pub use modes::{Mode, ModeId};
pub use registry::{ModeError, ModeRegistry};
pub use scene::{Entity, EntityFilter, EntityId, EntityKind, Scene};
pub use ui::{UiElement, UiElementId, UiState};
