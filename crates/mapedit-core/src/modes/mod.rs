//! Editing modes.
//!
//! A mode owns the interpretation of gestures while it is active. Raw
//! events reach it through the `on_mouse_*` methods, which by default feed
//! the mode's [`GestureTracker`] and turn the result into `on_click` /
//! `on_drag_update` calls. A mode that overrides a raw event method must
//! still call the matching free function ([`mouse_down`], [`mouse_up`],
//! [`mouse_cancel`], [`mouse_move`]) or its buttons will get out of step.

mod add;
mod decorate;
mod dupe;
mod look;
mod transform;

pub use add::AddMode;
pub use decorate::DecorateMode;
pub use dupe::DupeMode;
pub use look::LookMode;
pub use transform::{TransformKind, TransformMode};

use crate::context::EditorContext;
use crate::gesture::{Gesture, GestureTracker};
use crate::input::MouseButton;
use crate::ui::UiElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Stable identifier of a mode, used for lookup and switching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(Cow<'static, str>);

impl ModeId {
    pub const ADD: ModeId = ModeId::from_static("add");
    pub const MOVE: ModeId = ModeId::from_static("move");
    pub const ROTATE: ModeId = ModeId::from_static("rotate");
    pub const SCALE: ModeId = ModeId::from_static("scale");
    pub const DECORATE: ModeId = ModeId::from_static("decorate");
    pub const LOOK: ModeId = ModeId::from_static("look");
    pub const DUPE: ModeId = ModeId::from_static("dupe");

    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Toolbar button that selects this mode.
    pub fn control_id(&self) -> UiElementId {
        UiElementId::new(format!("mode.{}", self.0))
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// UI side effects tied to a mode's lifetime: its highlighted toolbar
/// button and the panels it shows.
#[derive(Debug, Clone)]
pub struct ModeChrome {
    control: Option<UiElementId>,
    panels: Vec<UiElementId>,
    active: bool,
}

impl ModeChrome {
    /// Highlight `control` and show `panels`.
    pub fn enter(
        ctx: &mut dyn EditorContext,
        control: Option<UiElementId>,
        panels: Vec<UiElementId>,
    ) -> Self {
        if let Some(control) = &control {
            ctx.highlight_control(control);
        }
        for panel in &panels {
            ctx.set_element_visible(panel, true);
        }
        Self {
            control,
            panels,
            active: true,
        }
    }

    /// Undo [`ModeChrome::enter`]. Safe to call more than once.
    pub fn exit(&mut self, ctx: &mut dyn EditorContext) {
        if !self.active {
            return;
        }
        self.active = false;
        for panel in &self.panels {
            ctx.set_element_visible(panel, false);
        }
        if let Some(control) = &self.control {
            ctx.unhighlight_control(control);
        }
    }

    pub fn control(&self) -> Option<&UiElementId> {
        self.control.as_ref()
    }

    pub fn panels(&self) -> &[UiElementId] {
        &self.panels
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// State every mode carries.
#[derive(Debug, Clone)]
pub struct ModeCore {
    id: ModeId,
    tracker: GestureTracker,
    chrome: ModeChrome,
}

impl ModeCore {
    /// Set up a mode: highlight its toolbar button and show `panels`.
    pub fn enter(ctx: &mut dyn EditorContext, id: ModeId, panels: Vec<UiElementId>) -> Self {
        log::debug!("Entering {id} mode");
        let chrome = ModeChrome::enter(ctx, Some(id.control_id()), panels);
        Self {
            id,
            tracker: GestureTracker::with_threshold(ctx.click_threshold()),
            chrome,
        }
    }

    pub fn chrome(&self) -> &ModeChrome {
        &self.chrome
    }
}

/// A pluggable editing behavior.
pub trait Mode {
    fn core(&self) -> &ModeCore;

    fn core_mut(&mut self) -> &mut ModeCore;

    fn id(&self) -> &ModeId {
        &self.core().id
    }

    fn tracker(&self) -> &GestureTracker {
        &self.core().tracker
    }

    fn tracker_mut(&mut self) -> &mut GestureTracker {
        &mut self.core_mut().tracker
    }

    /// Toolbar control highlighted while the mode is active.
    fn highlighted_control(&self) -> Option<&UiElementId> {
        self.core().chrome.control()
    }

    fn on_mouse_down(&mut self, ctx: &mut dyn EditorContext, button: MouseButton, position: Point) {
        mouse_down(self, ctx, button, position);
    }

    fn on_mouse_up(&mut self, ctx: &mut dyn EditorContext, button: MouseButton, position: Point) {
        mouse_up(self, ctx, button, position);
    }

    fn on_mouse_cancel(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        position: Point,
    ) {
        mouse_cancel(self, ctx, button, position);
    }

    fn on_mouse_move(&mut self, ctx: &mut dyn EditorContext, position: Point) {
        mouse_move(self, ctx, position);
    }

    /// Wheel notches; positive means zoom in.
    fn on_mouse_wheel(&mut self, _ctx: &mut dyn EditorContext, _delta: i32) {}

    fn on_click(
        &mut self,
        _ctx: &mut dyn EditorContext,
        _button: MouseButton,
        _start: Point,
        _end: Point,
    ) {
    }

    fn on_drag_update(
        &mut self,
        _ctx: &mut dyn EditorContext,
        _button: MouseButton,
        _start: Point,
        _end: Point,
    ) {
    }

    /// Cancel every open gesture.
    fn cancel_all(&mut self, ctx: &mut dyn EditorContext, position: Point) {
        for button in self.tracker().pressed_buttons() {
            self.on_mouse_cancel(ctx, button, position);
        }
    }

    /// Resolve open gestures, then undo the setup side effects.
    fn teardown(&mut self, ctx: &mut dyn EditorContext, position: Point) {
        self.cancel_all(ctx, position);
        self.core_mut().chrome.exit(ctx);
        log::debug!("Left {} mode", self.id());
    }
}

/// Base press handling. Returns false if the press was rejected because the
/// button was already down.
pub fn mouse_down<M: Mode + ?Sized>(
    mode: &mut M,
    _ctx: &mut dyn EditorContext,
    button: MouseButton,
    position: Point,
) -> bool {
    mode.tracker_mut().press(button, position)
}

/// Base release handling: emits the click or final drag.
pub fn mouse_up<M: Mode + ?Sized>(
    mode: &mut M,
    ctx: &mut dyn EditorContext,
    button: MouseButton,
    position: Point,
) {
    if let Some(gesture) = mode.tracker_mut().release(button, position) {
        dispatch(mode, ctx, gesture);
    }
}

/// Base cancel handling: emits the revert drag for a moved gesture.
pub fn mouse_cancel<M: Mode + ?Sized>(
    mode: &mut M,
    ctx: &mut dyn EditorContext,
    button: MouseButton,
    _position: Point,
) {
    if let Some(gesture) = mode.tracker_mut().cancel(button) {
        dispatch(mode, ctx, gesture);
    }
}

/// Base move handling: one drag update per held button.
pub fn mouse_move<M: Mode + ?Sized>(mode: &mut M, ctx: &mut dyn EditorContext, position: Point) {
    for gesture in mode.tracker_mut().motion(position) {
        dispatch(mode, ctx, gesture);
    }
}

fn dispatch<M: Mode + ?Sized>(mode: &mut M, ctx: &mut dyn EditorContext, gesture: Gesture) {
    match gesture {
        Gesture::Click { button, start, end } => mode.on_click(ctx, button, start, end),
        Gesture::Drag { button, start, end } => mode.on_drag_update(ctx, button, start, end),
    }
}
