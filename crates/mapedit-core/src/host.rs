//! Owner of the active mode and router for raw input.
//!
//! Exactly one mode is live at a time. Switching tears the old mode down
//! completely (open gestures cancelled, UI side effects reversed) before
//! the new one is constructed. A mode that wants to switch asks through
//! [`EditorContext::request_mode`]; the switch happens once its handler has
//! returned.

use crate::context::{Editor, EditorContext};
use crate::input::{MouseButton, PointerEvent};
use crate::modes::{Mode, ModeId};
use crate::registry::{ModeError, ModeRegistry};
use kurbo::Point;

/// Routes input to the current mode and manages mode switches.
pub struct ModeHost<C: EditorContext = Editor> {
    context: C,
    registry: ModeRegistry,
    current: Option<Box<dyn Mode>>,
    /// Last known pointer position, used for synthesized cancels.
    pointer: Point,
}

impl<C: EditorContext> ModeHost<C> {
    /// Create a host and enter `initial`.
    pub fn new(
        mut context: C,
        registry: ModeRegistry,
        initial: &ModeId,
    ) -> Result<Self, ModeError> {
        let mode = registry.construct(initial, &mut context)?;
        log::info!("Starting in {initial} mode");
        Ok(Self {
            context,
            registry,
            current: Some(mode),
            pointer: Point::ZERO,
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    /// The live mode; `None` only after [`ModeHost::shutdown`].
    pub fn mode(&self) -> Option<&dyn Mode> {
        self.current.as_deref()
    }

    pub fn current_mode_id(&self) -> Option<&ModeId> {
        self.current.as_deref().map(|mode| mode.id())
    }

    /// Last pointer position seen.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Switch to another mode.
    ///
    /// Unknown IDs are rejected without touching the current mode. Switching
    /// to the current ID re-enters it from scratch.
    pub fn set_mode(&mut self, id: &ModeId) -> Result<(), ModeError> {
        if !self.registry.contains(id) {
            log::warn!("Refusing switch to unknown mode {id}");
            return Err(ModeError::UnknownMode(id.clone()));
        }
        self.teardown_current();
        let mode = self.registry.construct(id, &mut self.context)?;
        log::info!("Switched to {id} mode");
        self.current = Some(mode);
        Ok(())
    }

    /// Tear down the current mode. Further input is ignored. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) {
        self.teardown_current();
    }

    pub fn is_shut_down(&self) -> bool {
        self.current.is_none()
    }

    fn teardown_current(&mut self) {
        if let Some(mut mode) = self.current.take() {
            mode.teardown(&mut self.context, self.pointer);
            // Requests made while cancelling gestures would target a mode
            // that no longer exists.
            if let Some(stale) = self.context.take_mode_request() {
                log::debug!("Dropping mode request {stale} raised during teardown");
            }
        }
    }

    /// Run `f` against the current mode, then apply any requested switch.
    fn dispatch(&mut self, f: impl FnOnce(&mut dyn Mode, &mut dyn EditorContext)) {
        let Some(mode) = self.current.as_deref_mut() else {
            log::debug!("Input ignored: no active mode");
            return;
        };
        f(mode, &mut self.context);
        if let Some(id) = self.context.take_mode_request() {
            if let Err(err) = self.set_mode(&id) {
                log::warn!("Requested mode switch failed: {err}");
            }
        }
    }

    pub fn mouse_down(&mut self, button: MouseButton, position: Point) {
        self.pointer = position;
        self.dispatch(|mode, ctx| mode.on_mouse_down(ctx, button, position));
    }

    pub fn mouse_up(&mut self, button: MouseButton, position: Point) {
        self.pointer = position;
        self.dispatch(|mode, ctx| mode.on_mouse_up(ctx, button, position));
    }

    pub fn mouse_cancel(&mut self, button: MouseButton, position: Point) {
        self.pointer = position;
        self.dispatch(|mode, ctx| mode.on_mouse_cancel(ctx, button, position));
    }

    pub fn mouse_move(&mut self, position: Point) {
        self.pointer = position;
        self.dispatch(|mode, ctx| mode.on_mouse_move(ctx, position));
    }

    pub fn mouse_wheel(&mut self, delta: i32) {
        self.dispatch(|mode, ctx| mode.on_mouse_wheel(ctx, delta));
    }

    /// Keyboard/pointer focus moved to the UI: cancel every open gesture.
    pub fn focus_lost(&mut self) {
        let position = self.pointer;
        self.dispatch(|mode, ctx| mode.cancel_all(ctx, position));
    }

    /// Route a raw pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => self.mouse_down(button, position),
            PointerEvent::Up { position, button } => self.mouse_up(button, position),
            PointerEvent::Cancel { position, button } => self.mouse_cancel(button, position),
            PointerEvent::Move { position } => self.mouse_move(position),
            PointerEvent::Wheel { delta } => self.mouse_wheel(delta),
        }
    }
}

impl ModeHost<Editor> {
    /// Host with built-in modes over a default editor.
    pub fn with_editor(editor: Editor, initial: &ModeId) -> Result<Self, ModeError> {
        Self::new(editor, ModeRegistry::with_builtin_modes(), initial)
    }
}

impl<C: EditorContext> Drop for ModeHost<C> {
    fn drop(&mut self) {
        self.teardown_current();
    }
}
