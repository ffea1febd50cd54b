//! Camera navigation.

use super::{Mode, ModeCore, ModeId, mouse_down};
use crate::camera::zoom_after_notches;
use crate::context::EditorContext;
use crate::input::MouseButton;
use kurbo::Point;

/// Left drag grabs the world and pans the camera against the pointer,
/// right click centres the camera on the clicked point, the wheel zooms.
pub struct LookMode {
    core: ModeCore,
    /// Camera target when the left button went down.
    pan_origin: Option<Point>,
}

impl LookMode {
    pub fn new(ctx: &mut dyn EditorContext) -> Self {
        Self {
            core: ModeCore::enter(ctx, ModeId::LOOK, Vec::new()),
            pan_origin: None,
        }
    }
}

impl Mode for LookMode {
    fn core(&self) -> &ModeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore {
        &mut self.core
    }

    fn on_mouse_down(&mut self, ctx: &mut dyn EditorContext, button: MouseButton, position: Point) {
        if mouse_down(self, ctx, button, position) && button == MouseButton::Left {
            self.pan_origin = Some(ctx.camera_target());
        }
    }

    fn on_mouse_wheel(&mut self, ctx: &mut dyn EditorContext, delta: i32) {
        let zoom = zoom_after_notches(ctx.zoom(), delta);
        ctx.set_zoom(zoom);
    }

    fn on_click(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        _start: Point,
        end: Point,
    ) {
        if button == MouseButton::Right {
            ctx.set_camera_target(end);
        }
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        start: Point,
        end: Point,
    ) {
        if button != MouseButton::Left {
            return;
        }
        if let Some(origin) = self.pan_origin {
            ctx.set_camera_target(origin + (start - end));
        }
    }
}
