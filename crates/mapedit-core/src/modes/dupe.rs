//! Attribute copy/paste mode.

use super::{Mode, ModeCore, ModeId};
use crate::context::EditorContext;
use crate::ui::UiElementId;

/// Selectable mode with no gesture behavior yet.
///
/// TODO: copy the hovered entity's material and scale on right click and
/// paste them on left click.
pub struct DupeMode {
    core: ModeCore,
}

impl DupeMode {
    pub fn new(ctx: &mut dyn EditorContext) -> Self {
        Self {
            core: ModeCore::enter(ctx, ModeId::DUPE, vec![UiElementId::MATERIAL_PANEL]),
        }
    }
}

impl Mode for DupeMode {
    fn core(&self) -> &ModeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Editor;
    use crate::input::MouseButton;
    use crate::scene::Entity;
    use kurbo::{Point, Vec2};

    #[test]
    fn test_clicks_change_nothing() {
        let mut editor = Editor::new();
        let id = editor.scene.add(Entity::new("crate", Point::ZERO, Vec2::new(1.0, 1.0)));
        editor.set_active_material("barrel");
        let mut mode = DupeMode::new(&mut editor);

        for button in MouseButton::ALL {
            mode.on_mouse_down(&mut editor, button, Point::ZERO);
            mode.on_mouse_up(&mut editor, button, Point::ZERO);
        }
        assert_eq!(editor.scene.len(), 1);
        assert_eq!(editor.scene.get(id).unwrap().material, "crate");
        assert!(!mode.tracker().any_pressed());
    }
}
