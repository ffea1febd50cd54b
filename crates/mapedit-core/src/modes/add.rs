//! Place and delete entities.

use super::{Mode, ModeCore, ModeId};
use crate::context::EditorContext;
use crate::input::MouseButton;
use crate::scene::{Entity, EntityFilter};
use crate::ui::UiElementId;
use kurbo::Point;

/// Left click places an entity with the active material and scale; right
/// click deletes the entity under the cursor. Terrain is never deleted.
pub struct AddMode {
    core: ModeCore,
}

impl AddMode {
    pub fn new(ctx: &mut dyn EditorContext) -> Self {
        Self {
            core: ModeCore::enter(ctx, ModeId::ADD, vec![UiElementId::MATERIAL_PANEL]),
        }
    }
}

impl Mode for AddMode {
    fn core(&self) -> &ModeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore {
        &mut self.core
    }

    fn on_click(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        _start: Point,
        end: Point,
    ) {
        match button {
            MouseButton::Left => {
                let entity = Entity::new(ctx.active_material_name(), end, ctx.active_scale());
                let id = ctx.add_entity(entity);
                log::debug!("Added entity {id} at ({}, {})", end.x, end.y);
            }
            MouseButton::Right => {
                if let Some(id) = ctx.closest_within_reach(end, EntityFilter::PLACEABLE) {
                    ctx.remove_entity(id);
                    log::debug!("Removed entity {id}");
                }
            }
            MouseButton::Middle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Editor;
    use crate::scene::{EntityKind, SPAWN_POINT_MATERIAL, SPAWN_POINT_SCALE};
    use kurbo::Vec2;

    fn click(mode: &mut AddMode, editor: &mut Editor, button: MouseButton, at: Point) {
        mode.on_mouse_down(editor, button, at);
        mode.on_mouse_up(editor, button, at);
    }

    #[test]
    fn test_left_click_adds_with_active_material() {
        let mut editor = Editor::new();
        editor.set_active_material("barrel");
        editor.set_active_scale(Vec2::new(2.0, 3.0));
        let mut mode = AddMode::new(&mut editor);

        click(&mut mode, &mut editor, MouseButton::Left, Point::new(5.0, 6.0));

        let entity = editor.scene.iter().next().unwrap();
        assert_eq!(entity.material, "barrel");
        assert_eq!(entity.kind, EntityKind::Prop);
        assert_eq!(entity.position, Point::new(5.0, 6.0));
        assert_eq!(entity.scale, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_adds_spawn_point_with_fixed_scale() {
        let mut editor = Editor::new();
        editor.set_active_material(SPAWN_POINT_MATERIAL);
        editor.set_active_scale(Vec2::new(4.0, 4.0));
        let mut mode = AddMode::new(&mut editor);

        click(&mut mode, &mut editor, MouseButton::Left, Point::ZERO);

        let entity = editor.scene.iter().next().unwrap();
        assert!(entity.is_spawn_point());
        assert_eq!(entity.scale, SPAWN_POINT_SCALE);
    }

    #[test]
    fn test_drag_does_not_add() {
        let mut editor = Editor::new();
        let mut mode = AddMode::new(&mut editor);

        mode.on_mouse_down(&mut editor, MouseButton::Left, Point::ZERO);
        mode.on_mouse_move(&mut editor, Point::new(20.0, 0.0));
        mode.on_mouse_up(&mut editor, MouseButton::Left, Point::new(20.0, 0.0));
        assert!(editor.scene.is_empty());
    }

    #[test]
    fn test_right_click_removes_nearest_in_reach() {
        let mut editor = Editor::new();
        let unit = Vec2::new(1.0, 1.0);
        let near = editor.scene.add(Entity::new("crate", Point::new(3.0, 0.0), unit));
        let far = editor.scene.add(Entity::new("crate", Point::new(30.0, 0.0), unit));
        let mut mode = AddMode::new(&mut editor);

        click(&mut mode, &mut editor, MouseButton::Right, Point::ZERO);
        assert!(editor.scene.get(near).is_none());
        assert!(editor.scene.get(far).is_some());

        // Nothing left in reach: silently ignored.
        click(&mut mode, &mut editor, MouseButton::Right, Point::ZERO);
        assert_eq!(editor.scene.len(), 1);
    }

    #[test]
    fn test_right_click_skips_terrain() {
        let mut editor = Editor::new();
        let terrain = editor.scene.add(Entity::terrain("rock", Point::ZERO));
        let mut mode = AddMode::new(&mut editor);

        click(&mut mode, &mut editor, MouseButton::Right, Point::ZERO);
        assert!(editor.scene.get(terrain).is_some());
    }

    #[test]
    fn test_shows_material_panel() {
        let mut editor = Editor::new();
        let mut mode = AddMode::new(&mut editor);
        assert!(editor.ui.is_visible(&UiElementId::MATERIAL_PANEL));
        assert!(editor.ui.is_highlighted(&ModeId::ADD.control_id()));

        mode.teardown(&mut editor, Point::ZERO);
        assert!(!editor.ui.is_visible(&UiElementId::MATERIAL_PANEL));
        assert!(!editor.ui.is_highlighted(&ModeId::ADD.control_id()));
    }
}
