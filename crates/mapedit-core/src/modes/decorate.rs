//! Repaint existing entities.

use super::{Mode, ModeCore, ModeId};
use crate::context::EditorContext;
use crate::input::MouseButton;
use crate::scene::EntityFilter;
use crate::ui::UiElementId;
use kurbo::Point;

/// Any click overwrites the material of the entity under the cursor with
/// the active one. Nothing is created or deleted.
pub struct DecorateMode {
    core: ModeCore,
}

impl DecorateMode {
    pub fn new(ctx: &mut dyn EditorContext) -> Self {
        Self {
            core: ModeCore::enter(ctx, ModeId::DECORATE, vec![UiElementId::MATERIAL_PANEL]),
        }
    }
}

impl Mode for DecorateMode {
    fn core(&self) -> &ModeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore {
        &mut self.core
    }

    fn on_click(
        &mut self,
        ctx: &mut dyn EditorContext,
        _button: MouseButton,
        _start: Point,
        end: Point,
    ) {
        let Some(id) = ctx.closest_within_reach(end, EntityFilter::ALL) else {
            return;
        };
        let material = ctx.active_material_name().to_string();
        if let Some(entity) = ctx.entity_mut(id) {
            entity.apply_material(&material);
            log::debug!("Decorated entity {id} with {material}");
        }
    }
}
