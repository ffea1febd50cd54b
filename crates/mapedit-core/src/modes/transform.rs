//! Move, rotate and scale entities by dragging.

use super::{Mode, ModeCore, ModeId, mouse_cancel, mouse_down, mouse_up};
use crate::context::EditorContext;
use crate::input::MouseButton;
use crate::scene::{Entity, EntityFilter, EntityId};
use crate::ui::UiElementId;
use kurbo::{Point, Vec2};

/// Degrees of rotation per screen unit of drag (summed over both axes).
pub const ROTATE_SPEED: f64 = 3.0;
/// Scale factor reached after `SCALE_DIVISOR` screen units of drag.
pub const SCALE_BASE: f64 = 1.33;
pub const SCALE_DIVISOR: f64 = 3.0;

/// Which attribute a [`TransformMode`] edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Move,
    Rotate,
    Scale,
}

impl TransformKind {
    pub fn mode_id(self) -> ModeId {
        match self {
            TransformKind::Move => ModeId::MOVE,
            TransformKind::Rotate => ModeId::ROTATE,
            TransformKind::Scale => ModeId::SCALE,
        }
    }

    fn panels(self) -> Vec<UiElementId> {
        match self {
            TransformKind::Move => Vec::new(),
            TransformKind::Rotate | TransformKind::Scale => vec![UiElementId::TRANSFORM_PANEL],
        }
    }

    /// Spawn points have a fixed rotation and scale, so only Move picks them.
    fn filter(self) -> EntityFilter {
        match self {
            TransformKind::Move => EntityFilter::PLACEABLE,
            TransformKind::Rotate | TransformKind::Scale => EntityFilter::PROPS,
        }
    }

    fn snapshot(self, entity: &Entity) -> Snapshot {
        match self {
            TransformKind::Move => Snapshot::Position(entity.position),
            TransformKind::Rotate => Snapshot::Rotation(entity.rotation),
            TransformKind::Scale => Snapshot::Scale(entity.scale),
        }
    }
}

/// Pre-gesture value of the attribute being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Snapshot {
    Position(Point),
    Rotation(f64),
    Scale(Vec2),
}

impl Snapshot {
    /// Write `snapshot + f(delta)` back to the entity.
    fn apply(self, entity: &mut Entity, delta: Vec2, zoom: f64) {
        match self {
            Snapshot::Position(origin) => entity.position = origin + delta,
            Snapshot::Rotation(origin) => {
                entity.rotation = origin + ROTATE_SPEED * (delta.x + delta.y) / zoom;
            }
            Snapshot::Scale(origin) => {
                let factor = |d: f64| SCALE_BASE.powf(d / (zoom * SCALE_DIVISOR));
                entity.scale = Vec2::new(origin.x * factor(delta.x), origin.y * factor(delta.y));
            }
        }
    }
}

/// The entity a button is manipulating. The scene owns the entity; if it
/// disappears mid-gesture, updates are dropped.
#[derive(Debug, Clone, Copy)]
struct Selection {
    button: MouseButton,
    entity: EntityId,
    original: Snapshot,
}

/// Drag with the left or right button to edit the entity under the cursor.
///
/// Only one entity is manipulated at a time: pressing one of the two
/// buttons cancels a gesture in progress on the other, reverting it.
pub struct TransformMode {
    core: ModeCore,
    kind: TransformKind,
    selection: Option<Selection>,
}

impl TransformMode {
    pub fn new(ctx: &mut dyn EditorContext, kind: TransformKind) -> Self {
        Self {
            core: ModeCore::enter(ctx, kind.mode_id(), kind.panels()),
            kind,
            selection: None,
        }
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// Entity currently being manipulated.
    pub fn selected(&self) -> Option<EntityId> {
        self.selection.map(|selection| selection.entity)
    }

    fn release_selection(&mut self, button: MouseButton) {
        if self.selection.is_some_and(|selection| selection.button == button) {
            self.selection = None;
        }
    }
}

impl Mode for TransformMode {
    fn core(&self) -> &ModeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore {
        &mut self.core
    }

    fn on_mouse_down(&mut self, ctx: &mut dyn EditorContext, button: MouseButton, position: Point) {
        let Some(partner) = button.partner() else {
            mouse_down(self, ctx, button, position);
            return;
        };
        if self.tracker().is_pressed(button) {
            log::warn!("Ignoring {button:?} press while already pressed");
            return;
        }
        if self.tracker().is_pressed(partner) {
            self.on_mouse_cancel(ctx, partner, position);
        }
        if !mouse_down(self, ctx, button, position) {
            return;
        }
        let kind = self.kind;
        self.selection = ctx
            .closest_within_reach(position, kind.filter())
            .and_then(|id| {
                ctx.entity(id).map(|entity| Selection {
                    button,
                    entity: id,
                    original: kind.snapshot(entity),
                })
            });
    }

    fn on_mouse_up(&mut self, ctx: &mut dyn EditorContext, button: MouseButton, position: Point) {
        mouse_up(self, ctx, button, position);
        self.release_selection(button);
    }

    fn on_mouse_cancel(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        position: Point,
    ) {
        mouse_cancel(self, ctx, button, position);
        self.release_selection(button);
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut dyn EditorContext,
        button: MouseButton,
        start: Point,
        end: Point,
    ) {
        let Some(selection) = self.selection.filter(|selection| selection.button == button) else {
            return;
        };
        let zoom = ctx.zoom();
        if let Some(entity) = ctx.entity_mut(selection.entity) {
            selection.original.apply(entity, end - start, zoom);
        }
    }
}
