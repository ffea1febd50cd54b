//! Editor state reachable from modes.
//!
//! [`EditorContext`] is everything a mode may look at or change while it
//! handles an event. [`Editor`] is the in-memory implementation the host
//! runs with.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::modes::ModeId;
use crate::scene::{Entity, EntityFilter, EntityId, Scene};
use crate::ui::{UiElement, UiElementId, UiState};
use kurbo::{Point, Vec2};

/// Whether something `distance` scene units away is under the cursor at
/// `zoom`. The boundary itself is out of reach.
pub fn within_reach(distance: f64, zoom: f64, threshold: f64) -> bool {
    distance / zoom < threshold
}

/// Operations a mode performs on the editor.
pub trait EditorContext {
    /// Nearest entity accepted by `filter` and its distance, regardless of reach.
    fn find_closest_entity(&self, position: Point, filter: EntityFilter) -> Option<(EntityId, f64)>;

    fn entity(&self, id: EntityId) -> Option<&Entity>;

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity>;

    fn add_entity(&mut self, entity: Entity) -> EntityId;

    fn remove_entity(&mut self, id: EntityId) -> Option<Entity>;

    /// Material the palette currently has selected.
    fn active_material_name(&self) -> &str;

    /// Scale new entities are placed with.
    fn active_scale(&self) -> Vec2;

    fn zoom(&self) -> f64;

    fn set_zoom(&mut self, zoom: f64);

    fn camera_target(&self) -> Point;

    fn set_camera_target(&mut self, target: Point);

    fn ui_element(&self, id: &UiElementId) -> Option<&UiElement>;

    fn set_element_visible(&mut self, id: &UiElementId, visible: bool);

    fn highlight_control(&mut self, id: &UiElementId);

    fn unhighlight_control(&mut self, id: &UiElementId);

    /// Selection radius in screen units.
    fn proximity_threshold(&self) -> f64;

    /// Max displacement of a click, in scene units.
    fn click_threshold(&self) -> f64;

    /// Ask for a mode switch once the current event has been handled.
    fn request_mode(&mut self, id: ModeId);

    /// Take the pending mode switch request, if any.
    fn take_mode_request(&mut self) -> Option<ModeId>;

    /// Nearest entity accepted by `filter` that is within reach of `position`.
    fn closest_within_reach(&self, position: Point, filter: EntityFilter) -> Option<EntityId> {
        let (id, distance) = self.find_closest_entity(position, filter)?;
        within_reach(distance, self.zoom(), self.proximity_threshold()).then_some(id)
    }
}

/// In-memory editor state.
#[derive(Debug, Clone)]
pub struct Editor {
    pub scene: Scene,
    pub camera: Camera,
    pub ui: UiState,
    active_material: String,
    active_scale: Vec2,
    proximity_threshold: f64,
    click_threshold: f64,
    pending_mode: Option<ModeId>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with default configuration and an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor from configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut camera = Camera::default();
        if !camera.set_limits(config.min_zoom, config.max_zoom) {
            log::warn!("Keeping default zoom limits");
        }
        camera.set_zoom(config.initial_zoom);
        Self {
            scene: Scene::new(),
            camera,
            ui: UiState::new(),
            active_material: config.active_material.clone(),
            active_scale: config.active_scale,
            proximity_threshold: config.proximity_threshold,
            click_threshold: config.click_threshold,
            pending_mode: None,
        }
    }

    /// Replace the scene.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    pub fn set_active_material(&mut self, material: impl Into<String>) {
        self.active_material = material.into();
    }

    pub fn set_active_scale(&mut self, scale: Vec2) {
        self.active_scale = scale;
    }
}

impl EditorContext for Editor {
    fn find_closest_entity(
        &self,
        position: Point,
        filter: EntityFilter,
    ) -> Option<(EntityId, f64)> {
        self.scene.find_closest(position, filter)
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.scene.get(id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.scene.get_mut(id)
    }

    fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.scene.add(entity)
    }

    fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.scene.remove(id)
    }

    fn active_material_name(&self) -> &str {
        &self.active_material
    }

    fn active_scale(&self) -> Vec2 {
        self.active_scale
    }

    fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
    }

    fn camera_target(&self) -> Point {
        self.camera.target
    }

    fn set_camera_target(&mut self, target: Point) {
        self.camera.pan_to(target);
    }

    fn ui_element(&self, id: &UiElementId) -> Option<&UiElement> {
        self.ui.element(id)
    }

    fn set_element_visible(&mut self, id: &UiElementId, visible: bool) {
        self.ui.set_visible(id, visible);
    }

    fn highlight_control(&mut self, id: &UiElementId) {
        self.ui.highlight(id);
    }

    fn unhighlight_control(&mut self, id: &UiElementId) {
        self.ui.unhighlight(id);
    }

    fn proximity_threshold(&self) -> f64 {
        self.proximity_threshold
    }

    fn click_threshold(&self) -> f64 {
        self.click_threshold
    }

    fn request_mode(&mut self, id: ModeId) {
        if let Some(previous) = self.pending_mode.replace(id) {
            log::debug!("Mode request {previous} superseded");
        }
    }

    fn take_mode_request(&mut self) -> Option<ModeId> {
        self.pending_mode.take()
    }
}
