//! Scene entities and the in-memory entity collection.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for an entity.
pub type EntityId = Uuid;

/// Material name that turns an entity into a spawn point.
pub const SPAWN_POINT_MATERIAL: &str = "spawn_point";

/// Scale every spawn point is forced to.
pub const SPAWN_POINT_SCALE: Vec2 = Vec2::new(1.0, 1.0);

/// Kind of scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Regular placed object.
    #[default]
    Prop,
    /// Player spawn point; fixed scale and rotation.
    SpawnPoint,
    /// Level geometry; never created or deleted by gestures.
    Terrain,
}

impl EntityKind {
    /// Kind a newly placed entity gets for a material.
    pub fn for_material(material: &str) -> Self {
        if material == SPAWN_POINT_MATERIAL {
            EntityKind::SpawnPoint
        } else {
            EntityKind::Prop
        }
    }
}

/// An object placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default)]
    pub kind: EntityKind,
    pub material: String,
    pub position: Point,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: Vec2,
}

fn default_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

impl Entity {
    /// Create an entity whose kind follows from its material.
    pub fn new(material: impl Into<String>, position: Point, scale: Vec2) -> Self {
        let material: String = material.into();
        let mut entity = Self {
            id: Uuid::new_v4(),
            kind: EntityKind::Prop,
            material: String::new(),
            position,
            rotation: 0.0,
            scale,
        };
        entity.apply_material(&material);
        entity
    }

    /// Create a terrain entity.
    pub fn terrain(material: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EntityKind::Terrain,
            material: material.into(),
            position,
            rotation: 0.0,
            scale: default_scale(),
        }
    }

    /// Overwrite the material, and with it the kind.
    ///
    /// Terrain keeps its kind. Spawn points get their fixed scale and
    /// rotation.
    pub fn apply_material(&mut self, material: &str) {
        self.material = material.to_string();
        if self.kind != EntityKind::Terrain {
            self.kind = EntityKind::for_material(material);
        }
        if self.kind == EntityKind::SpawnPoint {
            self.scale = SPAWN_POINT_SCALE;
            self.rotation = 0.0;
        }
    }

    pub fn is_spawn_point(&self) -> bool {
        self.kind == EntityKind::SpawnPoint
    }

    pub fn is_terrain(&self) -> bool {
        self.kind == EntityKind::Terrain
    }
}

/// Which entity kinds a proximity query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityFilter {
    pub spawn_points: bool,
    pub terrain: bool,
}

impl EntityFilter {
    /// Props only.
    pub const PROPS: Self = Self {
        spawn_points: false,
        terrain: false,
    };
    /// Props and spawn points.
    pub const PLACEABLE: Self = Self {
        spawn_points: true,
        terrain: false,
    };
    /// Everything.
    pub const ALL: Self = Self {
        spawn_points: true,
        terrain: true,
    };

    /// Whether an entity passes the filter.
    pub fn accepts(&self, entity: &Entity) -> bool {
        match entity.kind {
            EntityKind::Prop => true,
            EntityKind::SpawnPoint => self.spawn_points,
            EntityKind::Terrain => self.terrain,
        }
    }
}

/// All entities in the level, keyed by ID, in insertion order.
///
/// Serialized as an ordered list of entities; loading goes through
/// [`Scene::add`], so the index and the order always agree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Entity>", into = "Vec<Entity>")]
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    order: Vec<EntityId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, returning its ID. An entity with the same ID is replaced.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Remove an entity.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.order.retain(|&entity_id| entity_id != id);
        self.entities.remove(&id)
    }

    /// Get an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Nearest entity accepted by `filter`, with its distance from `position`.
    ///
    /// Ties go to the entity added first.
    pub fn find_closest(
        &self,
        position: Point,
        filter: EntityFilter,
    ) -> Option<(EntityId, f64)> {
        self.iter()
            .filter(|entity| filter.accepts(entity))
            .map(|entity| (entity.id, entity.position.distance(position)))
            .fold(None, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<Entity> for Scene {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for entity in iter {
            scene.add(entity);
        }
        scene
    }
}

impl From<Vec<Entity>> for Scene {
    fn from(entities: Vec<Entity>) -> Self {
        entities.into_iter().collect()
    }
}

impl From<Scene> for Vec<Entity> {
    fn from(scene: Scene) -> Self {
        let Scene {
            mut entities,
            order,
        } = scene;
        order.iter().filter_map(|id| entities.remove(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(x: f64, y: f64) -> Entity {
        Entity::new("crate", Point::new(x, y), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        let id = scene.add(prop(0.0, 0.0));
        assert_eq!(scene.len(), 1);
        assert!(scene.get(id).is_some());

        let removed = scene.remove(id);
        assert_eq!(removed.map(|e| e.id), Some(id));
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn test_find_closest() {
        let scene: Scene = [prop(0.0, 0.0), prop(10.0, 0.0), prop(3.0, 4.0)]
            .into_iter()
            .collect();
        let ids: Vec<_> = scene.iter().map(|e| e.id).collect();

        let (id, distance) = scene
            .find_closest(Point::new(4.0, 4.0), EntityFilter::ALL)
            .unwrap();
        assert_eq!(id, ids[2]);
        assert!((distance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_closest_tie_prefers_first() {
        let scene: Scene = [prop(-1.0, 0.0), prop(1.0, 0.0)].into_iter().collect();
        let first = scene.iter().next().unwrap().id;
        let (id, _) = scene.find_closest(Point::ZERO, EntityFilter::ALL).unwrap();
        assert_eq!(id, first);
    }

    #[test]
    fn test_find_closest_empty() {
        assert!(Scene::new().find_closest(Point::ZERO, EntityFilter::ALL).is_none());
    }

    #[test]
    fn test_filter() {
        let mut scene = Scene::new();
        let spawn = scene.add(Entity::new(
            SPAWN_POINT_MATERIAL,
            Point::ZERO,
            Vec2::new(3.0, 3.0),
        ));
        let terrain = scene.add(Entity::terrain("rock", Point::new(1.0, 0.0)));
        let far = scene.add(prop(50.0, 0.0));

        let at = Point::ZERO;
        assert_eq!(scene.find_closest(at, EntityFilter::ALL).map(|r| r.0), Some(spawn));
        assert_eq!(scene.find_closest(at, EntityFilter::PROPS).map(|r| r.0), Some(far));

        let filter = EntityFilter {
            spawn_points: false,
            terrain: true,
        };
        assert_eq!(scene.find_closest(at, filter).map(|r| r.0), Some(terrain));
    }

    #[test]
    fn test_spawn_point_material_forces_transform() {
        let spawn = Entity::new(SPAWN_POINT_MATERIAL, Point::ZERO, Vec2::new(3.0, 2.0));
        assert!(spawn.is_spawn_point());
        assert_eq!(spawn.scale, SPAWN_POINT_SCALE);

        let mut entity = prop(0.0, 0.0);
        entity.rotation = 45.0;
        entity.scale = Vec2::new(2.0, 2.0);
        entity.apply_material(SPAWN_POINT_MATERIAL);
        assert!(entity.is_spawn_point());
        assert_eq!(entity.scale, SPAWN_POINT_SCALE);
        assert!(entity.rotation.abs() < f64::EPSILON);

        entity.apply_material("barrel");
        assert_eq!(entity.kind, EntityKind::Prop);
    }

    #[test]
    fn test_terrain_keeps_kind() {
        let mut terrain = Entity::terrain("rock", Point::ZERO);
        terrain.apply_material("sand");
        assert!(terrain.is_terrain());
        assert_eq!(terrain.material, "sand");
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let scene: Scene = [prop(1.0, 0.0), prop(2.0, 0.0)].into_iter().collect();
        let json = scene.to_json().unwrap();
        let loaded = Scene::from_json(&json).unwrap();
        let before: Vec<_> = scene.iter().map(|e| e.id).collect();
        let after: Vec<_> = loaded.iter().map(|e| e.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_entity_defaults_from_json() {
        let json = r#"{"material":"crate","position":{"x":1.0,"y":2.0}}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.kind, EntityKind::Prop);
        assert_eq!(entity.scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_json_is_an_entity_list() {
        let scene: Scene = [prop(1.0, 0.0)].into_iter().collect();
        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_json_duplicate_ids_collapse() {
        let entity = prop(1.0, 0.0);
        let json = serde_json::to_string(&vec![entity.clone(), entity.clone()]).unwrap();
        let scene = Scene::from_json(&json).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.iter().count(), 1);
        assert_eq!(scene.get(entity.id), Some(&entity));
    }
}
