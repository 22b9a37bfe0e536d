//! Scene graph for multi-device compositions.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::entity::{DeviceType, EntityId, EntityPatch, SceneEntity};
use crate::transform::{TransformPatch, MAX_Z_INDEX, MIN_Z_INDEX};
use crate::{MockupError, MockupResult};

/// Offset applied to a duplicated entity so it does not hide the original.
const DUPLICATE_OFFSET: f32 = 20.0;

/// Ordered collection of scene entities.
///
/// Entities are stored by id; insertion order is tracked separately and
/// breaks z-index ties when resolving paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SceneDocument", into = "SceneDocument")]
pub struct SceneGraph {
    /// All entities, indexed by ID.
    entities: HashMap<EntityId, SceneEntity>,
    /// Entity IDs in insertion order.
    order: Vec<EntityId>,
}

/// Serialized form: entities listed in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneDocument {
    entities: Vec<SceneEntity>,
}

impl From<SceneGraph> for SceneDocument {
    fn from(mut scene: SceneGraph) -> Self {
        let entities = scene
            .order
            .iter()
            .filter_map(|id| scene.entities.remove(id))
            .collect();
        Self { entities }
    }
}

impl TryFrom<SceneDocument> for SceneGraph {
    type Error = MockupError;

    fn try_from(document: SceneDocument) -> MockupResult<Self> {
        let mut scene = Self::new();
        for entity in document.entities {
            scene.insert_entity(entity)?;
        }
        Ok(scene)
    }
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest z-index in use, if any.
    fn max_z(&self) -> Option<i32> {
        self.entities.values().map(|e| e.transform.z_index).max()
    }

    /// Add a device with per-type defaults on top of the current stack.
    pub fn add_entity(&mut self, device_type: DeviceType) -> EntityId {
        let mut entity = SceneEntity::new(device_type);
        while self.entities.contains_key(&entity.id) {
            entity.id = EntityId::new();
        }
        entity.transform.z_index = self.next_z();
        let id = entity.id;
        tracing::debug!("Adding {device_type:?} entity {id}");
        self.order.push(id);
        self.entities.insert(id, entity);
        id
    }

    /// Insert a fully built entity, keeping its id and clamping its transform.
    ///
    /// # Errors
    ///
    /// Returns [`MockupError::DuplicateEntity`] if the id is already present.
    pub fn insert_entity(&mut self, mut entity: SceneEntity) -> MockupResult<EntityId> {
        let id = entity.id;
        if self.entities.contains_key(&id) {
            return Err(MockupError::DuplicateEntity(id.to_string()));
        }
        entity.transform = entity.transform.clamped();
        self.order.push(id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Remove an entity. Returns `None` if the id is unknown.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<SceneEntity> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            self.order.retain(|&eid| eid != id);
        } else {
            tracing::debug!("Remove ignored, no entity {id}");
        }
        removed
    }

    /// Merge `patch` into an entity. Returns `false` if the id is unknown.
    pub fn update_entity(&mut self, id: EntityId, patch: &EntityPatch) -> bool {
        if let Some(entity) = self.entities.get_mut(&id) {
            patch.apply_to(entity);
            true
        } else {
            tracing::debug!("Update ignored, no entity {id}");
            false
        }
    }

    /// Raise an entity above every other one.
    ///
    /// When the stack already reaches the top z-index, the other entities
    /// move down to make room without changing their relative order.
    pub fn bring_to_front(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            tracing::debug!("Bring to front ignored, no entity {id}");
            return false;
        }
        if self.others(id).any(|e| e.transform.z_index >= MAX_Z_INDEX) {
            self.make_room(id, -1);
        }
        let target = self
            .others(id)
            .map(|e| e.transform.z_index)
            .max()
            .map_or(MIN_Z_INDEX, |z| z + 1);
        self.update_entity(id, &EntityPatch::transform(TransformPatch::z_index(target)))
    }

    /// Lower an entity below every other one.
    ///
    /// When the stack already reaches the bottom z-index, the other entities
    /// move up to make room without changing their relative order.
    pub fn send_to_back(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            tracing::debug!("Send to back ignored, no entity {id}");
            return false;
        }
        if self.others(id).any(|e| e.transform.z_index <= MIN_Z_INDEX) {
            self.make_room(id, 1);
        }
        let target = self
            .others(id)
            .map(|e| e.transform.z_index)
            .min()
            .map_or(MIN_Z_INDEX, |z| z - 1);
        self.update_entity(id, &EntityPatch::transform(TransformPatch::z_index(target)))
    }

    fn others(&self, id: EntityId) -> impl Iterator<Item = &SceneEntity> {
        self.entities.values().filter(move |e| e.id != id)
    }

    /// Move every entity except `id` one level in the direction of `delta`.
    ///
    /// If a plain shift would leave the z-index range, the others are
    /// renumbered onto consecutive levels instead. Entities that shared a
    /// level still share one, so paint order among them is unchanged. When
    /// every level is taken the stack is left as is.
    fn make_room(&mut self, id: EntityId, delta: i32) {
        let allowed = if delta < 0 {
            RangeInclusive::new(MIN_Z_INDEX, MAX_Z_INDEX - 1)
        } else {
            RangeInclusive::new(MIN_Z_INDEX + 1, MAX_Z_INDEX)
        };

        let mut levels: Vec<i32> = self.others(id).map(|e| e.transform.z_index).collect();
        levels.sort_unstable();
        levels.dedup();

        let remap: Vec<(i32, i32)> = if levels.iter().all(|&z| allowed.contains(&(z + delta))) {
            levels.iter().map(|&z| (z, z + delta)).collect()
        } else {
            levels.iter().copied().zip(*allowed.start()..).collect()
        };
        if remap.iter().any(|(_, z)| !allowed.contains(z)) {
            tracing::debug!("Every z-index level is in use, stack unchanged");
            return;
        }

        for entity in self.entities.values_mut().filter(|e| e.id != id) {
            let z = entity.transform.z_index;
            if let Some(&(_, moved)) = remap.iter().find(|&&(old, _)| old == z) {
                entity.transform.z_index = moved;
            }
        }
    }

    /// Copy an entity under a fresh id, offset and placed on top.
    pub fn duplicate_entity(&mut self, id: EntityId) -> Option<EntityId> {
        let mut copy = self.entities.get(&id)?.clone();
        copy.id = EntityId::new();
        while self.entities.contains_key(&copy.id) {
            copy.id = EntityId::new();
        }
        copy.transform.x += DUPLICATE_OFFSET;
        copy.transform.y += DUPLICATE_OFFSET;
        copy.transform.z_index = self.next_z();
        self.insert_entity(copy).ok()
    }

    fn next_z(&self) -> i32 {
        self.max_z().map_or(MIN_Z_INDEX, |z| (z + 1).min(MAX_Z_INDEX))
    }

    /// Get an entity by ID.
    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    /// Check whether an entity exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &SceneEntity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Entities in compositing order: ascending z-index, ties by insertion
    /// order. Later entries occlude earlier ones.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&SceneEntity> {
        let mut sorted: Vec<_> = self.entities().collect();
        sorted.sort_by_key(|e| e.transform.z_index);
        sorted
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> MockupResult<String> {
        serde_json::to_string(self).map_err(MockupError::Serialization)
    }

    /// Deserialize a scene from JSON. Duplicate ids are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or two entities share an id.
    pub fn from_json(json: &str) -> MockupResult<Self> {
        serde_json::from_str(json).map_err(MockupError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    fn entity_with_z(z_index: i32) -> SceneEntity {
        SceneEntity::new(DeviceType::Phone).with_transform(Transform {
            z_index,
            ..Transform::default()
        })
    }

    #[test]
    fn test_scene_add_remove() {
        let mut scene = SceneGraph::new();
        assert!(scene.is_empty());

        let id = scene.add_entity(DeviceType::Tablet);
        assert_eq!(scene.len(), 1);
        assert!(scene.get_entity(id).is_some());

        let removed = scene.remove_entity(id).expect("should remove");
        assert_eq!(removed.device_type(), DeviceType::Tablet);
        assert!(scene.is_empty());
        assert!(scene.remove_entity(id).is_none());
    }

    #[test]
    fn test_new_entities_land_on_top() {
        let mut scene = SceneGraph::new();
        let a = scene.add_entity(DeviceType::Phone);
        let b = scene.add_entity(DeviceType::Laptop);

        assert_eq!(scene.get_entity(a).map(|e| e.transform.z_index), Some(1));
        assert_eq!(scene.get_entity(b).map(|e| e.transform.z_index), Some(2));
    }

    #[test]
    fn test_next_z_saturates() {
        let mut scene = SceneGraph::new();
        for _ in 0..12 {
            scene.add_entity(DeviceType::Phone);
        }
        assert!(scene.entities().all(|e| e.transform.z_index <= MAX_Z_INDEX));
        let last = scene.entities().last().expect("non-empty");
        assert_eq!(last.transform.z_index, MAX_Z_INDEX);
    }

    #[test]
    fn test_paint_order_stable() {
        let mut scene = SceneGraph::new();
        let ids: Vec<_> = [3, 1, 3, 2]
            .into_iter()
            .map(|z| scene.insert_entity(entity_with_z(z)).expect("insert"))
            .collect();

        let painted: Vec<_> = scene.paint_order().iter().map(|e| e.id).collect();
        assert_eq!(painted, vec![ids[1], ids[3], ids[0], ids[2]]);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut scene = SceneGraph::new();
        scene.add_entity(DeviceType::Phone);
        let before = scene.clone();

        let patch = EntityPatch::transform(TransformPatch::position(5.0, 5.0));
        assert!(!scene.update_entity(EntityId::new(), &patch));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_update_clamps() {
        let mut scene = SceneGraph::new();
        let id = scene.add_entity(DeviceType::Phone);
        let patch = EntityPatch::transform(TransformPatch {
            scale: Some(5.0),
            rotation: Some(60.0),
            z_index: Some(-4),
            ..TransformPatch::default()
        });
        assert!(scene.update_entity(id, &patch));

        let t = scene.get_entity(id).expect("exists").transform;
        assert!((t.scale - 30.0).abs() < f32::EPSILON);
        assert!((t.rotation - 45.0).abs() < f32::EPSILON);
        assert_eq!(t.z_index, 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut scene = SceneGraph::new();
        let entity = entity_with_z(1);
        scene.insert_entity(entity.clone()).expect("first insert");
        assert!(matches!(
            scene.insert_entity(entity),
            Err(MockupError::DuplicateEntity(_))
        ));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_bring_to_front_and_back() {
        let mut scene = SceneGraph::new();
        let a = scene.add_entity(DeviceType::Phone);
        let b = scene.add_entity(DeviceType::Phone);
        let c = scene.add_entity(DeviceType::Phone);

        assert!(scene.bring_to_front(a));
        let top = scene.paint_order().last().map(|e| e.id);
        assert_eq!(top, Some(a));

        assert!(scene.send_to_back(c));
        let bottom = scene.paint_order().first().map(|e| e.id);
        assert_eq!(bottom, Some(c));
        assert!(scene.contains(b));
    }

    #[test]
    fn test_reorder_at_range_limits() {
        let mut scene = SceneGraph::new();
        let low = scene.insert_entity(entity_with_z(1)).expect("insert");
        let high = scene.insert_entity(entity_with_z(10)).expect("insert");
        let other_low = scene.insert_entity(entity_with_z(1)).expect("insert");

        assert!(scene.send_to_back(other_low));
        assert_eq!(scene.paint_order().first().map(|e| e.id), Some(other_low));
        assert_eq!(scene.get_entity(low).map(|e| e.transform.z_index), Some(2));

        assert!(scene.bring_to_front(low));
        assert_eq!(scene.paint_order().last().map(|e| e.id), Some(low));
        assert_eq!(scene.get_entity(high).map(|e| e.transform.z_index), Some(3));

        assert!(!scene.bring_to_front(EntityId::new()));
    }

    fn stacking_of(scene: &SceneGraph, ids: &[EntityId]) -> Vec<EntityId> {
        scene
            .paint_order()
            .iter()
            .map(|e| e.id)
            .filter(|id| ids.contains(id))
            .collect()
    }

    #[test]
    fn test_send_to_back_keeps_other_stacking() {
        let mut scene = SceneGraph::new();
        let bottom = scene.insert_entity(entity_with_z(1)).expect("insert");
        let top = scene.insert_entity(entity_with_z(10)).expect("insert");
        let upper = scene.insert_entity(entity_with_z(9)).expect("insert");
        let moved = scene.insert_entity(entity_with_z(5)).expect("insert");

        let untouched = [bottom, top, upper];
        let before = stacking_of(&scene, &untouched);
        assert_eq!(before, vec![bottom, upper, top]);

        assert!(scene.send_to_back(moved));
        assert_eq!(stacking_of(&scene, &untouched), before);
        assert_eq!(scene.paint_order().first().map(|e| e.id), Some(moved));
        assert!(scene
            .entities()
            .all(|e| (MIN_Z_INDEX..=MAX_Z_INDEX).contains(&e.transform.z_index)));
    }

    #[test]
    fn test_bring_to_front_keeps_other_stacking() {
        let mut scene = SceneGraph::new();
        let lower = scene.insert_entity(entity_with_z(2)).expect("insert");
        let bottom = scene.insert_entity(entity_with_z(1)).expect("insert");
        let top = scene.insert_entity(entity_with_z(10)).expect("insert");
        let moved = scene.insert_entity(entity_with_z(5)).expect("insert");

        let untouched = [lower, bottom, top];
        let before = stacking_of(&scene, &untouched);
        assert_eq!(before, vec![bottom, lower, top]);

        assert!(scene.bring_to_front(moved));
        assert_eq!(stacking_of(&scene, &untouched), before);
        assert_eq!(scene.paint_order().last().map(|e| e.id), Some(moved));
    }

    #[test]
    fn test_reorder_keeps_shared_levels_shared() {
        let mut scene = SceneGraph::new();
        let first = scene.insert_entity(entity_with_z(10)).expect("insert");
        let second = scene.insert_entity(entity_with_z(10)).expect("insert");
        let low = scene.insert_entity(entity_with_z(1)).expect("insert");

        assert!(scene.send_to_back(low));
        let z = |id| scene.get_entity(id).map(|e| e.transform.z_index);
        assert_eq!(z(first), z(second));
        assert_eq!(stacking_of(&scene, &[first, second]), vec![first, second]);
        assert_eq!(scene.paint_order().first().map(|e| e.id), Some(low));
    }

    #[test]
    fn test_reorder_with_every_level_taken() {
        let mut scene = SceneGraph::new();
        let ids: Vec<_> = (MIN_Z_INDEX..=MAX_Z_INDEX)
            .map(|z| scene.insert_entity(entity_with_z(z)).expect("insert"))
            .collect();
        let moved = scene.insert_entity(entity_with_z(4)).expect("insert");

        assert!(scene.bring_to_front(moved));
        assert_eq!(stacking_of(&scene, &ids), ids);
        assert_eq!(scene.paint_order().last().map(|e| e.id), Some(moved));
        assert_eq!(
            scene.get_entity(moved).map(|e| e.transform.z_index),
            Some(MAX_Z_INDEX)
        );
    }

    #[test]
    fn test_duplicate_entity() {
        let mut scene = SceneGraph::new();
        let original = scene.add_entity(DeviceType::Browser);
        let copy = scene.duplicate_entity(original).expect("should duplicate");

        assert_ne!(original, copy);
        let a = scene.get_entity(original).expect("original");
        let b = scene.get_entity(copy).expect("copy");
        assert_eq!(a.kind, b.kind);
        assert!((b.transform.x - a.transform.x - DUPLICATE_OFFSET).abs() < f32::EPSILON);
        assert!(b.transform.z_index > a.transform.z_index);
        assert!(scene.duplicate_entity(EntityId::new()).is_none());
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let mut scene = SceneGraph::new();
        let first = scene.add_entity(DeviceType::Laptop);
        let second = scene.add_entity(DeviceType::Screenshot);

        let json = scene.to_json().expect("serialization should work");
        let restored = SceneGraph::from_json(&json).expect("deserialization should work");
        let ids: Vec<_> = restored.entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let entity = entity_with_z(2);
        let json = serde_json::json!({ "entities": [entity.clone(), entity] }).to_string();
        assert!(SceneGraph::from_json(&json).is_err());
    }
}
