use paperplane_common::EntityId;
use paperplane_ecs::Entity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Returned when an operation names an entity the world does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("entity {0} not found")]
pub struct NotFoundError(pub EntityId);

/// The live collection of simulated entities.
///
/// The world owns its entities by value, keyed by id. Iteration runs in id
/// order (BTreeMap) so system results are deterministic; insertion order
/// carries no meaning.
///
/// Queries return materialized snapshots. A snapshot borrows the world, so
/// the world cannot change while one is alive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    entities: BTreeMap<EntityId, Entity>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world holding `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut world = Self::new();
        world.add_all(entities);
        world
    }

    /// Number of entities in the world.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Ids of every entity, in id order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Store an entity. An entry with the same id is replaced.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        if self.entities.insert(id, entity).is_some() {
            tracing::debug!(%id, "entity replaced");
        } else {
            tracing::debug!(%id, "entity added");
        }
        id
    }

    /// Store every entity in `entities`.
    pub fn add_all(&mut self, entities: impl IntoIterator<Item = Entity>) {
        for entity in entities {
            self.add(entity);
        }
    }

    /// Remove the entities with the given ids and hand them back.
    ///
    /// Fails on the first id that is absent, including an id listed twice.
    /// Nothing is removed when the call fails.
    pub fn remove(&mut self, ids: &[EntityId]) -> Result<Vec<Entity>, NotFoundError> {
        let mut seen = BTreeSet::new();
        for id in ids {
            if !self.entities.contains_key(id) || !seen.insert(*id) {
                return Err(NotFoundError(*id));
            }
        }
        let removed = ids
            .iter()
            .filter_map(|id| self.entities.remove(id))
            .collect();
        tracing::debug!(count = ids.len(), "entities removed");
        Ok(removed)
    }

    /// Remove a single entity.
    pub fn remove_one(&mut self, id: EntityId) -> Result<Entity, NotFoundError> {
        let entity = self.entities.remove(&id).ok_or(NotFoundError(id))?;
        tracing::debug!(%id, "entity removed");
        Ok(entity)
    }

    /// The entities with the given ids, in the given order.
    pub fn get(&self, ids: &[EntityId]) -> Result<Vec<&Entity>, NotFoundError> {
        ids.iter().map(|id| self.get_one(*id)).collect()
    }

    pub fn get_one(&self, id: EntityId) -> Result<&Entity, NotFoundError> {
        self.entities.get(&id).ok_or(NotFoundError(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity, NotFoundError> {
        self.entities.get_mut(&id).ok_or(NotFoundError(id))
    }

    /// Every entity satisfying `predicate`, evaluated against the current state.
    pub fn query(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<&Entity> {
        self.entities.values().filter(|e| predicate(&**e)).collect()
    }

    /// Every entity in the world.
    pub fn query_all(&self) -> Vec<&Entity> {
        self.entities.values().collect()
    }

    /// Mutable access to every entity satisfying `predicate`.
    pub fn query_mut(&mut self, predicate: impl Fn(&Entity) -> bool) -> Vec<&mut Entity> {
        self.entities.values_mut().filter(|e| predicate(&**e)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }
}
