//! Scenes
//!
//! A [`Scene`] owns uniquely-named entities. The [`SceneManager`] holds the
//! single active scene; [`SceneDescription`] is the on-disk form used to
//! build one.

mod scene_manager;
mod description;

pub use scene_manager::{SceneManager, DEFAULT_SCENE_NAME};
pub use description::{SceneDescription, EntityDescription};

use crate::ecs::{ComponentStore, Entity, ManagerSet};
use crate::foundation::collections::{EntityId, EntityMap, SceneId};
use std::collections::{BTreeMap, HashMap};

/// Collection of uniquely-named entities
///
/// Adding an entity under a name that is already taken stores it under
/// `<name>_<n>`, where `n` comes from a counter kept per base name.
///
/// Every scene gets a fresh [`SceneId`]; handles issued by one scene never
/// resolve in another.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    name: String,
    entities: EntityMap<Entity>,
    names: BTreeMap<String, EntityId>,
    used_names: HashMap<String, u32>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            id: SceneId::next(),
            name: String::new(),
            entities: EntityMap::default(),
            names: BTreeMap::new(),
            used_names: HashMap::new(),
        }
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Identity stamped into every handle this scene issues
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Insert `entity` under `name`, or under a disambiguated name if taken
    ///
    /// The entity is renamed to the key it was stored under.
    pub fn add_entity(&mut self, name: impl Into<String>, mut entity: Entity) -> EntityId {
        let key = self.unique_name(name.into());
        entity.set_name(key.clone());
        let id = EntityId::new(self.id, self.entities.insert(entity));
        log::debug!("Scene '{}': added entity '{}'", self.name, key);
        self.names.insert(key, id);
        id
    }

    /// Create an empty entity and add it
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        self.add_entity(name, Entity::default())
    }

    /// Exact-name lookup
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entity(self.entity_id(name)?)
    }

    /// Handle of the entity stored under exactly `name`
    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Whether `id` was issued by this scene and is still live
    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Entity by handle
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id.scene() != self.id {
            return None;
        }
        self.entities.get(id.key())
    }

    /// Mutable entity by handle
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.scene() != self.id {
            return None;
        }
        self.entities.get_mut(id.key())
    }

    /// Entity names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Entities, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.names.values().filter_map(|&id| Some((id, self.entity(id)?)))
    }

    /// Remove the entity stored under `name`, destroying its components
    ///
    /// Returns the emptied entity.
    pub fn remove_entity(
        &mut self,
        name: &str,
        store: &mut ComponentStore,
        managers: &mut ManagerSet,
    ) -> Option<Entity> {
        let id = self.entity_id(name)?;
        self.destroy_entity(id, store, managers)
    }

    /// Remove an entity by handle, destroying its components through their managers
    pub fn destroy_entity(
        &mut self,
        id: EntityId,
        store: &mut ComponentStore,
        managers: &mut ManagerSet,
    ) -> Option<Entity> {
        let components = self.entity(id)?.components().to_vec();
        for component in components {
            if let Err(err) = managers.destroy_component(store, self, id, component) {
                log::warn!("Scene '{}': {err}; releasing component directly", self.name);
                if let Some(mut slot) = store.remove(component) {
                    slot.behavior.teardown(id);
                }
                if let Some(entity) = self.entity_mut(id) {
                    entity.detach(component);
                }
            }
        }

        let entity = self.entities.remove(id.key())?;
        self.names.remove(entity.name());
        log::debug!("Scene '{}': removed entity '{}'", self.name, entity.name());
        Some(entity)
    }

    /// Destroy every entity and all of their components
    pub fn clean(&mut self, store: &mut ComponentStore, managers: &mut ManagerSet) {
        let ids: Vec<EntityId> = self.names.values().copied().collect();
        let count = ids.len();
        for id in ids {
            self.destroy_entity(id, store, managers);
        }
        if count > 0 {
            log::info!("Scene '{}': cleaned {} entities", self.name, count);
        }
    }

    fn unique_name(&mut self, base: String) -> String {
        if !self.names.contains_key(&base) {
            return base;
        }
        let counter = self.used_names.entry(base.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{base}_{counter}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
