use super::models::entity::{Entity, EntityKind};
use super::models::ids::EntityId;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// The key-addressed store of every entity in a simulation.
///
/// Entities live in a slot map; a string index maps each registry key to its slot.
/// Iteration follows slot order, so two registries built by the same sequence of
/// operations always yield their entities in the same order.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// Primary storage for entities.
    entities: SlotMap<EntityId, Entity>,
    /// Registry key of each stored entity, indexed by slot.
    keys: SecondaryMap<EntityId, String>,
    /// Lookup map from registry key to slot.
    key_map: HashMap<String, EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entity` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::KeyMismatch`] if `entity` carries a different key, and
    /// [`RegistryError::DuplicateKey`] if `key` is already registered. Use
    /// [`EntityRegistry::upsert`] when replacement is intended.
    pub fn register(&mut self, key: &str, entity: Entity) -> Result<EntityId, RegistryError> {
        check_key(key, &entity)?;
        if self.key_map.contains_key(key) {
            return Err(RegistryError::DuplicateKey {
                key: key.to_string(),
            });
        }
        Ok(self.insert_new(key, entity))
    }

    /// Inserts or replaces the entity stored under `key`.
    ///
    /// A replaced entity keeps its slot, so iteration order is unchanged. Returns the
    /// previous entity, if any. Fails with [`RegistryError::KeyMismatch`] like
    /// [`EntityRegistry::register`].
    pub fn upsert(&mut self, key: &str, entity: Entity) -> Result<Option<Entity>, RegistryError> {
        check_key(key, &entity)?;
        Ok(match self.key_map.get(key) {
            Some(&id) => self
                .entities
                .get_mut(id)
                .map(|slot| std::mem::replace(slot, entity)),
            None => {
                self.insert_new(key, entity);
                None
            }
        })
    }

    fn insert_new(&mut self, key: &str, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.keys.insert(id, key.to_string());
        self.key_map.insert(key.to_string(), id);
        id
    }

    pub fn get(&self, key: &str) -> Result<&Entity, RegistryError> {
        self.key_map
            .get(key)
            .and_then(|&id| self.entities.get(id))
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_string(),
            })
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Entity, RegistryError> {
        match self.key_map.get(key) {
            Some(&id) => self.entities.get_mut(id).ok_or_else(|| RegistryError::NotFound {
                key: key.to_string(),
            }),
            None => Err(RegistryError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Removes and returns the entity stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if nothing is registered under `key`.
    pub fn remove(&mut self, key: &str) -> Result<Entity, RegistryError> {
        let id = self
            .key_map
            .remove(key)
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_string(),
            })?;
        self.keys.remove(id);
        self.entities.remove(id).ok_or_else(|| RegistryError::NotFound {
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns an iterator over `(key, entity)` pairs in slot order.
    ///
    /// The iterator borrows the registry and can be recreated at any time; the order
    /// only changes when entities are inserted or removed.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entities
            .iter()
            .filter_map(|(id, entity)| self.keys.get(id).map(|key| (key.as_str(), entity)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items().map(|(key, _)| key)
    }

    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |e| e.kind() == kind)
    }

    pub fn count_by_kind(&self) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for entity in self.entities.values() {
            *counts.entry(entity.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Clones the registry contents into an owned, ordered list of `(key, entity)` pairs.
    pub fn snapshot(&self) -> Vec<(String, Entity)> {
        self.items()
            .map(|(key, entity)| (key.to_string(), entity.clone()))
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("An entity is already registered under key '{key}'")]
    DuplicateKey { key: String },
    #[error("No entity is registered under key '{key}'")]
    NotFound { key: String },
    #[error("Entity '{entity_key}' cannot be stored under registry key '{key}'")]
    KeyMismatch { key: String, entity_key: String },
}

fn check_key(key: &str, entity: &Entity) -> Result<(), RegistryError> {
    if entity.key() != key {
        return Err(RegistryError::KeyMismatch {
            key: key.to_string(),
            entity_key: entity.key().to_string(),
        });
    }
    Ok(())
}
