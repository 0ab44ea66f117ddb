//! Identity Registry
//!
//! Allocates agent identifiers and resolves them back to entities.

use bevy_ecs::prelude::*;
use social_events::AgentId;
use std::collections::HashMap;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("agent id {0} is already registered")]
    DuplicateId(AgentId),
}

/// Resource: identifier allocation and lookup.
///
/// Identifiers are handed out sequentially from 0 in creation order and are
/// never reused within a run.
#[derive(Resource, Debug, Clone, Default)]
pub struct IdentityRegistry {
    next_id: u64,
    by_id: HashMap<AgentId, Entity>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next identifier.
    pub fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Bind `id` to `entity`.
    pub fn register(&mut self, id: AgentId, entity: Entity) -> Result<(), RegistryError> {
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        self.by_id.insert(id, entity);
        // Keep allocation ahead of externally chosen ids
        self.next_id = self.next_id.max(id.0 + 1);
        Ok(())
    }

    pub fn resolve(&self, id: AgentId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
