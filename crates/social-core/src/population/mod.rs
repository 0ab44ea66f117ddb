//! Agent Population
//!
//! Creation-ordered agent list, identifier registry and spawning.

pub mod registry;
pub mod spawn;

pub use registry::{IdentityRegistry, RegistryError};
pub use spawn::*;

use bevy_ecs::prelude::*;
use social_events::{AgentId, AgentKind};

/// Resource: every live agent, in creation order.
///
/// Agents are never removed, so the length only grows.
#[derive(Resource, Debug, Clone, Default)]
pub struct Population {
    order: Vec<Entity>,
    users: usize,
    tweets: usize,
    contributors: Vec<AgentId>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity, id: AgentId, kind: AgentKind) {
        self.order.push(entity);
        match kind {
            AgentKind::User => self.users += 1,
            AgentKind::Tweet => self.tweets += 1,
            AgentKind::Contributor => self.contributors.push(id),
        }
    }

    /// All agents in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn users(&self) -> usize {
        self.users
    }

    pub fn tweets(&self) -> usize {
        self.tweets
    }

    pub fn contributors(&self) -> usize {
        self.contributors.len()
    }

    /// Contributor identifiers in creation order.
    pub fn contributor_ids(&self) -> &[AgentId] {
        &self.contributors
    }
}
