//! Agent Components
//!
//! Components shared by every agent regardless of kind.

use bevy_ecs::prelude::*;
use social_events::{AgentId, AgentKind};

/// Unique identifier for an agent, fixed at spawn
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(pub AgentId);

/// Behavior kind, fixed at spawn and used for dispatch
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kind(pub AgentKind);

/// Lifecycle bookkeeping
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    /// Scheduler step counter at the moment of creation
    pub created_at_step: u64,
    /// Number of times the scheduler has activated this agent
    pub activations: u64,
}

impl Activity {
    pub fn created_at(step: u64) -> Self {
        Self {
            created_at_step: step,
            activations: 0,
        }
    }
}
