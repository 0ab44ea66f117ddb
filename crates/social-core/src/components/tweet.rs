//! Tweet Components

use bevy_ecs::prelude::*;
use social_events::{AgentId, Group};

/// Immutable tweet label
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TweetContent(pub String);

/// User who authored the tweet; seeded tweets have none
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Author(pub AgentId);

/// Group the tweet leans towards (extended variant)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity(pub Group);

/// Contributors attributed at creation time.
///
/// A copy of the contributor list taken when the tweet was created; later
/// changes to the population never touch it.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Contributors(pub Vec<AgentId>);
