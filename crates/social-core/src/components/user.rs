//! User Components
//!
//! Follower sets, authored tweets and tweeting behavior.

use bevy_ecs::prelude::*;
use social_events::{AgentId, Group};
use std::collections::BTreeSet;

/// Agents following this user.
///
/// Stores identifiers, not entity handles, so cycles in the follower graph
/// carry no ownership. Inserting an existing follower is a no-op.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Followers(BTreeSet<AgentId>);

impl Followers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `follower` was already present.
    pub fn insert(&mut self, follower: AgentId) -> bool {
        self.0.insert(follower)
    }

    pub fn contains(&self, follower: AgentId) -> bool {
        self.0.contains(&follower)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.0.iter().copied()
    }
}

/// Tweets authored by this user, in creation order. Append-only.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Tweets(Vec<AgentId>);

impl Tweets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tweet: AgentId) {
        self.0.push(tweet);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[AgentId] {
        &self.0
    }
}

/// Per-step probability of authoring a tweet, in [0, 1]
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TweetProbability(pub f64);

/// Group the user belongs to (extended variant)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership(pub Group);

/// Components every user starts with
#[derive(Bundle)]
pub struct UserBundle {
    pub followers: Followers,
    pub tweets: Tweets,
    pub tweet_probability: TweetProbability,
}

impl UserBundle {
    pub fn new(tweet_probability: f64) -> Self {
        Self {
            followers: Followers::new(),
            tweets: Tweets::new(),
            tweet_probability: TweetProbability(tweet_probability),
        }
    }
}
