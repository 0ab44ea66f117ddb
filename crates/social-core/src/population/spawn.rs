//! Agent Spawning
//!
//! Functions to spawn users, tweets and contributors, register their
//! identifiers and place them on the grid.

use bevy_ecs::prelude::*;
use rand::Rng;
use social_events::{AgentId, AgentKind, Group};
use std::fmt;

use super::{IdentityRegistry, Population, RegistryError};
use crate::components::{
    Activity, Author, Contributors, Identity, Kind, Membership, Polarity, SpatialGrid,
    TweetContent, UserBundle,
};
use crate::config::{ModelConfig, Variant};

/// A tweet about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewTweet {
    pub content: String,
    pub author: Option<AgentId>,
    pub polarity: Option<Group>,
    pub contributors: Option<Vec<AgentId>>,
}

impl NewTweet {
    /// Tweet with content only (base variant).
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: None,
            polarity: None,
            contributors: None,
        }
    }

    pub fn by(mut self, author: AgentId) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_polarity(mut self, polarity: Group) -> Self {
        self.polarity = Some(polarity);
        self
    }

    pub fn with_contributors(mut self, contributors: Vec<AgentId>) -> Self {
        self.contributors = Some(contributors);
        self
    }
}

/// Uniformly sample a group label.
pub fn random_group<R: Rng + ?Sized>(rng: &mut R) -> Group {
    Group::ALL[rng.gen_range(0..Group::ALL.len())]
}

/// Allocate an identifier, spawn the entity and add it to the population.
fn spawn_agent(
    world: &mut World,
    kind: AgentKind,
    step: u64,
) -> Result<(AgentId, Entity), RegistryError> {
    let id = world.resource_mut::<IdentityRegistry>().allocate();
    let entity = world
        .spawn((Identity(id), Kind(kind), Activity::created_at(step)))
        .id();
    world.resource_mut::<IdentityRegistry>().register(id, entity)?;
    world.resource_mut::<Population>().push(entity, id, kind);
    Ok((id, entity))
}

/// Place an entity on the grid, if the world has one.
fn place<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) {
    let cell = world
        .get_resource::<SpatialGrid>()
        .map(|grid| grid.random_cell(rng));
    if let Some(position) = cell {
        world.entity_mut(entity).insert(position);
    }
}

/// Spawn the `index`-th of `config.num_users` users.
pub fn spawn_user<R: Rng + ?Sized>(
    world: &mut World,
    index: usize,
    config: &ModelConfig,
    rng: &mut R,
) -> Result<AgentId, RegistryError> {
    let (id, entity) = spawn_agent(world, AgentKind::User, 0)?;
    world
        .entity_mut(entity)
        .insert(UserBundle::new(config.tweet_probability));

    if config.variant == Variant::Extended {
        let group = Group::for_user_index(index, config.num_users);
        world.entity_mut(entity).insert(Membership(group));
    }

    place(world, entity, rng);
    Ok(id)
}

/// Spawn a tweet agent created at scheduler step `step`.
pub fn spawn_tweet<R: Rng + ?Sized>(
    world: &mut World,
    tweet: NewTweet,
    step: u64,
    rng: &mut R,
) -> Result<AgentId, RegistryError> {
    let (id, entity) = spawn_agent(world, AgentKind::Tweet, step)?;
    let mut entity_mut = world.entity_mut(entity);
    entity_mut.insert(TweetContent(tweet.content));
    if let Some(author) = tweet.author {
        entity_mut.insert(Author(author));
    }
    if let Some(polarity) = tweet.polarity {
        entity_mut.insert(Polarity(polarity));
    }
    if let Some(contributors) = tweet.contributors {
        entity_mut.insert(Contributors(contributors));
    }

    place(world, entity, rng);
    Ok(id)
}

/// Spawn an identity-only contributor.
pub fn spawn_contributor(world: &mut World, step: u64) -> Result<AgentId, RegistryError> {
    spawn_agent(world, AgentKind::Contributor, step).map(|(id, _)| id)
}

/// Identifiers of every agent of `kind`, in creation order.
pub fn ids_of_kind(world: &World, kind: AgentKind) -> Vec<AgentId> {
    let Some(population) = world.get_resource::<Population>() else {
        return Vec::new();
    };
    population
        .entities()
        .iter()
        .filter(|&&entity| world.get::<Kind>(entity).map(|k| k.0) == Some(kind))
        .filter_map(|&entity| world.get::<Identity>(entity).map(|i| i.0))
        .collect()
}

/// Identifiers of every contributor, in creation order.
pub fn contributor_ids(world: &World) -> Vec<AgentId> {
    world
        .get_resource::<Population>()
        .map(|population| population.contributor_ids().to_vec())
        .unwrap_or_default()
}

/// Spawn the initial population: users, seeded tweets, then contributors.
///
/// Creation order fixes identifiers: users take `0..n`, seeded tweets
/// `n..2n` and contributors follow.
pub fn spawn_population<R: Rng + ?Sized>(
    world: &mut World,
    config: &ModelConfig,
    rng: &mut R,
) -> Result<SpawnSummary, RegistryError> {
    world.init_resource::<IdentityRegistry>();
    world.init_resource::<Population>();

    for i in 0..config.num_users {
        spawn_user(world, i, config, rng)?;
    }

    let mut seeded_tweets = 0;
    if config.seed_tweets {
        for i in 0..config.num_users {
            let mut tweet = NewTweet::plain(format!("Tweet #{}", i));
            if config.variant == Variant::Extended {
                tweet = tweet
                    .with_polarity(random_group(rng))
                    .with_contributors(Vec::new());
            }
            spawn_tweet(world, tweet, 0, rng)?;
            seeded_tweets += 1;
        }
    }

    let contributors = config.effective_contributors();
    if contributors == 0 && config.num_contributors > 0 {
        tracing::warn!(
            num_contributors = config.num_contributors,
            "Contributors are only used by the extended variant; ignoring"
        );
    }
    for _ in 0..contributors {
        spawn_contributor(world, 0)?;
    }

    let summary = SpawnSummary {
        users: config.num_users,
        tweets: seeded_tweets,
        contributors,
    };
    tracing::info!(
        users = summary.users,
        tweets = summary.tweets,
        contributors = summary.contributors,
        "Spawned initial population"
    );
    Ok(summary)
}

/// Summary of the initial population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSummary {
    pub users: usize,
    pub tweets: usize,
    pub contributors: usize,
}

impl SpawnSummary {
    pub fn total(&self) -> usize {
        self.users + self.tweets + self.contributors
    }
}

impl fmt::Display for SpawnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents ({} users, {} tweets, {} contributors)",
            self.total(),
            self.users,
            self.tweets,
            self.contributors
        )
    }
}
