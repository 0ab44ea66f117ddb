//! Agent Behavior
//!
//! Per-kind step logic. Dispatch reads the [`Kind`] component, which is
//! fixed at spawn; users may author tweets, tweets and contributors are
//! inert.

use bevy_ecs::prelude::*;
use rand::Rng;
use social_events::{AgentId, AgentKind};
use thiserror::Error;

use crate::components::{Activity, Identity, Kind, Membership, TweetProbability, Tweets};
use crate::config::Variant;
use crate::population::{contributor_ids, random_group, spawn_tweet, NewTweet, RegistryError};

/// Resource: model-wide behavior switches
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorSettings {
    pub variant: Variant,
}

/// Failure inside a single agent's step. Aborts the enclosing tick.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("entity {0:?} is not an agent")]
    UnknownEntity(Entity),
    #[error("agent {id} is missing its {component} component")]
    MissingComponent {
        id: AgentId,
        component: &'static str,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Activate one agent.
///
/// `step` is the scheduler's step counter for the tick in progress; agents
/// created here record it as their creation step.
pub fn step_agent<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    rng: &mut R,
    step: u64,
) -> Result<(), StepError> {
    let kind = world
        .get::<Kind>(entity)
        .map(|k| k.0)
        .ok_or(StepError::UnknownEntity(entity))?;

    match kind {
        AgentKind::User => step_user(world, entity, rng, step)?,
        AgentKind::Tweet => step_tweet(world, entity),
        AgentKind::Contributor => {}
    }

    if let Some(mut activity) = world.get_mut::<Activity>(entity) {
        activity.activations += 1;
    }
    Ok(())
}

/// One uniform draw; below the user's probability, author exactly one tweet.
fn step_user<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    rng: &mut R,
    step: u64,
) -> Result<(), StepError> {
    let id = world
        .get::<Identity>(entity)
        .map(|i| i.0)
        .ok_or(StepError::UnknownEntity(entity))?;
    let probability = world
        .get::<TweetProbability>(entity)
        .map(|p| p.0)
        .ok_or(StepError::MissingComponent {
            id,
            component: "TweetProbability",
        })?;
    if world.get::<Tweets>(entity).is_none() {
        return Err(StepError::MissingComponent {
            id,
            component: "Tweets",
        });
    }

    let roll: f64 = rng.gen();
    if roll >= probability {
        return Ok(());
    }

    // Without settings, follow how the user was spawned
    let variant = match world.get_resource::<BehaviorSettings>() {
        Some(settings) => settings.variant,
        None if world.get::<Membership>(entity).is_some() => Variant::Extended,
        None => Variant::Base,
    };
    let tweet = match variant {
        Variant::Base => NewTweet::plain(format!("Tweet from User {}!", id)).by(id),
        Variant::Extended => {
            let group = world
                .get::<Membership>(entity)
                .map(|m| m.0)
                .ok_or(StepError::MissingComponent {
                    id,
                    component: "Membership",
                })?;
            NewTweet::plain(format!("Tweet from User {} in Group {}!", id, group))
                .by(id)
                .with_polarity(random_group(rng))
                .with_contributors(contributor_ids(world))
        }
    };

    let tweet_id = spawn_tweet(world, tweet, step, rng)?;
    if let Some(mut tweets) = world.get_mut::<Tweets>(entity) {
        tweets.push(tweet_id);
    }
    tracing::trace!(user = %id, tweet = %tweet_id, "User tweeted");
    Ok(())
}

/// Tweets are inert. Lifespan or decay would hook in here.
fn step_tweet(_world: &mut World, _entity: Entity) {}
