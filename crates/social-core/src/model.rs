//! Social Media Model
//!
//! Owns the ECS world, the scheduler, the metrics collector and the seeded
//! random source, and wires construction together: matrix loading, agent
//! spawning and follower installation.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use social_events::{
    AgentId, AgentKind, FollowerGraphSnapshot, Group, MetricsSeries, ModelSnapshot,
};
use thiserror::Error;

use crate::behavior::{BehaviorSettings, StepError};
use crate::components::{
    Author, Contributors, Followers, Kind, Membership, Polarity, SpatialGrid, TweetContent,
    Tweets,
};
use crate::config::{ConfigError, ModelConfig};
use crate::graph::{
    install_follower_edges, user_binding, AdjacencyMatrix, FollowLoadReport, GraphError,
};
use crate::metrics::MetricsCollector;
use crate::output::{follower_graph, model_snapshot};
use crate::population::{
    contributor_ids, ids_of_kind, spawn_population, IdentityRegistry, Population, RegistryError,
    SpawnSummary,
};
use crate::scheduler::Scheduler;

/// Errors raised while building or running a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("step failed: {0}")]
    Step(#[from] StepError),
}

/// Read-only view of a tweet agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetView {
    pub id: AgentId,
    pub content: String,
    pub author: Option<AgentId>,
    pub polarity: Option<Group>,
    pub contributors: Option<Vec<AgentId>>,
}

/// A complete simulation run.
pub struct SocialModel {
    world: World,
    scheduler: Scheduler,
    metrics: MetricsCollector,
    rng: SmallRng,
    adjacency: AdjacencyMatrix,
    load_report: FollowLoadReport,
    spawn_summary: SpawnSummary,
}

impl SocialModel {
    /// Build a model from `config`, loading the adjacency matrix from disk.
    ///
    /// The matrix is read before any agent exists, so a missing file fails
    /// with [`GraphError::NotFound`] and nothing is created.
    pub fn new(config: &ModelConfig, seed: u64) -> Result<Self, ModelError> {
        config.validate()?;
        let matrix = AdjacencyMatrix::from_file(&config.adjacency_matrix)?;
        Self::from_matrix(config, matrix, seed)
    }

    /// Build a model around an already-parsed matrix.
    pub fn from_matrix(
        config: &ModelConfig,
        matrix: AdjacencyMatrix,
        seed: u64,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut world = World::new();
        world.insert_resource(IdentityRegistry::new());
        world.insert_resource(Population::new());
        world.insert_resource(SpatialGrid::for_users(config.num_users));
        world.insert_resource(BehaviorSettings {
            variant: config.variant,
        });

        let spawn_summary = spawn_population(&mut world, config, &mut rng)?;
        let load_report = install_follower_edges(&mut world, &matrix, user_binding);

        Ok(Self {
            world,
            scheduler: Scheduler::new(),
            metrics: MetricsCollector::new(),
            rng,
            adjacency: matrix,
            load_report,
            spawn_summary,
        })
    }

    /// Advance one step, then record metrics for it.
    pub fn step(&mut self) -> Result<u64, ModelError> {
        let step = self.scheduler.step(&mut self.world, &mut self.rng)?;
        self.metrics.collect(&self.world, step);
        Ok(step)
    }

    /// Advance `steps` steps.
    pub fn run(&mut self, steps: u64) -> Result<(), ModelError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Completed steps.
    pub fn steps(&self) -> u64 {
        self.scheduler.steps()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn population_size(&self) -> usize {
        self.scheduler.live_agents(&self.world)
    }

    pub fn population(&self) -> &Population {
        self.world.resource::<Population>()
    }

    pub fn spawn_summary(&self) -> SpawnSummary {
        self.spawn_summary
    }

    /// The parsed matrix the follower graph was built from.
    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.adjacency
    }

    pub fn load_report(&self) -> &FollowLoadReport {
        &self.load_report
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn metrics_series(&self) -> &MetricsSeries {
        self.metrics.series()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn entity(&self, id: AgentId) -> Option<Entity> {
        self.world.resource::<IdentityRegistry>().resolve(id)
    }

    /// Kind of the agent with `id`.
    pub fn kind_of(&self, id: AgentId) -> Option<AgentKind> {
        let entity = self.entity(id)?;
        self.world.get::<Kind>(entity).map(|k| k.0)
    }

    /// Identifiers of agents of one kind, in creation order.
    pub fn ids_of_kind(&self, kind: AgentKind) -> Vec<AgentId> {
        ids_of_kind(&self.world, kind)
    }

    pub fn user_ids(&self) -> Vec<AgentId> {
        self.ids_of_kind(AgentKind::User)
    }

    pub fn contributors(&self) -> Vec<AgentId> {
        contributor_ids(&self.world)
    }

    /// Followers of a user, or `None` if `id` is not a user.
    pub fn followers_of(&self, id: AgentId) -> Option<Vec<AgentId>> {
        let entity = self.entity(id)?;
        self.world
            .get::<Followers>(entity)
            .map(|f| f.iter().collect())
    }

    /// Group of a user in the extended variant.
    pub fn group_of(&self, id: AgentId) -> Option<Group> {
        let entity = self.entity(id)?;
        self.world.get::<Membership>(entity).map(|m| m.0)
    }

    /// Tweets authored by a user, in creation order.
    pub fn tweets_of(&self, id: AgentId) -> Option<Vec<AgentId>> {
        let entity = self.entity(id)?;
        self.world
            .get::<Tweets>(entity)
            .map(|t| t.as_slice().to_vec())
    }

    pub fn tweet(&self, id: AgentId) -> Option<TweetView> {
        let entity = self.entity(id)?;
        let content = self.world.get::<TweetContent>(entity)?.0.clone();
        Some(TweetView {
            id,
            content,
            author: self.world.get::<Author>(entity).map(|a| a.0),
            polarity: self.world.get::<Polarity>(entity).map(|p| p.0),
            contributors: self.world.get::<Contributors>(entity).map(|c| c.0.clone()),
        })
    }

    /// Edge-list view of the follower graph for renderers.
    pub fn follower_graph(&self) -> FollowerGraphSnapshot {
        follower_graph(&self.world)
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        model_snapshot(&self.world, self.steps())
    }

    /// Direct world access for setup and extension code.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
