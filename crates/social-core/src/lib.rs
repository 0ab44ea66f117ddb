//! Social Network Simulation Engine Library
//!
//! Discrete-time agent-based simulation of a follower network. Users,
//! tweets and contributors live in a `bevy_ecs` world; a randomized
//! scheduler activates every agent once per step, users stochastically
//! author tweets, and a metrics collector samples follower and tweet
//! counts after each step.

pub mod behavior;
pub mod components;
pub mod config;
pub mod graph;
pub mod metrics;
pub mod model;
pub mod output;
pub mod population;
pub mod scheduler;

pub use social_events::{AgentId, AgentKind, Group};

pub use behavior::{step_agent, BehaviorSettings, StepError};
pub use config::{ConfigError, ModelConfig, SimConfig, Variant};
pub use graph::{
    install_follower_edges, user_binding, AdjacencyMatrix, FollowLoadReport, GraphError,
    UnresolvedEndpoint, UnresolvedReason,
};
pub use metrics::MetricsCollector;
pub use model::{ModelError, SocialModel, TweetView};
pub use population::{IdentityRegistry, Population, RegistryError};
pub use scheduler::{Scheduler, SchedulerPhase};
