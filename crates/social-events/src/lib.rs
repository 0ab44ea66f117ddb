//! Shared data types and serialization for the social network simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces them; reporting and visualization tools consume them.

pub mod ids;
pub mod metrics;
pub mod snapshot;

// Re-export identity types
pub use ids::{AgentId, AgentKind, Group, ParseIdError, ParseGroupError};

// Re-export metrics types
pub use metrics::{MetricsRecord, MetricsSeries, StepSummary};

// Re-export snapshot types
pub use snapshot::{
    AgentSnapshot, FollowEdge, FollowerGraphSnapshot, GridPosition, ModelSnapshot,
};
