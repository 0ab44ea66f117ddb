//! Snapshot Types
//!
//! Serialization structs for the follower graph and full model state.
//!
//! [`FollowerGraphSnapshot`] is the edge-list view handed to graph
//! renderers: nodes are agent identifiers, edges point follower → followee.

use serde::{Deserialize, Serialize};

use crate::{AgentId, AgentKind, Group};

/// A directed follow relation: `follower` receives `followee`'s tweets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower: AgentId,
    pub followee: AgentId,
}

impl FollowEdge {
    pub fn new(follower: AgentId, followee: AgentId) -> Self {
        Self { follower, followee }
    }
}

/// Edge-list view of the follower graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerGraphSnapshot {
    pub nodes: Vec<AgentId>,
    pub edges: Vec<FollowEdge>,
}

impl FollowerGraphSnapshot {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, follower: AgentId, followee: AgentId) -> bool {
        self.edges.contains(&FollowEdge::new(follower, followee))
    }

    /// Followers of `followee`, in edge order.
    pub fn followers_of(&self, followee: AgentId) -> Vec<AgentId> {
        self.edges
            .iter()
            .filter(|e| e.followee == followee)
            .map(|e| e.follower)
            .collect()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Cell coordinates on the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

/// State of a single agent.
///
/// Fields that do not apply to the agent's kind are left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: AgentId,
    pub kind: AgentKind,
    pub created_at_step: u64,
    pub activations: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GridPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<AgentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweets: Vec<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<AgentId>>,
}

impl AgentSnapshot {
    /// An empty snapshot for the given identity.
    pub fn new(agent_id: AgentId, kind: AgentKind) -> Self {
        Self {
            agent_id,
            kind,
            created_at_step: 0,
            activations: 0,
            position: None,
            group: None,
            tweet_probability: None,
            followers: Vec::new(),
            tweets: Vec::new(),
            content: None,
            author: None,
            polarity: None,
            contributors: None,
        }
    }
}

/// Complete model state at one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub step: u64,
    pub population: usize,
    pub agents: Vec<AgentSnapshot>,
    pub graph: FollowerGraphSnapshot,
}

impl ModelSnapshot {
    /// Look up an agent by identifier.
    pub fn agent(&self, agent_id: AgentId) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Count agents of one kind.
    pub fn count_kind(&self, kind: AgentKind) -> usize {
        self.agents.iter().filter(|a| a.kind == kind).count()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
