//! Identity Types
//!
//! Agent identifiers, agent kinds and the group enumeration.
//!
//! # Example
//!
//! ```
//! use social_events::{AgentId, Group};
//!
//! let id: AgentId = "17".parse().unwrap();
//! assert_eq!(id, AgentId(17));
//! assert_eq!(id.to_string(), "17");
//! assert_eq!(Group::GroupA.to_string(), "Group_A");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an agent.
///
/// Allocated sequentially in creation order and never reused within a run.
/// Displays and parses as a plain decimal string, so user `i` of the
/// adjacency matrix is the agent with identifier `"i"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl AgentId {
    /// Identifier bound to a node index of the adjacency matrix.
    pub fn from_index(index: usize) -> Self {
        AgentId(index as u64)
    }

    /// Returns the raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an AgentId from a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseIdError(pub String);

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid agent id: '{}'", self.0)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for AgentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(AgentId)
            .map_err(|_| ParseIdError(s.to_string()))
    }
}

/// Kind of agent, fixed when the agent is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    User,
    Tweet,
    Contributor,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::User => write!(f, "user"),
            AgentKind::Tweet => write!(f, "tweet"),
            AgentKind::Contributor => write!(f, "contributor"),
        }
    }
}

/// Coarse group label, used for user membership and tweet polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "Group_A")]
    GroupA,
    #[serde(rename = "Group_B")]
    GroupB,
}

impl Group {
    /// Every group, in declaration order.
    pub const ALL: [Group; 2] = [Group::GroupA, Group::GroupB];

    /// Group membership for the `index`-th of `total` users.
    ///
    /// The first half (rounded down) is `Group_A`, the rest `Group_B`.
    pub fn for_user_index(index: usize, total: usize) -> Self {
        if index < total / 2 {
            Group::GroupA
        } else {
            Group::GroupB
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::GroupA => write!(f, "Group_A"),
            Group::GroupB => write!(f, "Group_B"),
        }
    }
}

/// Error type for parsing a Group from a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseGroupError(pub String);

impl fmt::Display for ParseGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid group: '{}', expected 'Group_A' or 'Group_B'", self.0)
    }
}

impl std::error::Error for ParseGroupError {}

impl FromStr for Group {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Group_A" => Ok(Group::GroupA),
            "Group_B" => Ok(Group::GroupB),
            _ => Err(ParseGroupError(s.to_string())),
        }
    }
}
