//! Metrics Types
//!
//! Per-step time series of user follower and tweet counts.
//!
//! The series is append-only: the engine pushes one [`MetricsRecord`] per
//! user and one [`StepSummary`] per collected step. Aggregation (means,
//! variances) is left to downstream reporting.

use serde::{Deserialize, Serialize};

use crate::AgentId;

/// Follower and tweet counts of one user at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub step: u64,
    pub agent_id: AgentId,
    pub followers_count: usize,
    pub tweets_count: usize,
}

/// Population totals at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    pub step: u64,
    pub population: usize,
    pub users: usize,
    pub tweets: usize,
    pub contributors: usize,
}

/// Collected time series, keyed by agent and step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSeries {
    #[serde(default)]
    pub records: Vec<MetricsRecord>,
    #[serde(default)]
    pub summaries: Vec<StepSummary>,
}

impl MetricsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records for one agent, in step order.
    pub fn for_agent(&self, agent_id: AgentId) -> impl Iterator<Item = &MetricsRecord> + '_ {
        self.records.iter().filter(move |r| r.agent_id == agent_id)
    }

    /// All records collected at one step, in population order.
    pub fn at_step(&self, step: u64) -> impl Iterator<Item = &MetricsRecord> + '_ {
        self.records.iter().filter(move |r| r.step == step)
    }

    /// The record for one agent at one step, if collected.
    pub fn get(&self, agent_id: AgentId, step: u64) -> Option<&MetricsRecord> {
        self.records
            .iter()
            .find(|r| r.agent_id == agent_id && r.step == step)
    }

    /// Summary for one step, if collected.
    pub fn summary(&self, step: u64) -> Option<&StepSummary> {
        self.summaries.iter().find(|s| s.step == step)
    }

    /// Most recent collected step.
    pub fn last_step(&self) -> Option<u64> {
        self.summaries.last().map(|s| s.step)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.summaries.is_empty()
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
