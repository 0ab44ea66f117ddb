//! Metrics Collection
//!
//! Samples follower and tweet counts of every user after a step and
//! appends them to the run's time series.

use bevy_ecs::prelude::*;
use social_events::{AgentId, MetricsRecord, MetricsSeries, StepSummary};

use crate::components::{Followers, Identity, Tweets};
use crate::population::Population;

/// Accumulates the per-step time series
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    series: MetricsSeries,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every user's counts at `step`, in population order.
    ///
    /// Agents without both a follower set and a tweet list are skipped.
    /// Returns the number of user records appended.
    pub fn collect(&mut self, world: &World, step: u64) -> usize {
        let Some(population) = world.get_resource::<Population>() else {
            return 0;
        };

        let before = self.series.records.len();
        for &entity in population.entities() {
            let (Some(identity), Some(followers), Some(tweets)) = (
                world.get::<Identity>(entity),
                world.get::<Followers>(entity),
                world.get::<Tweets>(entity),
            ) else {
                continue;
            };
            self.series.records.push(MetricsRecord {
                step,
                agent_id: identity.0,
                followers_count: followers.len(),
                tweets_count: tweets.len(),
            });
        }

        self.series.summaries.push(StepSummary {
            step,
            population: population.len(),
            users: population.users(),
            tweets: population.tweets(),
            contributors: population.contributors(),
        });
        self.series.records.len() - before
    }

    pub fn series(&self) -> &MetricsSeries {
        &self.series
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.series.records
    }

    pub fn summaries(&self) -> &[StepSummary] {
        &self.series.summaries
    }

    pub fn for_agent(&self, agent_id: AgentId) -> Vec<MetricsRecord> {
        self.series.for_agent(agent_id).copied().collect()
    }

    pub fn at_step(&self, step: u64) -> Vec<MetricsRecord> {
        self.series.at_step(step).copied().collect()
    }

    pub fn into_series(self) -> MetricsSeries {
        self.series
    }
}
