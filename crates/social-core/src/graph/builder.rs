//! Follower Graph Builder
//!
//! Binds adjacency-matrix nodes to agents and installs follow
//! relations. A nonzero cell `(i, j)` records the agent bound to `j` as a
//! follower of the agent bound to `i`.
//!
//! The followee must be a user; the follower may be any live agent.
//! Endpoints that cannot be resolved are reported and the edge is skipped;
//! a bad reference never aborts loading.

use bevy_ecs::prelude::*;
use social_events::{AgentId, AgentKind};
use std::fmt;

use super::AdjacencyMatrix;
use crate::components::{Followers, Kind};
use crate::population::IdentityRegistry;

/// Why an endpoint could not be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No agent carries the identifier
    NoSuchAgent,
    /// The agent exists but cannot be followed
    NotAUser(AgentKind),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoSuchAgent => write!(f, "no agent found"),
            UnresolvedReason::NotAUser(kind) => write!(f, "agent is a {}, not a user", kind),
        }
    }
}

/// An edge endpoint that could not be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedEndpoint {
    pub node: usize,
    pub agent_id: AgentId,
    pub reason: UnresolvedReason,
}

/// Outcome of installing a matrix's edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowLoadReport {
    /// Edges newly added to a follower set
    pub installed: usize,
    /// Edges whose follower was already present
    pub duplicates: usize,
    /// Edges dropped because an endpoint did not resolve
    pub skipped: usize,
    pub unresolved: Vec<UnresolvedEndpoint>,
}

impl FollowLoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }
}

/// Identity binding: node `i` is the agent with identifier `i`.
pub fn user_binding(index: usize) -> AgentId {
    AgentId::from_index(index)
}

/// Resolve a node to any live agent.
fn resolve_agent<F>(world: &World, node: usize, binding: &F) -> Result<Entity, UnresolvedEndpoint>
where
    F: Fn(usize) -> AgentId,
{
    let agent_id = binding(node);
    world
        .get_resource::<IdentityRegistry>()
        .and_then(|registry| registry.resolve(agent_id))
        .ok_or(UnresolvedEndpoint {
            node,
            agent_id,
            reason: UnresolvedReason::NoSuchAgent,
        })
}

/// Resolve a node to an agent that owns a follower set.
fn resolve_followee<F>(
    world: &World,
    node: usize,
    binding: &F,
) -> Result<Entity, UnresolvedEndpoint>
where
    F: Fn(usize) -> AgentId,
{
    let entity = resolve_agent(world, node, binding)?;
    if world.get::<Followers>(entity).is_none() {
        let kind = world
            .get::<Kind>(entity)
            .map_or(AgentKind::User, |k| k.0);
        return Err(UnresolvedEndpoint {
            node,
            agent_id: binding(node),
            reason: UnresolvedReason::NotAUser(kind),
        });
    }
    Ok(entity)
}

/// Install every edge of `matrix` as a follow relation.
///
/// The followee (row) must be a user; the follower (column) may be any live
/// agent.
pub fn install_follower_edges<F>(
    world: &mut World,
    matrix: &AdjacencyMatrix,
    binding: F,
) -> FollowLoadReport
where
    F: Fn(usize) -> AgentId,
{
    let mut report = FollowLoadReport::default();

    for (i, j) in matrix.edges() {
        let followee = resolve_followee(world, i, &binding);
        let follower = resolve_agent(world, j, &binding);

        match (followee, follower) {
            (Ok(followee), Ok(_)) => {
                let follower_id = binding(j);
                let inserted = world
                    .get_mut::<Followers>(followee)
                    .map(|mut followers| followers.insert(follower_id))
                    .unwrap_or(false);
                if inserted {
                    report.installed += 1;
                } else {
                    report.duplicates += 1;
                }
            }
            (followee, follower) => {
                for endpoint in [followee.err(), follower.err()].into_iter().flatten() {
                    tracing::warn!(
                        agent_id = %endpoint.agent_id,
                        node = endpoint.node,
                        "Cannot bind unique_id {} ({}); skipping edge",
                        endpoint.agent_id,
                        endpoint.reason
                    );
                    report.unresolved.push(endpoint);
                }
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        installed = report.installed,
        duplicates = report.duplicates,
        skipped = report.skipped,
        "Installed follower edges"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, Variant};
    use crate::population::spawn_population;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn build_world(num_users: usize, seed_tweets: bool) -> World {
        let mut world = World::new();
        let config = ModelConfig {
            num_users,
            num_contributors: 0,
            variant: Variant::Base,
            seed_tweets,
            ..ModelConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(21);
        spawn_population(&mut world, &config, &mut rng).unwrap();
        world
    }

    fn followers_of(world: &World, id: u64) -> Vec<AgentId> {
        let entity = world.resource::<IdentityRegistry>().resolve(AgentId(id)).unwrap();
        world.get::<Followers>(entity).unwrap().iter().collect()
    }

    #[test]
    fn test_edge_direction() {
        let mut world = build_world(2, false);
        let matrix = AdjacencyMatrix::parse("0 1\n0 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(report.installed, 1);
        assert!(report.is_clean());
        assert_eq!(followers_of(&world, 0), vec![AgentId(1)]);
        assert!(followers_of(&world, 1).is_empty());
    }

    #[test]
    fn test_cycles_and_self_follow_are_allowed() {
        let mut world = build_world(2, false);
        let matrix = AdjacencyMatrix::parse("1 1\n1 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(report.installed, 3);
        assert_eq!(followers_of(&world, 0), vec![AgentId(0), AgentId(1)]);
        assert_eq!(followers_of(&world, 1), vec![AgentId(0)]);
    }

    #[test]
    fn test_reinstall_is_idempotent() {
        let mut world = build_world(3, false);
        let matrix = AdjacencyMatrix::parse("0 1 1\n1 0 0\n0 1 0").unwrap();

        let first = install_follower_edges(&mut world, &matrix, user_binding);
        let second = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(first.installed, 4);
        assert_eq!(second.installed, 0);
        assert_eq!(second.duplicates, 4);
        assert_eq!(followers_of(&world, 0), vec![AgentId(1), AgentId(2)]);
    }

    #[test]
    fn test_missing_agent_is_skipped() {
        let mut world = build_world(2, false);
        let matrix = AdjacencyMatrix::parse("0 1 1\n1 0 0\n0 0 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(report.installed, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedEndpoint {
                node: 2,
                agent_id: AgentId(2),
                reason: UnresolvedReason::NoSuchAgent,
            }]
        );
    }

    #[test]
    fn test_non_user_follower_is_installed() {
        // Users 0 and 1, seeded tweets 2 and 3
        let mut world = build_world(2, true);
        let matrix = AdjacencyMatrix::parse("0 0 1\n0 0 0\n0 0 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(report.installed, 1);
        assert!(report.is_clean());
        assert_eq!(followers_of(&world, 0), vec![AgentId(2)]);
    }

    #[test]
    fn test_non_user_followee_is_skipped() {
        let mut world = build_world(2, true);
        let matrix = AdjacencyMatrix::parse("0 0 0\n0 0 0\n1 0 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, user_binding);

        assert_eq!(report.installed, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedEndpoint {
                node: 2,
                agent_id: AgentId(2),
                reason: UnresolvedReason::NotAUser(AgentKind::Tweet),
            }]
        );
        assert!(followers_of(&world, 0).is_empty());
    }

    #[test]
    fn test_custom_binding() {
        let mut world = build_world(4, false);
        let matrix = AdjacencyMatrix::parse("0 1\n0 0").unwrap();

        let report = install_follower_edges(&mut world, &matrix, |i| AgentId(i as u64 + 2));

        assert_eq!(report.installed, 1);
        assert_eq!(followers_of(&world, 2), vec![AgentId(3)]);
    }
}
