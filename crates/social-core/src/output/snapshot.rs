//! Snapshot Generation
//!
//! Builds serializable views of the follower graph and of every agent.

use bevy_ecs::prelude::*;
use social_events::{AgentSnapshot, FollowEdge, FollowerGraphSnapshot, ModelSnapshot};

use crate::components::{
    Activity, Author, Contributors, Followers, Identity, Kind, Membership, Polarity, Position,
    TweetContent, TweetProbability, Tweets,
};
use crate::population::Population;

/// Edge-list view of the follower graph.
///
/// Nodes are every agent in creation order; edges run follower → followee.
pub fn follower_graph(world: &World) -> FollowerGraphSnapshot {
    let Some(population) = world.get_resource::<Population>() else {
        return FollowerGraphSnapshot::default();
    };

    let mut graph = FollowerGraphSnapshot::default();
    for &entity in population.entities() {
        let Some(identity) = world.get::<Identity>(entity) else {
            continue;
        };
        graph.nodes.push(identity.0);
        if let Some(followers) = world.get::<Followers>(entity) {
            graph.edges.extend(
                followers
                    .iter()
                    .map(|follower| FollowEdge::new(follower, identity.0)),
            );
        }
    }
    graph
}

/// Snapshot of one agent entity.
pub fn agent_snapshot(world: &World, entity: Entity) -> Option<AgentSnapshot> {
    let identity = world.get::<Identity>(entity)?;
    let kind = world.get::<Kind>(entity)?;
    let mut snapshot = AgentSnapshot::new(identity.0, kind.0);

    if let Some(activity) = world.get::<Activity>(entity) {
        snapshot.created_at_step = activity.created_at_step;
        snapshot.activations = activity.activations;
    }
    snapshot.position = world.get::<Position>(entity).map(|p| (*p).into());
    snapshot.group = world.get::<Membership>(entity).map(|m| m.0);
    snapshot.tweet_probability = world.get::<TweetProbability>(entity).map(|p| p.0);
    if let Some(followers) = world.get::<Followers>(entity) {
        snapshot.followers = followers.iter().collect();
    }
    if let Some(tweets) = world.get::<Tweets>(entity) {
        snapshot.tweets = tweets.as_slice().to_vec();
    }
    snapshot.content = world.get::<TweetContent>(entity).map(|c| c.0.clone());
    snapshot.author = world.get::<Author>(entity).map(|a| a.0);
    snapshot.polarity = world.get::<Polarity>(entity).map(|p| p.0);
    snapshot.contributors = world.get::<Contributors>(entity).map(|c| c.0.clone());
    Some(snapshot)
}

/// Complete model state at `step`.
pub fn model_snapshot(world: &World, step: u64) -> ModelSnapshot {
    let agents: Vec<AgentSnapshot> = world
        .get_resource::<Population>()
        .map(|population| {
            population
                .entities()
                .iter()
                .filter_map(|&entity| agent_snapshot(world, entity))
                .collect()
        })
        .unwrap_or_default();

    ModelSnapshot {
        step,
        population: agents.len(),
        agents,
        graph: follower_graph(world),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::population::{spawn_population, IdentityRegistry};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use social_events::{AgentId, AgentKind, Group};

    fn build_world() -> World {
        let mut world = World::new();
        let config = ModelConfig {
            num_users: 2,
            num_contributors: 1,
            ..ModelConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(8);
        spawn_population(&mut world, &config, &mut rng).unwrap();

        let followee = world.resource::<IdentityRegistry>().resolve(AgentId(0)).unwrap();
        world.get_mut::<Followers>(followee).unwrap().insert(AgentId(1));
        world
    }

    #[test]
    fn test_follower_graph_edges() {
        let world = build_world();
        let graph = follower_graph(&world);

        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges, vec![FollowEdge::new(AgentId(1), AgentId(0))]);
    }

    #[test]
    fn test_model_snapshot_fields() {
        let world = build_world();
        let snapshot = model_snapshot(&world, 0);

        assert_eq!(snapshot.population, 5);
        assert_eq!(snapshot.count_kind(AgentKind::User), 2);
        assert_eq!(snapshot.count_kind(AgentKind::Tweet), 2);
        assert_eq!(snapshot.count_kind(AgentKind::Contributor), 1);

        let user = snapshot.agent(AgentId(0)).unwrap();
        assert_eq!(user.followers, vec![AgentId(1)]);
        assert_eq!(user.group, Some(Group::GroupA));
        assert!(user.position.is_none());

        let tweet = snapshot.agent(AgentId(2)).unwrap();
        assert_eq!(tweet.content.as_deref(), Some("Tweet #0"));
        assert!(tweet.polarity.is_some());

        let contributor = snapshot.agent(AgentId(4)).unwrap();
        assert!(contributor.content.is_none());
        assert!(contributor.followers.is_empty());
    }
}
