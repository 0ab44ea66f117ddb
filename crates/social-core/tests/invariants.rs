//! Invariant checks over randomly generated matrices and long runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use social_core::config::{ModelConfig, Variant};
use social_core::{AdjacencyMatrix, AgentId, SocialModel};

/// Random square 0/1 matrix with roughly `density` nonzero cells.
fn random_matrix(size: usize, density: f64, rng: &mut SmallRng) -> AdjacencyMatrix {
    let rows = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| i64::from(rng.gen_bool(density)))
                .collect()
        })
        .collect();
    AdjacencyMatrix::from_rows(rows).unwrap()
}

fn config(num_users: usize, tweet_probability: f64) -> ModelConfig {
    ModelConfig {
        num_users,
        num_contributors: 3,
        tweet_probability,
        variant: Variant::Extended,
        seed_tweets: true,
        ..ModelConfig::default()
    }
}

/// Installed edges equal the nonzero cells whose followee is a user and whose
/// follower is any existing agent.
#[test]
fn test_installed_edges_match_resolvable_cells() {
    let mut rng = SmallRng::seed_from_u64(2024);

    for trial in 0..20 {
        let size = rng.gen_range(1..12);
        let num_users = rng.gen_range(1..=size + 2);
        let matrix = random_matrix(size, 0.3, &mut rng);

        let model_config = config(num_users, 0.0);
        // Users, seeded tweets, then contributors
        let agents = 2 * num_users + model_config.num_contributors;
        let expected = matrix
            .edges()
            .filter(|&(i, j)| i < num_users && j < agents)
            .count();

        let model = SocialModel::from_matrix(&model_config, matrix, trial).unwrap();
        assert_eq!(model.follower_graph().edge_count(), expected, "trial {}", trial);
        assert_eq!(model.load_report().installed, expected);
    }
}

/// Building twice from the same matrix gives the same edge set.
#[test]
fn test_loading_is_idempotent() {
    let mut rng = SmallRng::seed_from_u64(77);
    let matrix = random_matrix(15, 0.4, &mut rng);

    let first = SocialModel::from_matrix(&config(15, 0.0), matrix.clone(), 1).unwrap();
    let second = SocialModel::from_matrix(&config(15, 0.0), matrix, 2).unwrap();

    let mut a = first.follower_graph().edges;
    let mut b = second.follower_graph().edges;
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

/// Population and per-user tweet counts never shrink.
#[test]
fn test_monotonic_growth() {
    let mut rng = SmallRng::seed_from_u64(5);
    let matrix = random_matrix(12, 0.2, &mut rng);
    let mut model = SocialModel::from_matrix(&config(12, 0.3), matrix, 99).unwrap();

    let mut previous = model.population_size();
    for expected_step in 1..=25 {
        let step = model.step().unwrap();
        assert_eq!(step, expected_step);
        let size = model.population_size();
        assert!(size >= previous);
        previous = size;
    }

    let series = model.metrics_series();
    for id in model.user_ids() {
        let counts: Vec<usize> = series.for_agent(id).map(|r| r.tweets_count).collect();
        assert_eq!(counts.len(), 25);
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "user {}", id);
        assert_eq!(*counts.last().unwrap(), model.tweets_of(id).unwrap().len());
    }

    let populations: Vec<usize> = series.summaries.iter().map(|s| s.population).collect();
    assert!(populations.windows(2).all(|w| w[0] <= w[1]));
}

/// Follower counts are unaffected by stepping.
#[test]
fn test_follower_counts_stable() {
    let matrix = AdjacencyMatrix::parse("0 1 1\n1 0 0\n0 0 0").unwrap();
    let mut model = SocialModel::from_matrix(&config(3, 0.5), matrix, 3).unwrap();
    model.run(10).unwrap();

    let series = model.metrics_series();
    assert!(series.for_agent(AgentId(0)).all(|r| r.followers_count == 2));
    assert!(series.for_agent(AgentId(1)).all(|r| r.followers_count == 1));
    assert!(series.for_agent(AgentId(2)).all(|r| r.followers_count == 0));
}

/// Identifiers are unique and contiguous after dynamic growth.
#[test]
fn test_identifiers_unique() {
    let matrix = AdjacencyMatrix::parse("0 1\n1 0").unwrap();
    let mut model = SocialModel::from_matrix(&config(2, 0.8), matrix, 12).unwrap();
    model.run(10).unwrap();

    let snapshot = model.snapshot();
    let mut ids: Vec<u64> = snapshot.agents.iter().map(|a| a.agent_id.value()).collect();
    ids.sort_unstable();
    let expected: Vec<u64> = (0..snapshot.population as u64).collect();
    assert_eq!(ids, expected);
}
