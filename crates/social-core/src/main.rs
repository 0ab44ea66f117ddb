//! Social Network Simulation Driver
//!
//! Builds a model from a TOML config plus command line overrides, runs it for
//! a fixed number of steps while printing per-user follower and tweet counts,
//! then writes metrics and graph files.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use social_core::config::{SimConfig, Variant, DEFAULT_CONFIG_PATH};
use social_core::output::OutputWriter;
use social_core::{Group, SocialModel};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "social_sim")]
#[command(about = "Agent-based simulation of a follower network")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adjacency matrix file
    #[arg(long)]
    adjacency: Option<PathBuf>,

    /// Number of users
    #[arg(long)]
    users: Option<usize>,

    /// Number of contributors (extended variant)
    #[arg(long)]
    contributors: Option<usize>,

    /// Per-step tweet probability
    #[arg(long)]
    tweet_probability: Option<f64>,

    /// Model variant
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Number of steps to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for output files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip writing output files
    #[arg(long)]
    no_output: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Load the config file and apply command line overrides.
    fn resolve_config(&self) -> Result<SimConfig, social_core::ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => SimConfig::load(DEFAULT_CONFIG_PATH)?,
            None => SimConfig::default(),
        };

        if let Some(path) = &self.adjacency {
            config.model.adjacency_matrix = path.clone();
        }
        if let Some(users) = self.users {
            config.model.num_users = users;
        }
        if let Some(contributors) = self.contributors {
            config.model.num_contributors = contributors;
        }
        if let Some(p) = self.tweet_probability {
            config.model.tweet_probability = p;
        }
        if let Some(variant) = self.variant {
            config.model.variant = variant;
        }
        if let Some(steps) = self.steps {
            config.simulation.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve_config()?;

    println!("Social Network Simulation");
    println!("=========================");
    println!("Seed: {}", config.simulation.seed);
    println!("Steps: {}", config.simulation.steps);
    println!("Users: {}", config.model.num_users);
    println!("Variant: {:?}", config.model.variant);
    println!("Tweet probability: {}", config.model.tweet_probability);
    println!("Adjacency matrix: {}", config.model.adjacency_matrix.display());
    println!();

    let mut model = SocialModel::new(&config.model, config.simulation.seed)?;
    println!("Spawned {}", model.spawn_summary());
    let report = model.load_report();
    println!(
        "Installed {} follower edges ({} skipped)",
        report.installed, report.skipped
    );
    println!();

    for _ in 0..config.simulation.steps {
        let step = model.step()?;
        println!("Current Step: {}", step);
        println!("Number of Agents: {}", model.population_size());

        let interval = config.simulation.report_interval;
        if interval > 0 && step % interval == 0 {
            print_user_report(&model, step);
        }
    }

    if !args.no_output {
        let writer = OutputWriter::new(&config.output.dir)?;
        if config.output.write_metrics {
            writer.write_metrics(model.metrics_series())?;
        }
        if config.output.write_graph {
            writer.write_graph(&model.follower_graph())?;
        }
        if config.output.write_final_state {
            writer.write_final_state(&model.snapshot())?;
        }
    }

    println!();
    println!(
        "Simulation complete. Ran {} steps, final population {}.",
        model.steps(),
        model.population_size()
    );
    Ok(())
}

/// Print follower and tweet counts for every user.
fn print_user_report(model: &SocialModel, step: u64) {
    println!("Step {}", step);
    println!("User-Followers:");
    for id in model.user_ids() {
        let followers = model.followers_of(id).map_or(0, |f| f.len());
        let tweets = model.tweets_of(id).map_or(0, |t| t.len());
        println!(
            "User {}{}: {} followers, {} tweets",
            id,
            group_suffix(model.group_of(id)),
            followers,
            tweets
        );
    }
    println!("-------------");
}

fn group_suffix(group: Option<Group>) -> String {
    group.map(|g| format!(" in Group {}", g)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::parse_from([
            "social_sim",
            "--users",
            "5",
            "--variant",
            "base",
            "--steps",
            "3",
            "--tweet-probability",
            "0.5",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.model.num_users, 5);
        assert_eq!(config.model.variant, Variant::Base);
        assert_eq!(config.simulation.steps, 3);
        assert_eq!(config.model.tweet_probability, 0.5);
    }

    #[test]
    fn test_cli_rejects_bad_probability() {
        let args = Args::parse_from(["social_sim", "--tweet-probability", "3"]);
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_group_suffix() {
        assert_eq!(group_suffix(Some(Group::GroupB)), " in Group Group_B");
        assert_eq!(group_suffix(None), "");
    }
}
