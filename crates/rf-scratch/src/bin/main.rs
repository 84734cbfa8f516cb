//! Scratch game CLI
//!
//! Usage:
//!   scratch play --config config.json --betting-amount 100
//!   scratch simulate --config config.json --betting-amount 100 --rounds 100000
//!   scratch check --config config.yaml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rf_scratch::{GameConfig, ScratchEngine, SeededSource, evaluate_round};

#[derive(Parser)]
#[command(name = "scratch", about = "Scratch card round engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round and print the result as JSON
    Play {
        /// Game configuration (JSON or YAML)
        #[arg(short, long)]
        config: PathBuf,
        /// Bet amount
        #[arg(short, long)]
        betting_amount: u64,
        /// Seed for a reproducible round
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play many rounds and print session statistics
    Simulate {
        /// Game configuration (JSON or YAML)
        #[arg(short, long)]
        config: PathBuf,
        /// Bet amount per round
        #[arg(short, long)]
        betting_amount: u64,
        /// Number of rounds
        #[arg(short, long, default_value_t = 10_000)]
        rounds: u64,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Validate a configuration and print it normalized
    Check {
        /// Game configuration (JSON or YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            betting_amount,
            seed,
        } => play(load(&config)?, betting_amount, seed),
        Commands::Simulate {
            config,
            betting_amount,
            rounds,
            seed,
        } => simulate(load(&config)?, betting_amount, rounds, seed),
        Commands::Check { config } => {
            println!("{}", load(&config)?.to_json()?);
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<GameConfig> {
    GameConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

fn play(config: GameConfig, bet: u64, seed: Option<u64>) -> Result<()> {
    let mut rng = SeededSource::from_optional_seed(seed);
    let result = evaluate_round(&config, bet as f64, &mut rng).context("Round evaluation failed")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn simulate(config: GameConfig, bet: u64, rounds: u64, seed: Option<u64>) -> Result<()> {
    let mut engine = match seed {
        Some(s) => ScratchEngine::with_seed(config, s)?,
        None => ScratchEngine::new(config)?,
    };
    let stats = engine.simulate(bet as f64, rounds)?;

    let report = serde_json::json!({
        "stats": stats,
        "rtp_percent": stats.rtp(),
        "hit_rate_percent": stats.hit_rate(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
