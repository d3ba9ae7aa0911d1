//! Command-line driver for the dilemma simulator.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, Level};

use dilemma_core::{EvolutionConfig, TournamentParams};
use dilemma_engine::run_tournament;
use dilemma_evolution::run_evolution;
use dilemma_strategies::{default_registry, Strategy};

#[derive(Parser)]
#[command(name = "dilemma")]
#[command(about = "Evolutionary iterated prisoner's dilemma simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in strategies
    List,
    /// Run a single tournament with one instance of each strategy
    Tournament {
        /// Rounds per game
        #[arg(long, default_value = "3000")]
        rounds: u32,
        /// Average matches per strategy
        #[arg(long, default_value = "100")]
        matches: u32,
        /// Probability of a move being flipped in transit (0.0-1.0)
        #[arg(long, default_value = "0.0")]
        noise: f64,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Restrict the field to these strategy names
        #[arg(long, value_delimiter = ',')]
        strategies: Option<Vec<String>>,
    },
    /// Run a full evolutionary simulation
    Evolve {
        /// Initial copies of each strategy type
        #[arg(long, default_value = "10")]
        copies: usize,
        /// Actors culled (and cloned) per generation
        #[arg(long, default_value = "5")]
        kill: usize,
        /// Rounds per game
        #[arg(long, default_value = "10")]
        rounds: u32,
        /// Average matches per strategy per generation
        #[arg(long, default_value = "100")]
        matches: u32,
        /// Probability of a move being flipped in transit (0.0-1.0)
        #[arg(long, default_value = "0.0")]
        noise: f64,
        /// Generations the type set must survive unchanged
        #[arg(long, default_value = "100")]
        stability: u32,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Write the full report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let registry = default_registry();
            println!("Strategies ({})", registry.len());
            for name in registry.names() {
                println!("  {name}");
            }
        }
        Commands::Tournament {
            rounds,
            matches,
            noise,
            seed,
            strategies,
        } => {
            validate_noise(noise)?;
            let registry = default_registry();
            let mut population: Vec<Box<dyn Strategy>> = match strategies {
                Some(names) => {
                    let mut field = Vec::with_capacity(names.len());
                    for name in &names {
                        let actor = registry
                            .spawn(name)
                            .with_context(|| format!("unknown strategy: {name}"))?;
                        field.push(actor);
                    }
                    field
                }
                None => registry.build_population(1),
            };
            if population.len() < 2 {
                bail!("a tournament needs at least two participants");
            }

            let params = TournamentParams {
                rounds_per_game: rounds,
                avg_matches_per_strategy: matches,
                noise,
            };
            let mut rng = make_rng(seed);

            info!(
                participants = population.len(),
                rounds, matches, noise, "starting tournament"
            );
            run_tournament(&mut population, &params, &mut rng)?;

            println!("Final ranking ({:.0}% noise)", noise * 100.0);
            for (rank, actor) in population.iter().enumerate() {
                println!("  #{:<3} {:<24} score: {}", rank + 1, actor.name(), actor.score());
            }
        }
        Commands::Evolve {
            copies,
            kill,
            rounds,
            matches,
            noise,
            stability,
            seed,
            report,
        } => {
            validate_noise(noise)?;
            let registry = default_registry();
            let config = EvolutionConfig {
                copies_per_type: copies,
                kill_count: kill,
                tournament: TournamentParams {
                    rounds_per_game: rounds,
                    avg_matches_per_strategy: matches,
                    noise,
                },
                stability_threshold: stability,
            };
            let mut rng = make_rng(seed);

            let outcome = run_evolution(&registry, &config, &mut rng)?;

            println!(
                "Terminated after {} generations ({})",
                outcome.generations,
                format_termination(outcome.termination)
            );
            println!("Final ranking");
            for (rank, name) in outcome.ranking.iter().enumerate() {
                println!("  #{:<3} {name}", rank + 1);
            }

            if let Some(path) = report {
                let document = serde_json::json!({
                    "generated_at": chrono::Utc::now(),
                    "seed": seed,
                    "report": outcome,
                });
                let body = serde_json::to_string_pretty(&document)?;
                std::fs::write(&path, body)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                info!(path = %path.display(), "report written");
            }
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn format_termination(termination: dilemma_evolution::Termination) -> &'static str {
    match termination {
        dilemma_evolution::Termination::Stable => "stable ecology",
        dilemma_evolution::Termination::Monoculture => "monoculture",
    }
}

fn validate_noise(noise: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&noise) {
        bail!("noise must be between 0.0 and 1.0, got {noise}");
    }
    Ok(())
}
