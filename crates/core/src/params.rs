//! Scalar simulation parameters.

use serde::{Deserialize, Serialize};

/// Parameters for a single tournament (one generation's evaluation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TournamentParams {
    /// Rounds that make up one notional full game.
    pub rounds_per_game: u32,

    /// Expected number of full games each actor takes part in.
    ///
    /// Together with the population size this fixes the total number
    /// of sampled interactions, independent of how large the
    /// population grows.
    pub avg_matches_per_strategy: u32,

    /// Probability (0.0-1.0) that an intended move is flipped.
    pub noise: f64,
}

impl Default for TournamentParams {
    fn default() -> Self {
        Self {
            rounds_per_game: 10,
            avg_matches_per_strategy: 100,
            noise: 0.0,
        }
    }
}

/// Parameters for a full evolutionary simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Instances of each strategy type in the initial population.
    pub copies_per_type: usize,

    /// Actors culled (and cloned from the top) each generation.
    pub kill_count: usize,

    /// Evaluation parameters applied every generation.
    pub tournament: TournamentParams,

    /// Consecutive generations with an unchanged surviving-type set
    /// required to declare the ecosystem stable.
    pub stability_threshold: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            copies_per_type: 10,
            kill_count: 5,
            tournament: TournamentParams::default(),
            stability_threshold: 100,
        }
    }
}
