//! Error taxonomy for the simulation.

use crate::{MatchResult, Move};

/// Fatal simulation errors.
///
/// The simulation is a closed, deterministic-given-seed computation
/// with no I/O, so there are no transient or retryable modes; every
/// variant is a defect to propagate.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The selection step would remove the entire population.
    #[error("kill count {kill_count} must be smaller than the population size {population}")]
    KillCountTooLarge {
        /// Configured number of actors culled per generation.
        kill_count: usize,
        /// Actual population size.
        population: usize,
    },

    /// No strategy types were supplied at initialization.
    #[error("cannot build a population from zero strategy types")]
    EmptyPopulation,

    /// A round record's result does not match its actual moves.
    #[error("round result {result:?} does not match actual moves ({my_actual:?}, {partner_actual:?})")]
    ContractViolation {
        /// The claimed outcome.
        result: MatchResult,
        /// This side's actual move.
        my_actual: Move,
        /// The partner's actual move.
        partner_actual: Move,
    },
}
