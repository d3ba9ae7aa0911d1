//! Dilemma core data models.
//!
//! This crate defines the fundamental data structures shared by the
//! iterated prisoner's dilemma simulator: moves, round outcomes,
//! payoffs, round records, actor identities, simulation parameters and
//! the error taxonomy.

#![warn(missing_docs)]

// Core identities
mod id;

// Moves, outcomes, payoffs and round records
mod game;

// Simulation parameters
mod params;

// Error taxonomy
mod error;

// Re-exports
pub use id::StrategyId;

pub use game::{resolve, Move, MatchResult, RoundRecord};

pub use params::{EvolutionConfig, TournamentParams};

pub use error::SimulationError;
