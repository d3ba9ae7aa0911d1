//! Pairwise-interaction engine.
//!
//! Evaluates a population by sampling random pairs and playing single
//! noisy rounds between them, rather than a full quadratic
//! round-robin. Expected exposure per actor is controlled by
//! `avg_matches_per_strategy`, independent of population size;
//! variance in exposure is accepted by design.

mod noise;
mod tournament;

pub use noise::apply_noise;
pub use tournament::{play_round, run_tournament};
