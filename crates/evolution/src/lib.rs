//! Evolutionary loop - generational selection over a strategy population.

#![warn(missing_docs)]

mod report;
mod simulation;

pub use report::{EvolutionReport, GenerationSnapshot, Termination, TypeCount};
pub use simulation::run_evolution;
