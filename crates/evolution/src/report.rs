//! Per-generation snapshots and the final simulation report.

use serde::{Deserialize, Serialize};

/// Why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The surviving-type set held steady for the configured number
    /// of consecutive generations.
    Stable,
    /// At most one strategy type remained.
    Monoculture,
}

/// Live instance count for one strategy type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    /// Strategy type name.
    pub name: String,
    /// Instances alive after selection.
    pub count: usize,
}

/// State of the ecosystem after one generation's selection step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    /// Generation index, starting at 1.
    pub generation: u32,

    /// Per-type live counts, descending.
    pub counts: Vec<TypeCount>,

    /// Stability counter as it stood when this generation was
    /// checked for termination.
    pub stability_counter: u32,

    /// Types whose count reached zero this generation.
    pub newly_extinct: Vec<String>,
}

/// Full outcome of an evolutionary simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionReport {
    /// Terminal state.
    pub termination: Termination,

    /// Number of generations played.
    pub generations: u32,

    /// Final ranking: survivors first, extinct types in reverse
    /// extinction order after them (earliest extinct last).
    pub ranking: Vec<String>,

    /// One snapshot per generation, in order.
    pub snapshots: Vec<GenerationSnapshot>,
}
