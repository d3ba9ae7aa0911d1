//! Unique identifiers for simulation actors.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a strategy instance.
///
/// Assigned once at construction and preserved across `reset()`. A
/// clone of a strategy is a fresh instance and receives a fresh id;
/// ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyId(Ulid);

impl StrategyId {
    /// Generate a new StrategyId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for StrategyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for StrategyId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
