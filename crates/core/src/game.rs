//! Moves, round outcomes and payoffs.

use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// One actor's choice for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Cooperate with the partner.
    Cooperate,
    /// Cheat on the partner.
    Cheat,
}

impl Move {
    /// The complement move.
    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Cheat,
            Move::Cheat => Move::Cooperate,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Cooperate => write!(f, "Cooperate"),
            Move::Cheat => write!(f, "Cheat"),
        }
    }
}

/// Categorical outcome for one side of one resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Mutual cooperation.
    Reward,
    /// You cheated a cooperating partner.
    Temptation,
    /// You cooperated but the partner cheated.
    Sucker,
    /// Mutual defection.
    Punishment,
}

impl MatchResult {
    /// Fixed payoff for this outcome: T=5, R=3, P=1, S=0.
    pub fn payoff(self) -> u32 {
        match self {
            MatchResult::Temptation => 5,
            MatchResult::Reward => 3,
            MatchResult::Punishment => 1,
            MatchResult::Sucker => 0,
        }
    }
}

/// Resolve the joint outcome of one round from both actual moves.
///
/// Total over the four combinations and symmetric under role swap:
/// `resolve(a, b)` is `resolve(b, a)` with the sides exchanged.
pub fn resolve(a: Move, b: Move) -> (MatchResult, MatchResult) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (MatchResult::Reward, MatchResult::Reward),
        (Move::Cooperate, Move::Cheat) => (MatchResult::Sucker, MatchResult::Temptation),
        (Move::Cheat, Move::Cooperate) => (MatchResult::Temptation, MatchResult::Sucker),
        (Move::Cheat, Move::Cheat) => (MatchResult::Punishment, MatchResult::Punishment),
    }
}

/// Immutable record of one round, from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// The move this side chose before noise was applied.
    pub my_intended: Move,
    /// The move this side was scored on after noise.
    pub my_actual: Move,
    /// The move the partner chose before noise.
    pub partner_intended: Move,
    /// The move the partner was scored on after noise.
    pub partner_actual: Move,
    /// This side's outcome of the round.
    pub result: MatchResult,
}

impl RoundRecord {
    /// Build a record, validating the result against both actual moves.
    ///
    /// A result that does not match the actual moves is a caller
    /// contract violation and is rejected rather than stored, since a
    /// corrupted record would corrupt score accounting downstream.
    pub fn new(
        my_intended: Move,
        my_actual: Move,
        partner_intended: Move,
        partner_actual: Move,
        result: MatchResult,
    ) -> Result<Self, SimulationError> {
        let (expected, _) = resolve(my_actual, partner_actual);
        if result != expected {
            return Err(SimulationError::ContractViolation {
                result,
                my_actual,
                partner_actual,
            });
        }
        Ok(Self {
            my_intended,
            my_actual,
            partner_intended,
            partner_actual,
            result,
        })
    }

    /// The same round as seen from the partner's side.
    pub fn mirrored(&self) -> Self {
        let (_, partner_result) = resolve(self.my_actual, self.partner_actual);
        Self {
            my_intended: self.partner_intended,
            my_actual: self.partner_actual,
            partner_intended: self.my_intended,
            partner_actual: self.my_actual,
            result: partner_result,
        }
    }
}
