//! Win-stay/lose-shift strategies.
//!
//! A round counts as won when it ended in Reward or Temptation. Won
//! rounds repeat the own last move; lost rounds flip it.

use dilemma_core::{MatchResult, Move, RoundRecord};
use rand::Rng;

use crate::{DecisionContext, Strategy, StrategyCore};

fn won(result: MatchResult) -> bool {
    matches!(result, MatchResult::Reward | MatchResult::Temptation)
}

/// Win-stay/lose-shift over the private history with each partner.
pub struct Pavlov {
    core: StrategyCore,
}

impl Pavlov {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Pavlov {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Pavlov {
    fn name(&self) -> &'static str {
        "Pavlov"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        match self.core.with_partner(ctx.partner_id).last() {
            Some(last) if won(last.result) => last.my_actual,
            Some(last) => last.my_actual.flip(),
            None => Move::Cooperate,
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Win-stay/lose-shift over the own global history: reacts to the
/// last round played against anyone, not just this partner.
pub struct GlobalPavlov {
    core: StrategyCore,
}

impl GlobalPavlov {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for GlobalPavlov {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GlobalPavlov {
    fn name(&self) -> &'static str {
        "Global Pavlov"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, _ctx: &mut DecisionContext<'_>) -> Move {
        match self.core.public().last() {
            Some(last) if won(last.result) => last.my_actual,
            Some(last) => last.my_actual.flip(),
            None => Move::Cooperate,
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// A hesitant Pavlov: win-stay is certain, lose-shift is probabilistic.
///
/// After a Sucker round it retaliates (C to D) with 90% probability;
/// after a Punishment round it reconciles (D to C) with 80%.
pub struct StochasticPavlov {
    core: StrategyCore,
}

impl StochasticPavlov {
    const P_RETALIATE: f64 = 0.9;
    const P_RECONCILE: f64 = 0.8;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }

    fn lose_shift(last: &RoundRecord, ctx: &mut DecisionContext<'_>) -> Move {
        match last.my_actual {
            Move::Cooperate => {
                if ctx.rng.gen::<f64>() < Self::P_RETALIATE {
                    Move::Cheat
                } else {
                    Move::Cooperate
                }
            }
            Move::Cheat => {
                if ctx.rng.gen::<f64>() < Self::P_RECONCILE {
                    Move::Cooperate
                } else {
                    Move::Cheat
                }
            }
        }
    }
}

impl Default for StochasticPavlov {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for StochasticPavlov {
    fn name(&self) -> &'static str {
        "Stochastic Pavlov"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let last = match self.core.with_partner(ctx.partner_id).last() {
            Some(last) => *last,
            None => return Move::Cooperate,
        };
        if won(last.result) {
            last.my_actual
        } else {
            Self::lose_shift(&last, ctx)
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{decide, record_round, rng};
    use dilemma_core::StrategyId;

    #[test]
    fn pavlov_stays_after_a_win() {
        let mut rng = rng(1);
        let partner = StrategyId::new();
        let mut pavlov = Pavlov::new();

        // Temptation: cheated a cooperator, a win. Stay on cheat.
        record_round(&mut pavlov, partner, Move::Cheat, Move::Cooperate, &mut rng);
        assert_eq!(decide(&mut pavlov, partner, &[], 0, &mut rng), Move::Cheat);
    }

    #[test]
    fn pavlov_shifts_after_a_loss() {
        let mut rng = rng(2);
        let partner = StrategyId::new();
        let mut pavlov = Pavlov::new();

        // Punishment: mutual defection, a loss. Shift to cooperate.
        record_round(&mut pavlov, partner, Move::Cheat, Move::Cheat, &mut rng);
        assert_eq!(decide(&mut pavlov, partner, &[], 0, &mut rng), Move::Cooperate);

        // Sucker: cooperated into a cheat, a loss. Shift to cheat.
        record_round(&mut pavlov, partner, Move::Cooperate, Move::Cheat, &mut rng);
        assert_eq!(decide(&mut pavlov, partner, &[], 0, &mut rng), Move::Cheat);
    }

    #[test]
    fn global_pavlov_reacts_to_any_partner() {
        let mut rng = rng(3);
        let a = StrategyId::new();
        let b = StrategyId::new();
        let mut pavlov = GlobalPavlov::new();

        // Lost against partner a; the shift carries over to partner b.
        record_round(&mut pavlov, a, Move::Cooperate, Move::Cheat, &mut rng);
        assert_eq!(decide(&mut pavlov, b, &[], 0, &mut rng), Move::Cheat);
    }

    #[test]
    fn stochastic_pavlov_win_stay_is_certain() {
        let mut rng = rng(4);
        let partner = StrategyId::new();
        let mut pavlov = StochasticPavlov::new();

        record_round(
            &mut pavlov,
            partner,
            Move::Cooperate,
            Move::Cooperate,
            &mut rng,
        );
        for _ in 0..100 {
            assert_eq!(
                decide(&mut pavlov, partner, &[], 0, &mut rng),
                Move::Cooperate
            );
        }
    }

    #[test]
    fn stochastic_pavlov_retaliates_at_ninety_percent() {
        let mut rng = rng(5);
        let partner = StrategyId::new();
        let mut pavlov = StochasticPavlov::new();
        record_round(&mut pavlov, partner, Move::Cooperate, Move::Cheat, &mut rng);

        let trials = 20_000;
        let mut retaliations = 0;
        for _ in 0..trials {
            if decide(&mut pavlov, partner, &[], 0, &mut rng) == Move::Cheat {
                retaliations += 1;
            }
        }
        let rate = retaliations as f64 / trials as f64;
        assert!((rate - 0.90).abs() < 0.01, "retaliation rate {rate}");
    }
}
