//! Strategies that ignore the partner entirely.

use dilemma_core::Move;
use rand::Rng;

use crate::{DecisionContext, Strategy, StrategyCore};

/// Always cooperates, no matter what.
pub struct AlwaysCooperate {
    core: StrategyCore,
}

impl AlwaysCooperate {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for AlwaysCooperate {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AlwaysCooperate {
    fn name(&self) -> &'static str {
        "Always Cooperate"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, _ctx: &mut DecisionContext<'_>) -> Move {
        Move::Cooperate
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Always cheats, no matter what.
pub struct AlwaysCheat {
    core: StrategyCore,
}

impl AlwaysCheat {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for AlwaysCheat {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AlwaysCheat {
    fn name(&self) -> &'static str {
        "Always Cheat"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, _ctx: &mut DecisionContext<'_>) -> Move {
        Move::Cheat
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Fair coin flip every round.
pub struct Random {
    core: StrategyCore,
}

impl Random {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Random {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if ctx.rng.gen_bool(0.5) {
            Move::Cooperate
        } else {
            Move::Cheat
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// A well-meaning but clumsy cooperator.
///
/// Its true intent is always to cooperate, but it slips and plays
/// cheat 10% of the time. The slip happens before engine noise, so
/// the slipped move is what gets recorded as its intent.
pub struct Awkward {
    core: StrategyCore,
}

impl Awkward {
    const P_SLIP: f64 = 0.10;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Awkward {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Awkward {
    fn name(&self) -> &'static str {
        "Awkward"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if ctx.rng.gen::<f64>() < Self::P_SLIP {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{decide, rng};
    use dilemma_core::StrategyId;

    #[test]
    fn unconditional_strategies_ignore_inputs() {
        let mut rng = rng(7);
        let partner = StrategyId::new();
        let mut nice = AlwaysCooperate::new();
        let mut nasty = AlwaysCheat::new();

        for _ in 0..10 {
            assert_eq!(decide(&mut nice, partner, &[], 0, &mut rng), Move::Cooperate);
            assert_eq!(decide(&mut nasty, partner, &[], 0, &mut rng), Move::Cheat);
        }
    }

    #[test]
    fn awkward_slips_at_roughly_ten_percent() {
        let mut rng = rng(11);
        let partner = StrategyId::new();
        let mut awkward = Awkward::new();

        let trials = 20_000;
        let mut slips = 0;
        for _ in 0..trials {
            if decide(&mut awkward, partner, &[], 0, &mut rng) == Move::Cheat {
                slips += 1;
            }
        }
        let rate = slips as f64 / trials as f64;
        assert!((rate - 0.10).abs() < 0.01, "slip rate {rate}");
    }

    #[test]
    fn random_plays_both_moves() {
        let mut rng = rng(3);
        let partner = StrategyId::new();
        let mut random = Random::new();

        let mut seen_coop = false;
        let mut seen_cheat = false;
        for _ in 0..100 {
            match decide(&mut random, partner, &[], 0, &mut rng) {
                Move::Cooperate => seen_coop = true,
                Move::Cheat => seen_cheat = true,
            }
        }
        assert!(seen_coop && seen_cheat);
    }
}
