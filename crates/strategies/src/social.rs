//! Strategies that judge partners statistically or by relative
//! standing in the population.

use dilemma_core::Move;

use crate::{DecisionContext, Strategy, StrategyCore};

/// Rounds of data required before the comparator strategies trust
/// their averages.
const MIN_DATA: usize = 20;

/// Classifies the partner by its empirical cooperation rate over a
/// trailing window of the private history; defects below a threshold,
/// returns to cooperation if the rate recovers.
pub struct Statistical {
    core: StrategyCore,
}

impl Statistical {
    const WINDOW: usize = 10;
    const COOPERATION_THRESHOLD: f64 = 0.6;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Statistical {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Statistical {
    fn name(&self) -> &'static str {
        "Statistical"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let history = self.core.with_partner(ctx.partner_id);
        if history.len() < Self::WINDOW {
            return Move::Cooperate;
        }
        let recent = &history[history.len() - Self::WINDOW..];
        let cooperations = recent
            .iter()
            .filter(|r| r.partner_actual == Move::Cooperate)
            .count();
        let rate = cooperations as f64 / Self::WINDOW as f64;
        if rate >= Self::COOPERATION_THRESHOLD {
            Move::Cooperate
        } else {
            Move::Cheat
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// A social climber: cheats partners with a lower average score per
/// round, cooperates with equal or stronger ones.
pub struct Bully {
    core: StrategyCore,
}

impl Bully {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Bully {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Bully {
    fn name(&self) -> &'static str {
        "Bully"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let my_rounds = self.core.public().len();
        let partner_rounds = ctx.partner_public.len();
        if my_rounds < MIN_DATA || partner_rounds < MIN_DATA {
            return Move::Cooperate;
        }
        let my_avg = self.core.score() as f64 / my_rounds as f64;
        let partner_avg = ctx.partner_score as f64 / partner_rounds as f64;
        if my_avg > partner_avg {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Envies stronger partners, but only attacks ones that look like
/// pure pacifists.
///
/// When the partner's average score is higher than its own, it checks
/// the partner's publicly visible intended-cheat rate: below 3% means
/// a harmless cooperator worth exploiting, anything above means the
/// partner fights back and the envy is suppressed.
pub struct SmartEnvious {
    core: StrategyCore,
}

impl SmartEnvious {
    const CHEAT_RATE_THRESHOLD: f64 = 0.03;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for SmartEnvious {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SmartEnvious {
    fn name(&self) -> &'static str {
        "Smart Envious"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let my_rounds = self.core.public().len();
        let partner_rounds = ctx.partner_public.len();
        if my_rounds < MIN_DATA || partner_rounds < MIN_DATA {
            return Move::Cooperate;
        }
        let my_avg = self.core.score() as f64 / my_rounds as f64;
        let partner_avg = ctx.partner_score as f64 / partner_rounds as f64;
        if partner_avg <= my_avg {
            return Move::Cooperate;
        }

        let cheats = ctx
            .partner_public
            .iter()
            .filter(|r| r.my_intended == Move::Cheat)
            .count();
        let cheat_rate = cheats as f64 / partner_rounds as f64;
        if cheat_rate < Self::CHEAT_RATE_THRESHOLD {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}
