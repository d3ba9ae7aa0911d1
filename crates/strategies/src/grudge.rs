//! Blacklist strategies: cooperate until a partner crosses a line,
//! then defect against that partner forever.

use std::collections::HashSet;

use dilemma_core::{Move, StrategyId};

use crate::{DecisionContext, Strategy, StrategyCore};

/// Grim trigger: a single observed defection, ever, is enough to
/// blacklist the partner permanently.
pub struct Grudger {
    core: StrategyCore,
    grudges: HashSet<StrategyId>,
}

impl Grudger {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            grudges: HashSet::new(),
        }
    }
}

impl Default for Grudger {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Grudger {
    fn name(&self) -> &'static str {
        "Grudger"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.grudges.contains(&ctx.partner_id) {
            return Move::Cheat;
        }
        let betrayed = self
            .core
            .with_partner(ctx.partner_id)
            .iter()
            .any(|r| r.partner_actual == Move::Cheat);
        if betrayed {
            self.grudges.insert(ctx.partner_id);
            return Move::Cheat;
        }
        Move::Cooperate
    }

    fn reset(&mut self) {
        self.core.reset();
        self.grudges.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Three-strikes grudger: blacklists only after three *consecutive*
/// actual defections, so isolated noise is forgiven.
pub struct TolerantGrudger {
    core: StrategyCore,
    grudges: HashSet<StrategyId>,
}

impl TolerantGrudger {
    const STRIKE_LIMIT: usize = 3;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            grudges: HashSet::new(),
        }
    }
}

impl Default for TolerantGrudger {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for TolerantGrudger {
    fn name(&self) -> &'static str {
        "Tolerant Grudger"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.grudges.contains(&ctx.partner_id) {
            return Move::Cheat;
        }
        let history = self.core.with_partner(ctx.partner_id);
        if history.len() < Self::STRIKE_LIMIT {
            return Move::Cooperate;
        }
        let recent = &history[history.len() - Self::STRIKE_LIMIT..];
        if recent.iter().all(|r| r.partner_actual == Move::Cheat) {
            self.grudges.insert(ctx.partner_id);
            return Move::Cheat;
        }
        Move::Cooperate
    }

    fn reset(&mut self) {
        self.core.reset();
        self.grudges.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}
