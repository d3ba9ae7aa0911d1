//! Memory-one reactive strategies: mirror the partner's last move,
//! with forgiving or probabilistic variants.

use dilemma_core::Move;
use rand::Rng;

use crate::{DecisionContext, Strategy, StrategyCore};

/// Classic tit-for-tat: mirror the partner's last *actual* move from
/// the private history, cooperate when there is none.
pub struct TitForTat {
    core: StrategyCore,
}

impl TitForTat {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for TitForTat {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for TitForTat {
    fn name(&self) -> &'static str {
        "Tit-for-Tat"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        match self.core.with_partner(ctx.partner_id).last() {
            Some(last) => last.partner_actual,
            None => Move::Cooperate,
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Tit-for-tat that mirrors the partner's last *intended* move,
/// ignoring what noise did to it. Immune to noise-induced death
/// spirals.
pub struct ForgivingTitForTat {
    core: StrategyCore,
}

impl ForgivingTitForTat {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for ForgivingTitForTat {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for ForgivingTitForTat {
    fn name(&self) -> &'static str {
        "Forgiving Tit-for-Tat"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        match self.core.with_partner(ctx.partner_id).last() {
            Some(last) => last.partner_intended,
            None => Move::Cooperate,
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Retaliates only after two consecutive actual defections, forgiving
/// any single one.
pub struct TitForTwoTats {
    core: StrategyCore,
}

impl TitForTwoTats {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for TitForTwoTats {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for TitForTwoTats {
    fn name(&self) -> &'static str {
        "Tit-for-Two-Tats"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let history = self.core.with_partner(ctx.partner_id);
        match history {
            [.., second_last, last]
                if last.partner_actual == Move::Cheat
                    && second_last.partner_actual == Move::Cheat =>
            {
                Move::Cheat
            }
            _ => Move::Cooperate,
        }
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Tit-for-tat that, when about to retaliate, generously cooperates
/// 10% of the time. Breaks noise-induced retaliation loops.
pub struct GenerousTitForTat {
    core: StrategyCore,
}

impl GenerousTitForTat {
    const P_GENEROUS: f64 = 0.1;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for GenerousTitForTat {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GenerousTitForTat {
    fn name(&self) -> &'static str {
        "Generous Tit-for-Tat"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let intended = match self.core.with_partner(ctx.partner_id).last() {
            Some(last) => last.partner_actual,
            None => return Move::Cooperate,
        };
        if intended == Move::Cheat && ctx.rng.gen::<f64>() < Self::P_GENEROUS {
            return Move::Cooperate;
        }
        intended
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// Tit-for-tat that, when about to cooperate, sneaks in a defection
/// 10% of the time. Exploits overly forgiving partners.
pub struct Joss {
    core: StrategyCore,
}

impl Joss {
    const P_SNEAKY: f64 = 0.1;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
        }
    }
}

impl Default for Joss {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Joss {
    fn name(&self) -> &'static str {
        "Joss"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let intended = match self.core.with_partner(ctx.partner_id).last() {
            Some(last) => last.partner_actual,
            None => return Move::Cooperate,
        };
        if intended == Move::Cooperate && ctx.rng.gen::<f64>() < Self::P_SNEAKY {
            return Move::Cheat;
        }
        intended
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}
