//! Probe-and-classify strategies.
//!
//! These open with a few cooperative rounds, defect once to probe, and
//! classify the partner by the immediate response: retaliators are
//! treated as respectable and get a reactive sub-policy, tolerators
//! are marked exploitable and defected against until they fight back.
//!
//! Note: classification indexes the partner's public history argument,
//! which is the partner's global log across all opponents. When the
//! partner has faced others in the interim the probed "response" may
//! belong to a different encounter. This mirrors the original
//! behavior deliberately.

use std::collections::HashSet;

use dilemma_core::{Move, RoundRecord, StrategyId};
use rand::Rng;

use crate::{DecisionContext, Strategy, StrategyCore};

const PROBE_ROUND: usize = 3;
const P_GENEROUS: f64 = 0.1;
const P_SNEAKY: f64 = 0.1;

/// Which sub-policy a classified partner gets.
enum Classification {
    Unclassified,
    Responsive,
    Exploitable,
}

/// Shared probe/classify bookkeeping for the prober family.
struct ProberState {
    responsive: HashSet<StrategyId>,
    exploitable: HashSet<StrategyId>,
}

impl ProberState {
    fn new() -> Self {
        Self {
            responsive: HashSet::new(),
            exploitable: HashSet::new(),
        }
    }

    fn classification(&self, partner: StrategyId) -> Classification {
        if self.responsive.contains(&partner) {
            Classification::Responsive
        } else if self.exploitable.contains(&partner) {
            Classification::Exploitable
        } else {
            Classification::Unclassified
        }
    }

    /// Opening phase: cooperate, probe once, classify on the response.
    /// Returns the move, or None once the partner is classified as
    /// responsive (the caller then plays its reactive sub-policy).
    fn probe(&mut self, partner: StrategyId, history: &[RoundRecord]) -> Option<Move> {
        let current_round = history.len();
        if current_round < PROBE_ROUND {
            return Some(Move::Cooperate);
        }
        if current_round == PROBE_ROUND {
            return Some(Move::Cheat);
        }
        if current_round == PROBE_ROUND + 1 {
            let response = history[history.len() - 1].partner_actual;
            if response == Move::Cheat {
                self.responsive.insert(partner);
                return None;
            }
            self.exploitable.insert(partner);
            return Some(Move::Cheat);
        }
        // Classification missed its window; play it safe.
        Some(Move::Cooperate)
    }

    /// Exploitation phase: keep defecting, but watch for the partner
    /// waking up. Returns None when the partner is reclassified as
    /// responsive.
    fn exploit(&mut self, partner: StrategyId, history: &[RoundRecord]) -> Option<Move> {
        let watched = history.get(PROBE_ROUND..).unwrap_or(&[]);
        if watched.iter().any(|r| r.partner_actual == Move::Cheat) {
            self.exploitable.remove(&partner);
            self.responsive.insert(partner);
            return None;
        }
        Some(Move::Cheat)
    }

    fn clear(&mut self) {
        self.responsive.clear();
        self.exploitable.clear();
    }
}

/// Generous tit-for-tat over the supplied history.
fn generous_tft(history: &[RoundRecord], rng: &mut dyn rand::RngCore) -> Move {
    let intended = match history.last() {
        Some(last) => last.partner_actual,
        None => return Move::Cooperate,
    };
    if intended == Move::Cheat && rng.gen::<f64>() < P_GENEROUS {
        return Move::Cooperate;
    }
    intended
}

/// Generous tit-for-tat with a Joss-style sneak attack mixed in.
fn joss_tft(history: &[RoundRecord], rng: &mut dyn rand::RngCore) -> Move {
    let intended = match history.last() {
        Some(last) => last.partner_actual,
        None => return Move::Cooperate,
    };
    if intended == Move::Cheat && rng.gen::<f64>() < P_GENEROUS {
        return Move::Cooperate;
    }
    if intended == Move::Cooperate && rng.gen::<f64>() < P_SNEAKY {
        return Move::Cheat;
    }
    intended
}

/// Probes once, exploits tolerators, and plays generous tit-for-tat
/// against anyone who retaliates. Reclassifies an exploited partner
/// the moment it ever fights back.
pub struct SmartProber {
    core: StrategyCore,
    state: ProberState,
}

impl SmartProber {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            state: ProberState::new(),
        }
    }
}

impl Default for SmartProber {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SmartProber {
    fn name(&self) -> &'static str {
        "Smart Prober"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let history = ctx.partner_public;
        let chosen = match self.state.classification(ctx.partner_id) {
            Classification::Responsive => None,
            Classification::Exploitable => self.state.exploit(ctx.partner_id, history),
            Classification::Unclassified => self.state.probe(ctx.partner_id, history),
        };
        chosen.unwrap_or_else(|| generous_tft(history, ctx.rng))
    }

    fn reset(&mut self) {
        self.core.reset();
        self.state.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// SmartProber crossed with Joss: the same probe and classification,
/// but responsive partners face an occasional sneak attack on top of
/// the generous tit-for-tat.
pub struct GreedyProber {
    core: StrategyCore,
    state: ProberState,
}

impl GreedyProber {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            state: ProberState::new(),
        }
    }
}

impl Default for GreedyProber {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GreedyProber {
    fn name(&self) -> &'static str {
        "Greedy Prober"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        let history = ctx.partner_public;
        let chosen = match self.state.classification(ctx.partner_id) {
            Classification::Responsive => None,
            Classification::Exploitable => self.state.exploit(ctx.partner_id, history),
            Classification::Unclassified => self.state.probe(ctx.partner_id, history),
        };
        chosen.unwrap_or_else(|| joss_tft(history, ctx.rng))
    }

    fn reset(&mut self) {
        self.core.reset();
        self.state.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}
