//! The strategy contract and the state every strategy shares.

use std::collections::HashMap;

use dilemma_core::{Move, RoundRecord, StrategyId};
use rand::RngCore;

/// Everything a strategy may consult when choosing a move.
///
/// `partner_public` is the partner's *global* log: every round that
/// partner has played against anyone, not just against the deciding
/// actor. `partner_score` and the log length together form the
/// optional population-comparison signal.
pub struct DecisionContext<'a> {
    /// Identity of the partner for this round.
    pub partner_id: StrategyId,

    /// The partner's public history, as it stood before this round.
    pub partner_public: &'a [RoundRecord],

    /// The partner's current cumulative score.
    pub partner_score: u32,

    /// The shared sequential random source.
    pub rng: &'a mut dyn RngCore,
}

/// Score and history state common to every strategy.
///
/// Owned exclusively by one strategy instance; there is no aliasing
/// between instances.
#[derive(Debug)]
pub struct StrategyCore {
    id: StrategyId,
    score: u32,
    public: Vec<RoundRecord>,
    private: HashMap<StrategyId, Vec<RoundRecord>>,
}

impl StrategyCore {
    /// Create fresh state with a new identity.
    pub fn new() -> Self {
        Self {
            id: StrategyId::new(),
            score: 0,
            public: Vec::new(),
            private: HashMap::new(),
        }
    }

    /// The identity assigned at construction. Never changes.
    pub fn id(&self) -> StrategyId {
        self.id
    }

    /// Cumulative score. Monotonically non-decreasing.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Chronological record of every round, against any partner.
    pub fn public(&self) -> &[RoundRecord] {
        &self.public
    }

    /// Chronological record of rounds against one specific partner.
    ///
    /// Empty slice if this partner has never been faced.
    pub fn with_partner(&self, partner: StrategyId) -> &[RoundRecord] {
        self.private.get(&partner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append one round to both histories and add its payoff.
    pub fn record(&mut self, partner: StrategyId, round: RoundRecord) {
        self.private.entry(partner).or_default().push(round);
        self.public.push(round);
        self.score += round.result.payoff();
    }

    /// Clear score and both histories. The identity is preserved.
    pub fn reset(&mut self) {
        self.score = 0;
        self.public.clear();
        self.private.clear();
    }
}

impl Default for StrategyCore {
    fn default() -> Self {
        Self::new()
    }
}

/// A decision strategy: a stateful actor in the population.
pub trait Strategy {
    /// Human-readable type name. Shared by all instances of the type;
    /// used for per-type counts and the extinction log.
    fn name(&self) -> &'static str;

    /// Shared state access.
    fn core(&self) -> &StrategyCore;

    /// Mutable shared state access.
    fn core_mut(&mut self) -> &mut StrategyCore;

    /// Choose the intended move for one round against `ctx.partner_id`.
    ///
    /// Called before either side's state is updated for the round, so
    /// the order the two sides decide in cannot affect the outcome.
    /// Convention: cooperate when there is no history to go on.
    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move;

    /// Accept the final result of one round.
    ///
    /// Called exactly once per side per round by the engine, after
    /// both actual moves are known. Overrides that add bookkeeping
    /// must still perform the base update.
    fn record(&mut self, partner: StrategyId, round: RoundRecord, _rng: &mut dyn RngCore) {
        self.core_mut().record(partner, round);
    }

    /// Clear score, histories and any auxiliary state, keeping the
    /// identity.
    fn reset(&mut self) {
        self.core_mut().reset();
    }

    /// A brand-new instance of the same concrete type: fresh state,
    /// new identity.
    fn spawn(&self) -> Box<dyn Strategy>;

    /// Identity assigned at construction.
    fn id(&self) -> StrategyId {
        self.core().id()
    }

    /// Current cumulative score.
    fn score(&self) -> u32 {
        self.core().score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::{resolve, MatchResult};

    fn round(mine: Move, theirs: Move) -> RoundRecord {
        let (result, _) = resolve(mine, theirs);
        RoundRecord::new(mine, mine, theirs, theirs, result).unwrap()
    }

    #[test]
    fn record_updates_both_histories_and_score() {
        let mut core = StrategyCore::new();
        let partner = StrategyId::new();
        core.record(partner, round(Move::Cooperate, Move::Cooperate));
        core.record(partner, round(Move::Cooperate, Move::Cheat));

        assert_eq!(core.score(), 3);
        assert_eq!(core.public().len(), 2);
        assert_eq!(core.with_partner(partner).len(), 2);
        assert_eq!(core.with_partner(StrategyId::new()).len(), 0);
    }

    #[test]
    fn score_is_sum_of_payoffs_and_never_decreases() {
        let mut core = StrategyCore::new();
        let partner = StrategyId::new();
        let rounds = [
            round(Move::Cheat, Move::Cooperate),
            round(Move::Cheat, Move::Cheat),
            round(Move::Cooperate, Move::Cheat),
            round(Move::Cooperate, Move::Cooperate),
        ];
        let mut last = 0;
        let mut expected = 0;
        for r in rounds {
            core.record(partner, r);
            expected += r.result.payoff();
            assert!(core.score() >= last);
            last = core.score();
        }
        assert_eq!(core.score(), expected);
        assert_eq!(expected, 5 + 1 + 0 + 3);
    }

    #[test]
    fn reset_clears_state_but_keeps_identity() {
        let mut core = StrategyCore::new();
        let id = core.id();
        let partner = StrategyId::new();
        core.record(partner, round(Move::Cooperate, Move::Cooperate));

        core.reset();
        assert_eq!(core.id(), id);
        assert_eq!(core.score(), 0);
        assert!(core.public().is_empty());
        assert!(core.with_partner(partner).is_empty());
    }

    #[test]
    fn replay_after_reset_reproduces_score_and_history() {
        let mut core = StrategyCore::new();
        let partner = StrategyId::new();
        let rounds = [
            round(Move::Cooperate, Move::Cheat),
            round(Move::Cheat, Move::Cheat),
            round(Move::Cheat, Move::Cooperate),
        ];
        for r in rounds {
            core.record(partner, r);
        }
        let score = core.score();
        let public = core.public().to_vec();

        core.reset();
        for r in rounds {
            core.record(partner, r);
        }
        assert_eq!(core.score(), score);
        assert_eq!(core.public(), public.as_slice());
    }

    #[test]
    fn mirrored_records_give_consistent_results() {
        let r = RoundRecord::new(
            Move::Cheat,
            Move::Cheat,
            Move::Cooperate,
            Move::Cooperate,
            MatchResult::Temptation,
        )
        .unwrap();
        assert_eq!(r.mirrored().result, MatchResult::Sucker);
    }
}
