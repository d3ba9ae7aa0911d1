//! Strike-counter strategies: defections earn strikes, mutual
//! cooperation redeems them, and a full strike count triggers either a
//! permanent blacklist or a timed punishment.

use std::collections::{HashMap, HashSet};

use dilemma_core::{MatchResult, Move, RoundRecord, StrategyId};
use rand::{Rng, RngCore};

use crate::{DecisionContext, Strategy, StrategyCore};

const STRIKE_LIMIT: u32 = 3;

/// Forgiving strike counter with a permanent blacklist.
///
/// An actual defection is one strike; a mutually cooperative round
/// redeems one (floor zero). Three strikes blacklist the partner
/// forever.
pub struct Redeemer {
    core: StrategyCore,
    grudges: HashSet<StrategyId>,
    strikes: HashMap<StrategyId, u32>,
}

impl Redeemer {
    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            grudges: HashSet::new(),
            strikes: HashMap::new(),
        }
    }
}

impl Default for Redeemer {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Redeemer {
    fn name(&self) -> &'static str {
        "Redeemer"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.grudges.contains(&ctx.partner_id) {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn record(&mut self, partner: StrategyId, round: RoundRecord, _rng: &mut dyn RngCore) {
        self.core.record(partner, round);

        if self.grudges.contains(&partner) {
            return;
        }
        let mut strikes = self.strikes.get(&partner).copied().unwrap_or(0);
        if round.result == MatchResult::Reward {
            strikes = strikes.saturating_sub(1);
        }
        if round.partner_actual == Move::Cheat {
            strikes += 1;
        }
        if strikes >= STRIKE_LIMIT {
            self.grudges.insert(partner);
            self.strikes.remove(&partner);
        } else {
            self.strikes.insert(partner, strikes);
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.grudges.clear();
        self.strikes.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// An intent-reading Redeemer that misjudges in both directions.
///
/// It overlooks genuine malice 75% of the time and, 25% of the time,
/// punishes an innocent noise-flipped cooperation as if it had been
/// intended.
pub struct SkepticalRedeemer {
    core: StrategyCore,
    grudges: HashSet<StrategyId>,
    strikes: HashMap<StrategyId, u32>,
}

impl SkepticalRedeemer {
    const P_MISTRUST: f64 = 0.25;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            grudges: HashSet::new(),
            strikes: HashMap::new(),
        }
    }
}

impl Default for SkepticalRedeemer {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SkepticalRedeemer {
    fn name(&self) -> &'static str {
        "Skeptical Redeemer"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.grudges.contains(&ctx.partner_id) {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn record(&mut self, partner: StrategyId, round: RoundRecord, rng: &mut dyn RngCore) {
        self.core.record(partner, round);

        if self.grudges.contains(&partner) {
            return;
        }
        let mut strikes = self.strikes.get(&partner).copied().unwrap_or(0);

        // Redemption goes by intent on both sides.
        if round.my_intended == Move::Cooperate && round.partner_intended == Move::Cooperate {
            strikes = strikes.saturating_sub(1);
        }

        if round.partner_intended == Move::Cheat {
            // Genuine malice, noticed only a quarter of the time.
            if rng.gen::<f64>() < Self::P_MISTRUST {
                strikes += 1;
            }
        } else if round.partner_actual == Move::Cheat {
            // An accident, but sometimes blamed anyway.
            if rng.gen::<f64>() < Self::P_MISTRUST {
                strikes += 1;
            }
        }

        if strikes >= STRIKE_LIMIT {
            self.grudges.insert(partner);
            self.strikes.remove(&partner);
        } else {
            self.strikes.insert(partner, strikes);
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.grudges.clear();
        self.strikes.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// A Redeemer whose perception of the partner's intent is wrong 25%
/// of the time, in either direction, and who trusts what it perceives
/// completely.
pub struct ChaoticRedeemer {
    core: StrategyCore,
    grudges: HashSet<StrategyId>,
    strikes: HashMap<StrategyId, u32>,
}

impl ChaoticRedeemer {
    const P_MISJUDGE: f64 = 0.25;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            grudges: HashSet::new(),
            strikes: HashMap::new(),
        }
    }
}

impl Default for ChaoticRedeemer {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for ChaoticRedeemer {
    fn name(&self) -> &'static str {
        "Chaotic Redeemer"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.grudges.contains(&ctx.partner_id) {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn record(&mut self, partner: StrategyId, round: RoundRecord, rng: &mut dyn RngCore) {
        self.core.record(partner, round);

        if self.grudges.contains(&partner) {
            return;
        }

        let mut perceived = round.partner_intended;
        if rng.gen::<f64>() < Self::P_MISJUDGE {
            perceived = perceived.flip();
        }

        let mut strikes = self.strikes.get(&partner).copied().unwrap_or(0);
        if round.my_intended == Move::Cooperate && perceived == Move::Cooperate {
            strikes = strikes.saturating_sub(1);
        }
        if perceived == Move::Cheat {
            strikes += 1;
        }

        if strikes >= STRIKE_LIMIT {
            self.grudges.insert(partner);
            self.strikes.remove(&partner);
        } else {
            self.strikes.insert(partner, strikes);
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.grudges.clear();
        self.strikes.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

/// A strike counter that punishes for a fixed two rounds instead of
/// blacklisting forever, then starts counting again from zero.
///
/// The punishment is kept shorter than other strategies' three-strike
/// limits so it does not trip them.
pub struct LimitedPunisher {
    core: StrategyCore,
    strikes: HashMap<StrategyId, u32>,
    punishments: HashMap<StrategyId, u32>,
}

impl LimitedPunisher {
    const PUNISHMENT_ROUNDS: u32 = 2;

    /// Create a new instance.
    pub fn new() -> Self {
        Self {
            core: StrategyCore::new(),
            strikes: HashMap::new(),
            punishments: HashMap::new(),
        }
    }
}

impl Default for LimitedPunisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for LimitedPunisher {
    fn name(&self) -> &'static str {
        "Limited Punisher"
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StrategyCore {
        &mut self.core
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Move {
        if self.punishments.get(&ctx.partner_id).copied().unwrap_or(0) > 0 {
            Move::Cheat
        } else {
            Move::Cooperate
        }
    }

    fn record(&mut self, partner: StrategyId, round: RoundRecord, _rng: &mut dyn RngCore) {
        self.core.record(partner, round);

        // While punishing: tick down the timer, no strikes either way.
        if let Some(rounds_left) = self.punishments.get_mut(&partner) {
            if *rounds_left > 0 {
                *rounds_left -= 1;
                return;
            }
        }

        let mut strikes = self.strikes.get(&partner).copied().unwrap_or(0);
        if round.result == MatchResult::Reward {
            strikes = strikes.saturating_sub(1);
        }
        if round.partner_actual == Move::Cheat {
            strikes += 1;
        }
        if strikes >= STRIKE_LIMIT {
            self.punishments.insert(partner, Self::PUNISHMENT_ROUNDS);
            self.strikes.insert(partner, 0);
        } else {
            self.strikes.insert(partner, strikes);
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.strikes.clear();
        self.punishments.clear();
    }

    fn spawn(&self) -> Box<dyn Strategy> {
        Box::new(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{decide, record_round, rng};

    #[test]
    fn redeemer_blacklists_after_three_strikes() {
        let mut rng = rng(1);
        let partner = StrategyId::new();
        let mut redeemer = Redeemer::new();

        for _ in 0..3 {
            record_round(
                &mut redeemer,
                partner,
                Move::Cooperate,
                Move::Cheat,
                &mut rng,
            );
        }
        assert_eq!(decide(&mut redeemer, partner, &[], 0, &mut rng), Move::Cheat);
    }

    #[test]
    fn redeemer_mutual_cooperation_redeems_a_strike() {
        let mut rng = rng(2);
        let partner = StrategyId::new();
        let mut redeemer = Redeemer::new();

        // Two strikes, one redemption, two more defections: still only
        // at the limit after the fifth round, not before.
        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cheat,
            &mut rng,
        );
        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cheat,
            &mut rng,
        );
        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cooperate,
            &mut rng,
        );
        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cheat,
            &mut rng,
        );
        assert_eq!(
            decide(&mut redeemer, partner, &[], 0, &mut rng),
            Move::Cooperate
        );

        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cheat,
            &mut rng,
        );
        assert_eq!(decide(&mut redeemer, partner, &[], 0, &mut rng), Move::Cheat);
    }

    #[test]
    fn limited_punisher_punishes_for_exactly_two_rounds() {
        let mut rng = rng(3);
        let partner = StrategyId::new();
        let mut punisher = LimitedPunisher::new();

        for _ in 0..3 {
            record_round(
                &mut punisher,
                partner,
                Move::Cooperate,
                Move::Cheat,
                &mut rng,
            );
        }
        // Punishment phase: two cheating rounds.
        assert_eq!(decide(&mut punisher, partner, &[], 0, &mut rng), Move::Cheat);
        record_round(&mut punisher, partner, Move::Cheat, Move::Cheat, &mut rng);
        assert_eq!(decide(&mut punisher, partner, &[], 0, &mut rng), Move::Cheat);
        record_round(&mut punisher, partner, Move::Cheat, Move::Cheat, &mut rng);

        // Timer expired, back to cooperation.
        assert_eq!(
            decide(&mut punisher, partner, &[], 0, &mut rng),
            Move::Cooperate
        );
    }

    #[test]
    fn chaotic_redeemer_base_update_still_happens() {
        let mut rng = rng(4);
        let partner = StrategyId::new();
        let mut redeemer = ChaoticRedeemer::new();

        record_round(
            &mut redeemer,
            partner,
            Move::Cooperate,
            Move::Cooperate,
            &mut rng,
        );
        assert_eq!(redeemer.score(), 3);
        assert_eq!(redeemer.core().public().len(), 1);
    }

    #[test]
    fn skeptical_redeemer_eventually_blacklists_a_cheater() {
        let mut rng = rng(5);
        let partner = StrategyId::new();
        let mut redeemer = SkepticalRedeemer::new();

        // With a 25% notice rate, 100 blatant defections are far more
        // than enough to reach three strikes.
        for _ in 0..100 {
            record_round(
                &mut redeemer,
                partner,
                Move::Cooperate,
                Move::Cheat,
                &mut rng,
            );
        }
        assert_eq!(decide(&mut redeemer, partner, &[], 0, &mut rng), Move::Cheat);
    }
}
