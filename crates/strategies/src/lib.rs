//! Strategy contract and the concrete decision strategies.
//!
//! Every strategy keeps two kinds of memory: a private per-partner
//! history ("what I personally experienced with this partner") and a
//! public global history ("every round I have played, against anyone").
//! The public history is what opponents see when they decide.

// Contract and shared per-actor state
mod contract;

// Ordered factory registry
mod registry;

// Decision archetypes
mod grudge;
mod pavlov;
mod prober;
mod reactive;
mod redeemer;
mod social;
mod unconditional;

pub use contract::{DecisionContext, Strategy, StrategyCore};
pub use registry::{default_registry, StrategyRegistry};

pub use grudge::{Grudger, TolerantGrudger};

pub use pavlov::{GlobalPavlov, Pavlov, StochasticPavlov};
pub use prober::{GreedyProber, SmartProber};
pub use reactive::{ForgivingTitForTat, GenerousTitForTat, Joss, TitForTat, TitForTwoTats};
pub use redeemer::{ChaoticRedeemer, LimitedPunisher, Redeemer, SkepticalRedeemer};
pub use social::{Bully, SmartEnvious, Statistical};
pub use unconditional::{AlwaysCheat, AlwaysCooperate, Awkward, Random};

#[cfg(test)]
pub(crate) mod testutil {
    use dilemma_core::{resolve, Move, RoundRecord, StrategyId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{DecisionContext, Strategy};

    pub fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// One decision with an explicit partner view.
    pub fn decide(
        s: &mut dyn Strategy,
        partner: StrategyId,
        partner_public: &[RoundRecord],
        partner_score: u32,
        rng: &mut ChaCha8Rng,
    ) -> Move {
        let mut ctx = DecisionContext {
            partner_id: partner,
            partner_public,
            partner_score,
            rng,
        };
        s.decide(&mut ctx)
    }

    /// A round record where nobody's move was flipped by noise.
    pub fn clean_round(mine: Move, theirs: Move) -> RoundRecord {
        let (result, _) = resolve(mine, theirs);
        RoundRecord::new(mine, mine, theirs, theirs, result).unwrap()
    }

    /// Record a noise-free round against `partner`.
    pub fn record_round(
        s: &mut dyn Strategy,
        partner: StrategyId,
        mine: Move,
        theirs: Move,
        rng: &mut ChaCha8Rng,
    ) {
        s.record(partner, clean_round(mine, theirs), rng);
    }
}
