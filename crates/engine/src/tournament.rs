//! Tournament evaluation: random pairwise single-round interactions.

use dilemma_core::{resolve, RoundRecord, SimulationError, TournamentParams};
use dilemma_strategies::{DecisionContext, Strategy};
use rand::Rng;
use tracing::debug;

use crate::apply_noise;

/// Play exactly one round between two actors.
///
/// Both decisions are taken from pre-round state, noise is applied
/// independently per side, and each side records the mirrored result
/// exactly once.
pub fn play_round<R: Rng>(
    a: &mut dyn Strategy,
    b: &mut dyn Strategy,
    noise: f64,
    rng: &mut R,
) -> Result<(), SimulationError> {
    let a_id = a.id();
    let b_id = b.id();

    // Decisions first: decide() never touches histories or scores, so
    // the second decider still sees the first one's pre-round state.
    let intended_a = {
        let mut ctx = DecisionContext {
            partner_id: b_id,
            partner_public: b.core().public(),
            partner_score: b.score(),
            rng: &mut *rng,
        };
        a.decide(&mut ctx)
    };
    let intended_b = {
        let mut ctx = DecisionContext {
            partner_id: a_id,
            partner_public: a.core().public(),
            partner_score: a.score(),
            rng: &mut *rng,
        };
        b.decide(&mut ctx)
    };

    // Independent noise draw per side.
    let actual_a = apply_noise(intended_a, noise, rng);
    let actual_b = apply_noise(intended_b, noise, rng);

    let (result_a, result_b) = resolve(actual_a, actual_b);
    let record_a = RoundRecord::new(intended_a, actual_a, intended_b, actual_b, result_a)?;
    let record_b = RoundRecord::new(intended_b, actual_b, intended_a, actual_a, result_b)?;

    a.record(b_id, record_a, &mut *rng);
    b.record(a_id, record_b, &mut *rng);
    Ok(())
}

/// Evaluate a whole population through random single-round encounters.
///
/// Resets every actor, plays
/// `floor(n * avg_matches / 2) * rounds_per_game` interactions between
/// uniformly drawn distinct pairs, then sorts the population by
/// descending score. The sort is stable, so ties keep their prior
/// relative order and runs stay reproducible.
pub fn run_tournament<R: Rng>(
    population: &mut [Box<dyn Strategy>],
    params: &TournamentParams,
    rng: &mut R,
) -> Result<(), SimulationError> {
    for actor in population.iter_mut() {
        actor.reset();
    }

    let n = population.len();
    if n < 2 {
        return Ok(());
    }

    let total_matches = (n as u64 * params.avg_matches_per_strategy as u64) / 2;
    let total_interactions = total_matches * params.rounds_per_game as u64;
    debug!(
        population = n,
        total_interactions,
        noise = params.noise,
        "running tournament"
    );

    for _ in 0..total_interactions {
        // Two draws, always yielding a distinct pair: the second index
        // is drawn from the remaining n-1 slots.
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        let (first, second) = pair_mut(population, a, b);
        play_round(first, second, params.noise, rng)?;
    }

    population.sort_by(|x, y| y.score().cmp(&x.score()));
    Ok(())
}

/// Disjoint mutable access to two distinct actors.
fn pair_mut(
    population: &mut [Box<dyn Strategy>],
    a: usize,
    b: usize,
) -> (&mut dyn Strategy, &mut dyn Strategy) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = population.split_at_mut(b);
        (left[a].as_mut(), right[0].as_mut())
    } else {
        let (left, right) = population.split_at_mut(a);
        (right[0].as_mut(), left[b].as_mut())
    }
}
