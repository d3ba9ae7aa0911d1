//! Move-level noise.

use dilemma_core::Move;
use rand::Rng;

/// Flip an intended move with probability `noise`.
///
/// Consumes exactly one uniform draw per call, except at `noise = 0`
/// which short-circuits without touching the random source, so
/// zero-noise runs stay replayable against the same seed.
pub fn apply_noise<R: Rng>(intended: Move, noise: f64, rng: &mut R) -> Move {
    if noise > 0.0 && rng.gen::<f64>() < noise {
        intended.flip()
    } else {
        intended
    }
}
