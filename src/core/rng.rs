//! The single seedable random source of a run.
//!
//! Map shape, enemy move choice, damage variance, speed ties and reward draws
//! all borrow this generator as `&mut impl Rng`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator owned by whoever drives a run.
pub type GameRng = ChaCha8Rng;

/// Reproducible when seeded, entropy-backed otherwise.
pub fn seeded_rng(seed: Option<u64>) -> GameRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
