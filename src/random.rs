//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a reproducible RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Splits off an independent stream seeded from `parent`.
///
/// Used to give each population slot its own generator so slots can be
/// processed on any thread without changing the result.
pub fn split_rng<R: Rng + ?Sized>(parent: &mut R) -> StdRng {
    create_rng(parent.random())
}
