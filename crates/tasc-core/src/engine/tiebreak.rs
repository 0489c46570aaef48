use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded uniform choice among equally scored candidates.
///
/// This is the only source of randomness in the engine; a fixed seed makes
/// whole episodes reproducible.
#[derive(Debug, Clone)]
pub struct TieBreaker {
    rng: ChaCha8Rng,
}

impl TieBreaker {
    /// Create a tie-breaker with a deterministic seed.
    pub fn from_seed(seed: u64) -> Self {
        TieBreaker {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick one candidate uniformly at random. `None` only for an empty slice.
    pub fn choose<T: Copy>(&mut self, candidates: &[T]) -> Option<T> {
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            len => Some(candidates[self.rng.gen_range(0..len)]),
        }
    }
}
