//! Seeded random number generation.
//!
//! Every engine owns exactly one stream created here. Runs with an explicit
//! seed are reproducible; runs without one draw a seed from the OS and
//! report it in their result so they can be replayed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional configured seed to a concrete one.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..32 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_resolve_explicit_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }
}
