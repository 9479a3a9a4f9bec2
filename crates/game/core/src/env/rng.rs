//! RNG oracle for deterministic random number generation.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. Catch-up may run
//! the same log entry against a level long after it was scheduled, and the
//! outcome must not depend on when that happens.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one random roll made during replay.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at session start
/// * `log_index` - Position of the delayed action being applied
/// * `scope` - Identifies what is being rolled for (level, item slot)
/// * `context` - Distinguishes several rolls made for the same scope
pub fn compute_seed(game_seed: u64, log_index: u64, scope: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= log_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (scope as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Fisher–Yates shuffle where roll `i` is seeded from `seed` and `i`.
pub fn shuffle<R, T>(rng: &R, seed: u64, items: &mut [T])
where
    R: RngOracle + ?Sized,
{
    for i in (1..items.len()).rev() {
        let roll_seed = compute_seed(seed, i as u64, 0, 0);
        let j = rng.range(roll_seed, 0, i as u32) as usize;
        items.swap(i, j);
    }
}
