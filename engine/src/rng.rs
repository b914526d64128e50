//! Seeded random source for a battle session
//!
//! Uses ChaCha8 so a battle replays identically from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The battle's random number generator.
///
/// Owned by the battle and handed explicitly to every calculation that may
/// consume randomness. Counts draws so callers can verify that a
/// calculation consumed none.
#[derive(Debug, Clone)]
pub struct BattleRng {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl BattleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn since creation
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform integer in `0..n`. Returns 0 for `n == 0` without drawing.
    pub fn int_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.draws += 1;
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `min..=max`. Swapped bounds are reordered.
    pub fn int_range(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.draws += 1;
        self.rng.gen_range(lo..=hi)
    }
}

#[cfg(feature = "serde")]
mod persist {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct RngState {
        seed: u64,
        word_pos: u128,
        draws: u64,
    }

    // Seed plus stream position restores the exact generator state.
    impl Serialize for BattleRng {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            RngState {
                seed: self.seed,
                word_pos: self.rng.get_word_pos(),
                draws: self.draws,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for BattleRng {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let state = RngState::deserialize(deserializer)?;
            let mut rng = ChaCha8Rng::seed_from_u64(state.seed);
            rng.set_word_pos(state.word_pos);
            Ok(BattleRng {
                rng,
                seed: state.seed,
                draws: state.draws,
            })
        }
    }
}
