//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/> implemented to satisfy the [RngCore](rand_core::RngCore) trait.
//!
//! PCG(32) was chosen as the source of (pseudo)random numbers as it is simple, fast, and has some nice supporting documentation.
//!
//! Each [context](crate::context) stores a source of rng, parameterised to anything which satisfies the [Rng](rand::Rng) trait.
//! Though to keep the rest of the library straightforward the rng is fixed in the [context](crate::context::Context) as [MinimalPCG32], seeded from the [configuration](crate::config::Config).
//! Still, revising or parameterising the context is all that's needed for a different source of rng.

use rand::SeedableRng;
use rand_core::{impls, RngCore};

/// State and increment.
#[derive(Clone, Debug, Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        /// Entirely unmotivated, though odd, as the increment must be.
        const INCREMENT: u64 = 1442695040888963407;
        let mut rng = Self {
            state: 0,
            inc: INCREMENT,
        };
        // Standard PCG initialisation: advance once, mix in the seed, advance again.
        rng.next_u32();
        rng.state = rng.state.wrapping_add(u64::from_le_bytes(seed));
        rng.next_u32();
        rng
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = MinimalPCG32::from_seed(2_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(2_u64.to_le_bytes());
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seed_different_stream() {
        let mut a = MinimalPCG32::from_seed(2_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(73_u64.to_le_bytes());
        let a_head = (0..8).map(|_| a.next_u32()).collect::<Vec<_>>();
        let b_head = (0..8).map(|_| b.next_u32()).collect::<Vec<_>>();
        assert_ne!(a_head, b_head);
    }
}
