//! Deterministic randomness for the whole simulation.
//!
//! [`SeededRng`] is the only random source in game-core. Independent decisions
//! (a battle, a reward screen, a shop) each construct their own instance from a
//! sub-seed produced by [`seed`], so generating one never shifts the stream of
//! another.
//!
//! # Determinism
//!
//! The generator is a 48-bit linear congruential generator with fixed
//! constants. Given the same seed it produces the same sequence on every
//! platform and process. Changing any constant here breaks every stored seed.

mod hash;
pub mod seed;

pub use hash::fnv1a64;

/// Seeded linear congruential generator.
///
/// Draws are taken from the top 31 bits of the 48-bit state and reduced with a
/// plain modulo. The resulting small bias toward low values is a fixed property
/// of the generator; call sites depend on it staying exactly as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// LCG multiplier constant.
    const MULTIPLIER: u64 = 0x5_DEEC_E66D;

    /// LCG increment constant.
    const ADDEND: u64 = 0xB;

    /// State is kept modulo 2^48.
    const MASK: u64 = (1 << 48) - 1;

    /// Creates a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ Self::MULTIPLIER) & Self::MASK,
        }
    }

    /// Advance the state and return its top `bits` bits.
    ///
    /// `state' = (state × multiplier + addend) mod 2^48`
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::ADDEND)
            & Self::MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Returns a value in `[0, upper_bound)`.
    ///
    /// Returns 0 without advancing the state when `upper_bound` is 0.
    pub fn next_int(&mut self, upper_bound: usize) -> usize {
        if upper_bound == 0 {
            return 0;
        }
        self.next_bits(31) as usize % upper_bound
    }

    /// Returns a value in `[low, high]` inclusive.
    ///
    /// Used for HP rolls and gold amounts. `high < low` yields `low`.
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as usize;
        low + self.next_int(span) as i32
    }

    /// Fisher–Yates shuffle in place, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(i + 1);
            items.swap(i, j);
        }
    }

    /// Returns a shuffled copy of `items`.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_stable_for_known_seed() {
        let mut rng = SeededRng::new(0);
        let draws: Vec<usize> = (0..5).map(|_| rng.next_int(10)).collect();
        assert_eq!(draws, vec![0, 8, 9, 7, 5]);

        let mut rng = SeededRng::new(42);
        let draws: Vec<usize> = (0..8).map(|_| rng.next_int(100)).collect();
        assert_eq!(draws, vec![30, 63, 48, 84, 70, 25, 5, 18]);
    }

    #[test]
    fn zero_upper_bound_does_not_advance() {
        let mut a = SeededRng::new(7);
        let b = a.clone();
        assert_eq!(a.next_int(0), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_walks_from_the_back() {
        let mut rng = SeededRng::new(42);
        let shuffled = rng.shuffled(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(shuffled, vec![1, 4, 5, 0, 3, 2]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeededRng::new(99);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn range_inclusive_stays_in_bounds() {
        let mut rng = SeededRng::new(3);
        for _ in 0..200 {
            let v = rng.range_inclusive(40, 44);
            assert!((40..=44).contains(&v));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
    }
}
