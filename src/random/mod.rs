// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Seeded randomness for plan generation.
//!
//! This module provides:
//! - The MT19937 generator used for every seeded plan
//! - Bit, bounded-integer and shuffle draws that consume the generator
//!   exactly as the published stimulus sets did, so a seed reproduces
//!   the same plan bit-for-bit

pub mod mt19937;

pub use mt19937::Mt19937;

use rand::RngCore;

/// Draw a single fair bit (0 or 1)
pub fn random_bit<R: RngCore + ?Sized>(rng: &mut R) -> u8 {
    (rng.next_u32() & 1) as u8
}

/// Draw a uniform integer in `0..=max` by masked rejection
///
/// The mask is the smallest all-ones pattern covering `max`; draws above
/// `max` are discarded. `max == 0` consumes nothing.
pub fn random_interval<R: RngCore + ?Sized>(rng: &mut R, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }

    let mut mask = max;
    mask |= mask >> 1;
    mask |= mask >> 2;
    mask |= mask >> 4;
    mask |= mask >> 8;
    mask |= mask >> 16;

    loop {
        let value = rng.next_u32() & mask;
        if value <= max {
            return value;
        }
    }
}

/// Fisher-Yates shuffle from the last element down to index 1
pub fn shuffle<T, R: RngCore + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random_interval(rng, i as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bits_follow_low_word_bit() {
        let mut rng = Mt19937::new(0);
        let bits: Vec<u8> = (0..8).map(|_| random_bit(&mut rng)).collect();
        assert_eq!(bits, vec![0, 1, 1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_interval_zero_consumes_nothing() {
        let mut a = Mt19937::new(3);
        let mut b = Mt19937::new(3);
        assert_eq!(random_interval(&mut a, 0), 0);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_interval_reference_draws() {
        let mut rng = Mt19937::new(0);
        let draws: Vec<u32> = (0..5).map(|_| random_interval(&mut rng, 14)).collect();
        assert_eq!(draws, vec![12, 5, 0, 3, 11]);
    }

    #[test]
    fn test_interval_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for max in [1u32, 2, 3, 7, 8, 100, 1000] {
            for _ in 0..500 {
                assert!(random_interval(&mut rng, max) <= max);
            }
        }
    }

    #[test]
    fn test_shuffle_reference_order() {
        let mut rng = Mt19937::new(0);
        let mut items: Vec<usize> = (0..5).collect();
        shuffle(&mut rng, &mut items);
        assert_eq!(items, vec![2, 0, 1, 3, 4]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<usize> = (0..64).collect();
        shuffle(&mut rng, &mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut rng = Mt19937::new(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut rng, &mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9u8];
        shuffle(&mut rng, &mut single);
        assert_eq!(single, vec![9]);
    }
}
