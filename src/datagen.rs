// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::ops::Range;

/// Integer arrays are drawn uniformly from this range.
pub const DOMAIN: Range<i32> = -10000..10000;

/// Source of input arrays. It owns its generator, so two supplies built
/// from the same seed produce the same arrays.
#[derive(Debug, Clone)]
pub struct ArraySupply {
    rng: ChaCha12Rng,
}

impl ArraySupply {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: ChaCha12Rng::from_os_rng(),
        }
    }

    pub fn zeroed_bytes(n: usize) -> Vec<u8> {
        vec![0; n]
    }

    pub fn random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut result = vec![0; n];
        self.rng.fill(result.as_mut_slice());
        result
    }

    pub fn random_ints(&mut self, n: usize) -> Vec<i32> {
        (0..n).map(|_| self.random_item()).collect()
    }

    pub fn random_item(&mut self) -> i32 {
        self.rng.random_range(DOMAIN)
    }

    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn random_index(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_supply_is_reproducible() {
        let mut a = ArraySupply::seeded(31337);
        let mut b = ArraySupply::seeded(31337);
        assert_eq!(a.random_bytes(1000), b.random_bytes(1000));
        assert_eq!(a.random_ints(1000), b.random_ints(1000));
        assert_eq!(a.random_item(), b.random_item());
        let mut c = ArraySupply::seeded(31338);
        assert_ne!(a.random_ints(1000), c.random_ints(1000));
    }

    #[test]
    fn ints_stay_within_domain() {
        let mut supply = ArraySupply::new(None);
        let ints = supply.random_ints(100000);
        assert!(ints.iter().all(|x| DOMAIN.contains(x)));
        assert!(ints.iter().any(|&x| x < 0) && ints.iter().any(|&x| x > 0));
    }

    #[test]
    fn zero_length() {
        let mut supply = ArraySupply::seeded(0);
        assert!(supply.random_bytes(0).is_empty());
        assert!(supply.random_ints(0).is_empty());
        assert!(ArraySupply::zeroed_bytes(0).is_empty());
        assert!(ArraySupply::zeroed_bytes(17).iter().all(|&x| x == 0));
    }

    #[test]
    fn random_index_is_in_bounds() {
        let mut supply = ArraySupply::seeded(31337);
        assert_eq!(supply.random_index(1), 0);
        assert!((0..1000).all(|_| supply.random_index(7) < 7));
    }

    #[test]
    #[should_panic]
    fn random_index_of_nothing() {
        ArraySupply::seeded(31337).random_index(0);
    }
}
