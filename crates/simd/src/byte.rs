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

pub mod is_equal {
    use crate::lanes::ByteLanes;

    /// Compares `lhs` and `rhs` one chunk of `B::LANES` bytes at a time,
    /// returning at the first chunk that differs. The bytes after the last
    /// full chunk are compared one by one.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[inline]
    pub fn vectorized<B: ByteLanes>(lhs: &[u8], rhs: &[u8]) -> bool {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let body = n - n % B::LANES;
        let mut i = 0;
        while i < body {
            let x = B::load(lhs, i);
            let y = B::load(rhs, i);
            if !B::reduce_all(B::compare_eq(x, y)) {
                return false;
            }
            i += B::LANES;
        }
        while i < n {
            if lhs[i] != rhs[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Calls the C library's `memcmp`.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn memcmp(lhs: &[u8], rhs: &[u8]) -> bool {
        use core::ffi::{c_int, c_void};
        unsafe extern "C" {
            #[link_name = "memcmp"]
            unsafe fn f(s1: *const c_void, s2: *const c_void, n: usize) -> c_int;
        }
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        if n == 0 {
            return true;
        }
        unsafe { f(lhs.as_ptr().cast(), rhs.as_ptr().cast(), n) == 0 }
    }

    pub fn iterator(lhs: &[u8], rhs: &[u8]) -> bool {
        assert_eq!(lhs.len(), rhs.len());
        lhs.iter().zip(rhs).all(|(x, y)| x == y)
    }

    pub fn fallback(lhs: &[u8], rhs: &[u8]) -> bool {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            if lhs[i] != rhs[i] {
                return false;
            }
        }
        true
    }

    #[cfg(test)]
    fn check<B: ByteLanes>() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..if cfg!(not(miri)) { 64 } else { 1 } {
            let n = 4016;
            let lhs = (0..n).map(|_| rng.random()).collect::<Vec<u8>>();
            let mut rhs = lhs.clone();
            let window = if cfg!(not(miri)) { 3984 } else { 4000 };
            for z in (0..=3 * B::LANES).chain(window..n) {
                let specialized = vectorized::<B>(&lhs[..z], &rhs[..z]);
                assert!(specialized, "{}: z = {z}", B::NAME);
                if z == 0 {
                    continue;
                }
                let k = rng.random_range(0..z);
                rhs[k] ^= 1 + rng.random_range(0..255_u8);
                let specialized = vectorized::<B>(&lhs[..z], &rhs[..z]);
                let fallback = fallback(&lhs[..z], &rhs[..z]);
                assert!(!fallback);
                assert!(
                    specialized == fallback,
                    "{}: z = {z}, k = {k}, specialized = {specialized}, fallback = {fallback}.",
                    B::NAME
                );
                rhs[k] = lhs[k];
            }
        }
    }

    #[test]
    fn is_equal_portable_test() {
        check::<crate::lanes::Portable>();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn is_equal_sse2_test() {
        check::<crate::lanes::Sse2>();
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    #[test]
    fn is_equal_avx2_test() {
        check::<crate::lanes::Avx2>();
    }

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512bw"
    ))]
    #[test]
    #[cfg_attr(miri, ignore)]
    fn is_equal_avx512_test() {
        check::<crate::lanes::Avx512>();
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn is_equal_neon_test() {
        check::<crate::lanes::Neon>();
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn is_equal_memcmp_test() {
        let lhs = vec![b'0'; 100];
        assert!(memcmp(&lhs, &lhs));
        assert!(memcmp(&[], &[]));
        for i in 0..lhs.len() {
            let mut rhs = lhs.clone();
            rhs[i] = b'1';
            assert!(!memcmp(&lhs, &rhs));
            assert!(!memcmp(&rhs, &lhs));
        }
    }

    #[test]
    #[should_panic]
    fn is_equal_length_mismatch_test() {
        vectorized::<crate::lanes::Portable>(&[0; 40], &[0; 39]);
    }
}

/// Byte-wise equality of two slices of the same length, using the widest
/// backend compiled in.
#[inline(always)]
pub fn is_equal(lhs: &[u8], rhs: &[u8]) -> bool {
    is_equal::vectorized::<crate::lanes::Native>(lhs, rhs)
}

#[test]
fn is_equal_test() {
    let lhs = (0..1000).map(|i| i as u8).collect::<Vec<_>>();
    let mut rhs = lhs.clone();
    assert!(is_equal(&lhs, &rhs));
    for i in [0, 500, 999] {
        rhs[i] ^= 1;
        assert!(!is_equal(&lhs, &rhs), "i = {i}");
        rhs[i] ^= 1;
    }
}
