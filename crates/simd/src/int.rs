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

#[cfg(test)]
macro_rules! backend_tests {
    ($check:ident) => {
        #[test]
        fn portable_test() {
            $check::<crate::lanes::Portable>();
        }

        #[cfg(target_arch = "x86_64")]
        #[test]
        fn sse2_test() {
            $check::<crate::lanes::Sse2>();
        }

        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        #[test]
        fn avx2_test() {
            $check::<crate::lanes::Avx2>();
        }

        #[cfg(all(
            target_arch = "x86_64",
            target_feature = "avx512f",
            target_feature = "avx512bw"
        ))]
        #[test]
        #[cfg_attr(miri, ignore)]
        fn avx512_test() {
            $check::<crate::lanes::Avx512>();
        }

        #[cfg(target_arch = "aarch64")]
        #[test]
        fn neon_test() {
            $check::<crate::lanes::Neon>();
        }
    };
}

pub mod reduce_sum_of_x {
    use crate::lanes::IntLanes;

    /// Sums `this` in `i64`.
    ///
    /// Chunks are added into 64-bit accumulator lanes and reduced once at the
    /// end, so the result is exact for every input.
    #[inline]
    pub fn vectorized<B: IntLanes>(this: &[i32]) -> i64 {
        let n = this.len();
        let body = n - n % B::LANES;
        let mut acc = B::accumulator_zero();
        let mut i = 0;
        while i < body {
            acc = B::accumulate(acc, B::load(this, i));
            i += B::LANES;
        }
        let mut sum = B::reduce_accumulator(acc);
        while i < n {
            sum += this[i] as i64;
            i += 1;
        }
        sum
    }

    pub fn iterator(this: &[i32]) -> i64 {
        this.iter().map(|&x| x as i64).sum()
    }

    pub fn fallback(this: &[i32]) -> i64 {
        let n = this.len();
        let mut sum = 0_i64;
        for i in 0..n {
            sum += this[i] as i64;
        }
        sum
    }

    #[cfg(test)]
    fn check<B: IntLanes>() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..if cfg!(not(miri)) { 64 } else { 1 } {
            let n = 4016;
            let this = (0..n)
                .map(|_| rng.random_range(-10000..10000))
                .collect::<Vec<i32>>();
            let window = if cfg!(not(miri)) { 3984 } else { 4000 };
            for z in (0..=3 * B::LANES).chain(window..n) {
                let this = &this[..z];
                let specialized = vectorized::<B>(this);
                let fallback = fallback(this);
                assert_eq!(specialized, fallback, "{}: z = {z}", B::NAME);
            }
        }
        for x in [i32::MIN, i32::MAX, -1] {
            let this = vec![x; 4 * B::LANES + 3];
            assert_eq!(vectorized::<B>(&this), x as i64 * this.len() as i64);
        }
    }

    #[cfg(test)]
    backend_tests!(check);
}

/// Exact `i64` sum of `this`, using the widest backend compiled in.
#[inline(always)]
pub fn reduce_sum_of_x(this: &[i32]) -> i64 {
    reduce_sum_of_x::vectorized::<crate::lanes::Native>(this)
}

pub mod reduce_sum_of_x_wrapping {
    use crate::lanes::IntLanes;

    /// Sums `this` in `i32`, wrapping on overflow.
    ///
    /// Wrapping addition is associative, so the lane order does not change
    /// the result.
    #[inline]
    pub fn vectorized<B: IntLanes>(this: &[i32]) -> i32 {
        let n = this.len();
        let body = n - n % B::LANES;
        let mut acc = B::zero();
        let mut i = 0;
        while i < body {
            acc = B::add(acc, B::load(this, i));
            i += B::LANES;
        }
        let mut sum = B::reduce_sum(acc) as i32;
        while i < n {
            sum = sum.wrapping_add(this[i]);
            i += 1;
        }
        sum
    }

    pub fn fallback(this: &[i32]) -> i32 {
        let n = this.len();
        let mut sum = 0_i32;
        for i in 0..n {
            sum = sum.wrapping_add(this[i]);
        }
        sum
    }

    #[cfg(test)]
    fn check<B: IntLanes>() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..if cfg!(not(miri)) { 64 } else { 1 } {
            let n = 4016;
            let this = (0..n).map(|_| rng.random()).collect::<Vec<i32>>();
            let window = if cfg!(not(miri)) { 3984 } else { 4000 };
            for z in (0..=3 * B::LANES).chain(window..n) {
                let this = &this[..z];
                let specialized = vectorized::<B>(this);
                let fallback = fallback(this);
                assert_eq!(specialized, fallback, "{}: z = {z}", B::NAME);
            }
        }
    }

    #[cfg(test)]
    backend_tests!(check);
}

/// `i32` sum of `this` with wrapping overflow, using the widest backend
/// compiled in.
#[inline(always)]
pub fn reduce_sum_of_x_wrapping(this: &[i32]) -> i32 {
    reduce_sum_of_x_wrapping::vectorized::<crate::lanes::Native>(this)
}

pub mod reduce_count_of_eq {
    use crate::lanes::IntLanes;

    /// A counter lane grows by at most one per chunk, so it is folded into
    /// the total after this many chunks.
    const FOLD: usize = i32::MAX as usize;

    /// Counts the elements of `this` equal to `item`.
    ///
    /// Each chunk's equality mask (`-1` per matching lane) is subtracted from
    /// a vector of counters, so every match adds one to its lane.
    #[inline]
    pub fn vectorized<B: IntLanes>(this: &[i32], item: i32) -> usize {
        folding::<B>(this, item, FOLD)
    }

    /// Counts with the counter vector folded into the total every `fold`
    /// chunks.
    #[inline(always)]
    fn folding<B: IntLanes>(this: &[i32], item: i32, fold: usize) -> usize {
        assert!(fold > 0);
        let n = this.len();
        let body = n - n % B::LANES;
        let needle = B::splat(item);
        let mut count = 0_usize;
        let mut i = 0;
        while i < body {
            let end = body.min(i.saturating_add(fold.saturating_mul(B::LANES)));
            let mut counter = B::zero();
            while i < end {
                let x = B::load(this, i);
                counter = B::sub(counter, B::compare_eq(x, needle));
                i += B::LANES;
            }
            count += B::reduce_count(counter);
        }
        while i < n {
            if this[i] == item {
                count += 1;
            }
            i += 1;
        }
        count
    }

    pub fn iterator(this: &[i32], item: i32) -> usize {
        this.iter().filter(|&&x| x == item).count()
    }

    pub fn fallback(this: &[i32], item: i32) -> usize {
        let n = this.len();
        let mut count = 0;
        for i in 0..n {
            if this[i] == item {
                count += 1;
            }
        }
        count
    }

    #[cfg(test)]
    fn check<B: IntLanes>() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..if cfg!(not(miri)) { 64 } else { 1 } {
            let n = 4016;
            let this = (0..n)
                .map(|_| rng.random_range(-3..3))
                .collect::<Vec<i32>>();
            let item = rng.random_range(-3..3);
            let window = if cfg!(not(miri)) { 3984 } else { 4000 };
            for z in (0..=3 * B::LANES).chain(window..n) {
                let this = &this[..z];
                let specialized = vectorized::<B>(this, item);
                let fallback = fallback(this, item);
                assert_eq!(specialized, fallback, "{}: z = {z}", B::NAME);
            }
        }
        let this = (0..1003).map(|i| i % 3).collect::<Vec<i32>>();
        for fold in [1, 2, 3, 7] {
            for item in 0..3 {
                assert_eq!(
                    folding::<B>(&this, item, fold),
                    fallback(&this, item),
                    "{}: fold = {fold}",
                    B::NAME
                );
            }
        }
        // an all-ones lane must not be mistaken for a mask
        let this = [-1, i32::MIN, -1, 0, i32::MAX, -1, i32::MIN]
            .repeat(B::LANES + 1);
        for item in [-1, 0, i32::MIN, i32::MAX, 1] {
            assert_eq!(
                vectorized::<B>(&this, item),
                fallback(&this, item),
                "{}: item = {item}",
                B::NAME
            );
        }
    }

    #[cfg(test)]
    backend_tests!(check);
}

/// Number of elements of `this` equal to `item`, using the widest backend
/// compiled in.
#[inline(always)]
pub fn reduce_count_of_eq(this: &[i32], item: i32) -> usize {
    reduce_count_of_eq::vectorized::<crate::lanes::Native>(this, item)
}

#[test]
fn native_test() {
    let this = (-500..500).collect::<Vec<i32>>();
    assert_eq!(reduce_sum_of_x(&this), -500);
    assert_eq!(reduce_sum_of_x_wrapping(&[i32::MAX, 1]), i32::MIN);
    assert_eq!(reduce_count_of_eq(&this.repeat(3), 7), 3);
}
