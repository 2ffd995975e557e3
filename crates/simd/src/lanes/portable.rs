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

use super::{ByteLanes, IntLanes};

/// Array-backed lanes, 256 bits wide.
///
/// Every operation is a fully unrolled loop over the lanes, which the
/// compiler lowers to whatever vector instructions the target has.
#[derive(Debug, Clone, Copy)]
pub struct Portable;

impl ByteLanes for Portable {
    const NAME: &'static str = "portable";
    const LANES: usize = 32;

    type Vector = [u8; 32];
    type Mask = [bool; 32];

    #[inline(always)]
    fn load(this: &[u8], offset: usize) -> [u8; 32] {
        *this[offset..]
            .first_chunk::<32>()
            .expect("chunk is out of bounds")
    }

    #[inline(always)]
    fn compare_eq(lhs: [u8; 32], rhs: [u8; 32]) -> [bool; 32] {
        seq_macro::seq!(I in 0..32 {
            [#(lhs[I] == rhs[I],)*]
        })
    }

    #[inline(always)]
    fn reduce_all(mask: [bool; 32]) -> bool {
        let mut all = true;
        seq_macro::seq!(I in 0..32 {
            all &= mask[I];
        });
        all
    }
}

impl IntLanes for Portable {
    const NAME: &'static str = "portable";
    const LANES: usize = 8;

    type Vector = [i32; 8];
    type Accumulator = [i64; 8];

    #[inline(always)]
    fn load(this: &[i32], offset: usize) -> [i32; 8] {
        *this[offset..]
            .first_chunk::<8>()
            .expect("chunk is out of bounds")
    }

    #[inline(always)]
    fn zero() -> [i32; 8] {
        [0; 8]
    }

    #[inline(always)]
    fn splat(x: i32) -> [i32; 8] {
        [x; 8]
    }

    #[inline(always)]
    fn add(lhs: [i32; 8], rhs: [i32; 8]) -> [i32; 8] {
        seq_macro::seq!(I in 0..8 {
            [#(lhs[I].wrapping_add(rhs[I]),)*]
        })
    }

    #[inline(always)]
    fn sub(lhs: [i32; 8], rhs: [i32; 8]) -> [i32; 8] {
        seq_macro::seq!(I in 0..8 {
            [#(lhs[I].wrapping_sub(rhs[I]),)*]
        })
    }

    #[inline(always)]
    fn compare_eq(lhs: [i32; 8], rhs: [i32; 8]) -> [i32; 8] {
        seq_macro::seq!(I in 0..8 {
            [#(-((lhs[I] == rhs[I]) as i32),)*]
        })
    }

    #[inline(always)]
    fn reduce_sum(this: [i32; 8]) -> i64 {
        let mut sum = 0_i64;
        seq_macro::seq!(I in 0..8 {
            sum += this[I] as i64;
        });
        sum
    }

    #[inline(always)]
    fn accumulator_zero() -> [i64; 8] {
        [0; 8]
    }

    #[inline(always)]
    fn accumulate(acc: [i64; 8], x: [i32; 8]) -> [i64; 8] {
        seq_macro::seq!(I in 0..8 {
            [#(acc[I] + x[I] as i64,)*]
        })
    }

    #[inline(always)]
    fn reduce_accumulator(acc: [i64; 8]) -> i64 {
        acc.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_eq_is_minus_one_or_zero() {
        let x = [1, -1, i32::MIN, i32::MAX, 0, 7, 7, -7];
        let y = [1, 1, i32::MIN, i32::MIN, 0, 7, -7, -7];
        let mask = <Portable as IntLanes>::compare_eq(x, y);
        assert_eq!(mask, [-1, 0, -1, 0, -1, -1, 0, -1]);
        assert_eq!(<Portable as IntLanes>::reduce_sum(mask), -5);
        let counter = Portable::sub(Portable::zero(), mask);
        assert_eq!(Portable::reduce_count(counter), 5);
    }

    #[test]
    fn accumulate_does_not_truncate() {
        let x = Portable::splat(i32::MAX);
        let mut acc = Portable::accumulator_zero();
        for _ in 0..4 {
            acc = Portable::accumulate(acc, x);
        }
        assert_eq!(Portable::reduce_accumulator(acc), 32 * i32::MAX as i64);
    }

    #[test]
    fn reduce_all_needs_every_lane() {
        let x = [3_u8; 32];
        let mut y = x;
        assert!(Portable::reduce_all(<Portable as ByteLanes>::compare_eq(x, y)));
        y[31] = 4;
        assert!(!Portable::reduce_all(<Portable as ByteLanes>::compare_eq(x, y)));
    }

    #[test]
    #[should_panic]
    fn load_past_the_end_panics() {
        let this = [0_u8; 40];
        let _ = <Portable as ByteLanes>::load(&this, 9);
    }
}
