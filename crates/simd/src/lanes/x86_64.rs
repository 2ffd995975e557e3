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

// Every backend here is compiled only when its features are enabled for the
// whole crate, so calling the intrinsics is sound. Older toolchains still
// require `unsafe` for that, newer ones warn about it.
#![allow(unused_unsafe)]

use super::{ByteLanes, IntLanes};
use core::arch::x86_64::*;

/// SSE2, part of the x86_64 baseline.
#[derive(Debug, Clone, Copy)]
pub struct Sse2;

impl ByteLanes for Sse2 {
    const NAME: &'static str = "sse2";
    const LANES: usize = 16;

    type Vector = __m128i;
    type Mask = __m128i;

    #[inline(always)]
    fn load(this: &[u8], offset: usize) -> __m128i {
        let chunk = &this[offset..offset + 16];
        unsafe { _mm_loadu_si128(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m128i, rhs: __m128i) -> __m128i {
        unsafe { _mm_cmpeq_epi8(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_all(mask: __m128i) -> bool {
        unsafe { _mm_movemask_epi8(mask) == 0xffff }
    }
}

impl IntLanes for Sse2 {
    const NAME: &'static str = "sse2";
    const LANES: usize = 4;

    type Vector = __m128i;
    type Accumulator = __m128i;

    #[inline(always)]
    fn load(this: &[i32], offset: usize) -> __m128i {
        let chunk = &this[offset..offset + 4];
        unsafe { _mm_loadu_si128(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn zero() -> __m128i {
        unsafe { _mm_setzero_si128() }
    }

    #[inline(always)]
    fn splat(x: i32) -> __m128i {
        unsafe { _mm_set1_epi32(x) }
    }

    #[inline(always)]
    fn add(lhs: __m128i, rhs: __m128i) -> __m128i {
        unsafe { _mm_add_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn sub(lhs: __m128i, rhs: __m128i) -> __m128i {
        unsafe { _mm_sub_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m128i, rhs: __m128i) -> __m128i {
        unsafe { _mm_cmpeq_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_sum(this: __m128i) -> i64 {
        let mut lanes = [0_i32; 4];
        unsafe { _mm_storeu_si128(lanes.as_mut_ptr().cast(), this) };
        lanes.iter().map(|&x| x as i64).sum()
    }

    #[inline(always)]
    fn accumulator_zero() -> __m128i {
        unsafe { _mm_setzero_si128() }
    }

    #[inline(always)]
    fn accumulate(acc: __m128i, x: __m128i) -> __m128i {
        // no `pmovsxdq` before SSE4.1, so interleave with the sign words
        unsafe {
            let sign = _mm_srai_epi32::<31>(x);
            let lo = _mm_unpacklo_epi32(x, sign);
            let hi = _mm_unpackhi_epi32(x, sign);
            _mm_add_epi64(_mm_add_epi64(acc, lo), hi)
        }
    }

    #[inline(always)]
    fn reduce_accumulator(acc: __m128i) -> i64 {
        let mut lanes = [0_i64; 2];
        unsafe { _mm_storeu_si128(lanes.as_mut_ptr().cast(), acc) };
        lanes[0] + lanes[1]
    }
}

/// AVX2, x86-64-v3.
#[cfg(target_feature = "avx2")]
#[derive(Debug, Clone, Copy)]
pub struct Avx2;

#[cfg(target_feature = "avx2")]
impl ByteLanes for Avx2 {
    const NAME: &'static str = "avx2";
    const LANES: usize = 32;

    type Vector = __m256i;
    type Mask = __m256i;

    #[inline(always)]
    fn load(this: &[u8], offset: usize) -> __m256i {
        let chunk = &this[offset..offset + 32];
        unsafe { _mm256_loadu_si256(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m256i, rhs: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi8(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_all(mask: __m256i) -> bool {
        unsafe { _mm256_movemask_epi8(mask) == -1 }
    }
}

#[cfg(target_feature = "avx2")]
impl IntLanes for Avx2 {
    const NAME: &'static str = "avx2";
    const LANES: usize = 8;

    type Vector = __m256i;
    type Accumulator = __m256i;

    #[inline(always)]
    fn load(this: &[i32], offset: usize) -> __m256i {
        let chunk = &this[offset..offset + 8];
        unsafe { _mm256_loadu_si256(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn zero() -> __m256i {
        unsafe { _mm256_setzero_si256() }
    }

    #[inline(always)]
    fn splat(x: i32) -> __m256i {
        unsafe { _mm256_set1_epi32(x) }
    }

    #[inline(always)]
    fn add(lhs: __m256i, rhs: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn sub(lhs: __m256i, rhs: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m256i, rhs: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_sum(this: __m256i) -> i64 {
        Self::reduce_accumulator(Self::accumulate(Self::accumulator_zero(), this))
    }

    #[inline(always)]
    fn accumulator_zero() -> __m256i {
        unsafe { _mm256_setzero_si256() }
    }

    #[inline(always)]
    fn accumulate(acc: __m256i, x: __m256i) -> __m256i {
        unsafe {
            let lo = _mm256_cvtepi32_epi64(_mm256_castsi256_si128(x));
            let hi = _mm256_cvtepi32_epi64(_mm256_extracti128_si256::<1>(x));
            _mm256_add_epi64(_mm256_add_epi64(acc, lo), hi)
        }
    }

    #[inline(always)]
    fn reduce_accumulator(acc: __m256i) -> i64 {
        let mut lanes = [0_i64; 4];
        unsafe { _mm256_storeu_si256(lanes.as_mut_ptr().cast(), acc) };
        lanes.iter().sum()
    }
}

/// AVX-512 (F and BW), x86-64-v4.
#[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
#[derive(Debug, Clone, Copy)]
pub struct Avx512;

#[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
impl ByteLanes for Avx512 {
    const NAME: &'static str = "avx512";
    const LANES: usize = 64;

    type Vector = __m512i;
    type Mask = __mmask64;

    #[inline(always)]
    fn load(this: &[u8], offset: usize) -> __m512i {
        let chunk = &this[offset..offset + 64];
        unsafe { _mm512_loadu_si512(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m512i, rhs: __m512i) -> __mmask64 {
        unsafe { _mm512_cmpeq_epi8_mask(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_all(mask: __mmask64) -> bool {
        mask == u64::MAX
    }
}

#[cfg(all(target_feature = "avx512f", target_feature = "avx512bw"))]
impl IntLanes for Avx512 {
    const NAME: &'static str = "avx512";
    const LANES: usize = 16;

    type Vector = __m512i;
    type Accumulator = __m512i;

    #[inline(always)]
    fn load(this: &[i32], offset: usize) -> __m512i {
        let chunk = &this[offset..offset + 16];
        unsafe { _mm512_loadu_si512(chunk.as_ptr().cast()) }
    }

    #[inline(always)]
    fn zero() -> __m512i {
        unsafe { _mm512_setzero_si512() }
    }

    #[inline(always)]
    fn splat(x: i32) -> __m512i {
        unsafe { _mm512_set1_epi32(x) }
    }

    #[inline(always)]
    fn add(lhs: __m512i, rhs: __m512i) -> __m512i {
        unsafe { _mm512_add_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn sub(lhs: __m512i, rhs: __m512i) -> __m512i {
        unsafe { _mm512_sub_epi32(lhs, rhs) }
    }

    #[inline(always)]
    fn compare_eq(lhs: __m512i, rhs: __m512i) -> __m512i {
        // comparisons yield a bit mask, expand it back to -1 / 0 lanes
        unsafe {
            let k = _mm512_cmpeq_epi32_mask(lhs, rhs);
            _mm512_maskz_mov_epi32(k, _mm512_set1_epi32(-1))
        }
    }

    #[inline(always)]
    fn reduce_sum(this: __m512i) -> i64 {
        Self::reduce_accumulator(Self::accumulate(Self::accumulator_zero(), this))
    }

    #[inline(always)]
    fn accumulator_zero() -> __m512i {
        unsafe { _mm512_setzero_si512() }
    }

    #[inline(always)]
    fn accumulate(acc: __m512i, x: __m512i) -> __m512i {
        unsafe {
            let lo = _mm512_cvtepi32_epi64(_mm512_castsi512_si256(x));
            let hi = _mm512_cvtepi32_epi64(_mm512_extracti64x4_epi64::<1>(x));
            _mm512_add_epi64(_mm512_add_epi64(acc, lo), hi)
        }
    }

    #[inline(always)]
    fn reduce_accumulator(acc: __m512i) -> i64 {
        unsafe { _mm512_reduce_add_epi64(acc) }
    }
}
