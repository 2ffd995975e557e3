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

// NEON is part of the aarch64 baseline. Older toolchains still require
// `unsafe` for the intrinsics, newer ones warn about it.
#![allow(unused_unsafe)]

use super::{ByteLanes, IntLanes};
use core::arch::aarch64::*;

/// Advanced SIMD (NEON), 128 bits wide.
#[derive(Debug, Clone, Copy)]
pub struct Neon;

impl ByteLanes for Neon {
    const NAME: &'static str = "neon";
    const LANES: usize = 16;

    type Vector = uint8x16_t;
    type Mask = uint8x16_t;

    #[inline(always)]
    fn load(this: &[u8], offset: usize) -> uint8x16_t {
        let chunk = &this[offset..offset + 16];
        unsafe { vld1q_u8(chunk.as_ptr()) }
    }

    #[inline(always)]
    fn compare_eq(lhs: uint8x16_t, rhs: uint8x16_t) -> uint8x16_t {
        unsafe { vceqq_u8(lhs, rhs) }
    }

    #[inline(always)]
    fn reduce_all(mask: uint8x16_t) -> bool {
        unsafe { vminvq_u8(mask) == u8::MAX }
    }
}

impl IntLanes for Neon {
    const NAME: &'static str = "neon";
    const LANES: usize = 4;

    type Vector = int32x4_t;
    type Accumulator = int64x2_t;

    #[inline(always)]
    fn load(this: &[i32], offset: usize) -> int32x4_t {
        let chunk = &this[offset..offset + 4];
        unsafe { vld1q_s32(chunk.as_ptr()) }
    }

    #[inline(always)]
    fn zero() -> int32x4_t {
        unsafe { vdupq_n_s32(0) }
    }

    #[inline(always)]
    fn splat(x: i32) -> int32x4_t {
        unsafe { vdupq_n_s32(x) }
    }

    #[inline(always)]
    fn add(lhs: int32x4_t, rhs: int32x4_t) -> int32x4_t {
        unsafe { vaddq_s32(lhs, rhs) }
    }

    #[inline(always)]
    fn sub(lhs: int32x4_t, rhs: int32x4_t) -> int32x4_t {
        unsafe { vsubq_s32(lhs, rhs) }
    }

    #[inline(always)]
    fn compare_eq(lhs: int32x4_t, rhs: int32x4_t) -> int32x4_t {
        unsafe { vreinterpretq_s32_u32(vceqq_s32(lhs, rhs)) }
    }

    #[inline(always)]
    fn reduce_sum(this: int32x4_t) -> i64 {
        unsafe { vaddlvq_s32(this) }
    }

    #[inline(always)]
    fn accumulator_zero() -> int64x2_t {
        unsafe { vdupq_n_s64(0) }
    }

    #[inline(always)]
    fn accumulate(acc: int64x2_t, x: int32x4_t) -> int64x2_t {
        unsafe { vpadalq_s32(acc, x) }
    }

    #[inline(always)]
    fn reduce_accumulator(acc: int64x2_t) -> i64 {
        unsafe { vaddvq_s64(acc) }
    }
}
