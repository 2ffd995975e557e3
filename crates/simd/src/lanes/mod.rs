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

//! Fixed-width lane vectors.
//!
//! A backend is a zero-sized type implementing [`ByteLanes`] and [`IntLanes`].
//! The tiling drivers in [`crate::byte`] and [`crate::int`] are generic over
//! these traits, so a backend is picked by type parameter when the driver is
//! instantiated. Which intrinsic backends exist is decided by
//! `cfg(target_feature)`, never by probing the CPU at run time.

mod portable;

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use portable::Portable;

#[cfg(target_arch = "aarch64")]
pub use aarch64::Neon;

#[cfg(target_arch = "x86_64")]
pub use x86_64::Sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub use x86_64::Avx2;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
pub use x86_64::Avx512;

/// The widest intrinsic backend enabled for this build.
#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512bw"
))]
pub type Native = Avx512;

/// The widest intrinsic backend enabled for this build.
#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(all(target_feature = "avx512f", target_feature = "avx512bw"))
))]
pub type Native = Avx2;

/// The widest intrinsic backend enabled for this build.
#[cfg(all(target_arch = "x86_64", not(target_feature = "avx2")))]
pub type Native = Sse2;

/// The widest intrinsic backend enabled for this build.
#[cfg(target_arch = "aarch64")]
pub type Native = Neon;

/// The widest intrinsic backend enabled for this build.
///
/// There is no intrinsic backend for this architecture, so the portable one
/// stands in.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub type Native = Portable;

/// Lane operations over bytes.
pub trait ByteLanes {
    const NAME: &'static str;
    /// Bytes per chunk.
    const LANES: usize;

    type Vector: Copy;
    type Mask: Copy;

    /// Loads `this[offset..offset + LANES]`.
    ///
    /// # Panics
    ///
    /// Panics if the chunk does not lie within `this`.
    fn load(this: &[u8], offset: usize) -> Self::Vector;
    fn compare_eq(lhs: Self::Vector, rhs: Self::Vector) -> Self::Mask;
    /// Returns `true` iff every lane of `mask` is set.
    fn reduce_all(mask: Self::Mask) -> bool;
}

/// Lane operations over `i32`.
///
/// Comparison masks are ordinary vectors whose lanes are `-1` (equal) or `0`.
pub trait IntLanes {
    const NAME: &'static str;
    /// `i32` elements per chunk.
    const LANES: usize;

    type Vector: Copy;
    /// `i64` lanes holding a running sum of sign-extended `i32` lanes.
    type Accumulator: Copy;

    /// Loads `this[offset..offset + LANES]`.
    ///
    /// # Panics
    ///
    /// Panics if the chunk does not lie within `this`.
    fn load(this: &[i32], offset: usize) -> Self::Vector;
    fn zero() -> Self::Vector;
    fn splat(x: i32) -> Self::Vector;
    /// Lane-wise wrapping addition.
    fn add(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    /// Lane-wise wrapping subtraction.
    fn sub(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    fn compare_eq(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    /// Sums all lanes without overflow.
    fn reduce_sum(this: Self::Vector) -> i64;

    /// Sums a vector of per-lane counters.
    ///
    /// Every lane must be non-negative.
    #[inline(always)]
    fn reduce_count(this: Self::Vector) -> usize {
        let sum = Self::reduce_sum(this);
        debug_assert!(sum >= 0);
        sum as usize
    }

    fn accumulator_zero() -> Self::Accumulator;
    /// Adds every lane of `x`, sign-extended to 64 bits, into `acc`.
    fn accumulate(acc: Self::Accumulator, x: Self::Vector) -> Self::Accumulator;
    fn reduce_accumulator(acc: Self::Accumulator) -> i64;
}
