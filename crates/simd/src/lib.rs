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

#![allow(unsafe_code)]

pub mod byte;
pub mod int;
pub mod lanes;

// used by the benches only
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use rand_chacha as _;

/// Names and widths (bytes, `i32`s) of the backends compiled into this
/// build, widest first. The first one is [`lanes::Native`].
pub fn backends() -> Vec<(&'static str, usize, usize)> {
    use lanes::{ByteLanes, IntLanes};
    fn describe<B: ByteLanes + IntLanes>() -> (&'static str, usize, usize) {
        (<B as ByteLanes>::NAME, <B as ByteLanes>::LANES, <B as IntLanes>::LANES)
    }
    let mut result = Vec::new();
    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512bw"
    ))]
    result.push(describe::<lanes::Avx512>());
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    result.push(describe::<lanes::Avx2>());
    #[cfg(target_arch = "x86_64")]
    result.push(describe::<lanes::Sse2>());
    #[cfg(target_arch = "aarch64")]
    result.push(describe::<lanes::Neon>());
    result.push(describe::<lanes::Portable>());
    result
}

#[test]
fn backends_test() {
    use lanes::ByteLanes;
    let backends = backends();
    assert_eq!(backends[0].0, <lanes::Native as ByteLanes>::NAME);
    assert!(backends.iter().all(|&(_, bytes, ints)| bytes > 0 && ints > 0));
}
