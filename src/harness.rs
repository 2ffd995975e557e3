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

//! Cross-tier equivalence checks.
//!
//! Every check runs all tiers that implement the operation, twice each, and
//! compares them with the scalar tier and, when the caller knows it, with a
//! closed-form expectation. A disagreement is recorded and logged; it never
//! stops the remaining checks.

use crate::datagen::ArraySupply;
use crate::dispatch::{self, Operation, ScanOutcome, Tier};
use simd::lanes::{ByteLanes, IntLanes, Native, Portable};
use std::fmt::Display;

/// The value searched for by the block pattern.
pub const NEEDLE: i32 = 31337;

/// What a tier's result was compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The scalar tier.
    Oracle,
    /// A value computed independently of every tier.
    Expected,
    /// The same tier's first call on the same input.
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub operation: Operation,
    pub tier: Tier,
    pub length: usize,
    pub reference: Reference,
    pub expected: ScanOutcome,
    pub actual: ScanOutcome,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} elements: tier {} returned {}, {:?} is {}",
            self.operation, self.length, self.tier, self.actual, self.reference, self.expected
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub checks: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Harness {
    report: Report,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn finish(self) -> Report {
        self.report
    }

    fn compare(
        &mut self,
        operation: Operation,
        length: usize,
        expected: Option<ScanOutcome>,
        mut scan: impl FnMut(Tier) -> ScanOutcome,
    ) -> ScanOutcome {
        let oracle = scan(Tier::Scalar);
        for tier in Tier::for_operation(operation) {
            let first = scan(tier);
            let second = scan(tier);
            self.report.checks += 1;
            tracing::debug!(%operation, %tier, length, %first, "check");
            let references = [
                (Reference::Oracle, Some(oracle)),
                (Reference::Expected, expected),
                (Reference::Repeat, Some(first)),
            ];
            for (reference, value) in references {
                let Some(value) = value else { continue };
                let actual = if reference == Reference::Repeat {
                    second
                } else {
                    first
                };
                if actual != value {
                    let mismatch = Mismatch {
                        operation,
                        tier,
                        length,
                        reference,
                        expected: value,
                        actual,
                    };
                    tracing::error!("{mismatch}");
                    self.report.mismatches.push(mismatch);
                }
            }
        }
        oracle
    }

    /// Returns the scalar tier's result.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn check_equals(&mut self, lhs: &[u8], rhs: &[u8], expected: Option<bool>) -> bool {
        assert_eq!(lhs.len(), rhs.len());
        let outcome = self.compare(
            Operation::Equals,
            lhs.len(),
            expected.map(ScanOutcome::Equals),
            |tier| ScanOutcome::Equals(dispatch::equals(tier, lhs, rhs)),
        );
        outcome == ScanOutcome::Equals(true)
    }

    /// Returns the scalar tier's result.
    pub fn check_sum(&mut self, this: &[i32], expected: Option<i64>) -> i64 {
        let outcome = self.compare(
            Operation::Sum,
            this.len(),
            expected.map(ScanOutcome::Sum),
            |tier| ScanOutcome::Sum(dispatch::sum(tier, this).unwrap_or_default()),
        );
        match outcome {
            ScanOutcome::Sum(x) => x,
            _ => unreachable!(),
        }
    }

    /// Returns the scalar tier's result.
    pub fn check_count(&mut self, this: &[i32], item: i32, expected: Option<usize>) -> usize {
        let outcome = self.compare(
            Operation::Count,
            this.len(),
            expected.map(ScanOutcome::Count),
            |tier| ScanOutcome::Count(dispatch::count(tier, this, item).unwrap_or_default()),
        );
        match outcome {
            ScanOutcome::Count(x) => x,
            _ => unreachable!(),
        }
    }

    /// Identity, then one differing byte at the first index, then at the
    /// last index.
    pub fn equals_flip_ends(&mut self, lhs: &[u8]) {
        let mut rhs = lhs.to_vec();
        self.check_equals(lhs, lhs, Some(true));
        self.check_equals(lhs, &rhs, Some(true));
        let Some(last) = lhs.len().checked_sub(1) else {
            return;
        };
        for i in [0, last] {
            rhs[i] ^= 1;
            self.check_equals(lhs, &rhs, Some(false));
            self.check_equals(&rhs, lhs, Some(false));
            rhs[i] ^= 1;
        }
        self.check_equals(lhs, &rhs, Some(true));
    }

    /// Walks a single differing byte from the last index down `width`
    /// positions. Each difference is observed, then repaired and observed
    /// again before the next one is introduced.
    pub fn equals_sliding(&mut self, lhs: &[u8], width: usize) {
        let mut rhs = lhs.to_vec();
        let n = lhs.len();
        for i in (n.saturating_sub(width)..n).rev() {
            rhs[i] = !rhs[i];
            self.check_equals(lhs, &rhs, Some(false));
            rhs[i] = lhs[i];
            self.check_equals(lhs, &rhs, Some(true));
        }
    }

    /// Counts [`NEEDLE`] in [`block_pattern`].
    pub fn count_blocks(&mut self, length: usize) {
        let this = block_pattern(length);
        self.check_count(&this, NEEDLE, Some(block_pattern_count(length)));
    }
}

/// Blocks of 8 that are zero except for [`NEEDLE`] at offsets 3 and 5.
pub fn block_pattern(length: usize) -> Vec<i32> {
    let mut this = vec![0; length];
    for i in (0..length).step_by(8) {
        for j in [3, 5] {
            if i + j < length {
                this[i + j] = NEEDLE;
            }
        }
    }
    this
}

/// Occurrences of [`NEEDLE`] in [`block_pattern`], computed from the length.
pub fn block_pattern_count(length: usize) -> usize {
    let tail = length % 8;
    2 * (length / 8) + (tail > 3) as usize + (tail > 5) as usize
}

/// Lengths around the chunk widths of the compiled backends, and a few large
/// ones.
pub fn property_lengths() -> Vec<usize> {
    let mut lengths = vec![0, 1, 10, 10000, 100000, 1000000];
    for w in [
        <Portable as ByteLanes>::LANES,
        <Portable as IntLanes>::LANES,
        <Native as ByteLanes>::LANES,
        <Native as IntLanes>::LANES,
    ] {
        lengths.extend([w - 1, w, w + 1]);
    }
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

/// A sliding difference this wide, starting at the last index, reaches into
/// the last full chunk of every compiled byte backend.
pub fn sliding_width() -> usize {
    2 * <Portable as ByteLanes>::LANES.max(<Native as ByteLanes>::LANES)
}

/// Runs every property over every length of [`property_lengths`].
pub fn verify(supply: &mut ArraySupply) -> Report {
    let mut harness = Harness::new();
    for length in property_lengths() {
        let _span = tracing::info_span!("verify", length).entered();
        harness.equals_flip_ends(&ArraySupply::zeroed_bytes(length));
        harness.equals_flip_ends(&supply.random_bytes(length));
        let ints = supply.random_ints(length);
        harness.check_sum(&ints, None);
        let item = supply.random_item();
        harness.check_count(&ints, item, None);
        if !ints.is_empty() {
            let item = ints[supply.random_index(ints.len())];
            harness.check_count(&ints, item, None);
        }
        harness.count_blocks(length);
    }
    harness.equals_sliding(&supply.random_bytes(99999), 31);
    harness.equals_sliding(&supply.random_bytes(99999), sliding_width());
    harness.count_blocks(1000000);
    let report = harness.finish();
    tracing::info!(
        checks = report.checks,
        mismatches = report.mismatches.len(),
        "verified"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_on_identical_arrays() {
        let mut supply = ArraySupply::seeded(31337);
        let mut harness = Harness::new();
        for length in property_lengths() {
            let this = supply.random_bytes(length);
            assert!(harness.check_equals(&this, &this.clone(), Some(true)));
        }
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn equals_with_flipped_ends() {
        let mut supply = ArraySupply::seeded(31337);
        let mut harness = Harness::new();
        for length in [1, 2, 10, 10000, 100000] {
            harness.equals_flip_ends(&ArraySupply::zeroed_bytes(length));
            harness.equals_flip_ends(&supply.random_bytes(length));
        }
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn equals_with_sliding_difference() {
        let mut harness = Harness::new();
        harness.equals_sliding(&ArraySupply::zeroed_bytes(99999), 31);
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
        // 31 positions, a false and a true check each, every equality tier
        let tiers = Tier::for_operation(Operation::Equals).count();
        assert_eq!(report.checks, 31 * 2 * tiers);
    }

    #[test]
    fn equals_with_sliding_difference_into_last_chunk() {
        let n = 99999;
        let width = sliding_width();
        for w in [<Portable as ByteLanes>::LANES, <Native as ByteLanes>::LANES] {
            let body = n - n % w;
            assert!(n - width < body, "w = {w}");
        }
        let mut supply = ArraySupply::seeded(31337);
        let mut harness = Harness::new();
        harness.equals_sliding(&supply.random_bytes(n), width);
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
        let tiers = Tier::for_operation(Operation::Equals).count();
        assert_eq!(report.checks, width * 2 * tiers);
    }

    #[test]
    fn sum_matches_oracle() {
        let mut supply = ArraySupply::seeded(31337);
        let mut harness = Harness::new();
        for length in property_lengths() {
            let this = supply.random_ints(length);
            harness.check_sum(&this, None);
        }
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn sum_of_extremes_is_exact() {
        let mut harness = Harness::new();
        let this = vec![i32::MAX; 100003];
        harness.check_sum(&this, Some(i32::MAX as i64 * 100003));
        let this = vec![i32::MIN; 100003];
        harness.check_sum(&this, Some(i32::MIN as i64 * 100003));
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn count_matches_oracle() {
        let mut supply = ArraySupply::seeded(31337);
        let mut harness = Harness::new();
        for length in property_lengths() {
            let this = supply.random_ints(length);
            let item = supply.random_item();
            harness.check_count(&this, item, None);
            if let Some(&item) = this.last() {
                assert!(harness.check_count(&this, item, None) >= 1);
            }
        }
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn count_of_block_pattern() {
        assert_eq!(block_pattern_count(1000000), 250000);
        for length in [0, 3, 4, 5, 6, 7, 8, 9, 12, 14, 1001] {
            let expected = block_pattern(length)
                .iter()
                .filter(|&&x| x == NEEDLE)
                .count();
            assert_eq!(block_pattern_count(length), expected, "length = {length}");
        }
        let mut harness = Harness::new();
        harness.count_blocks(1000000);
        for length in property_lengths() {
            harness.count_blocks(length);
        }
        let report = harness.finish();
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }

    #[test]
    fn mismatches_do_not_stop_the_harness() {
        let mut harness = Harness::new();
        let this = [7_u8; 100];
        // a wrong expectation makes every tier disagree
        assert!(harness.check_equals(&this, &this, Some(false)));
        harness.check_count(&[1, 1, 1], 1, Some(2));
        let report = harness.finish();
        let equals_tiers = Tier::for_operation(Operation::Equals).count();
        let count_tiers = Tier::for_operation(Operation::Count).count();
        assert_eq!(report.checks, equals_tiers + count_tiers);
        assert_eq!(report.mismatches.len(), equals_tiers + count_tiers);
        assert!(
            report
                .mismatches
                .iter()
                .all(|m| m.reference == Reference::Expected)
        );
        assert_eq!(report.mismatches[0].actual, ScanOutcome::Equals(true));
        assert_eq!(report.mismatches[0].expected, ScanOutcome::Equals(false));
    }

    #[test]
    fn scans_do_not_modify_inputs() {
        let mut supply = ArraySupply::seeded(7);
        let bytes = supply.random_bytes(1000);
        let ints = supply.random_ints(1000);
        let (bytes_before, ints_before) = (bytes.clone(), ints.clone());
        let mut harness = Harness::new();
        for _ in 0..3 {
            harness.check_equals(&bytes, &bytes_before, Some(true));
            harness.check_sum(&ints, None);
            harness.check_count(&ints, ints[0], None);
        }
        assert_eq!(bytes, bytes_before);
        assert_eq!(ints, ints_before);
        assert!(harness.report().is_ok());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn verify_reports_no_mismatches() {
        let report = verify(&mut ArraySupply::seeded(31337));
        assert!(report.checks > 0);
        assert!(report.is_ok(), "{:?}", report.mismatches);
    }
}
