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

use crate::datagen::ArraySupply;
use serde::{Deserialize, Serialize};
use simd::byte::is_equal;
use simd::int::{reduce_count_of_eq, reduce_sum_of_x};
use simd::lanes::Portable;
use std::fmt::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Equals,
    Sum,
    Count,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Equals => "equals",
            Operation::Sum => "sum",
            Operation::Count => "count",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Indexed loop, the reference for every other tier.
    Scalar,
    /// Iterator adapters.
    Iterator,
    /// Tiling driver over [`Portable`] lanes.
    Portable,
    /// Tiling driver over [`simd::lanes::Native`] lanes.
    Native,
    /// The C library's `memcmp`, equality only.
    Memcmp,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Scalar,
        Tier::Iterator,
        Tier::Portable,
        Tier::Native,
        Tier::Memcmp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Iterator => "iterator",
            Tier::Portable => "portable",
            Tier::Native => "native",
            Tier::Memcmp => "memcmp",
        }
    }

    pub fn supports(self, operation: Operation) -> bool {
        !matches!(
            (self, operation),
            (Tier::Memcmp, Operation::Sum | Operation::Count)
        )
    }

    pub fn for_operation(operation: Operation) -> impl Iterator<Item = Tier> {
        Tier::ALL
            .into_iter()
            .filter(move |tier| tier.supports(operation))
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Equals(bool),
    Sum(i64),
    Count(usize),
}

impl Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOutcome::Equals(x) => write!(f, "{x}"),
            ScanOutcome::Sum(x) => write!(f, "{x}"),
            ScanOutcome::Count(x) => write!(f, "{x}"),
        }
    }
}

/// # Panics
///
/// Panics if the lengths differ.
pub fn equals(tier: Tier, lhs: &[u8], rhs: &[u8]) -> bool {
    match tier {
        Tier::Scalar => is_equal::fallback(lhs, rhs),
        Tier::Iterator => is_equal::iterator(lhs, rhs),
        Tier::Portable => is_equal::vectorized::<Portable>(lhs, rhs),
        Tier::Native => is_equal(lhs, rhs),
        Tier::Memcmp => is_equal::memcmp(lhs, rhs),
    }
}

/// Returns `None` if `tier` does not implement summation.
pub fn sum(tier: Tier, this: &[i32]) -> Option<i64> {
    match tier {
        Tier::Scalar => Some(reduce_sum_of_x::fallback(this)),
        Tier::Iterator => Some(reduce_sum_of_x::iterator(this)),
        Tier::Portable => Some(reduce_sum_of_x::vectorized::<Portable>(this)),
        Tier::Native => Some(reduce_sum_of_x(this)),
        Tier::Memcmp => None,
    }
}

/// Returns `None` if `tier` does not implement counting.
pub fn count(tier: Tier, this: &[i32], item: i32) -> Option<usize> {
    match tier {
        Tier::Scalar => Some(reduce_count_of_eq::fallback(this, item)),
        Tier::Iterator => Some(reduce_count_of_eq::iterator(this, item)),
        Tier::Portable => Some(reduce_count_of_eq::vectorized::<Portable>(this, item)),
        Tier::Native => Some(reduce_count_of_eq(this, item)),
        Tier::Memcmp => None,
    }
}

/// The arrays one operation scans.
#[derive(Debug, Clone)]
pub enum ScanInput {
    Bytes { lhs: Vec<u8>, rhs: Vec<u8> },
    Ints { this: Vec<i32>, item: i32 },
}

impl ScanInput {
    /// Equality gets two equal random arrays, so no tier can return early.
    /// Sum and count get one random array; `item` defaults to a random value.
    pub fn generate(
        operation: Operation,
        length: usize,
        item: Option<i32>,
        supply: &mut ArraySupply,
    ) -> Self {
        match operation {
            Operation::Equals => {
                let lhs = supply.random_bytes(length);
                let rhs = lhs.clone();
                ScanInput::Bytes { lhs, rhs }
            }
            Operation::Sum | Operation::Count => {
                let this = supply.random_ints(length);
                let item = item.unwrap_or_else(|| supply.random_item());
                ScanInput::Ints { this, item }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScanInput::Bytes { lhs, .. } => lhs.len(),
            ScanInput::Ints { this, .. } => this.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `None` if `tier` does not implement `operation` or `input` has the
/// wrong element type for it.
pub fn run(operation: Operation, tier: Tier, input: &ScanInput) -> Option<ScanOutcome> {
    match (operation, input) {
        (Operation::Equals, ScanInput::Bytes { lhs, rhs }) => {
            Some(ScanOutcome::Equals(equals(tier, lhs, rhs)))
        }
        (Operation::Sum, ScanInput::Ints { this, .. }) => sum(tier, this).map(ScanOutcome::Sum),
        (Operation::Count, ScanInput::Ints { this, item }) => {
            count(tier, this, *item).map(ScanOutcome::Count)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memcmp_is_equality_only() {
        assert_eq!(Tier::for_operation(Operation::Equals).count(), 5);
        assert_eq!(Tier::for_operation(Operation::Sum).count(), 4);
        assert!(!Tier::for_operation(Operation::Count).any(|t| t == Tier::Memcmp));
        assert_eq!(sum(Tier::Memcmp, &[1, 2, 3]), None);
        assert_eq!(count(Tier::Memcmp, &[1, 2, 3], 1), None);
    }

    #[test]
    fn run_checks_the_input_kind() {
        let bytes = ScanInput::Bytes {
            lhs: vec![1, 2],
            rhs: vec![1, 2],
        };
        let ints = ScanInput::Ints {
            this: vec![5, -5, 5],
            item: 5,
        };
        assert_eq!(
            run(Operation::Equals, Tier::Native, &bytes),
            Some(ScanOutcome::Equals(true))
        );
        assert_eq!(run(Operation::Sum, Tier::Native, &bytes), None);
        assert_eq!(run(Operation::Equals, Tier::Native, &ints), None);
        assert_eq!(
            run(Operation::Sum, Tier::Portable, &ints),
            Some(ScanOutcome::Sum(5))
        );
        assert_eq!(
            run(Operation::Count, Tier::Iterator, &ints),
            Some(ScanOutcome::Count(2))
        );
        assert_eq!(run(Operation::Count, Tier::Memcmp, &ints), None);
    }

    #[test]
    fn generated_input_matches_the_operation() {
        let mut supply = ArraySupply::seeded(31337);
        let input = ScanInput::generate(Operation::Equals, 100, None, &mut supply);
        assert_eq!(input.len(), 100);
        for tier in Tier::for_operation(Operation::Equals) {
            assert_eq!(
                run(Operation::Equals, tier, &input),
                Some(ScanOutcome::Equals(true))
            );
        }
        let input = ScanInput::generate(Operation::Count, 0, Some(7), &mut supply);
        assert!(input.is_empty());
        assert!(matches!(input, ScanInput::Ints { item: 7, .. }));
    }
}
