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

//! Byte-array equality, integer-array summation and integer-array
//! equality-count, each at several implementation tiers, plus the tooling
//! that checks the tiers agree.

pub mod datagen;
pub mod dispatch;
pub mod harness;
pub mod options;

// used by the binary only
use anyhow as _;
use tracing_subscriber as _;
