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

use crate::dispatch::{Operation, Tier};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid options: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "Self::validate_self"))]
pub struct ScanOptions {
    #[serde(default = "ScanOptions::default_operation")]
    pub operation: Operation,
    /// `None` runs every tier that implements `operation`.
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default = "ScanOptions::default_length")]
    #[validate(range(max = 1_073_741_824))]
    pub length: usize,
    /// `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
    /// `None` searches for a random item.
    #[serde(default)]
    pub item: Option<i32>,
}

impl ScanOptions {
    fn default_operation() -> Operation {
        Operation::Equals
    }
    fn default_length() -> usize {
        10000
    }
    pub fn validate_self(&self) -> Result<(), ValidationError> {
        if let Some(tier) = self.tier {
            if !tier.supports(self.operation) {
                return Err(ValidationError::new("`tier` does not implement `operation`"));
            }
        }
        if self.item.is_some() && self.operation != Operation::Count {
            return Err(ValidationError::new("`item` is only used by `count`"));
        }
        Ok(())
    }
    pub fn from_toml(text: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            operation: Self::default_operation(),
            tier: None,
            length: Self::default_length(),
            seed: None,
            item: None,
        }
    }
}
