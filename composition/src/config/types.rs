use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CompositionError, CompositionResult};

/// What to do when a computed entry lands on a key that is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Report `CompositionError::DuplicateMetadataKey`.
    #[default]
    Fail,
    /// Replace the earlier value and log a warning.
    Overwrite,
}

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Policy applied by every `MetadataMap` insertion made during resolution
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Whether member-level metadata may not use the reserved keys
    pub reject_reserved_member_metadata: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Fail,
            reject_reserved_member_metadata: true,
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(source: &str) -> CompositionResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CompositionResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            CompositionError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn with_reserved_member_metadata_rejected(mut self, reject: bool) -> Self {
        self.reject_reserved_member_metadata = reject;
        self
    }
}
