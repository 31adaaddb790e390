//! Part creation info: the part-level view exports read from.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CompositionError, CompositionResult};
use crate::metadata::{keys, MetadataMap, MetadataValue};
use crate::types::TypeRef;

/// How many instances of a part the container may create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreationPolicy {
    /// Left to the importer
    #[default]
    Any,
    Shared,
    NonShared,
}

impl fmt::Display for CreationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreationPolicy::Any => "Any",
            CreationPolicy::Shared => "Shared",
            CreationPolicy::NonShared => "NonShared",
        };
        f.write_str(name)
    }
}

/// Part-level information shared by all exports of one part.
pub trait PartCreationInfo: Send + Sync {
    /// Part metadata, if the part has any.
    fn metadata(&self) -> Option<&MetadataMap>;

    fn display_name(&self) -> String;
}

/// Creation info for a part described by declarations on its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedPartCreationInfo {
    part_type: TypeRef,
    creation_policy: CreationPolicy,
    metadata: MetadataMap,
}

impl AttributedPartCreationInfo {
    pub fn builder(part_type: TypeRef) -> AttributedPartCreationInfoBuilder {
        AttributedPartCreationInfoBuilder {
            part_type,
            creation_policy: CreationPolicy::Any,
            declared: Vec::new(),
        }
    }

    pub fn part_type(&self) -> &TypeRef {
        &self.part_type
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        self.creation_policy
    }
}

impl PartCreationInfo for AttributedPartCreationInfo {
    fn metadata(&self) -> Option<&MetadataMap> {
        Some(&self.metadata)
    }

    fn display_name(&self) -> String {
        self.part_type.to_string()
    }
}

pub struct AttributedPartCreationInfoBuilder {
    part_type: TypeRef,
    creation_policy: CreationPolicy,
    declared: Vec<(String, MetadataValue)>,
}

impl AttributedPartCreationInfoBuilder {
    pub fn with_creation_policy(mut self, policy: CreationPolicy) -> Self {
        self.creation_policy = policy;
        self
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.declared.push((name.into(), value.into()));
        self
    }

    /// Build the part metadata: declared entries first, then the creation
    /// policy unless it is `Any`, then the generic part markers.
    ///
    /// Fails when a declared entry repeats a name or uses one of the computed keys.
    pub fn build(self) -> CompositionResult<AttributedPartCreationInfo> {
        let mut metadata = MetadataMap::new();
        for (name, value) in self.declared {
            metadata.try_insert(name, value)?;
        }

        if self.creation_policy != CreationPolicy::Any {
            metadata.try_insert(keys::PART_CREATION_POLICY, self.creation_policy)?;
        }

        if self.part_type.contains_generic_parameters() {
            let arity = i64::try_from(self.part_type.generic_parameters().len())
                .map_err(|_| CompositionError::OutOfRange(keys::GENERIC_PART_ARITY))?;
            metadata.try_insert(keys::IS_GENERIC_PART, true)?;
            metadata.try_insert(keys::GENERIC_PART_ARITY, arity)?;
        }

        Ok(AttributedPartCreationInfo {
            part_type: self.part_type,
            creation_policy: self.creation_policy,
            metadata,
        })
    }
}
