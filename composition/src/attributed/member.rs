//! Exported members and their declarative metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{CompositionError, CompositionResult};
use crate::metadata::{keys, MetadataMap, MetadataValue};
use crate::types::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Type,
    Field,
    Property,
    Method,
}

/// What the member is, with the types needed to identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberShape {
    /// The part type itself is exported
    Type,
    Field {
        field_type: TypeRef,
    },
    Property {
        property_type: TypeRef,
    },
    Method {
        /// `None` for methods returning nothing
        return_type: Option<TypeRef>,
        parameters: Vec<TypeRef>,
    },
}

/// A metadata entry declared directly on a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub name: String,
    pub value: MetadataValue,
    /// Entries declared multiple times under one name are collected into an array
    pub is_multiple: bool,
}

impl MetadataAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_multiple: false,
        }
    }

    pub fn multiple(name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self {
            is_multiple: true,
            ..Self::new(name, value)
        }
    }
}

/// A member of a part that carries an export declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMember {
    name: String,
    declaring_type: TypeRef,
    shape: MemberShape,
    metadata_attributes: Vec<MetadataAttribute>,
}

impl ExportedMember {
    fn new(declaring_type: TypeRef, name: impl Into<String>, shape: MemberShape) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            shape,
            metadata_attributes: Vec::new(),
        }
    }

    /// The part type exported as a whole.
    pub fn part_type(part_type: TypeRef) -> Self {
        let name = part_type.to_string();
        Self::new(part_type, name, MemberShape::Type)
    }

    pub fn field(declaring_type: TypeRef, name: impl Into<String>, field_type: TypeRef) -> Self {
        Self::new(declaring_type, name, MemberShape::Field { field_type })
    }

    pub fn property(
        declaring_type: TypeRef,
        name: impl Into<String>,
        property_type: TypeRef,
    ) -> Self {
        Self::new(declaring_type, name, MemberShape::Property { property_type })
    }

    pub fn method(
        declaring_type: TypeRef,
        name: impl Into<String>,
        return_type: Option<TypeRef>,
        parameters: Vec<TypeRef>,
    ) -> Self {
        Self::new(
            declaring_type,
            name,
            MemberShape::Method {
                return_type,
                parameters,
            },
        )
    }

    pub fn with_metadata(mut self, attribute: MetadataAttribute) -> Self {
        self.metadata_attributes.push(attribute);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }

    pub fn shape(&self) -> &MemberShape {
        &self.shape
    }

    pub fn metadata_attributes(&self) -> &[MetadataAttribute] {
        &self.metadata_attributes
    }

    pub fn kind(&self) -> MemberKind {
        match self.shape {
            MemberShape::Type => MemberKind::Type,
            MemberShape::Field { .. } => MemberKind::Field,
            MemberShape::Property { .. } => MemberKind::Property,
            MemberShape::Method { .. } => MemberKind::Method,
        }
    }

    pub fn is_method(&self) -> bool {
        self.kind() == MemberKind::Method
    }

    /// Type an export of this member has when no contract type is given.
    /// Methods have none; they are identified by signature.
    pub fn default_type(&self) -> Option<&TypeRef> {
        match &self.shape {
            MemberShape::Type => Some(&self.declaring_type),
            MemberShape::Field { field_type } => Some(field_type),
            MemberShape::Property { property_type } => Some(property_type),
            MemberShape::Method { .. } => None,
        }
    }

    pub fn display_name(&self) -> String {
        match self.shape {
            MemberShape::Type => self.declaring_type.to_string(),
            _ => format!("{}.{}", self.declaring_type, self.name),
        }
    }
}

/// Metadata declared on a member, and whether it could be read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMetadata {
    pub metadata: MetadataMap,
    /// False when conflicting declarations made the member's metadata unusable;
    /// `metadata` is then empty
    pub complete: bool,
}

impl MemberMetadata {
    pub fn complete(metadata: MetadataMap) -> Self {
        Self {
            metadata,
            complete: true,
        }
    }

    pub fn incomplete() -> Self {
        Self {
            metadata: MetadataMap::new(),
            complete: false,
        }
    }
}

/// Reads the declarative metadata attached to a member.
pub trait MemberMetadataExtractor: Send + Sync {
    /// Members without metadata yield an empty, complete result.
    fn extract(&self, member: &ExportedMember) -> CompositionResult<MemberMetadata>;
}

/// Extractor over `MetadataAttribute` declarations.
#[derive(Debug, Clone)]
pub struct AttributeMetadataExtractor {
    reject_reserved: bool,
}

impl Default for AttributeMetadataExtractor {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl AttributeMetadataExtractor {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            reject_reserved: config.reject_reserved_member_metadata,
        }
    }
}

impl MemberMetadataExtractor for AttributeMetadataExtractor {
    fn extract(&self, member: &ExportedMember) -> CompositionResult<MemberMetadata> {
        let mut metadata = MetadataMap::new();
        let mut multiple: HashSet<&str> = HashSet::new();

        for attribute in member.metadata_attributes() {
            let name = attribute.name.as_str();
            if self.reject_reserved && keys::is_reserved(name) {
                return Err(CompositionError::ReservedMetadataName {
                    member: member.display_name(),
                    name: name.to_string(),
                });
            }

            if !metadata.contains_key(name) {
                let value = if attribute.is_multiple {
                    multiple.insert(name);
                    MetadataValue::Array(vec![attribute.value.clone()])
                } else {
                    attribute.value.clone()
                };
                metadata.try_insert(name, value)?;
                continue;
            }

            match metadata.entry_mut(name) {
                Some(MetadataValue::Array(values))
                    if attribute.is_multiple && multiple.contains(name) =>
                {
                    values.push(attribute.value.clone());
                }
                _ => {
                    debug!(
                        member = %member.display_name(),
                        name,
                        "Conflicting metadata declarations"
                    );
                    return Ok(MemberMetadata::incomplete());
                }
            }
        }

        Ok(MemberMetadata::complete(metadata))
    }
}
