//! Attributed programming model: parts, members and export declarations.
//!
//! Parts are described by declarations on their types and members rather
//! than by reflection. This module turns those declarations into export
//! definitions whose metadata the container matches imports against.

pub mod export_attribute;
pub mod export_definition;
pub mod member;
pub mod part;

pub use export_attribute::{contract_info, ContractInfo, ExportAttribute};
pub use export_definition::{ExportDefinition, ExportDefinitionBuilder, MetadataServices};
pub use member::{
    AttributeMetadataExtractor, ExportedMember, MemberKind, MemberMetadata,
    MemberMetadataExtractor, MemberShape, MetadataAttribute,
};
pub use part::{
    AttributedPartCreationInfo, AttributedPartCreationInfoBuilder, CreationPolicy,
    PartCreationInfo,
};
