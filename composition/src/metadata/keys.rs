//! Reserved metadata keys shared with the matching engine.
//!
//! Member-level metadata may not use these names; they are written only by
//! the resolver and by part creation info.

/// Canonical type identity of an export.
pub const EXPORT_TYPE_IDENTITY: &str = "ExportTypeIdentity";

/// Creation policy copied from the owning part.
pub const PART_CREATION_POLICY: &str = "PartCreationPolicy";

/// Positions of the part's generic parameters as they appear in an open export type.
pub const GENERIC_EXPORT_PARAMETERS_ORDER: &str = "GenericExportParametersOrderMetadataName";

/// Set on part metadata when the part type is an open generic.
pub const IS_GENERIC_PART: &str = "IsGenericPart";

/// Number of generic parameters of an open generic part.
pub const GENERIC_PART_ARITY: &str = "GenericPartArity";

/// Keys computed by the resolver for every export.
pub const EXPORT_RESERVED_KEYS: [&str; 3] = [
    EXPORT_TYPE_IDENTITY,
    PART_CREATION_POLICY,
    GENERIC_EXPORT_PARAMETERS_ORDER,
];

pub fn is_reserved(key: &str) -> bool {
    EXPORT_RESERVED_KEYS.contains(&key)
}
