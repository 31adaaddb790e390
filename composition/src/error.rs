//! Error type shared by every stage of export metadata resolution.

use thiserror::Error;

/// Errors raised while describing or resolving an attributed export.
///
/// Construction errors surface from `ExportDefinition` builders; the rest come
/// from collaborators and propagate through `ExportDefinition::metadata`
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Argument must not be empty: {0}")]
    EmptyArgument(&'static str),

    #[error("Metadata key '{0}' is already present")]
    DuplicateMetadataKey(String),

    #[error("Member '{member}' declares metadata under reserved name '{name}'")]
    ReservedMetadataName { member: String, name: String },

    #[error("Generic argument '{argument}' of '{ty}' is not a generic parameter")]
    NotAGenericParameter { ty: String, argument: String },

    #[error("Value for '{0}' is out of range")]
    OutOfRange(&'static str),

    #[error("Array rank must be at least 1, got {0}")]
    InvalidArrayRank(usize),

    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

pub type CompositionResult<T> = Result<T, CompositionError>;

impl From<toml::de::Error> for CompositionError {
    fn from(e: toml::de::Error) -> Self {
        CompositionError::InvalidConfig(e.to_string())
    }
}
