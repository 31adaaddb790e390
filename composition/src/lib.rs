//! Export metadata resolution for the attributed composition model
//!
//! A composable part offers exports: members marked with an export
//! declaration. Before the container can match exports against imports it
//! needs each export's metadata, which combines what is declared on the
//! member with the export's canonical type identity, the owning part's
//! creation policy and, for open generic exports, the order of the part's
//! generic parameters. `ExportDefinition::metadata` computes that map once
//! and caches it.
//!
//! ```ignore
//! let part = Arc::new(
//!     AttributedPartCreationInfo::builder(host_type)
//!         .with_creation_policy(CreationPolicy::Shared)
//!         .build()?,
//! );
//! let export = ExportDefinition::from_attribute(
//!     part,
//!     Arc::new(ExportedMember::property(host_type, "Items", items_type)),
//!     Arc::new(ExportAttribute::new()),
//!     MetadataServices::default(),
//! )?;
//! let identity = export.metadata()?.get(keys::EXPORT_TYPE_IDENTITY);
//! ```

pub mod attributed;
pub mod config;
pub mod error;
pub mod metadata;
pub mod types;

pub use attributed::{
    AttributedPartCreationInfo, CreationPolicy, ExportAttribute, ExportDefinition,
    ExportedMember, MetadataAttribute, MetadataServices, PartCreationInfo,
};
pub use config::{DuplicateKeyPolicy, ResolverConfig};
pub use error::{CompositionError, CompositionResult};
pub use metadata::{keys, MetadataMap, MetadataValue};
pub use types::TypeRef;
