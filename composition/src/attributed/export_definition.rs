//! Export definitions for attributed parts and their metadata.
//!
//! An `ExportDefinition` ties one exported member to its part and export
//! declaration. The metadata the container matches imports against is
//! computed on first read:
//!
//! 1. declarative metadata found on the member;
//! 2. `ExportTypeIdentity`, the contract name itself when the declaration has
//!    no explicit contract name, otherwise derived from the member and the
//!    explicit identity type;
//! 3. `PartCreationPolicy`, copied from the part metadata when present there;
//! 4. `GenericExportParametersOrderMetadataName`, for non-method exports whose
//!    explicit identity type still has unresolved generic parameters.
//!
//! The map is cached for the lifetime of the definition. Computation runs
//! outside the cache cell, so two threads reading a fresh definition may both
//! compute it; inputs are immutable and the computation is deterministic, so
//! whichever map is published first is equal to the other.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::attributed::export_attribute::contract_info;
use crate::attributed::{
    AttributeMetadataExtractor, ExportAttribute, ExportedMember, MemberMetadata,
    MemberMetadataExtractor, PartCreationInfo,
};
use crate::config::{DuplicateKeyPolicy, ResolverConfig};
use crate::error::{CompositionError, CompositionResult};
use crate::metadata::{keys, MetadataMap, MetadataValue};
use crate::types::{
    CanonicalTypeIdentity, DefaultGenericOrdering, GenericParameterOrdering,
    TypeIdentityProvider, TypeRef,
};

/// Collaborators used to compute export metadata.
#[derive(Clone)]
pub struct MetadataServices {
    pub extractor: Arc<dyn MemberMetadataExtractor>,
    pub identity: Arc<dyn TypeIdentityProvider>,
    pub ordering: Arc<dyn GenericParameterOrdering>,
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl MetadataServices {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            extractor: Arc::new(AttributeMetadataExtractor::from_config(config)),
            identity: Arc::new(CanonicalTypeIdentity),
            ordering: Arc::new(DefaultGenericOrdering),
            duplicate_keys: config.duplicate_keys,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn MemberMetadataExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn TypeIdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_ordering(mut self, ordering: Arc<dyn GenericParameterOrdering>) -> Self {
        self.ordering = ordering;
        self
    }
}

impl Default for MetadataServices {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl fmt::Debug for MetadataServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataServices")
            .field("duplicate_keys", &self.duplicate_keys)
            .finish_non_exhaustive()
    }
}

/// One export of an attributed part.
pub struct ExportDefinition {
    part: Arc<dyn PartCreationInfo>,
    member: Arc<ExportedMember>,
    export_attribute: Arc<ExportAttribute>,
    type_identity_type: Option<TypeRef>,
    contract_name: String,
    services: MetadataServices,
    metadata: OnceCell<MetadataMap>,
}

impl ExportDefinition {
    pub fn new(
        part: Arc<dyn PartCreationInfo>,
        member: Arc<ExportedMember>,
        export_attribute: Arc<ExportAttribute>,
        type_identity_type: Option<TypeRef>,
        contract_name: impl Into<String>,
    ) -> CompositionResult<Self> {
        let mut builder = Self::builder()
            .part(part)
            .member(member)
            .export_attribute(export_attribute)
            .contract_name(contract_name);
        builder.type_identity_type = type_identity_type;
        builder.build()
    }

    pub fn builder() -> ExportDefinitionBuilder {
        ExportDefinitionBuilder::default()
    }

    /// Build the definition for `member` as declared by `export_attribute`,
    /// deriving the identity type and contract name from the declaration.
    pub fn from_attribute(
        part: Arc<dyn PartCreationInfo>,
        member: Arc<ExportedMember>,
        export_attribute: Arc<ExportAttribute>,
        services: MetadataServices,
    ) -> CompositionResult<Self> {
        let info = contract_info(&member, &export_attribute, services.identity.as_ref())?;
        let mut builder = Self::builder()
            .part(part)
            .member(member)
            .export_attribute(export_attribute)
            .contract_name(info.contract_name)
            .services(services);
        builder.type_identity_type = info.type_identity_type;
        builder.build()
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn part(&self) -> &Arc<dyn PartCreationInfo> {
        &self.part
    }

    pub fn member(&self) -> &ExportedMember {
        &self.member
    }

    pub fn export_attribute(&self) -> &ExportAttribute {
        &self.export_attribute
    }

    pub fn type_identity_type(&self) -> Option<&TypeRef> {
        self.type_identity_type.as_ref()
    }

    /// The export's metadata, computed on first call and cached afterwards.
    ///
    /// Collaborator errors are returned as-is and leave nothing cached.
    pub fn metadata(&self) -> CompositionResult<&MetadataMap> {
        if let Some(metadata) = self.metadata.get() {
            return Ok(metadata);
        }
        let computed = self.compute_metadata()?;
        Ok(self.metadata.get_or_init(|| computed))
    }

    fn compute_metadata(&self) -> CompositionResult<MetadataMap> {
        let policy = self.services.duplicate_keys;

        let MemberMetadata {
            mut metadata,
            complete,
        } = self.services.extractor.extract(&self.member)?;
        if !complete {
            warn!(
                member = %self.member.display_name(),
                contract = %self.contract_name,
                "Member metadata is inconsistent; exporting without it"
            );
        }

        let type_identity = if self.export_attribute.is_contract_name_same_as_type_identity() {
            self.contract_name.clone()
        } else {
            self.services
                .identity
                .type_identity(&self.member, self.type_identity_type.as_ref())?
        };
        trace!(contract = %self.contract_name, type_identity = %type_identity, "Export type identity");
        metadata.insert_with(keys::EXPORT_TYPE_IDENTITY, type_identity, policy)?;

        let creation_policy = self
            .part
            .metadata()
            .and_then(|part_metadata| part_metadata.get(keys::PART_CREATION_POLICY));
        if let Some(value) = creation_policy {
            trace!(contract = %self.contract_name, part = %self.part.display_name(), "Copying part creation policy");
            metadata.insert_with(keys::PART_CREATION_POLICY, value.clone(), policy)?;
        }

        let open_identity_type = self
            .type_identity_type
            .as_ref()
            .filter(|ty| !self.member.is_method() && ty.contains_generic_parameters());
        if let Some(ty) = open_identity_type {
            let order = self.services.ordering.parameters_order(ty)?;
            trace!(contract = %self.contract_name, ?order, "Generic export parameters order");
            metadata.insert_with(
                keys::GENERIC_EXPORT_PARAMETERS_ORDER,
                MetadataValue::Positions(order),
                policy,
            )?;
        }

        debug!(
            contract = %self.contract_name,
            member = %self.member.display_name(),
            entries = metadata.len(),
            "Resolved export metadata"
        );
        Ok(metadata)
    }
}

impl fmt::Debug for ExportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportDefinition")
            .field("contract_name", &self.contract_name)
            .field("part", &self.part.display_name())
            .field("member", &self.member.display_name())
            .field("type_identity_type", &self.type_identity_type)
            .field("metadata", &self.metadata.get())
            .finish()
    }
}

impl fmt::Display for ExportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contract_name)
    }
}

/// Builder that reports missing inputs as `CompositionError::MissingArgument`.
#[derive(Default)]
pub struct ExportDefinitionBuilder {
    part: Option<Arc<dyn PartCreationInfo>>,
    member: Option<Arc<ExportedMember>>,
    export_attribute: Option<Arc<ExportAttribute>>,
    type_identity_type: Option<TypeRef>,
    contract_name: Option<String>,
    services: Option<MetadataServices>,
}

impl ExportDefinitionBuilder {
    pub fn part(mut self, part: Arc<dyn PartCreationInfo>) -> Self {
        self.part = Some(part);
        self
    }

    pub fn member(mut self, member: Arc<ExportedMember>) -> Self {
        self.member = Some(member);
        self
    }

    pub fn export_attribute(mut self, export_attribute: Arc<ExportAttribute>) -> Self {
        self.export_attribute = Some(export_attribute);
        self
    }

    pub fn type_identity_type(mut self, ty: TypeRef) -> Self {
        self.type_identity_type = Some(ty);
        self
    }

    pub fn contract_name(mut self, contract_name: impl Into<String>) -> Self {
        self.contract_name = Some(contract_name.into());
        self
    }

    pub fn services(mut self, services: MetadataServices) -> Self {
        self.services = Some(services);
        self
    }

    pub fn build(self) -> CompositionResult<ExportDefinition> {
        let part = self
            .part
            .ok_or(CompositionError::MissingArgument("part_creation_info"))?;
        let member = self
            .member
            .ok_or(CompositionError::MissingArgument("member"))?;
        let export_attribute = self
            .export_attribute
            .ok_or(CompositionError::MissingArgument("export_attribute"))?;
        let contract_name = self
            .contract_name
            .ok_or(CompositionError::MissingArgument("contract_name"))?;
        if contract_name.is_empty() {
            return Err(CompositionError::EmptyArgument("contract_name"));
        }

        Ok(ExportDefinition {
            part,
            member,
            export_attribute,
            type_identity_type: self.type_identity_type,
            contract_name,
            services: self.services.unwrap_or_default(),
            metadata: OnceCell::new(),
        })
    }
}
