//! Declarative export descriptors and the contract they imply.

use serde::{Deserialize, Serialize};

use crate::attributed::ExportedMember;
use crate::error::CompositionResult;
use crate::types::{TypeIdentityProvider, TypeRef};

/// The declaration that marks a member as an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportAttribute {
    pub contract_name: Option<String>,
    /// Type the export is published as, instead of the member's own type
    pub contract_type: Option<TypeRef>,
}

impl ExportAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(contract_name: impl Into<String>) -> Self {
        Self {
            contract_name: Some(contract_name.into()),
            contract_type: None,
        }
    }

    pub fn typed(contract_type: TypeRef) -> Self {
        Self {
            contract_name: None,
            contract_type: Some(contract_type),
        }
    }

    pub fn with_contract_type(mut self, contract_type: TypeRef) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// True when no explicit contract name is declared, so the contract name
    /// is derived from, and equal to, the export's type identity.
    pub fn is_contract_name_same_as_type_identity(&self) -> bool {
        self.contract_name.as_deref().map_or(true, str::is_empty)
    }
}

/// Identity type and contract name of one export declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInfo {
    pub type_identity_type: Option<TypeRef>,
    pub contract_name: String,
}

/// Work out which type identifies the export and which contract name it is
/// published under.
///
/// The identity type is the declared contract type, else the member's own
/// type; methods without a contract type have none. Without an explicit
/// contract name the type identity is used.
pub fn contract_info(
    member: &ExportedMember,
    attribute: &ExportAttribute,
    identity: &dyn TypeIdentityProvider,
) -> CompositionResult<ContractInfo> {
    let type_identity_type = attribute
        .contract_type
        .clone()
        .or_else(|| member.default_type().cloned());

    let contract_name = match attribute.contract_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => identity.type_identity(member, type_identity_type.as_ref())?,
    };

    Ok(ContractInfo {
        type_identity_type,
        contract_name,
    })
}
