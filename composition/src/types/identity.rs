//! Canonical type identity strings
//!
//! Identities name a type's contract shape independently of how it is
//! spelled in source: namespaces are kept, generic arguments are written in
//! parentheses and unresolved generic parameters become `{position}`, so
//! `Repeater<T>` declared on a part `Host<T>` has the identity
//! `Demo.Repeater({0})`. Method exports are identified by their signature.

use itertools::Itertools;

use crate::attributed::{ExportedMember, MemberShape};
use crate::error::CompositionResult;
use crate::types::TypeRef;

const VOID_IDENTITY: &str = "System.Void";

/// Derives the type identity of an export from its member.
pub trait TypeIdentityProvider: Send + Sync {
    /// `identity_type` overrides the member's own type when present.
    fn type_identity(
        &self,
        member: &ExportedMember,
        identity_type: Option<&TypeRef>,
    ) -> CompositionResult<String>;
}

/// Default provider producing the canonical identity format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalTypeIdentity;

impl TypeIdentityProvider for CanonicalTypeIdentity {
    fn type_identity(
        &self,
        member: &ExportedMember,
        identity_type: Option<&TypeRef>,
    ) -> CompositionResult<String> {
        if let Some(ty) = identity_type {
            return Ok(export_type_identity(ty));
        }
        Ok(match member.shape() {
            MemberShape::Method {
                return_type,
                parameters,
            } => method_identity(return_type.as_ref(), parameters),
            MemberShape::Type => export_type_identity(member.declaring_type()),
            MemberShape::Field { field_type } => export_type_identity(field_type),
            MemberShape::Property { property_type } => export_type_identity(property_type),
        })
    }
}

/// Identity an export of `ty` is matched by. Open constructed types are
/// identified by their generic definition; the mapping back to the part's
/// parameters lives in the generic parameter order instead.
pub fn export_type_identity(ty: &TypeRef) -> String {
    match ty.generic_definition() {
        Some(definition) => type_identity(&definition),
        None => type_identity(ty),
    }
}

pub fn type_identity(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_identity(ty, &mut out);
    out
}

/// Identity of a method signature, `Return(Param1,Param2)`.
pub fn method_identity(return_type: Option<&TypeRef>, parameters: &[TypeRef]) -> String {
    let return_identity = return_type
        .map(type_identity)
        .unwrap_or_else(|| VOID_IDENTITY.to_string());
    format!(
        "{}({})",
        return_identity,
        parameters.iter().map(type_identity).join(",")
    )
}

fn write_identity(ty: &TypeRef, out: &mut String) {
    match ty {
        TypeRef::Named {
            namespace,
            name,
            args,
        } => {
            if let Some(ns) = namespace {
                out.push_str(ns);
                out.push('.');
            }
            out.push_str(name);
            if !args.is_empty() {
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_identity(arg, out);
                }
                out.push(')');
            }
        }
        TypeRef::Parameter { position, .. } => {
            out.push_str(&format!("{{{}}}", position));
        }
        TypeRef::Array { element, rank } => {
            write_identity(element, out);
            out.push('[');
            out.push_str(&",".repeat(rank.get() - 1));
            out.push(']');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_generic_identity() {
        let ty = TypeRef::generic(
            "System.Collections.Generic",
            "Dictionary",
            vec![
                TypeRef::named("System", "String"),
                TypeRef::array_of(TypeRef::named("System", "Int32")),
            ],
        );
        assert_eq!(
            type_identity(&ty),
            "System.Collections.Generic.Dictionary(System.String,System.Int32[])"
        );
    }

    #[test]
    fn test_parameters_use_positions_not_names() {
        let ty = TypeRef::generic(
            "Demo",
            "Pair",
            vec![TypeRef::parameter("TValue", 1), TypeRef::parameter("TKey", 0)],
        );
        assert_eq!(type_identity(&ty), "Demo.Pair({1},{0})");
    }

    #[test]
    fn test_open_export_type_is_identified_by_definition() {
        let ty = TypeRef::generic(
            "Demo",
            "Pair",
            vec![TypeRef::parameter("TValue", 1), TypeRef::parameter("TKey", 0)],
        );
        assert_eq!(export_type_identity(&ty), "Demo.Pair({0},{1})");

        let closed = TypeRef::generic("Demo", "Pair", vec![TypeRef::named("System", "Int32")]);
        assert_eq!(export_type_identity(&closed), "Demo.Pair(System.Int32)");
        assert_eq!(export_type_identity(&TypeRef::parameter("T", 2)), "{2}");
    }

    #[test]
    fn test_method_identity_defaults_to_void() {
        let params = vec![TypeRef::named("System", "String")];
        assert_eq!(method_identity(None, &params), "System.Void(System.String)");
        assert_eq!(
            method_identity(Some(&TypeRef::named("System", "Int32")), &[]),
            "System.Int32()"
        );
    }
}
