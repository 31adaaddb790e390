//! Type shapes used for export identity
//!
//! Parts and members describe their types with `TypeRef` instead of runtime
//! reflection. A generic parameter remembers its position in the declaring
//! part's parameter list, which is what identity strings and generic
//! parameter order are built from.

pub mod generics;
pub mod identity;

pub use generics::{DefaultGenericOrdering, GenericParameterOrdering};
pub use identity::{CanonicalTypeIdentity, TypeIdentityProvider};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{CompositionError, CompositionResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A named type, generic when `args` is non-empty
    Named {
        namespace: Option<String>,
        name: String,
        args: Vec<TypeRef>,
    },
    /// An unresolved generic parameter of the declaring part
    Parameter { name: String, position: usize },
    Array {
        element: Box<TypeRef>,
        rank: NonZeroUsize,
    },
}

impl TypeRef {
    /// Non-generic type in the given namespace; an empty namespace means none.
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeRef::generic(namespace, name, Vec::new())
    }

    pub fn generic(namespace: &str, name: &str, args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.to_string(),
            args,
        }
    }

    pub fn parameter(name: &str, position: usize) -> Self {
        TypeRef::Parameter {
            name: name.to_string(),
            position,
        }
    }

    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: NonZeroUsize::MIN,
        }
    }

    /// Array of the given rank; a rank of zero is rejected.
    pub fn array(element: TypeRef, rank: usize) -> CompositionResult<Self> {
        let rank = NonZeroUsize::new(rank).ok_or(CompositionError::InvalidArrayRank(rank))?;
        Ok(TypeRef::Array {
            element: Box::new(element),
            rank,
        })
    }

    pub fn is_generic_parameter(&self) -> bool {
        matches!(self, TypeRef::Parameter { .. })
    }

    /// Direct generic arguments; empty for arrays and parameters.
    pub fn generic_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// True when any unresolved generic parameter occurs anywhere in the type.
    pub fn contains_generic_parameters(&self) -> bool {
        match self {
            TypeRef::Parameter { .. } => true,
            TypeRef::Named { args, .. } => args.iter().any(TypeRef::contains_generic_parameters),
            TypeRef::Array { element, .. } => element.contains_generic_parameters(),
        }
    }

    /// The open generic definition of a constructed type that still contains
    /// parameters: each argument becomes the parameter at its own index, so
    /// `ILookup<TValue, TKey>` on `Cache<TKey, TValue>` maps to `ILookup<{0}, {1}>`.
    /// `None` for closed types and for anything that is not a constructed type.
    pub fn generic_definition(&self) -> Option<TypeRef> {
        match self {
            TypeRef::Named {
                namespace,
                name,
                args,
            } if !args.is_empty() && self.contains_generic_parameters() => {
                let args = args
                    .iter()
                    .enumerate()
                    .map(|(index, arg)| match arg {
                        TypeRef::Parameter { name, .. } => TypeRef::parameter(name, index),
                        _ => TypeRef::parameter(&format!("T{}", index), index),
                    })
                    .collect();
                Some(TypeRef::Named {
                    namespace: namespace.clone(),
                    name: name.clone(),
                    args,
                })
            }
            _ => None,
        }
    }

    /// Distinct generic parameters in order of first occurrence.
    pub fn generic_parameters(&self) -> Vec<&TypeRef> {
        let mut found = Vec::new();
        self.collect_parameters(&mut found);
        found.into_iter().unique().collect()
    }

    fn collect_parameters<'a>(&'a self, found: &mut Vec<&'a TypeRef>) {
        match self {
            TypeRef::Parameter { .. } => found.push(self),
            TypeRef::Named { args, .. } => args.iter().for_each(|a| a.collect_parameters(found)),
            TypeRef::Array { element, .. } => element.collect_parameters(found),
        }
    }
}

/// Source-like rendering, e.g. `Demo.Repeater<T>` or `System.Int32[,]`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named {
                namespace,
                name,
                args,
            } => {
                if let Some(ns) = namespace {
                    write!(f, "{}.", ns)?;
                }
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<{}>", args.iter().join(", "))?;
                }
                Ok(())
            }
            TypeRef::Parameter { name, .. } => write!(f, "{}", name),
            TypeRef::Array { element, rank } => {
                write!(f, "{}[{}]", element, ",".repeat(rank.get() - 1))
            }
        }
    }
}
