//! Generic parameter ordering for open export types.
//!
//! An export typed `IPair<TValue, TKey>` on a part `Host<TKey, TValue>` has
//! the order `[1, 0]`: for each generic argument of the export type, the
//! position of that parameter on the part. The container uses it to build
//! closed exports once the part's parameters are known.

use crate::error::{CompositionError, CompositionResult};
use crate::types::TypeRef;

pub trait GenericParameterOrdering: Send + Sync {
    fn parameters_order(&self, ty: &TypeRef) -> CompositionResult<Vec<usize>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGenericOrdering;

impl GenericParameterOrdering for DefaultGenericOrdering {
    fn parameters_order(&self, ty: &TypeRef) -> CompositionResult<Vec<usize>> {
        generic_parameters_order(ty)
    }
}

/// Positions of `ty`'s generic arguments.
///
/// Every generic argument must itself be a generic parameter; partially
/// closed types such as `IPair<T, Int32>` have no order.
pub fn generic_parameters_order(ty: &TypeRef) -> CompositionResult<Vec<usize>> {
    ty.generic_arguments()
        .iter()
        .map(|arg| match arg {
            TypeRef::Parameter { position, .. } => Ok(*position),
            other => Err(CompositionError::NotAGenericParameter {
                ty: ty.to_string(),
                argument: other.to_string(),
            }),
        })
        .collect()
}
