//! Metadata values and maps attached to exports and parts
//!
//! `MetadataMap` keeps insertion order so that a computed export map reads
//! in the order it was built, while equality ignores order.

pub mod keys;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attributed::CreationPolicy;
use crate::config::DuplicateKeyPolicy;
use crate::error::{CompositionError, CompositionResult};

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
    CreationPolicy(CreationPolicy),
    /// Generic parameter positions, in argument order
    Positions(Vec<usize>),
    /// Values collected from metadata declared more than once on a member
    Array(Vec<MetadataValue>),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_creation_policy(&self) -> Option<CreationPolicy> {
        match self {
            MetadataValue::CreationPolicy(policy) => Some(*policy),
            _ => None,
        }
    }

    pub fn as_positions(&self) -> Option<&[usize]> {
        match self {
            MetadataValue::Positions(positions) => Some(positions),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(OrderedFloat(value))
    }
}

impl From<CreationPolicy> for MetadataValue {
    fn from(value: CreationPolicy) -> Self {
        MetadataValue::CreationPolicy(value)
    }
}

/// String-keyed metadata with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap(IndexMap<String, MetadataValue>);

impl MetadataMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, MetadataValue> {
        self.0.iter()
    }

    /// Insert a new entry, failing if the key is already present.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> CompositionResult<()> {
        self.insert_with(key, value, DuplicateKeyPolicy::Fail)
    }

    /// Insert an entry, resolving a clash on an existing key with `policy`.
    pub fn insert_with(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
        policy: DuplicateKeyPolicy,
    ) -> CompositionResult<()> {
        let key = key.into();
        if self.0.contains_key(&key) {
            match policy {
                DuplicateKeyPolicy::Fail => {
                    return Err(CompositionError::DuplicateMetadataKey(key));
                }
                DuplicateKeyPolicy::Overwrite => {
                    warn!(key = %key, "Overwriting existing metadata entry");
                }
            }
        }
        self.0.insert(key, value.into());
        Ok(())
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut MetadataValue> {
        self.0.get_mut(key)
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = indexmap::map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Later entries replace earlier ones with the same key.
impl<K, V> FromIterator<(K, V)> for MetadataMap
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
