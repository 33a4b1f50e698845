//! # Implementors Registry
//!
//! Immutable mapping from a group name (usually a crate name) to the ordered
//! list of implementor descriptors published for that group.
//!
//! ## Key Features
//!
//! - **Built once**: populated through [`RegistryBuilder`] or a static table, never mutated after
//! - **Order preserving**: descriptors keep the exact order they were supplied in
//! - **Opaque descriptors**: contents are carried verbatim, never parsed or validated
//! - **Deterministic iteration**: group names iterate in sorted order
//!
//! ## Usage
//!
//! ```rust
//! use implementors_registry::registry::Registry;
//!
//! let registry = Registry::from_static(&[
//!     ("ethcore_db", &["impl Drop for Database", "impl Drop for DatabaseIterator"]),
//!     ("ethcore_dapps", &["impl Drop for ContentFetcherHandler"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.descriptor_count(), 3);
//! ```

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One pre-rendered implementation relationship, carried as an uninterpreted blob
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(String);

impl Descriptor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Descriptor {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Descriptor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Group name to descriptor sequence mapping handed to the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    groups: BTreeMap<String, Vec<Descriptor>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from a table embedded in source
    pub fn from_static(table: &[(&str, &[&str])]) -> Result<Self, RegistryError> {
        table
            .iter()
            .try_fold(Self::builder(), |builder, (group, descriptors)| {
                builder.group(*group, descriptors.iter().copied())
            })
            .map(RegistryBuilder::build)
    }

    /// Decode the canonical `{"group": ["descriptor", ...]}` JSON form
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        // Deserialize through a Vec of pairs so duplicate keys are caught
        // instead of silently collapsed by the map.
        let raw: RawGroups = serde_json::from_str(json)?;
        raw.0
            .into_iter()
            .try_fold(Self::builder(), |builder, (group, descriptors)| {
                builder.group(group, descriptors)
            })
            .map(RegistryBuilder::build)
    }

    pub fn to_json(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, group: &str) -> Option<&[Descriptor]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Iterate groups in sorted name order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Descriptor])> {
        self.groups
            .iter()
            .map(|(name, descriptors)| (name.as_str(), descriptors.as_slice()))
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of descriptors across all groups
    pub fn descriptor_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Accumulates groups before the registry is frozen
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    groups: BTreeMap<String, Vec<Descriptor>>,
}

impl RegistryBuilder {
    /// Add a group; names must be non-empty and unique
    pub fn group<I, D>(
        mut self,
        name: impl Into<String>,
        descriptors: I,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = D>,
        D: Into<Descriptor>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyGroupName);
        }
        if self.groups.contains_key(&name) {
            return Err(RegistryError::DuplicateGroup { group: name });
        }

        let descriptors = descriptors.into_iter().map(Into::into).collect();
        self.groups.insert(name, descriptors);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            groups: self.groups,
        }
    }
}

/// Group entries in document order, duplicates included
struct RawGroups(Vec<(String, Vec<Descriptor>)>);

impl<'de> Deserialize<'de> for RawGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RawGroupsVisitor;

        impl<'de> serde::de::Visitor<'de> for RawGroupsVisitor {
            type Value = RawGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping group names to descriptor arrays")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<Descriptor>>()? {
                    entries.push(entry);
                }
                Ok(RawGroups(entries))
            }
        }

        deserializer.deserialize_map(RawGroupsVisitor)
    }
}
