//! The loaded, immutable system catalog.
//!
//! A [`Catalog`] only exists once its document has parsed and passed
//! validation, and nothing mutates it afterwards. It is `Send + Sync`, so any
//! number of threads may share one (e.g. behind an `Arc` or a `&'static`)
//! and query it without locking.

use crate::error::{CatalogError, Lookup};
use crate::handling::Handling;
use crate::types::{CATALOG_VERSION, CatalogDocument, System, SystemFlag, SystemIndex};
use crate::validate::validate_systems;
use std::collections::{BTreeSet, HashMap};

/// An ordered, validated collection of [`System`] records.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    systems: Vec<System>,
    by_index: HashMap<SystemIndex, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Validate a parsed document and build the lookup tables.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        let version = doc.effective_version();
        if version > CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: version,
                supported: CATALOG_VERSION,
            });
        }
        let catalog = Self::from_systems(doc.systems)?;
        log::debug!(
            "Catalog v{} ready with {} systems",
            version,
            catalog.systems.len()
        );
        Ok(Self { version, ..catalog })
    }

    /// Validate a list of records and build the lookup tables.
    pub fn from_systems(systems: Vec<System>) -> Result<Self, CatalogError> {
        validate_systems(&systems).map_err(CatalogError::Validation)?;

        let by_index = systems
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.index, pos))
            .collect();
        let by_name = systems
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.name.clone(), pos))
            .collect();

        Ok(Self {
            version: CATALOG_VERSION,
            systems,
            by_index,
            by_name,
        })
    }

    /// Format version of the document this catalog was loaded from.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Look up a system by its stable index.
    pub fn by_index(&self, index: impl Into<SystemIndex>) -> Result<&System, CatalogError> {
        let index = index.into();
        self.by_index
            .get(&index)
            .map(|&pos| &self.systems[pos])
            .ok_or(CatalogError::NotFound(Lookup::Index(index)))
    }

    /// Look up a system by exact (case-sensitive) name.
    pub fn by_name(&self, name: &str) -> Result<&System, CatalogError> {
        self.by_name
            .get(name)
            .map(|&pos| &self.systems[pos])
            .ok_or_else(|| CatalogError::NotFound(Lookup::Name(name.to_string())))
    }

    /// All systems in document order.
    ///
    /// Each call starts a fresh iteration; there is no shared cursor.
    pub fn all(&self) -> impl Iterator<Item = &System> + '_ {
        self.systems.iter()
    }

    /// Systems matching `predicate`, in document order.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a System> + 'a
    where
        P: Fn(&System) -> bool + 'a,
    {
        self.systems.iter().filter(move |s| predicate(*s))
    }

    /// Systems with the given optional flag set.
    pub fn with_flag(&self, flag: SystemFlag) -> impl Iterator<Item = &System> + '_ {
        self.filter(move |s| s.has_flag(flag))
    }

    /// Systems a downloader should process with the given strategy.
    pub fn by_handling(&self, handling: Handling) -> impl Iterator<Item = &System> + '_ {
        self.filter(move |s| Handling::for_system(s) == handling)
    }

    /// Systems whose manufacturer label matches exactly.
    pub fn by_manufacturer<'a>(
        &'a self,
        manufacturer: &'a str,
    ) -> impl Iterator<Item = &'a System> + 'a {
        self.filter(move |s| s.manufacturer == manufacturer)
    }

    /// Distinct manufacturer labels, sorted.
    pub fn manufacturers(&self) -> Vec<&str> {
        self.systems
            .iter()
            .map(|s| s.manufacturer.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct output dir keys, sorted.
    ///
    /// The configuration layer must provide a path for each of these.
    pub fn output_dir_keys(&self) -> Vec<&str> {
        self.systems
            .iter()
            .map(|s| s.output_dir_key.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Systems that download into the directory named by `key`.
    ///
    /// Fails if no system uses the key at all.
    pub fn by_output_dir_key(&self, key: &str) -> Result<Vec<&System>, CatalogError> {
        let found: Vec<&System> = self
            .systems
            .iter()
            .filter(|s| s.output_dir_key == key)
            .collect();
        if found.is_empty() {
            return Err(CatalogError::NotFound(Lookup::OutputDirKey(key.to_string())));
        }
        Ok(found)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a System;
    type IntoIter = std::slice::Iter<'a, System>;

    fn into_iter(self) -> Self::IntoIter {
        self.systems.iter()
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
