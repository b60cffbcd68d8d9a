//! The catalog shipped with the crate.
//!
//! `systems.yaml` is compiled into the binary and parsed on first access.
//! The result, success or failure, is cached for the life of the process.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use std::sync::OnceLock;

/// Raw YAML of the shipped catalog.
pub const SYSTEMS_YAML: &str = include_str!("../systems.yaml");

static BUILTIN: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// The shipped catalog, loaded once and shared read-only by all callers.
///
/// A failure here means the shipped file is broken; callers should refuse to
/// start any download work.
pub fn catalog() -> Result<&'static Catalog, &'static CatalogError> {
    BUILTIN
        .get_or_init(|| {
            let loaded = crate::yaml::load_str(SYSTEMS_YAML);
            match &loaded {
                Ok(c) => log::debug!("Loaded built-in catalog ({} systems)", c.len()),
                Err(e) => log::warn!("Built-in catalog is invalid: {e}"),
            }
            loaded
        })
        .as_ref()
}
