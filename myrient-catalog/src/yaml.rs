//! YAML loading and saving for the system catalog.
//!
//! The persisted layout is a single top-level `systems` list:
//!
//! ```text
//! version: 1
//! systems:
//!   - name: PS3 ISOs
//!     index: 0
//!     url: https://myrient.erista.me/files/Redump/Sony%20-%20PlayStation%203
//!     file_extension: .iso
//!     output_dir_key: ps3iso_dir
//!     manufacturer: Sony
//!     requires_decryption: true
//! ```

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::types::{CATALOG_VERSION, CatalogDocument};
use std::io::Read;
use std::path::Path;

/// Parse and validate a catalog from YAML text.
///
/// The whole document is rejected on any parse or validation failure; there
/// is no partial load.
pub fn load_str(contents: &str) -> Result<Catalog, CatalogError> {
    let doc: CatalogDocument = serde_yml::from_str(contents)
        .map_err(|source| CatalogError::Parse { path: None, source })?;
    Catalog::from_document(doc)
}

/// Parse and validate a catalog from any reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let doc: CatalogDocument = serde_yml::from_reader(reader)
        .map_err(|source| CatalogError::Parse { path: None, source })?;
    Catalog::from_document(doc)
}

/// Read, parse and validate a catalog file such as `systems.yaml`.
pub fn load_file(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let catalog = load_str(&contents).map_err(|e| match e {
        CatalogError::Parse { path: None, source } => CatalogError::Parse {
            path: Some(path.display().to_string()),
            source,
        },
        other => other,
    })?;
    log::debug!(
        "Loaded {} systems from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Serialize a catalog back to the persisted YAML layout.
///
/// Records are written in catalog order with the current format version.
/// Unset flags are omitted and unrecognized fields are written back verbatim.
pub fn to_yaml_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let doc = CatalogDocument {
        version: Some(CATALOG_VERSION),
        systems: catalog.all().cloned().collect(),
    };
    serde_yml::to_string(&doc).map_err(CatalogError::Serialize)
}

/// Write a catalog to `path`, replacing any existing file.
pub fn save_file(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let serialized = to_yaml_string(catalog)?;
    let io_err = |e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
