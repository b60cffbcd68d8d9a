use crate::types::SystemIndex;
use crate::validate::{ValidationReport, Violation};
use std::fmt;
use thiserror::Error;

/// What a failed lookup was searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Index(SystemIndex),
    Name(String),
    OutputDirKey(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::OutputDirKey(key) => write!(f, "output dir key '{key}'"),
        }
    }
}

/// Errors produced while loading, saving, or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O error reading or writing a catalog file
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The document is not a well-formed catalog (wrong shape, wrong field
    /// type, or a mandatory field missing)
    #[error(
        "YAML parse error{}: {source}",
        path.as_deref().map(|p| format!(" in {p}")).unwrap_or_default()
    )]
    Parse {
        /// File the document came from, when it was read from disk
        path: Option<String>,
        source: serde_yml::Error,
    },

    /// The document declares a format version newer than this crate supports
    #[error("Unsupported catalog version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The document parsed but breaks one or more catalog invariants
    #[error("{0}")]
    Validation(ValidationReport),

    /// No system matched a lookup
    #[error("No system with {0}")]
    NotFound(Lookup),

    /// Serializing the catalog back to YAML failed
    #[error("YAML serialize error: {0}")]
    Serialize(serde_yml::Error),

    /// The settings file could not be read, parsed, or written
    #[error("Settings error in {path}: {message}")]
    Settings { path: String, message: String },
}

impl CatalogError {
    pub fn not_found(lookup: Lookup) -> Self {
        Self::NotFound(lookup)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Invariant violations carried by a validation failure, empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(report) => report.violations(),
            _ => &[],
        }
    }
}
