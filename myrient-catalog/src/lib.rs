//! System catalog for the Myrient downloader: data model, YAML I/O,
//! validation, lookups, and output-directory settings.
//!
//! The catalog is loaded once, validated as a whole, and then only read.
//! Consumers look systems up by index or name and branch on
//! [`Handling`] rather than on per-system special cases.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod handling;
pub mod settings;
pub mod types;
pub mod validate;
pub mod yaml;

pub use catalog::Catalog;
pub use error::{CatalogError, Lookup};
pub use handling::Handling;
pub use settings::{Settings, save_output_dir, settings_path};
pub use types::*;
pub use validate::{ValidationReport, Violation, ViolationKind, validate_systems};
pub use yaml::{load_file, load_reader, load_str, save_file, to_yaml_string};
