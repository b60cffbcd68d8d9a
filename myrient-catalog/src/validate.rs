//! Invariant checks run once when a catalog is loaded.
//!
//! Every record is checked and all violations are collected into a single
//! [`ValidationReport`], so one edit-and-reload cycle surfaces every problem
//! in the file instead of only the first.

use crate::types::{System, SystemIndex};
use std::collections::HashMap;
use std::fmt;

/// The specific invariant a record breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A mandatory string field is present but empty.
    EmptyField(&'static str),
    /// Another record earlier in the document already uses this index.
    DuplicateIndex { first_position: usize },
    /// Another record earlier in the document already uses this name.
    DuplicateName { first_position: usize },
    /// `file_extension` does not start with `.`.
    ExtensionMissingDot(String),
    /// `file_extension` is only a dot.
    ExtensionBareDot,
    /// `file_extension` contains whitespace (e.g. a trailing space).
    ExtensionWhitespace(String),
    /// `url` is not a well-formed absolute URL.
    MalformedUrl { url: String, reason: String },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "'{field}' must not be empty"),
            Self::DuplicateIndex { first_position } => {
                write!(f, "index already used by record #{first_position}")
            }
            Self::DuplicateName { first_position } => {
                write!(f, "name already used by record #{first_position}")
            }
            Self::ExtensionMissingDot(ext) => {
                write!(f, "file_extension '{ext}' must start with '.'")
            }
            Self::ExtensionBareDot => write!(f, "file_extension must have a suffix after '.'"),
            Self::ExtensionWhitespace(ext) => {
                write!(f, "file_extension '{ext}' must not contain whitespace")
            }
            Self::MalformedUrl { url, reason } => write!(f, "url '{url}' is malformed: {reason}"),
        }
    }
}

/// A single invariant violation, located by the record's position in the
/// document plus its declared index and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub position: usize,
    pub index: SystemIndex,
    pub name: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record #{} (index {}, name '{}'): {}",
            self.position, self.index, self.name, self.kind
        )
    }
}

/// All violations found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    fn push(&mut self, position: usize, system: &System, kind: ViolationKind) {
        self.violations.push(Violation {
            position,
            index: system.index,
            name: system.name.clone(),
            kind,
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Catalog failed validation with {} violation(s):",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// Check every catalog invariant across `systems`.
///
/// Returns `Err` with the full report if anything is wrong. Convention-only
/// problems (such as an output dir key that is not lower snake case) are
/// logged as warnings and do not fail validation.
pub fn validate_systems(systems: &[System]) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();
    let mut seen_index: HashMap<SystemIndex, usize> = HashMap::new();
    let mut seen_name: HashMap<&str, usize> = HashMap::new();

    if systems.is_empty() {
        log::warn!("Catalog contains no systems");
    }

    for (position, system) in systems.iter().enumerate() {
        for (field, value) in [
            ("name", &system.name),
            ("url", &system.url),
            ("file_extension", &system.file_extension),
            ("output_dir_key", &system.output_dir_key),
            ("manufacturer", &system.manufacturer),
        ] {
            if value.trim().is_empty() {
                report.push(position, system, ViolationKind::EmptyField(field));
            }
        }

        match seen_index.get(&system.index) {
            Some(&first_position) => {
                report.push(position, system, ViolationKind::DuplicateIndex { first_position })
            }
            None => {
                seen_index.insert(system.index, position);
            }
        }

        if !system.name.trim().is_empty() {
            match seen_name.get(system.name.as_str()) {
                Some(&first_position) => {
                    report.push(position, system, ViolationKind::DuplicateName { first_position })
                }
                None => {
                    seen_name.insert(system.name.as_str(), position);
                }
            }
        }

        let ext = system.file_extension.as_str();
        if !ext.trim().is_empty() {
            if !ext.starts_with('.') {
                report.push(
                    position,
                    system,
                    ViolationKind::ExtensionMissingDot(ext.to_string()),
                );
            } else if ext.len() == 1 {
                report.push(position, system, ViolationKind::ExtensionBareDot);
            } else if ext.chars().any(char::is_whitespace) {
                report.push(
                    position,
                    system,
                    ViolationKind::ExtensionWhitespace(ext.to_string()),
                );
            }
        }

        if !system.url.trim().is_empty() {
            if let Err(e) = url::Url::parse(&system.url) {
                report.push(
                    position,
                    system,
                    ViolationKind::MalformedUrl {
                        url: system.url.clone(),
                        reason: e.to_string(),
                    },
                );
            }
        }

        if !system.output_dir_key.is_empty() && !is_lower_snake_case(&system.output_dir_key) {
            log::warn!(
                "System '{}' uses output dir key '{}', expected lower_snake_case",
                system.name,
                system.output_dir_key
            );
        }

        if !system.extra.is_empty() {
            let keys: Vec<&str> = system.extra.keys().map(String::as_str).collect();
            log::warn!(
                "System '{}' has unrecognized fields (kept as-is): {}",
                system.name,
                keys.join(", ")
            );
        }
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}

/// `[a-z][a-z0-9_]*` with no leading, trailing, or doubled underscores.
pub fn is_lower_snake_case(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !s.ends_with('_')
        && !s.contains("__")
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
