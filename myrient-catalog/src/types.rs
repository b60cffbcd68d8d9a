//! Data model types for the system catalog.
//!
//! A catalog document is a single `systems` list of [`System`] records, each
//! describing one downloadable media set (e.g. "PSX ISOs") and how a
//! downloader should treat it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Highest catalog format version this crate understands.
pub const CATALOG_VERSION: u32 = 1;

/// Root directory used for output paths when no setting overrides them.
pub const DEFAULT_DOWNLOAD_ROOT: &str = "MyrientDownloads";

/// Characters escaped in file paths appended to a listing URL: everything
/// except unreserved characters and `/`.
const FILE_PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

// ── Index ───────────────────────────────────────────────────────────────────

/// Stable identifier of a system within the catalog.
///
/// Indices are unique but not positional: the catalog may contain gaps or
/// list them out of order, so never use one as a `Vec` offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemIndex(pub u32);

impl SystemIndex {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SystemIndex {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SystemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── System ──────────────────────────────────────────────────────────────────

/// One catalog entry: a media set and its download metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub name: String,
    pub index: SystemIndex,
    /// Base listing URL. Individual files live directly beneath it.
    pub url: String,
    /// Primary file suffix, including the leading dot (".iso").
    pub file_extension: String,
    /// Settings key holding the local destination directory.
    pub output_dir_key: String,
    pub manufacturer: String,
    /// Archives unpack to several files (e.g. `.cue` + `.bin`) that must stay together.
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_multiple_extensions: bool,
    /// Images are encrypted and need a disc key before use.
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_decryption: bool,
    /// Downloads are PKG files that need splitting and license handling.
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_pkg_handling: bool,
    /// Fields this version of the crate does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl System {
    /// Build a record with all optional flags unset.
    pub fn new(
        index: impl Into<SystemIndex>,
        name: impl Into<String>,
        url: impl Into<String>,
        file_extension: impl Into<String>,
        output_dir_key: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            index: index.into(),
            url: url.into(),
            file_extension: file_extension.into(),
            output_dir_key: output_dir_key.into(),
            manufacturer: manufacturer.into(),
            has_multiple_extensions: false,
            requires_decryption: false,
            requires_pkg_handling: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_flag(mut self, flag: SystemFlag) -> Self {
        match flag {
            SystemFlag::MultipleExtensions => self.has_multiple_extensions = true,
            SystemFlag::RequiresDecryption => self.requires_decryption = true,
            SystemFlag::RequiresPkgHandling => self.requires_pkg_handling = true,
        }
        self
    }

    /// Whether the given optional flag is set on this record.
    pub fn has_flag(&self, flag: SystemFlag) -> bool {
        match flag {
            SystemFlag::MultipleExtensions => self.has_multiple_extensions,
            SystemFlag::RequiresDecryption => self.requires_decryption,
            SystemFlag::RequiresPkgHandling => self.requires_pkg_handling,
        }
    }

    /// Name of the JSON file a downloader caches this system's listing in,
    /// e.g. "PS3 ISOs" becomes `ps3_isos_list.json`.
    pub fn list_cache_file_name(&self) -> String {
        format!("{}_list.json", self.name.replace(' ', "_").to_lowercase())
    }

    /// Destination used when settings have no entry for `output_dir_key`.
    pub fn default_output_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(DEFAULT_DOWNLOAD_ROOT).join(&self.name)
    }

    /// Full URL of a file in this system's listing. `/` in `file_name` is
    /// kept as a path separator.
    pub fn file_url(&self, file_name: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            utf8_percent_encode(file_name, FILE_PATH_ENCODE_SET)
        )
    }
}

// ── Flags ───────────────────────────────────────────────────────────────────

/// The optional boolean flags a record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemFlag {
    MultipleExtensions,
    RequiresDecryption,
    RequiresPkgHandling,
}

impl SystemFlag {
    pub const ALL: [SystemFlag; 3] = [
        Self::MultipleExtensions,
        Self::RequiresDecryption,
        Self::RequiresPkgHandling,
    ];

    /// The YAML key for this flag.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MultipleExtensions => "has_multiple_extensions",
            Self::RequiresDecryption => "requires_decryption",
            Self::RequiresPkgHandling => "requires_pkg_handling",
        }
    }
}

// ── Document ────────────────────────────────────────────────────────────────

/// The persisted catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Format version. Absent in older documents, which are treated as version 1.
    #[serde(default)]
    pub version: Option<u32>,
    pub systems: Vec<System>,
}

impl CatalogDocument {
    pub fn effective_version(&self) -> u32 {
        self.version.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nes() -> System {
        System::new(
            5u32,
            "NES ROMs",
            "https://example.com/files/nes/",
            ".nes",
            "nes_dir",
            "Nintendo",
        )
    }

    #[test]
    fn flags_start_unset_and_round_trip_through_with_flag() {
        for flag in SystemFlag::ALL {
            assert!(!nes().has_flag(flag));
            assert!(nes().with_flag(flag).has_flag(flag), "{}", flag.key());
        }
    }

    #[test]
    fn cache_name_and_default_dir() {
        let s = nes();
        assert_eq!(s.list_cache_file_name(), "nes_roms_list.json");
        assert_eq!(
            s.default_output_dir(),
            std::path::Path::new("MyrientDownloads").join("NES ROMs")
        );
    }

    #[test]
    fn file_url_avoids_double_slash() {
        assert_eq!(
            nes().file_url("Tetris (USA).zip"),
            "https://example.com/files/nes/Tetris%20%28USA%29.zip"
        );
    }

    #[test]
    fn file_url_keeps_slash_and_tilde() {
        assert_eq!(
            nes().file_url("Disc 1/a.zip"),
            "https://example.com/files/nes/Disc%201/a.zip"
        );
        assert_eq!(
            nes().file_url("a~b+c&d.zip"),
            "https://example.com/files/nes/a~b%2Bc%26d.zip"
        );
    }
}
