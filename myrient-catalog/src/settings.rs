//! Output-directory settings for catalog systems.
//!
//! The settings file lives at `~/.config/myrient-downloader/settings.toml`
//! and maps each system's `output_dir_key` to a local path:
//!
//! ```text
//! [output_dirs]
//! ps3iso_dir = "/games/ps3"
//! psxiso_dir = "/games/psx"
//!
//! [paths]
//! psn_rap_dir = "/games/exdata"
//! ```
//!
//! Keys without an entry fall back to `MyrientDownloads/<system name>`.
//! Whether the configured paths exist is not checked here.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::types::{DEFAULT_DOWNLOAD_ROOT, System};
use std::path::{Path, PathBuf};

const OUTPUT_DIRS_TABLE: &str = "output_dirs";
const PATHS_TABLE: &str = "paths";
const PSN_RAP_DIR_KEY: &str = "psn_rap_dir";

const APP_DIR: &str = "myrient-downloader";
const SETTINGS_FILE: &str = "settings.toml";

/// Where the settings file lives: `<config dir>/myrient-downloader/settings.toml`,
/// or `./settings.toml` relative to the working directory on platforms
/// without a config dir.
pub fn settings_path() -> PathBuf {
    match dirs::config_dir() {
        Some(config) => config.join(APP_DIR).join(SETTINGS_FILE),
        None => PathBuf::from(SETTINGS_FILE),
    }
}

/// Parsed contents of a settings file.
#[derive(Debug, Clone)]
pub struct Settings {
    doc: toml::Value,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            doc: toml::Value::Table(Default::default()),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(settings_error(path, e)),
        };
        Self::parse(&contents).map_err(|e| settings_error(path, e))
    }

    /// Read settings from the canonical [`settings_path`].
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::load(&settings_path())
    }

    /// Parse settings from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let doc: toml::Value = contents.parse()?;
        Ok(Self { doc })
    }

    /// The configured path for an output dir key, if any.
    pub fn configured_dir(&self, key: &str) -> Option<PathBuf> {
        let dir = self.doc.get(OUTPUT_DIRS_TABLE)?.get(key)?.as_str()?;
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }

    /// Resolve where downloads for `system` go: the configured path for its
    /// `output_dir_key`, or `MyrientDownloads/<name>`.
    pub fn output_dir(&self, system: &System) -> PathBuf {
        self.configured_dir(&system.output_dir_key)
            .unwrap_or_else(|| {
                log::debug!(
                    "No '{}' configured, using default for {}",
                    system.output_dir_key,
                    system.name
                );
                system.default_output_dir()
            })
    }

    /// Directory for PSN license (`.rap`) files.
    pub fn psn_rap_dir(&self) -> PathBuf {
        self.doc
            .get(PATHS_TABLE)
            .and_then(|t| t.get(PSN_RAP_DIR_KEY))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(DEFAULT_DOWNLOAD_ROOT).join("exdata"))
    }

    /// Output dir keys used by `catalog` that have no configured path.
    pub fn unconfigured_keys<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog
            .output_dir_keys()
            .into_iter()
            .filter(|key| self.configured_dir(key).is_none())
            .collect()
    }

    /// Set (or with `None`, remove) the path for an output dir key.
    ///
    /// Other keys and tables are left as they are.
    pub fn set_output_dir(&mut self, key: &str, dir: Option<&Path>) -> Result<(), &'static str> {
        let root = self
            .doc
            .as_table_mut()
            .ok_or("settings root is not a table")?;
        match dir {
            Some(p) => {
                root.entry(OUTPUT_DIRS_TABLE)
                    .or_insert_with(|| toml::Value::Table(Default::default()))
                    .as_table_mut()
                    .ok_or("[output_dirs] is not a table")?
                    .insert(
                        key.to_string(),
                        toml::Value::String(p.to_string_lossy().into_owned()),
                    );
            }
            None => {
                if let Some(existing) = root.get_mut(OUTPUT_DIRS_TABLE) {
                    existing
                        .as_table_mut()
                        .ok_or("[output_dirs] is not a table")?
                        .remove(key);
                }
            }
        }
        Ok(())
    }

    /// Write these settings to `path` through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| settings_error(path, e))?;
        }
        let serialized = toml::to_string_pretty(&self.doc).map_err(|e| settings_error(path, e))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized).map_err(|e| settings_error(path, e))?;
        std::fs::rename(&tmp, path).map_err(|e| settings_error(path, e))
    }
}

/// Save (or clear) the path for one output dir key in the settings file.
///
/// The existing file is read with the same rules as [`Settings::load`], so a
/// file that is unreadable or not valid TOML is reported and left untouched.
pub fn save_output_dir(
    settings_file: &Path,
    key: &str,
    dir: Option<&Path>,
) -> Result<(), CatalogError> {
    let mut settings = Settings::load(settings_file)?;
    settings
        .set_output_dir(key, dir)
        .map_err(|message| settings_error(settings_file, message))?;
    settings.save(settings_file)?;
    log::debug!("Saved '{}' to {}", key, settings_file.display());
    Ok(())
}

fn settings_error(path: &Path, message: impl ToString) -> CatalogError {
    CatalogError::Settings {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
