//! Post-download handling strategy derived from a system's flags.

use crate::types::System;
use std::fmt;

/// How a downloader should treat a finished download for a system.
///
/// Flags are checked in a fixed priority order, so a record carrying more
/// than one flag still maps to exactly one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handling {
    /// Unpack, then decrypt the image with its disc key (`requires_decryption`).
    Decrypt,
    /// Unpack, then split/handle the PKG and its license (`requires_pkg_handling`).
    PackageExtract,
    /// Unpack into a per-title folder, keeping every file (`has_multiple_extensions`).
    MultiFile,
    /// Unpack and keep the single file matching `file_extension`.
    Plain,
}

impl Handling {
    pub fn for_system(system: &System) -> Self {
        if system.requires_decryption {
            Self::Decrypt
        } else if system.requires_pkg_handling {
            Self::PackageExtract
        } else if system.has_multiple_extensions {
            Self::MultiFile
        } else {
            Self::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decrypt => "decrypt",
            Self::PackageExtract => "package-extract",
            Self::MultiFile => "multi-file",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Handling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SystemFlag;

    fn base() -> System {
        System::new(
            0u32,
            "Test ISOs",
            "https://example.com/files/Test",
            ".iso",
            "test_dir",
            "Test",
        )
    }

    #[test]
    fn no_flags_is_plain() {
        assert_eq!(Handling::for_system(&base()), Handling::Plain);
    }

    #[test]
    fn each_flag_maps_to_its_strategy() {
        let cases = [
            (SystemFlag::RequiresDecryption, Handling::Decrypt),
            (SystemFlag::RequiresPkgHandling, Handling::PackageExtract),
            (SystemFlag::MultipleExtensions, Handling::MultiFile),
        ];
        for (flag, expected) in cases {
            let system = base().with_flag(flag);
            assert_eq!(Handling::for_system(&system), expected, "flag {:?}", flag);
        }
    }

    #[test]
    fn decryption_wins_over_other_flags() {
        let system = base()
            .with_flag(SystemFlag::MultipleExtensions)
            .with_flag(SystemFlag::RequiresPkgHandling)
            .with_flag(SystemFlag::RequiresDecryption);
        assert_eq!(Handling::for_system(&system), Handling::Decrypt);
    }

    #[test]
    fn pkg_handling_wins_over_multiple_extensions() {
        let system = base()
            .with_flag(SystemFlag::MultipleExtensions)
            .with_flag(SystemFlag::RequiresPkgHandling);
        assert_eq!(Handling::for_system(&system), Handling::PackageExtract);
    }
}
