//! Target platform selection
//!
//! A [`Platform`] names the rule set a name or path is validated against. It
//! is always an explicit input to the engine; [`Platform::auto`] resolves the
//! host OS once at the boundary for callers that want "whatever I am running
//! on".

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The platform whose filesystem rules apply.
///
/// `Universal` is a synthetic mode enforcing the strict intersection of all
/// per-platform legality rules, for producing cross-platform-safe names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux and other POSIX filesystems.
    Posix,
    /// Windows / NTFS.
    Windows,
    /// macOS (HFS+/APFS).
    MacOs,
    /// The intersection of all platform rules.
    Universal,
}

/// The error type returned when parsing an unknown platform name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform name: {0:?} (expected posix/linux, windows, macos, universal, or auto)")]
pub struct ParsePlatformError(pub(crate) String);

impl Platform {
    /// Resolve the platform of the host OS.
    ///
    /// # Examples
    /// ```
    /// use sanipath::Platform;
    ///
    /// #[cfg(target_os = "linux")]
    /// assert_eq!(Platform::auto(), Platform::Posix);
    /// ```
    pub fn auto() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Posix
        }
    }

    /// Default maximum length of a single name, in characters.
    pub fn default_max_name_len(self) -> usize {
        255
    }

    /// Default maximum length of a whole path, in characters.
    ///
    /// Windows keeps the legacy 260-character limit, and `Universal` inherits
    /// it as the most restrictive of the set.
    pub fn default_max_path_len(self) -> usize {
        match self {
            Platform::Posix => 4096,
            Platform::MacOs => 1024,
            Platform::Windows | Platform::Universal => 260,
        }
    }

    /// Whether Windows-specific restrictions (reserved device names, trailing
    /// characters, drive/UNC prefixes) apply under this platform.
    pub(crate) fn applies_windows_rules(self) -> bool {
        matches!(self, Platform::Windows | Platform::Universal)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Posix => "POSIX",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Universal => "universal",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posix" | "linux" => Ok(Platform::Posix),
            "windows" | "win" => Ok(Platform::Windows),
            "macos" | "mac" | "darwin" => Ok(Platform::MacOs),
            "universal" => Ok(Platform::Universal),
            "auto" => Ok(Platform::auto()),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Posix);
        assert_eq!("POSIX".parse::<Platform>().unwrap(), Platform::Posix);
        assert_eq!("Windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("macOS".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!("universal".parse::<Platform>().unwrap(), Platform::Universal);
    }

    #[test]
    fn test_parse_auto_resolves_host() {
        assert_eq!("auto".parse::<Platform>().unwrap(), Platform::auto());
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!("msdos".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Platform::Posix.to_string(), "POSIX");
        assert_eq!(Platform::Windows.to_string(), "Windows");
        assert_eq!(Platform::MacOs.to_string(), "macOS");
        assert_eq!(Platform::Universal.to_string(), "universal");
    }

    #[test]
    fn test_path_length_defaults() {
        assert_eq!(Platform::Posix.default_max_path_len(), 4096);
        assert_eq!(Platform::Windows.default_max_path_len(), 260);
        assert_eq!(Platform::MacOs.default_max_path_len(), 1024);
        assert_eq!(Platform::Universal.default_max_path_len(), 260);
    }
}
