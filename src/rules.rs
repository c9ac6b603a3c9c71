//! Static per-platform rule tables
//!
//! Pure data: invalid-character predicates, reserved-name tables, and length
//! defaults. Everything here is `'static` and shared freely across threads.

use crate::platform::Platform;

/// Base names Windows reserves for devices, matched case-insensitively
/// against a name with its last extension stripped.
pub(crate) const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "CLOCK$", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// NTFS metadata file names, reserved only in the root directory of an
/// absolute path. Matched case-insensitively against the whole component.
pub(crate) const NTFS_RESERVED_NAMES: &[&str] = &[
    "$MFT", "$MFTMIRR", "$LOGFILE", "$VOLUME", "$ATTRDEF", "$BITMAP", "$BOOT", "$BADCLUS",
    "$SECURE", "$UPCASE", "$EXTEND", "$QUOTA", "$OBJID", "$REPARSE",
];

/// The immutable rule record for one platform.
#[derive(Debug)]
pub(crate) struct RuleSet {
    platform: Platform,
    /// Reserved device base names; empty on platforms without the rule.
    pub(crate) reserved_device_names: &'static [&'static str],
    /// Whether a name may not end with `.` or space.
    pub(crate) restricts_trailing_chars: bool,
    pub(crate) max_name_len: usize,
    pub(crate) max_path_len: usize,
}

const POSIX_RULES: RuleSet = RuleSet {
    platform: Platform::Posix,
    reserved_device_names: &[],
    restricts_trailing_chars: false,
    max_name_len: 255,
    max_path_len: 4096,
};

const WINDOWS_RULES: RuleSet = RuleSet {
    platform: Platform::Windows,
    reserved_device_names: WINDOWS_RESERVED_NAMES,
    restricts_trailing_chars: true,
    max_name_len: 255,
    max_path_len: 260,
};

const MACOS_RULES: RuleSet = RuleSet {
    platform: Platform::MacOs,
    reserved_device_names: &[],
    restricts_trailing_chars: false,
    max_name_len: 255,
    max_path_len: 1024,
};

const UNIVERSAL_RULES: RuleSet = RuleSet {
    platform: Platform::Universal,
    reserved_device_names: WINDOWS_RESERVED_NAMES,
    restricts_trailing_chars: true,
    max_name_len: 255,
    max_path_len: 260,
};

/// Look up the rule record for a platform.
pub(crate) const fn rules_for(platform: Platform) -> &'static RuleSet {
    match platform {
        Platform::Posix => &POSIX_RULES,
        Platform::Windows => &WINDOWS_RULES,
        Platform::MacOs => &MACOS_RULES,
        Platform::Universal => &UNIVERSAL_RULES,
    }
}

impl RuleSet {
    /// Whether `c` is forbidden in a standalone file/directory name.
    ///
    /// The Universal set is the union of the per-platform sets, which
    /// collapses to the Windows set (the property tests pin this).
    pub(crate) fn is_invalid_name_char(&self, c: char) -> bool {
        match self.platform {
            Platform::Posix => matches!(c, '/' | '\0'),
            Platform::MacOs => matches!(c, '/' | '\0' | ':'),
            Platform::Windows | Platform::Universal => {
                matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
                    || (c as u32) < 0x20
            }
        }
    }

    /// Whether `c` is forbidden inside a path component. Separators are
    /// structural at the path layer, never component errors. The macOS colon
    /// rule applies to standalone names only; inside a path its components
    /// follow the POSIX set, which keeps Universal a superset of every
    /// platform even when a drive prefix like `C:` is in play.
    pub(crate) fn is_invalid_component_char(&self, c: char) -> bool {
        match self.platform {
            Platform::MacOs => c == '\0',
            _ => !is_path_separator(c) && self.is_invalid_name_char(c),
        }
    }

    /// The reserved device name matching `name` (extension stripped,
    /// case-insensitive), if any.
    pub(crate) fn reserved_device_name(&self, name: &str) -> Option<&'static str> {
        if self.reserved_device_names.is_empty() {
            return None;
        }
        let base = strip_extension(name).to_uppercase();
        self.reserved_device_names
            .iter()
            .copied()
            .find(|reserved| *reserved == base)
    }
}

/// The NTFS metadata name matching `name` (case-insensitive, full component),
/// if any. Only meaningful for the root component of an absolute path.
pub(crate) fn ntfs_reserved_name(name: &str) -> Option<&'static str> {
    let upper = name.to_uppercase();
    NTFS_RESERVED_NAMES
        .iter()
        .copied()
        .find(|reserved| *reserved == upper)
}

pub(crate) fn is_path_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Strip the last extension from a name, leaving dotfiles and dot-only names
/// alone: `"CON.txt"` → `"CON"`, `".hidden"` → `".hidden"`, `".."` → `".."`.
pub(crate) fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() && !base.bytes().all(|b| b == b'.') => base,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_only_rejects_separator_and_nul() {
        let rules = rules_for(Platform::Posix);
        assert!(rules.is_invalid_name_char('/'));
        assert!(rules.is_invalid_name_char('\0'));
        for c in [':', '*', '?', '"', '<', '>', '|', '\\', '\r', '\x1f'] {
            assert!(!rules.is_invalid_name_char(c), "POSIX should allow {c:?}");
        }
    }

    #[test]
    fn test_macos_additionally_rejects_colon() {
        let rules = rules_for(Platform::MacOs);
        assert!(rules.is_invalid_name_char(':'));
        assert!(!rules.is_invalid_name_char('*'));
    }

    #[test]
    fn test_windows_rejects_printables_and_controls() {
        let rules = rules_for(Platform::Windows);
        for c in ['<', '>', ':', '"', '|', '?', '*', '/', '\\', '\0', '\x1f', '\r'] {
            assert!(rules.is_invalid_name_char(c), "Windows should reject {c:?}");
        }
        assert!(!rules.is_invalid_name_char(' '));
        assert!(!rules.is_invalid_name_char('\u{7f}'));
    }

    #[test]
    fn test_component_chars_exclude_separators() {
        let rules = rules_for(Platform::Universal);
        assert!(!rules.is_invalid_component_char('/'));
        assert!(!rules.is_invalid_component_char('\\'));
        assert!(rules.is_invalid_component_char(':'));
    }

    #[test]
    fn test_macos_component_chars_follow_posix() {
        let rules = rules_for(Platform::MacOs);
        assert!(rules.is_invalid_name_char(':'));
        assert!(!rules.is_invalid_component_char(':'));
        assert!(rules.is_invalid_component_char('\0'));
    }

    #[test]
    fn test_reserved_device_name_strips_extension() {
        let rules = rules_for(Platform::Windows);
        assert_eq!(rules.reserved_device_name("CON"), Some("CON"));
        assert_eq!(rules.reserved_device_name("con.txt"), Some("CON"));
        assert_eq!(rules.reserved_device_name("Prn.log"), Some("PRN"));
        assert_eq!(rules.reserved_device_name("clock$"), Some("CLOCK$"));
        assert_eq!(rules.reserved_device_name("CON.tar.gz"), None);
        assert_eq!(rules.reserved_device_name("CONSOLE"), None);

        let rules = rules_for(Platform::Posix);
        assert_eq!(rules.reserved_device_name("CON"), None);
    }

    #[test]
    fn test_ntfs_reserved_name_matches_whole_component() {
        assert_eq!(ntfs_reserved_name("$Mft"), Some("$MFT"));
        assert_eq!(ntfs_reserved_name("$LOGFILE"), Some("$LOGFILE"));
        assert_eq!(ntfs_reserved_name("$Mft.txt"), None);
        assert_eq!(ntfs_reserved_name("Mft"), None);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("CON.txt"), "CON");
        assert_eq!(strip_extension("a.b.c"), "a.b");
        assert_eq!(strip_extension("name."), "name");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("."), ".");
        assert_eq!(strip_extension(".."), "..");
        assert_eq!(strip_extension("..."), "...");
        assert_eq!(strip_extension("noext"), "noext");
    }
}
