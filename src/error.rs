//! Error types for validation failures

use thiserror::Error;

use crate::platform::Platform;

/// The cause of a validation failure.
///
/// Every reason has a stable numeric code for programmatic dispatch and a
/// short label used in rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// The value is empty.
    NullName,
    /// The value matched a name the platform treats specially.
    ReservedName,
    /// The value contains characters the platform forbids.
    InvalidCharacter,
    /// The value is shorter or longer than the allowed bounds.
    InvalidLength,
    /// An absolute path was given where a relative name is required.
    FoundAbsolutePath,
    /// An absolute-path prefix is not well formed.
    MalformedAbsolutePath,
}

impl ErrorReason {
    /// Stable numeric code of the reason.
    pub const fn code(self) -> u16 {
        match self {
            ErrorReason::NullName => 1001,
            ErrorReason::ReservedName => 1002,
            ErrorReason::InvalidCharacter => 1100,
            ErrorReason::InvalidLength => 1101,
            ErrorReason::FoundAbsolutePath => 2001,
            ErrorReason::MalformedAbsolutePath => 2002,
        }
    }

    /// Label used in rendered messages, e.g. `INVALID_CHARACTER`.
    pub const fn label(self) -> &'static str {
        match self {
            ErrorReason::NullName => "NULL_NAME",
            ErrorReason::ReservedName => "RESERVED_NAME",
            ErrorReason::InvalidCharacter => "INVALID_CHARACTER",
            ErrorReason::InvalidLength => "INVALID_LENGTH",
            ErrorReason::FoundAbsolutePath => "FOUND_ABS_PATH",
            ErrorReason::MalformedAbsolutePath => "MALFORMED_ABS_PATH",
        }
    }

    /// Human description of the reason.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorReason::NullName => "empty value",
            ErrorReason::ReservedName => "found a reserved name by a platform",
            ErrorReason::InvalidCharacter => "invalid characters found",
            ErrorReason::InvalidLength => "found an invalid string length",
            ErrorReason::FoundAbsolutePath => {
                "found an absolute path where a relative path is required"
            }
            ErrorReason::MalformedAbsolutePath => "found an invalid absolute path format",
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The error type for validation failures.
///
/// Each variant corresponds to one [`ErrorReason`] and carries the target
/// platform plus whatever context makes the failure actionable: the distinct
/// offending characters, the matched reserved name, or the violated length
/// bounds. Offending characters are rendered as escaped literals, so a
/// carriage return shows up as `'\r'` in the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty name: reason=NULL_NAME, target-platform={platform}")]
    NullName { platform: Platform },

    #[error(
        "invalid char found: invalids=({rendered}), value={value:?}, reason=INVALID_CHARACTER, target-platform={platform}",
        rendered = fmt_char_list(.invalids)
    )]
    InvalidCharacter {
        /// Distinct offending characters, sorted.
        invalids: Vec<char>,
        value: String,
        platform: Platform,
    },

    #[error(
        "invalid string length {length} (allowed {min_len}..={max_len}): value={value:?}, reason=INVALID_LENGTH, target-platform={platform}"
    )]
    InvalidLength {
        length: usize,
        min_len: usize,
        max_len: usize,
        value: String,
        platform: Platform,
    },

    #[error(
        "found a reserved name {reserved_name:?}: reusable_name={reusable_name}, value={value:?}, reason=RESERVED_NAME, target-platform={platform}"
    )]
    ReservedName {
        /// The reserved name that matched, as listed in the platform tables.
        reserved_name: String,
        /// Whether the name is still usable on the platform despite being
        /// reserved. Everything this engine rejects today is categorically
        /// forbidden (`false`).
        reusable_name: bool,
        value: String,
        platform: Platform,
    },

    #[error(
        "found an absolute path where a relative path is required: value={value:?}, reason=FOUND_ABS_PATH, target-platform={platform}"
    )]
    FoundAbsolutePath { value: String, platform: Platform },

    #[error(
        "found an invalid absolute path format: value={value:?}, reason=MALFORMED_ABS_PATH, target-platform={platform}"
    )]
    MalformedAbsolutePath { value: String, platform: Platform },
}

impl ValidationError {
    /// The cause of the error.
    pub fn reason(&self) -> ErrorReason {
        match self {
            ValidationError::NullName { .. } => ErrorReason::NullName,
            ValidationError::InvalidCharacter { .. } => ErrorReason::InvalidCharacter,
            ValidationError::InvalidLength { .. } => ErrorReason::InvalidLength,
            ValidationError::ReservedName { .. } => ErrorReason::ReservedName,
            ValidationError::FoundAbsolutePath { .. } => ErrorReason::FoundAbsolutePath,
            ValidationError::MalformedAbsolutePath { .. } => ErrorReason::MalformedAbsolutePath,
        }
    }

    /// The platform the value was validated against.
    pub fn platform(&self) -> Platform {
        match self {
            ValidationError::NullName { platform }
            | ValidationError::InvalidCharacter { platform, .. }
            | ValidationError::InvalidLength { platform, .. }
            | ValidationError::ReservedName { platform, .. }
            | ValidationError::FoundAbsolutePath { platform, .. }
            | ValidationError::MalformedAbsolutePath { platform, .. } => *platform,
        }
    }

    /// Human description of the failure reason.
    pub fn description(&self) -> &'static str {
        self.reason().description()
    }

    /// The reserved name that matched, if the failure was [`ErrorReason::ReservedName`].
    pub fn reserved_name(&self) -> Option<&str> {
        match self {
            ValidationError::ReservedName { reserved_name, .. } => Some(reserved_name),
            _ => None,
        }
    }

    /// Whether the matched reserved name is still usable on the platform.
    ///
    /// `None` unless the failure was [`ErrorReason::ReservedName`].
    pub fn reusable_name(&self) -> Option<bool> {
        match self {
            ValidationError::ReservedName { reusable_name, .. } => Some(*reusable_name),
            _ => None,
        }
    }

    /// Distinct offending characters, sorted; empty unless the failure was
    /// [`ErrorReason::InvalidCharacter`].
    pub fn invalid_chars(&self) -> &[char] {
        match self {
            ValidationError::InvalidCharacter { invalids, .. } => invalids,
            _ => &[],
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

fn fmt_char_list(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("'{}'", c.escape_default()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(ErrorReason::NullName.code(), 1001);
        assert_eq!(ErrorReason::ReservedName.code(), 1002);
        assert_eq!(ErrorReason::InvalidCharacter.code(), 1100);
        assert_eq!(ErrorReason::InvalidLength.code(), 1101);
        assert_eq!(ErrorReason::FoundAbsolutePath.code(), 2001);
        assert_eq!(ErrorReason::MalformedAbsolutePath.code(), 2002);
    }

    #[test]
    fn test_invalid_char_message_escapes_controls() {
        let err = ValidationError::InvalidCharacter {
            invalids: vec!['\r'],
            value: "asdf\rsdf".to_string(),
            platform: Platform::Windows,
        };
        assert_eq!(
            err.to_string(),
            "invalid char found: invalids=('\\r'), value=\"asdf\\rsdf\", \
             reason=INVALID_CHARACTER, target-platform=Windows"
        );
    }

    #[test]
    fn test_accessors() {
        let err = ValidationError::ReservedName {
            reserved_name: "CON".to_string(),
            reusable_name: false,
            value: "CON.txt".to_string(),
            platform: Platform::Universal,
        };
        assert_eq!(err.reason(), ErrorReason::ReservedName);
        assert_eq!(err.platform(), Platform::Universal);
        assert_eq!(err.reserved_name(), Some("CON"));
        assert_eq!(err.reusable_name(), Some(false));
        assert!(err.invalid_chars().is_empty());

        let err = ValidationError::NullName {
            platform: Platform::Posix,
        };
        assert_eq!(err.reserved_name(), None);
        assert_eq!(err.reusable_name(), None);
        assert_eq!(err.description(), "empty value");
    }
}
