//! Single-name validation and sanitization
//!
//! A "name" is one path component: a candidate file or directory name with no
//! separators. The path layer reuses the same checks in component mode, where
//! `.` and `..` are ordinary relative-path steps and root-only reserved names
//! apply to the first component of an absolute path.

use crate::error::{Result, ValidationError};
use crate::platform::Platform;
use crate::rules::{is_path_separator, ntfs_reserved_name, rules_for, RuleSet};

/// Where a name sits when it is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameContext {
    /// A standalone file or directory name.
    Standalone,
    /// A component inside a larger path.
    Component { at_root: bool },
}

/// Validates a single file/directory name against a platform's rules.
///
/// # Examples
/// ```
/// use sanipath::{ErrorReason, NameValidator, Platform};
///
/// let validator = NameValidator::new(Platform::Windows);
/// assert!(validator.validate("report.txt").is_ok());
///
/// let err = validator.validate("version:2").unwrap_err();
/// assert_eq!(err.reason(), ErrorReason::InvalidCharacter);
/// ```
#[derive(Debug, Clone)]
pub struct NameValidator {
    platform: Platform,
    min_len: usize,
    max_len: usize,
}

impl NameValidator {
    /// Create a validator with the platform's default length bounds
    /// (1..=255 characters).
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            min_len: 1,
            max_len: rules_for(platform).max_name_len,
        }
    }

    /// Override the minimum length. Values below 1 are treated as 1; an empty
    /// name is always `NullName`, never `InvalidLength`.
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Override the platform's default maximum length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Validate `name`, returning the first rule violation.
    ///
    /// # Panics
    /// Panics if the configured `max_len` is zero or smaller than `min_len`;
    /// that is a caller bug, not a property of `name`.
    pub fn validate(&self, name: &str) -> Result<()> {
        self.validate_in_context(name, NameContext::Standalone)
    }

    pub(crate) fn validate_in_context(&self, name: &str, context: NameContext) -> Result<()> {
        self.assert_len_bounds();
        let rules = rules_for(self.platform);

        if name.is_empty() {
            return Err(ValidationError::NullName {
                platform: self.platform,
            });
        }

        if context == NameContext::Standalone && has_absolute_prefix(name, self.platform) {
            return Err(ValidationError::FoundAbsolutePath {
                value: name.to_string(),
                platform: self.platform,
            });
        }

        let length = name.chars().count();
        if length < self.min_len || length > self.max_len {
            return Err(ValidationError::InvalidLength {
                length,
                min_len: self.min_len,
                max_len: self.max_len,
                value: name.to_string(),
                platform: self.platform,
            });
        }

        let invalids = collect_invalid_chars(name, rules, context);
        if !invalids.is_empty() {
            return Err(ValidationError::InvalidCharacter {
                invalids,
                value: name.to_string(),
                platform: self.platform,
            });
        }

        match context {
            NameContext::Component { at_root } => {
                // Inside a path, `.` and `..` are ordinary steps.
                if name == "." || name == ".." {
                    return Ok(());
                }
                if at_root {
                    if let Some(reserved) = ntfs_reserved_name(name) {
                        return Err(self.reserved(reserved, name));
                    }
                }
            }
            NameContext::Standalone => {
                if rules.restricts_trailing_chars && name != "." && name != ".." {
                    if let Some(last) = name.chars().last() {
                        if last == '.' || last == ' ' {
                            return Err(ValidationError::InvalidCharacter {
                                invalids: vec![last],
                                value: name.to_string(),
                                platform: self.platform,
                            });
                        }
                    }
                }
                if name == "." || name == ".." {
                    return Err(self.reserved(name, name));
                }
            }
        }

        if let Some(reserved) = rules.reserved_device_name(name) {
            return Err(self.reserved(reserved, name));
        }

        Ok(())
    }

    fn reserved(&self, reserved: &str, value: &str) -> ValidationError {
        ValidationError::ReservedName {
            reserved_name: reserved.to_string(),
            reusable_name: false,
            value: value.to_string(),
            platform: self.platform,
        }
    }

    fn assert_len_bounds(&self) {
        assert!(self.max_len > 0, "max_len must be positive");
        assert!(
            self.min_len <= self.max_len,
            "min_len ({}) must not exceed max_len ({})",
            self.min_len,
            self.max_len
        );
    }
}

/// Rewrites a single file/directory name into one that passes validation.
///
/// Sanitization never fails: invalid characters become the replacement text
/// (empty by default), reserved names get a suffix ahead of their extension,
/// trailing `.`/space are stripped on Windows/Universal, and the result is
/// clamped to `max_len` characters. An empty result means nothing of the
/// input survived; callers should treat that as they would a `NullName`.
///
/// # Examples
/// ```
/// use sanipath::{NameSanitizer, Platform};
///
/// let sanitizer = NameSanitizer::new(Platform::Universal);
/// assert_eq!(sanitizer.sanitize("report:v2?.txt"), "reportv2.txt");
/// assert_eq!(sanitizer.sanitize("NUL.txt"), "NUL_.txt");
/// ```
#[derive(Debug, Clone)]
pub struct NameSanitizer {
    platform: Platform,
    replacement: String,
    max_len: usize,
}

impl NameSanitizer {
    /// Create a sanitizer that deletes invalid characters and clamps to the
    /// platform's default name length (255 characters).
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            replacement: String::new(),
            max_len: rules_for(platform).max_name_len,
        }
    }

    /// Replace each invalid character with `text` instead of deleting it.
    pub fn replacement_text(mut self, text: impl Into<String>) -> Self {
        self.replacement = text.into();
        self
    }

    /// Override the maximum length the result is clamped to.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sanitize `name`.
    ///
    /// # Panics
    /// Panics if `max_len` is zero, or if the replacement text itself
    /// contains characters invalid on the platform (or ends with `.`/space
    /// where the platform forbids trailing ones); such a replacement could
    /// never produce a valid result.
    pub fn sanitize(&self, name: &str) -> String {
        self.sanitize_in_context(name, NameContext::Standalone)
    }

    pub(crate) fn sanitize_in_context(&self, name: &str, context: NameContext) -> String {
        self.assert_usage();
        let rules = rules_for(self.platform);

        if matches!(context, NameContext::Component { .. }) && (name == "." || name == "..") {
            return name.to_string();
        }

        let mut out = String::with_capacity(name.len());
        for c in name.chars() {
            let invalid = match context {
                NameContext::Standalone => rules.is_invalid_name_char(c),
                NameContext::Component { .. } => rules.is_invalid_component_char(c),
            };
            if invalid {
                out.push_str(&self.replacement);
            } else {
                out.push(c);
            }
        }

        // Trailing strip runs before the reserved fix so that "CON " cannot
        // collapse into a bare reserved name afterwards.
        self.strip_trailing(&mut out, rules);
        out = self.fix_reserved(out, context, rules);

        if out.chars().count() > self.max_len {
            out = out.chars().take(self.max_len).collect();
            self.strip_trailing(&mut out, rules);
        }

        out
    }

    fn strip_trailing(&self, out: &mut String, rules: &RuleSet) {
        if !rules.restricts_trailing_chars || out == "." || out == ".." {
            return;
        }
        while out.ends_with('.') || out.ends_with(' ') {
            out.pop();
        }
    }

    /// Append the suffix to the base name, ahead of the last extension, until
    /// the name no longer matches a reserved name.
    fn fix_reserved(&self, mut name: String, context: NameContext, rules: &RuleSet) -> String {
        let suffix = if self.replacement.is_empty() {
            "_"
        } else {
            self.replacement.as_str()
        };

        loop {
            let reserved = match context {
                NameContext::Component { at_root } => {
                    rules.reserved_device_name(&name).is_some()
                        || (at_root && ntfs_reserved_name(&name).is_some())
                }
                NameContext::Standalone => {
                    name == "."
                        || name == ".."
                        || rules.reserved_device_name(&name).is_some()
                }
            };
            if !reserved {
                return name;
            }
            name = match name.rsplit_once('.') {
                Some((base, ext)) if !base.is_empty() && !base.bytes().all(|b| b == b'.') => {
                    format!("{base}{suffix}.{ext}")
                }
                _ => format!("{name}{suffix}"),
            };
        }
    }

    fn assert_usage(&self) {
        assert!(self.max_len > 0, "max_len must be positive");
        let rules = rules_for(self.platform);
        assert!(
            self.replacement
                .chars()
                .all(|c| !rules.is_invalid_name_char(c)),
            "replacement text {:?} contains characters invalid on {}",
            self.replacement,
            self.platform
        );
        if rules.restricts_trailing_chars {
            assert!(
                !self.replacement.ends_with('.') && !self.replacement.ends_with(' '),
                "replacement text {:?} would leave a trailing '.' or space on {}",
                self.replacement,
                self.platform
            );
        }
    }
}

fn collect_invalid_chars(name: &str, rules: &RuleSet, context: NameContext) -> Vec<char> {
    let mut invalids: Vec<char> = name
        .chars()
        .filter(|&c| match context {
            NameContext::Standalone => rules.is_invalid_name_char(c),
            NameContext::Component { .. } => rules.is_invalid_component_char(c),
        })
        .collect();
    invalids.sort_unstable();
    invalids.dedup();
    invalids
}

/// Whether `name` starts with an absolute-path shape for the platform.
fn has_absolute_prefix(name: &str, platform: Platform) -> bool {
    if name.starts_with('/') {
        return true;
    }
    if platform.applies_windows_rules() {
        if name.starts_with('\\') {
            return true;
        }
        let mut chars = name.chars();
        if let (Some(letter), Some(':')) = (chars.next(), chars.next()) {
            if letter.is_ascii_alphabetic() {
                return matches!(chars.next(), Some(c) if is_path_separator(c));
            }
        }
    }
    false
}

/// Validate `name` as a file/directory name under `platform`'s rules.
///
/// # Examples
/// ```
/// use sanipath::{validate_filename, ErrorReason, Platform};
///
/// assert!(validate_filename("notes.md", Platform::Universal).is_ok());
///
/// let err = validate_filename("COM1.txt", Platform::Windows).unwrap_err();
/// assert_eq!(err.reason(), ErrorReason::ReservedName);
/// assert_eq!(err.reserved_name(), Some("COM1"));
/// ```
pub fn validate_filename(name: &str, platform: Platform) -> Result<()> {
    NameValidator::new(platform).validate(name)
}

/// Whether `name` is a valid file/directory name under `platform`'s rules.
///
/// # Examples
/// ```
/// use sanipath::{is_valid_filename, Platform};
///
/// assert!(is_valid_filename("notes.md", Platform::Universal));
/// assert!(!is_valid_filename("no|pipes", Platform::Universal));
/// assert!(is_valid_filename("no|pipes", Platform::Posix));
/// ```
pub fn is_valid_filename(name: &str, platform: Platform) -> bool {
    validate_filename(name, platform).is_ok()
}

/// Rewrite `name` into a valid file/directory name for `platform`, deleting
/// invalid characters. See [`NameSanitizer`] for replacement text and length
/// control.
///
/// # Examples
/// ```
/// use sanipath::{sanitize_filename, Platform};
///
/// assert_eq!(sanitize_filename("fi:le*name?.txt", Platform::Universal), "filename.txt");
/// assert_eq!(sanitize_filename("CON", Platform::Windows), "CON_");
/// assert_eq!(sanitize_filename("CON", Platform::Posix), "CON");
/// ```
pub fn sanitize_filename(name: &str, platform: Platform) -> String {
    NameSanitizer::new(platform).sanitize(name)
}
