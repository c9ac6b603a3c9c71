//! Full-path validation and sanitization
//!
//! Paths are treated as cross-platform-authored strings, not native OS
//! values: both `/` and `\` separate components regardless of the target
//! platform, and recognized absolute prefixes (POSIX root, `X:` drives, UNC
//! hosts) are peeled off before the components are checked one by one.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Result, ValidationError};
use crate::filename::{NameContext, NameSanitizer, NameValidator};
use crate::platform::Platform;
use crate::rules::{is_path_separator, ntfs_reserved_name, rules_for};

/// A recognized absolute-path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prefix {
    None,
    /// A bare leading separator.
    Root,
    /// `X:`, optionally followed by a separator.
    Drive { letter: char, rooted: bool },
    /// `\\host` lead-in of a UNC path.
    Unc { host: String },
}

impl Prefix {
    fn is_absolute(&self) -> bool {
        match self {
            Prefix::None => false,
            Prefix::Root | Prefix::Unc { .. } => true,
            Prefix::Drive { rooted, .. } => *rooted,
        }
    }
}

#[derive(Debug)]
struct PathComponents {
    prefix: Prefix,
    components: Vec<String>,
}

fn is_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Decompose without failing: malformed prefixes degrade to ordinary
/// component text (or a bare root for a hostless UNC lead-in).
fn decompose_lenient(path: &str, platform: Platform) -> PathComponents {
    let windows = platform.applies_windows_rules();

    let (prefix, rest) = if windows && (path.starts_with("\\\\") || path.starts_with("//")) {
        let body = &path[2..];
        let host: String = body
            .chars()
            .take_while(|&c| !is_path_separator(c))
            .collect();
        if host.is_empty() {
            (Prefix::Root, body)
        } else {
            let rest = &body[host.len()..];
            (Prefix::Unc { host }, rest)
        }
    } else if windows && is_drive_prefix(path) && drive_tail_is_separated(path) {
        let letter = path.as_bytes()[0] as char;
        let after = &path[2..];
        (
            Prefix::Drive {
                letter,
                rooted: !after.is_empty(),
            },
            after,
        )
    } else if path.starts_with('/') || (windows && path.starts_with('\\')) {
        // only Windows/Universal treat a leading backslash as a root; on
        // POSIX and macOS it is separator noise ahead of the first component
        (Prefix::Root, path)
    } else {
        (Prefix::None, path)
    };

    PathComponents {
        prefix,
        components: rest
            .split(is_path_separator)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn drive_tail_is_separated(path: &str) -> bool {
    let after = &path[2..];
    after.is_empty() || after.starts_with(is_path_separator)
}

/// Decompose for validation: malformed absolute prefixes are errors.
fn decompose(path: &str, platform: Platform) -> Result<PathComponents> {
    if platform.applies_windows_rules() {
        if (path.starts_with("\\\\") || path.starts_with("//"))
            && path[2..].chars().next().map_or(true, is_path_separator)
        {
            // UNC lead-in with no host
            return Err(ValidationError::MalformedAbsolutePath {
                value: path.to_string(),
                platform,
            });
        }
        if is_drive_prefix(path) && !drive_tail_is_separated(path) {
            // a drive letter must be followed by a separator or end the path
            return Err(ValidationError::MalformedAbsolutePath {
                value: path.to_string(),
                platform,
            });
        }
    }
    Ok(decompose_lenient(path, platform))
}

/// Validates a whole path against a platform's rules.
///
/// The total length is checked against the platform's path maximum (4096 on
/// POSIX, 260 on Windows and Universal, 1024 on macOS), then every component
/// is checked like a name, with `.`/`..` allowed as relative steps and the
/// NTFS metadata names rejected in the root position of an absolute path.
///
/// # Examples
/// ```
/// use sanipath::{ErrorReason, PathValidator, Platform};
///
/// let validator = PathValidator::new(Platform::Windows);
/// assert!(validator.validate("C:\\Users\\test\\report.csv").is_ok());
///
/// let err = validator.validate("C:\\Users\\aux.txt").unwrap_err();
/// assert_eq!(err.reason(), ErrorReason::ReservedName);
/// ```
#[derive(Debug, Clone)]
pub struct PathValidator {
    platform: Platform,
    min_len: usize,
    max_len: usize,
}

impl PathValidator {
    /// Create a validator with the platform's default path length bounds.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            min_len: 1,
            max_len: platform.default_max_path_len(),
        }
    }

    /// Override the minimum total length. Values below 1 are treated as 1.
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Override the platform's default maximum total length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Validate `path`, returning the first rule violation.
    ///
    /// Non-UTF-8 paths are converted lossily before validation.
    ///
    /// # Panics
    /// Panics if the configured `max_len` is zero or smaller than `min_len`.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate_str(&path.as_ref().to_string_lossy())
    }

    fn validate_str(&self, path: &str) -> Result<()> {
        self.assert_len_bounds();

        if path.is_empty() {
            return Err(ValidationError::NullName {
                platform: self.platform,
            });
        }

        let length = path.chars().count();
        if length < self.min_len || length > self.max_len {
            return Err(ValidationError::InvalidLength {
                length,
                min_len: self.min_len,
                max_len: self.max_len,
                value: path.to_string(),
                platform: self.platform,
            });
        }

        let parts = decompose(path, self.platform)?;

        if let Prefix::Unc { host } = &parts.prefix {
            let rules = rules_for(self.platform);
            let mut invalids: Vec<char> = host
                .chars()
                .filter(|&c| rules.is_invalid_component_char(c))
                .collect();
            invalids.sort_unstable();
            invalids.dedup();
            if !invalids.is_empty() {
                return Err(ValidationError::InvalidCharacter {
                    invalids,
                    value: path.to_string(),
                    platform: self.platform,
                });
            }
            // the host occupies the root slot of the path, so the NTFS
            // metadata names are off limits there as well
            if let Some(reserved) = ntfs_reserved_name(host) {
                return Err(ValidationError::ReservedName {
                    reserved_name: reserved.to_string(),
                    reusable_name: false,
                    value: path.to_string(),
                    platform: self.platform,
                });
            }
        }

        // A component can never outgrow the whole path, so the path bound
        // doubles as the component bound here.
        let name_validator = NameValidator::new(self.platform).max_len(self.max_len);
        let mut at_root = parts.prefix.is_absolute();
        for component in &parts.components {
            name_validator.validate_in_context(component, NameContext::Component { at_root })?;
            at_root = false;
        }

        Ok(())
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

/// A path value the sanitizer can take apart and hand back: strings come
/// back as [`String`], path objects as [`PathBuf`].
pub trait FilePath {
    /// The owned type returned after sanitization.
    type Sanitized;

    /// View the value as a path string (lossily for non-UTF-8 paths).
    fn as_path_str(&self) -> Cow<'_, str>;

    /// Rebuild the output type from the sanitized string.
    fn assemble(sanitized: String) -> Self::Sanitized;
}

impl FilePath for &str {
    type Sanitized = String;

    fn as_path_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }

    fn assemble(sanitized: String) -> String {
        sanitized
    }
}

impl FilePath for String {
    type Sanitized = String;

    fn as_path_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    fn assemble(sanitized: String) -> String {
        sanitized
    }
}

impl FilePath for &Path {
    type Sanitized = PathBuf;

    fn as_path_str(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }

    fn assemble(sanitized: String) -> PathBuf {
        PathBuf::from(sanitized)
    }
}

impl FilePath for PathBuf {
    type Sanitized = PathBuf;

    fn as_path_str(&self) -> Cow<'_, str> {
        self.as_path().to_string_lossy()
    }

    fn assemble(sanitized: String) -> PathBuf {
        PathBuf::from(sanitized)
    }
}

impl FilePath for &PathBuf {
    type Sanitized = PathBuf;

    fn as_path_str(&self) -> Cow<'_, str> {
        self.as_path().to_string_lossy()
    }

    fn assemble(sanitized: String) -> PathBuf {
        PathBuf::from(sanitized)
    }
}

/// Rewrites a whole path into one that passes validation.
///
/// Components are sanitized one by one (see [`NameSanitizer`]); components
/// that sanitize to nothing are dropped, while the absolute prefix is always
/// kept. Reassembly uses `\` when the target is Windows and the input used
/// backslashes, `/` otherwise.
///
/// # Examples
/// ```
/// use sanipath::{PathSanitizer, Platform};
///
/// let sanitizer = PathSanitizer::new(Platform::Universal);
/// assert_eq!(sanitizer.sanitize("/abc/CON/xyz"), "/abc/CON_/xyz");
/// assert_eq!(sanitizer.sanitize("C:\\docs\\a?b.txt"), "C:/docs/ab.txt");
/// ```
#[derive(Debug, Clone)]
pub struct PathSanitizer {
    platform: Platform,
    replacement: String,
    max_len: usize,
}

impl PathSanitizer {
    /// Create a sanitizer that deletes invalid characters and clamps each
    /// component to the platform's default name length.
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

    /// Override the maximum length each component is clamped to.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sanitize `path`, returning the same kind of value that was passed in.
    ///
    /// # Panics
    /// Panics on replacement text that contains path separators or characters
    /// invalid on the platform, and on a zero `max_len`.
    pub fn sanitize<P: FilePath>(&self, path: P) -> P::Sanitized {
        P::assemble(self.sanitize_str(&path.as_path_str()))
    }

    fn sanitize_str(&self, path: &str) -> String {
        self.assert_usage();

        if path.is_empty() {
            return String::new();
        }

        let parts = decompose_lenient(path, self.platform);
        let sep = self.separator_for(path);
        let sanitizer = NameSanitizer::new(self.platform)
            .replacement_text(self.replacement.clone())
            .max_len(self.max_len);

        // UNC hosts get character cleanup and the NTFS root-name fix; a host
        // that loses everything degrades the prefix to a plain root.
        let prefix = match parts.prefix {
            Prefix::Unc { host } => {
                let rules = rules_for(self.platform);
                let mut cleaned: String = host
                    .chars()
                    .flat_map(|c| {
                        if rules.is_invalid_component_char(c) {
                            self.replacement.chars().collect::<Vec<_>>()
                        } else {
                            vec![c]
                        }
                    })
                    .collect();
                let suffix = if self.replacement.is_empty() {
                    "_"
                } else {
                    self.replacement.as_str()
                };
                while ntfs_reserved_name(&cleaned).is_some() {
                    cleaned.push_str(suffix);
                }
                if cleaned.is_empty() {
                    Prefix::Root
                } else {
                    Prefix::Unc { host: cleaned }
                }
            }
            other => other,
        };

        // The root flag moves on only once a component is kept: if the first
        // component of an absolute path sanitizes away, its successor takes
        // over the root position in the output.
        let mut at_root = prefix.is_absolute();
        let mut components = Vec::with_capacity(parts.components.len());
        for component in &parts.components {
            let cleaned = sanitizer.sanitize_in_context(component, NameContext::Component { at_root });
            if !cleaned.is_empty() {
                at_root = false;
                components.push(cleaned);
            }
        }

        reassemble(&prefix, &components, sep)
    }

    fn separator_for(&self, path: &str) -> char {
        if self.platform == Platform::Windows && path.contains('\\') {
            '\\'
        } else {
            '/'
        }
    }

    fn assert_usage(&self) {
        assert!(self.max_len > 0, "max_len must be positive");
        assert!(
            !self.replacement.chars().any(is_path_separator),
            "replacement text {:?} must not contain path separators",
            self.replacement
        );
    }
}

fn reassemble(prefix: &Prefix, components: &[String], sep: char) -> String {
    let sep_str = sep.to_string();
    let body = components.join(&sep_str);
    match prefix {
        Prefix::None => body,
        Prefix::Root => format!("{sep}{body}"),
        Prefix::Drive { letter, rooted } => {
            if body.is_empty() {
                if *rooted {
                    format!("{letter}:{sep}")
                } else {
                    format!("{letter}:")
                }
            } else {
                format!("{letter}:{sep}{body}")
            }
        }
        Prefix::Unc { host } => {
            if body.is_empty() {
                format!("{sep}{sep}{host}{sep}")
            } else {
                format!("{sep}{sep}{host}{sep}{body}")
            }
        }
    }
}

/// Validate `path` as a file path under `platform`'s rules.
///
/// # Examples
/// ```
/// use sanipath::{validate_filepath, ErrorReason, Platform};
///
/// assert!(validate_filepath("/var/log/app.log", Platform::Posix).is_ok());
///
/// let err = validate_filepath("logs/app|1.log", Platform::Windows).unwrap_err();
/// assert_eq!(err.reason(), ErrorReason::InvalidCharacter);
/// ```
pub fn validate_filepath(path: impl AsRef<Path>, platform: Platform) -> Result<()> {
    PathValidator::new(platform).validate(path)
}

/// Whether `path` is a valid file path under `platform`'s rules.
///
/// # Examples
/// ```
/// use sanipath::{is_valid_filepath, Platform};
///
/// assert!(is_valid_filepath("docs/notes.md", Platform::Universal));
/// assert!(!is_valid_filepath("docs/no*tes.md", Platform::Universal));
/// ```
pub fn is_valid_filepath(path: impl AsRef<Path>, platform: Platform) -> bool {
    validate_filepath(path, platform).is_ok()
}

/// Rewrite `path` into a valid file path for `platform`. Strings come back
/// as `String`, `Path`/`PathBuf` values as `PathBuf`.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use sanipath::{sanitize_filepath, Platform};
///
/// assert_eq!(
///     sanitize_filepath("/tmp/ab\0cd.txt", Platform::Universal),
///     "/tmp/abcd.txt"
/// );
/// assert_eq!(
///     sanitize_filepath(Path::new("docs/a?b.md"), Platform::Universal),
///     PathBuf::from("docs/ab.md")
/// );
/// ```
pub fn sanitize_filepath<P: FilePath>(path: P, platform: Platform) -> P::Sanitized {
    PathSanitizer::new(platform).sanitize(path)
}
