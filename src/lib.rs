//! # sanipath
//!
//! Platform-aware validation and sanitization of filesystem names and paths.
//!
//! Given a candidate string (or path-like value) and a target [`Platform`],
//! this crate decides whether the value is usable as a file/directory name or
//! full path on that platform, and can rewrite arbitrary input into a variant
//! guaranteed to pass validation with minimal change. It never touches the
//! filesystem: everything here is pure computation over strings.
//!
//! ## Features
//!
//! - **Per-platform rule tables**: invalid characters, reserved device names,
//!   NTFS metadata names, trailing-character rules, length limits
//! - **Universal mode**: the strict intersection of all platform rules, for
//!   producing cross-platform-safe names
//! - **Typed failures**: every rejection carries an [`ErrorReason`], the
//!   target platform, and the offending characters or reserved name
//! - **Sanitization**: the prescribed recovery path; anything it produces
//!   (other than an empty string) passes validation
//!
//! ## Examples
//!
//! ### Validating names and paths
//!
//! ```rust
//! use sanipath::{is_valid_filename, validate_filename, ErrorReason, Platform};
//!
//! assert!(is_valid_filename("report.txt", Platform::Universal));
//!
//! let err = validate_filename("COM1.txt", Platform::Windows).unwrap_err();
//! assert_eq!(err.reason(), ErrorReason::ReservedName);
//! assert_eq!(err.reserved_name(), Some("COM1"));
//!
//! // POSIX has no device-name rule
//! assert!(is_valid_filename("COM1.txt", Platform::Posix));
//! ```
//!
//! ### Sanitizing cross-platform input
//!
//! ```rust
//! use sanipath::{sanitize_filename, sanitize_filepath, Platform};
//!
//! assert_eq!(sanitize_filename("fi:le*name?.txt", Platform::Universal), "filename.txt");
//! assert_eq!(
//!     sanitize_filepath("/abc/CON/xyz", Platform::Universal),
//!     "/abc/CON_/xyz"
//! );
//! ```
//!
//! ### Choosing the platform at runtime
//!
//! ```rust
//! use sanipath::Platform;
//!
//! // resolve the host OS once at the boundary
//! let host = Platform::auto();
//! assert_ne!(host, Platform::Universal);
//!
//! let parsed: Platform = "windows".parse().unwrap();
//! assert_eq!(parsed, Platform::Windows);
//! ```

mod error;
mod filename;
mod filepath;
mod platform;
mod rules;

// Re-export main public API
pub use error::{ErrorReason, Result, ValidationError};
pub use filename::{
    is_valid_filename, sanitize_filename, validate_filename, NameSanitizer, NameValidator,
};
pub use filepath::{
    is_valid_filepath, sanitize_filepath, validate_filepath, FilePath, PathSanitizer,
    PathValidator,
};
pub use platform::{ParsePlatformError, Platform};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
