//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for `py2deb`.
//! It uses the `thiserror` library to create a comprehensive `Error` enum
//! that covers all anticipated failure modes, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while generating a packaging scaffold. Each variant corresponds
//!   to a specific type of error and includes contextual information to aid
//!   in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! ## Error policy
//!
//! Fatal errors (malformed override documents, helper-process failures,
//! missing required context keys, template failures, I/O failures) are not
//! caught anywhere in the library and surface to the caller. Recoverable
//! errors (a single unparseable requirement line) are logged as warnings at
//! the point of use and never escalate past their generator. Absent
//! optional files are not errors at all.

use thiserror::Error;

/// Main error type for py2deb operations
#[derive(Error, Debug)]
pub enum Error {
    /// A context key that must be supplied by the caller was missing or empty.
    #[error("Missing required context key: {key}")]
    MissingKey { key: String },

    /// An interpreter identifier that py2deb does not know about.
    #[error("Unknown interpreter: {name}")]
    UnknownInterpreter { name: String },

    /// An override or profile document could not be parsed.
    ///
    /// Includes the offending path so the user knows which layer is broken.
    #[error("Override document error: {path}: {message}")]
    Override { path: String, message: String },

    /// A requirement line could not be translated into a Debian dependency.
    ///
    /// Callers treat this as recoverable: the dependency is logged and
    /// skipped, the pipeline continues.
    #[error("Cannot parse dependency from {line:?}: {message}")]
    Dependency { line: String, message: String },

    /// An external helper process exited with a non-zero status.
    #[error("Helper command failed: {command} - {stderr}")]
    Helper { command: String, stderr: String },

    /// An INI parsing error, wrapped from `ini::Error`.
    #[error("INI parsing error: {0}")]
    Ini(#[from] ini::Error),

    /// A template loading or rendering error, wrapped from `tera::Error`.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
