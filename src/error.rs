//! Error types for building, writing and reading constant files.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error
//! side is the single [`Error`] enum below.
//!
//! ## Error Categories
//!
//! - **Store errors**: asking for a constant that is not there, or trying to
//!   store a composite (array) value
//! - **Target errors**: an output directory that is missing or is not a directory
//! - **Import errors**: an import path that is missing or is not a regular file
//! - **Parse errors**: an unexpected token where a value was expected, or a
//!   malformed string/comment, with line and column information
//! - **I/O errors**: read, write and lock failures
//!
//! ## Examples
//!
//! ```rust
//! use constfile::{ConstantStore, Error};
//!
//! let store = ConstantStore::new();
//! let err = store.get("MISSING").unwrap_err();
//! assert!(matches!(err, Error::UnknownConstant { .. }));
//! assert!(err.to_string().contains("MISSING"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all possible errors raised by this crate.
///
/// None of these are transient: they signal a programming or configuration
/// mistake and are reported to the caller as-is, without retries.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// `get` or `get_description` on a name that is not in the store
    #[error("Unknown constant \"{name}\"")]
    UnknownConstant { name: String },

    /// Attempt to store a composite value (arrays are reserved)
    #[error("Error creating {name}: {kind} constants are not supported")]
    UnsupportedValueKind { name: String, kind: String },

    /// Output directory does not exist
    #[error("Directory \"{}\" not found.", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Output directory path exists but is not a directory
    #[error("\"{}\" is not directory.", path.display())]
    NotADirectory { path: PathBuf },

    /// Import path does not exist
    #[error("File \"{}\" not found.", path.display())]
    FileNotFound { path: PathBuf },

    /// Import path exists but is not a regular file
    #[error("\"{}\" is not file.", path.display())]
    NotAFile { path: PathBuf },

    /// IO error during reading, writing or locking
    #[error("IO error on \"{}\": {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The parser found a token it cannot turn into a constant value
    #[error("Unrecognized literal `{literal}` at line {line}, column {column}")]
    UnrecognizedLiteral {
        literal: String,
        line: usize,
        column: usize,
    },

    /// Malformed source text (unterminated string or comment, invalid UTF-8)
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

impl Error {
    /// Creates an unknown constant error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use constfile::Error;
    ///
    /// let err = Error::unknown_constant("APP_NAME");
    /// assert!(err.to_string().contains("APP_NAME"));
    /// ```
    pub fn unknown_constant(name: &str) -> Self {
        Error::UnknownConstant {
            name: name.to_string(),
        }
    }

    /// Creates an unsupported value kind error for the constant `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use constfile::Error;
    ///
    /// let err = Error::unsupported_value_kind("LIST", "array");
    /// assert!(err.to_string().contains("array constants are not supported"));
    /// ```
    pub fn unsupported_value_kind(name: &str, kind: &str) -> Self {
        Error::UnsupportedValueKind {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn directory_not_found(path: &Path) -> Self {
        Error::DirectoryNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn not_a_directory(path: &Path) -> Self {
        Error::NotADirectory {
            path: path.to_path_buf(),
        }
    }

    pub fn file_not_found(path: &Path) -> Self {
        Error::FileNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn not_a_file(path: &Path) -> Self {
        Error::NotAFile {
            path: path.to_path_buf(),
        }
    }

    /// Creates an I/O error for file reading/writing failures on `path`.
    pub fn io<E: fmt::Display>(path: &Path, err: E) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Creates an unrecognized literal error carrying the offending token text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use constfile::Error;
    ///
    /// let err = Error::unrecognized_literal("NULL", 3, 17);
    /// assert!(err.to_string().contains("`NULL` at line 3, column 17"));
    /// ```
    pub fn unrecognized_literal(literal: &str, line: usize, column: usize) -> Self {
        Error::UnrecognizedLiteral {
            literal: literal.to_string(),
            line,
            column,
        }
    }

    /// Creates a syntax error with line and column information.
    pub fn syntax(line: usize, column: usize, message: &str) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
