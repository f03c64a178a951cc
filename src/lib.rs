//! # constfile
//!
//! Build a typed table of constants in memory, write it out as a file of
//! `define()` statements, and read such a file back into the same table.
//!
//! ## What it writes
//!
//! ```text
//! <?php
//! // @generated by constfile
//! /** Enables verbose output */
//! define('DEBUG', FALSE);
//! define('MAX_CONNECTIONS', 64);
//! define('RATIO', 0.75);
//! define('GREETING', "say \"hi\"");
//! ```
//!
//! ## Key Features
//!
//! - **Typed setters**: booleans, integers, floats and strings, each coerced
//!   from loosely typed input with fixed, documented rules
//! - **Round trip**: everything except raw values reads back with the same
//!   kind, value and description
//! - **Deterministic output**: constants appear in the order they were first set
//! - **Locked writes**: files are written under an exclusive lock
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use constfile::{from_str, to_string, ConstantStore, Value};
//!
//! # fn main() -> constfile::Result<()> {
//! let mut store = ConstantStore::new();
//! store
//!     .set_boolean("DEBUG", false, Some("Enables verbose output"))?
//!     .set_integer("MAX_CONNECTIONS", "64", None)?
//!     .set_float("RATIO", 0.75, None)?
//!     .set_string("GREETING", r#"say "hi""#, None)?;
//!
//! let text = to_string(&store);
//! let back = from_str(&text)?;
//!
//! assert_eq!(back.get("MAX_CONNECTIONS")?, &Value::Integer(64));
//! assert_eq!(back.get_description("DEBUG")?, Some("Enables verbose output"));
//! assert_eq!(back.all_values(), store.all_values());
//! # Ok(())
//! # }
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use constfile::{import_then_export, ConstantStore};
//! use std::path::Path;
//!
//! # fn main() -> constfile::Result<()> {
//! let mut store = ConstantStore::new();
//! store.set_integer("PORT", 8080, None)?;
//! store.set_dirname(Some(Path::new("config")))?;
//! let written = store.export(Some("constants.php"))?;
//!
//! // Read it back and write a copy next to it
//! let _copy = import_then_export(&mut store, &written, "constants.copy.php")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate never prints. File-level imports and exports emit `tracing`
//! events at `debug` level and the parser emits one `trace` event per
//! constant; install a subscriber to see them.
//!
//! ## Concurrency
//!
//! Everything is synchronous. [`ConstantStore`] has no internal locking and
//! must not be mutated from several threads without external synchronization.

pub mod coerce;
pub mod de;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod options;
pub mod ser;
pub mod store;
pub mod target;
pub mod value;

pub use de::{ParsedConstant, Parser};
pub use error::{Error, Result};
pub use options::ConstfileOptions;
pub use ser::Writer;
pub use store::{ConstantStore, Entry};
pub use target::OutputTarget;
pub use value::{Mixed, Value};

use lexer::Tokenizer;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render a store as constant file text, using the store's own options.
///
/// # Examples
///
/// ```rust
/// use constfile::{to_string, ConstantStore};
///
/// let mut store = ConstantStore::new();
/// store.set_boolean("ENABLED", "yes", None).unwrap();
/// assert!(to_string(&store).ends_with("define('ENABLED', TRUE);\n"));
/// ```
#[must_use]
pub fn to_string(store: &ConstantStore) -> String {
    to_string_with_options(store, store.options())
}

/// Render a store with options other than the store's own.
///
/// # Examples
///
/// ```rust
/// use constfile::{to_string_with_options, ConstantStore, ConstfileOptions};
///
/// let mut store = ConstantStore::new();
/// store.set_integer("A", 1, None).unwrap();
/// let text = to_string_with_options(&store, ConstfileOptions::new().with_case_insensitive(true));
/// assert!(text.ends_with("define('A', 1, TRUE);\n"));
/// ```
#[must_use]
pub fn to_string_with_options(store: &ConstantStore, options: ConstfileOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_store(store);
    writer.into_inner()
}

/// Render a store to any writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, store: &ConstantStore) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(store).as_bytes())
        .map_err(|e| Error::io(Path::new("<writer>"), e))?;
    Ok(())
}

/// Write a store to `target` under an exclusive file lock. Returns the
/// written path.
///
/// # Errors
///
/// Fails with [`Error::DirectoryNotFound`] or [`Error::NotADirectory`] when
/// the directory cannot be resolved, and [`Error::Io`] when the write fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_file(store: &ConstantStore, target: &OutputTarget) -> Result<PathBuf> {
    let path = target.resolve_path()?;
    target::write_locked(&path, &to_string(store))?;
    debug!(path = %path.display(), constants = store.len(), "wrote constant file");
    Ok(path)
}

/// Parse constant file text into a new store.
///
/// # Examples
///
/// ```rust
/// use constfile::{from_str, Value};
///
/// let store = from_str("<?php\ndefine('NAME', \"shop\");\n").unwrap();
/// assert_eq!(store.get("NAME").unwrap(), &Value::String("shop".to_string()));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for an unterminated string or comment and
/// [`Error::UnrecognizedLiteral`] for an unsupported value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<ConstantStore> {
    let tokens = Tokenizer::new(s).tokenize()?;
    de::parse(&tokens)
}

/// Parse constant file bytes into a new store.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the bytes are not UTF-8, otherwise as
/// [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<ConstantStore> {
    let s = std::str::from_utf8(v).map_err(|e| {
        // Columns count chars, as the tokenizer's do
        let prefix = String::from_utf8_lossy(&v[..e.valid_up_to()]);
        let line = prefix.matches('\n').count() + 1;
        let column = prefix.chars().rev().take_while(|&c| c != '\n').count() + 1;
        Error::syntax(line, column, &e.to_string())
    })?;
    from_str(s)
}

/// Parse constant file text from any reader into a new store.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<ConstantStore>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(Path::new("<reader>"), e))?;
    from_str(&string)
}

/// Read and parse the file at `path` into a new store.
///
/// # Errors
///
/// Fails with [`Error::FileNotFound`] if the path does not exist,
/// [`Error::NotAFile`] if it is a directory, and otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file(path: impl AsRef<Path>) -> Result<ConstantStore> {
    let mut store = ConstantStore::new();
    store.import(path)?;
    Ok(store)
}

/// Write `store`, optionally overriding its directory and file name first.
///
/// An override replaces the store's configured value; without one the
/// configured value (or the default) is used. The directory is validated
/// before anything is written.
///
/// # Errors
///
/// As [`ConstantStore::set_dirname`] and [`to_file`].
pub fn export(
    store: &mut ConstantStore,
    directory: Option<&Path>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    if let Some(dir) = directory {
        store.set_dirname(Some(dir))?;
    }
    if let Some(name) = filename {
        store.set_filename(Some(name));
    }
    to_file(store, store.target())
}

/// Reset `store`, import `import_path` into it, and write it to
/// `export_filename` in the import file's directory.
///
/// # Errors
///
/// As [`ConstantStore::import`] and [`to_file`].
pub fn import_then_export(
    store: &mut ConstantStore,
    import_path: impl AsRef<Path>,
    export_filename: &str,
) -> Result<PathBuf> {
    let import_path = import_path.as_ref();
    store.reset().import(import_path)?;

    let directory = match import_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    export(store, Some(directory.as_path()), Some(export_filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ConstantStore {
        let mut store = ConstantStore::new();
        store
            .set_boolean("MY_BOOL", true, Some("A flag"))
            .unwrap()
            .set_integer("MY_INT", "5", None)
            .unwrap()
            .set_float("MY_FLOAT", 3, None)
            .unwrap()
            .set_string("MY_STRING", "string = \"string\"", None)
            .unwrap();
        store
    }

    #[test]
    fn test_string_roundtrip() {
        let store = sample_store();
        let back = from_str(&to_string(&store)).unwrap();
        assert_eq!(back.all_values(), store.all_values());
        assert_eq!(back.all_descriptions(), store.all_descriptions());
    }

    #[test]
    fn test_writer_and_reader_roundtrip() {
        let store = sample_store();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &store).unwrap();

        let back = from_reader(io::Cursor::new(&buffer)).unwrap();
        assert_eq!(back.all_values(), store.all_values());

        let back = from_slice(&buffer).unwrap();
        assert_eq!(back.all_values(), store.all_values());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice(b"<?php\ndefine('A', \"\xff\");").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, column: 14, .. }));
    }

    #[test]
    fn test_from_slice_error_column_counts_chars() {
        // `é` is two bytes but one column
        let err = from_slice(b"<?php\ndefine('\xc3\xa9', \"\xff\");").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, column: 14, .. }));
    }

    #[test]
    fn test_to_string_with_options_overrides_store_flags() {
        let mut store = ConstantStore::new();
        store.set_check_defined(true).set_integer("A", 1, None).unwrap();
        let text = to_string_with_options(&store, ConstfileOptions::new());
        assert!(!text.contains("defined"));
        assert!(to_string(&store).contains("if (!defined('A'))"));
    }

    #[test]
    fn test_export_and_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = sample_store();
        let path = export(&mut store, Some(dir.path()), None).unwrap();
        assert_eq!(path.file_name().unwrap(), "constfile.php");

        let back = from_file(&path).unwrap();
        assert_eq!(back.all_values(), store.all_values());
    }

    #[test]
    fn test_import_then_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = sample_store();
        let first = export(&mut store, Some(dir.path()), Some("constfile.php")).unwrap();

        store.set_integer("STALE", 1, None).unwrap();
        let second = import_then_export(&mut store, &first, "constfile2.php").unwrap();

        assert!(!store.contains("STALE"));
        assert_eq!(second.parent(), first.parent());
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }
}
