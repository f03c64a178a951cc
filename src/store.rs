//! The in-memory table of constants.
//!
//! [`ConstantStore`] keeps its entries in an [`IndexMap`], so constants are
//! written in the order they were first set. Setting a name again replaces the
//! value and description in place.
//!
//! ## Setters
//!
//! Each typed setter coerces its input (see [`coerce`](crate::coerce)) and
//! returns `&mut Self`, so calls chain with `?`:
//!
//! ```rust
//! use constfile::{ConstantStore, Value};
//!
//! # fn main() -> constfile::Result<()> {
//! let mut store = ConstantStore::new();
//! store
//!     .set_boolean("MY_BOOL", 1, None)?
//!     .set_integer("MY_INT", "7.8", None)?
//!     .set_float("MY_FLOAT", "3.5", Some("A ratio"))?
//!     .set_string("MY_STRING", true, None)?;
//!
//! assert_eq!(store.get("MY_BOOL")?, &Value::Boolean(true));
//! assert_eq!(store.get("MY_INT")?, &Value::Integer(7));
//! assert_eq!(store.get("MY_FLOAT")?, &Value::Float(3.5));
//! assert_eq!(store.get("MY_STRING")?, &Value::String("1".to_string()));
//! assert_eq!(store.get_description("MY_FLOAT")?, Some("A ratio"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Usage constraint
//!
//! The store is a plain value with no internal locking. Share it between
//! threads only behind the caller's own synchronization.

use crate::coerce::{to_boolean, to_float, to_integer, to_string_value};
use crate::options::ConstfileOptions;
use crate::target::{self, OutputTarget};
use crate::{Error, Mixed, Result, Value};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A stored constant's value and optional description.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: Value,
    pub description: Option<String>,
}

/// Ordered table of named constants plus the settings used to write it.
///
/// # Examples
///
/// ```rust
/// use constfile::ConstantStore;
///
/// let mut store = ConstantStore::new();
/// store.set_integer("FIRST", 1, None).unwrap();
/// store.set_integer("SECOND", 2, None).unwrap();
///
/// // Iteration keeps insertion order
/// let names: Vec<_> = store.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["FIRST", "SECOND"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantStore {
    entries: IndexMap<String, Entry>,
    options: ConstfileOptions,
    target: OutputTarget,
}

impl ConstantStore {
    /// Creates an empty store with default options and target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given rendering options.
    #[must_use]
    pub fn with_options(options: ConstfileOptions) -> Self {
        ConstantStore {
            options,
            ..Self::default()
        }
    }

    fn upsert(&mut self, name: &str, value: Value, description: Option<&str>) -> &mut Self {
        self.entries.insert(
            name.to_string(),
            Entry {
                value,
                description: description.map(str::to_string),
            },
        );
        self
    }

    /// Stores `value` without coercion as [`Value::Raw`].
    ///
    /// Raw values are written on a best-effort basis and are not guaranteed
    /// to read back with the same kind.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for arrays.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<Mixed>,
        description: Option<&str>,
    ) -> Result<&mut Self> {
        let value = reject_array(name, value.into())?;
        Ok(self.upsert(name, Value::Raw(value), description))
    }

    /// Stores the truthiness of `value`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for arrays.
    pub fn set_boolean(
        &mut self,
        name: &str,
        value: impl Into<Mixed>,
        description: Option<&str>,
    ) -> Result<&mut Self> {
        let value = to_boolean(&reject_array(name, value.into())?)?;
        Ok(self.upsert(name, Value::Boolean(value), description))
    }

    /// Stores `value` converted to an integer.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for arrays.
    pub fn set_integer(
        &mut self,
        name: &str,
        value: impl Into<Mixed>,
        description: Option<&str>,
    ) -> Result<&mut Self> {
        let value = to_integer(&reject_array(name, value.into())?)?;
        Ok(self.upsert(name, Value::Integer(value), description))
    }

    /// Stores `value` converted to a float.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for arrays.
    pub fn set_float(
        &mut self,
        name: &str,
        value: impl Into<Mixed>,
        description: Option<&str>,
    ) -> Result<&mut Self> {
        let value = to_float(&reject_array(name, value.into())?)?;
        Ok(self.upsert(name, Value::Float(value), description))
    }

    /// Stores `value` converted to a string.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for arrays.
    pub fn set_string(
        &mut self,
        name: &str,
        value: impl Into<Mixed>,
        description: Option<&str>,
    ) -> Result<&mut Self> {
        let value = to_string_value(&reject_array(name, value.into())?)?;
        Ok(self.upsert(name, Value::String(value), description))
    }

    /// Array constants are reserved. This always fails.
    ///
    /// # Errors
    ///
    /// Always [`Error::UnsupportedValueKind`].
    ///
    /// ```rust
    /// use constfile::{ConstantStore, Error};
    ///
    /// let mut store = ConstantStore::new();
    /// let err = store.set_array("LIST", vec![1, 2, 3], None).unwrap_err();
    /// assert!(matches!(err, Error::UnsupportedValueKind { .. }));
    /// assert!(!store.contains("LIST"));
    /// ```
    pub fn set_array(
        &mut self,
        name: &str,
        _value: impl Into<Mixed>,
        _description: Option<&str>,
    ) -> Result<&mut Self> {
        Err(Error::unsupported_value_kind(name, "array"))
    }

    /// Removes a constant. Absent names are ignored.
    pub fn clear(&mut self, name: &str) -> &mut Self {
        self.entries.shift_remove(name);
        self
    }

    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownConstant`] if `name` is not set.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.entry(name).map(|entry| &entry.value)
    }

    /// Returns the description of `name`, if it has one.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownConstant`] if `name` is not set.
    pub fn get_description(&self, name: &str) -> Result<Option<&str>> {
        self.entry(name).map(|entry| entry.description.as_deref())
    }

    /// Returns the full entry for `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownConstant`] if `name` is not set.
    pub fn entry(&self, name: &str) -> Result<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::unknown_constant(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// All `(name, value)` pairs in insertion order.
    #[must_use]
    pub fn all_values(&self) -> Vec<(&str, &Value)> {
        self.iter().map(|(name, entry)| (name, &entry.value)).collect()
    }

    /// All `(name, description)` pairs in insertion order.
    #[must_use]
    pub fn all_descriptions(&self) -> Vec<(&str, Option<&str>)> {
        self.iter()
            .map(|(name, entry)| (name, entry.description.as_deref()))
            .collect()
    }

    /// Removes every constant and restores the default output target.
    ///
    /// Rendering options are kept. A directory configured before the reset is
    /// forgotten and must be set again before the next export.
    pub fn reset(&mut self) -> &mut Self {
        self.entries.clear();
        self.target.reset();
        self
    }

    pub fn set_case_insensitivity(&mut self, value: bool) -> &mut Self {
        self.options.case_insensitive = value;
        self
    }

    pub fn set_check_defined(&mut self, value: bool) -> &mut Self {
        self.options.check_defined = value;
        self
    }

    #[must_use]
    pub fn options(&self) -> ConstfileOptions {
        self.options
    }

    #[must_use]
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Sets and validates the output directory; `None` selects the working
    /// directory. See [`OutputTarget::set_directory`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DirectoryNotFound`] or [`Error::NotADirectory`].
    pub fn set_dirname(&mut self, directory: Option<&Path>) -> Result<&mut Self> {
        self.target.set_directory(directory)?;
        Ok(self)
    }

    /// Sets the output file name; `None` or `""` restores the default.
    pub fn set_filename(&mut self, filename: Option<&str>) -> &mut Self {
        self.target.set_filename(filename);
        self
    }

    /// Reads the file at `path` and sets every constant it defines.
    ///
    /// Existing constants are kept unless the file redefines them.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::FileNotFound`], [`Error::NotAFile`], [`Error::Io`],
    /// or any parse error.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let text = target::read_import(path)?;
        let tokens = crate::lexer::Tokenizer::new(&text).tokenize()?;
        let count = crate::de::parse_into(&tokens, self)?;
        debug!(path = %path.display(), constants = count, "imported constant file");
        Ok(self)
    }

    /// Writes the store to its configured target under `filename` (`None`
    /// selects the default file name). Returns the written path.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DirectoryNotFound`], [`Error::NotADirectory`] or
    /// [`Error::Io`].
    pub fn export(&mut self, filename: Option<&str>) -> Result<PathBuf> {
        self.target.set_filename(filename);
        crate::to_file(&*self, &self.target)
    }
}

fn reject_array(name: &str, value: Mixed) -> Result<Mixed> {
    if value.is_array() {
        return Err(Error::unsupported_value_kind(name, value.kind_name()));
    }
    Ok(value)
}

impl Serialize for ConstantStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, &entry.value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a ConstantStore {
    type Item = (&'a String, &'a Entry);
    type IntoIter = indexmap::map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_inputs_are_equivalent() {
        let mut a = ConstantStore::new();
        a.set_boolean("FLAG", 1, None).unwrap();
        let mut b = ConstantStore::new();
        b.set_boolean("FLAG", true, None).unwrap();
        assert_eq!(a.entry("FLAG").unwrap(), b.entry("FLAG").unwrap());
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut store = ConstantStore::new();
        store
            .set_integer("A", 1, Some("first"))
            .unwrap()
            .set_integer("B", 2, None)
            .unwrap()
            .set_string("A", "again", None)
            .unwrap();

        assert_eq!(
            store.all_values(),
            vec![
                ("A", &Value::String("again".to_string())),
                ("B", &Value::Integer(2)),
            ]
        );
        assert_eq!(store.get_description("A").unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let mut store = ConstantStore::new();
        store.set_boolean("A", false, None).unwrap();
        store.clear("A").clear("NEVER_SET");
        assert!(matches!(
            store.get("A"),
            Err(Error::UnknownConstant { ref name }) if name == "A"
        ));
        assert!(store.get_description("A").is_err());
    }

    #[test]
    fn test_clear_preserves_order() {
        let mut store = ConstantStore::new();
        for name in ["A", "B", "C"] {
            store.set_integer(name, 0, None).unwrap();
        }
        store.clear("B");
        let names: Vec<_> = store.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_arrays_are_rejected_everywhere() {
        let mut store = ConstantStore::new();
        let list = || vec!["x", "y"];
        assert!(store.set_array("L", list(), None).is_err());
        assert!(store.set_array("L", 1, None).is_err());
        assert!(store.set_value("L", list(), None).is_err());
        assert!(store.set_boolean("L", list(), None).is_err());
        assert!(store.set_integer("L", list(), None).is_err());
        assert!(store.set_float("L", list(), None).is_err());
        let err = store.set_string("L", list(), None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedValueKind { ref name, ref kind } if name == "L" && kind == "array"
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ConstantStore::new();
        store
            .set_integer("A", 1, None)
            .unwrap()
            .set_check_defined(true)
            .set_filename(Some("custom.php"))
            .set_dirname(Some(dir.path()))
            .unwrap();

        store.reset();
        assert!(store.all_values().is_empty());
        assert_eq!(store.target(), &OutputTarget::default());
        assert!(store.options().check_defined);
    }

    #[test]
    fn test_descriptions_listing() {
        let mut store = ConstantStore::new();
        store
            .set_integer("A", 1, Some("one"))
            .unwrap()
            .set_integer("B", 2, None)
            .unwrap();
        assert_eq!(
            store.all_descriptions(),
            vec![("A", Some("one")), ("B", None)]
        );
    }

    #[test]
    fn test_raw_value_is_stored_untouched() {
        let mut store = ConstantStore::new();
        store.set_value("EXPR", "1 << 4", None).unwrap();
        store.set_value("NUM", 2.0, None).unwrap();
        assert_eq!(
            store.get("EXPR").unwrap(),
            &Value::Raw(Mixed::Str("1 << 4".to_string()))
        );
        assert_eq!(store.get("NUM").unwrap(), &Value::Raw(Mixed::Float(2.0)));
    }
}
