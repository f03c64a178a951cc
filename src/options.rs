//! Rendering options for constant files.
//!
//! [`ConstfileOptions`] controls two optional parts of every written statement:
//!
//! - `case_insensitive`: append the `, TRUE` case-insensitivity marker
//! - `check_defined`: wrap the statement in an `if (!defined('NAME'))` guard
//!
//! Neither flag changes how the store itself behaves; names stay
//! case-sensitive and setting a name twice simply overwrites it.
//!
//! ## Examples
//!
//! ```rust
//! use constfile::{ConstantStore, ConstfileOptions, to_string};
//!
//! let options = ConstfileOptions::new().with_check_defined(true);
//! let mut store = ConstantStore::with_options(options);
//! store.set_integer("RETRIES", 3, None).unwrap();
//!
//! let text = to_string(&store);
//! assert!(text.contains("if (!defined('RETRIES')) define('RETRIES', 3);"));
//! ```

use serde::{Deserialize, Serialize};

/// Flags that shape the written statements.
///
/// # Examples
///
/// ```rust
/// use constfile::ConstfileOptions;
///
/// let options = ConstfileOptions::new();
/// assert!(!options.case_insensitive);
/// assert!(!options.check_defined);
///
/// let options = ConstfileOptions::new()
///     .with_case_insensitive(true)
///     .with_check_defined(true);
/// assert!(options.case_insensitive && options.check_defined);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstfileOptions {
    pub case_insensitive: bool,
    pub check_defined: bool,
}

impl ConstfileOptions {
    /// Creates default options (no marker, no guard).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether statements carry the case-insensitivity marker.
    #[must_use]
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Sets whether statements are guarded by an "only if not already defined" check.
    #[must_use]
    pub fn with_check_defined(mut self, check_defined: bool) -> Self {
        self.check_defined = check_defined;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let options = ConstfileOptions::new()
            .with_case_insensitive(true)
            .with_case_insensitive(false)
            .with_check_defined(true);
        assert_eq!(
            options,
            ConstfileOptions {
                case_insensitive: false,
                check_defined: true,
            }
        );
    }
}
