//! Constant file format
//!
//! This module documents the file format written by [`to_string`](crate::to_string)
//! and read by [`from_str`](crate::from_str), and holds the fixed spellings
//! both sides share.
//!
//! # Layout
//!
//! ```text
//! <?php
//! // @generated by constfile
//! /** Maximum number of connections */
//! define('MAX_CONNECTIONS', 64);
//! define('APP_NAME', "shop");
//! ```
//!
//! The file starts with the [`HEADER`] line and the [`GENERATED_MARKER`]
//! comment. Each constant follows on its own line, in the order it was first
//! set in the store.
//!
//! # Statements
//!
//! ```text
//! [/** <description> */]
//! [if (!defined('<NAME>')) ]define('<NAME>', <value>[, TRUE]);
//! ```
//!
//! - The description line is present only for constants that have one.
//! - The guard is present exactly when `check_defined` is set.
//! - The trailing `, TRUE` is present exactly when `case_insensitive` is set.
//! - Names are single-quoted; `'` and `\` inside a name are backslash-escaped.
//!
//! # Values
//!
//! | Kind | Written as | Example |
//! |------|------------|---------|
//! | Boolean | `TRUE` / `FALSE` | `define('DEBUG', FALSE);` |
//! | Integer | decimal | `define('PORT', 8080);` |
//! | Float | decimal, always with a `.` | `define('RATIO', 1.0);` |
//! | Float (non-finite) | `NAN`, `INF`, `-INF` | `define('LIMIT', INF);` |
//! | String | double-quoted, `"` escaped as `\"` | `define('GREETING', "say \"hi\"");` |
//! | Raw | verbatim | `define('MASK', E_ALL & ~E_NOTICE);` |
//!
//! Only `"` is escaped inside strings. Other backslashes are written as they
//! are and read back as they are, so `C:\dir\file` and `a\"b` survive a
//! round trip. A string that ends in a backslash does not: its last `\`
//! escapes the closing quote, the string runs on to the end of the file, and
//! reading the file fails with [`Error::Syntax`](crate::Error::Syntax). No
//! constant from that file is recovered.
//!
//! # Reading
//!
//! The reader recognizes the subset of tokens that appear in generated files.
//! It looks for the `define` keyword, takes the first string literal after it
//! as the name, a `,`, then exactly one literal as the value, followed by `)`
//! or `,`. Arrays, expressions and a sign in front of a non-number are
//! rejected. Everything between statements is skipped, including the guard
//! and the case-insensitivity marker. The last block comment before a statement becomes its description.
//! A statement cut off by the end of the file is ignored.
//!
//! ```rust
//! use constfile::{from_str, Value};
//!
//! let store = from_str(
//!     "<?php\n/** Port to bind */\nif (!defined('PORT')) define('PORT', 8080, TRUE);\n",
//! )
//! .unwrap();
//! assert_eq!(store.get("PORT").unwrap(), &Value::Integer(8080));
//! assert_eq!(store.get_description("PORT").unwrap(), Some("Port to bind"));
//! ```

/// First line of every written file.
pub const HEADER: &str = "<?php";

/// Second line of every written file.
pub const GENERATED_MARKER: &str = "// @generated by constfile";

/// File name used when none is configured.
pub const DEFAULT_FILENAME: &str = "constfile.php";

/// Statement keyword.
pub const DEFINE_KEYWORD: &str = "define";

/// Keyword used by the guard clause.
pub const DEFINED_KEYWORD: &str = "defined";

pub const TRUE_LITERAL: &str = "TRUE";
pub const FALSE_LITERAL: &str = "FALSE";
pub const NAN_LITERAL: &str = "NAN";
pub const INF_LITERAL: &str = "INF";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filename_matches_header_language() {
        assert!(DEFAULT_FILENAME.ends_with(".php"));
        assert!(HEADER.starts_with("<?"));
        assert!(GENERATED_MARKER.starts_with("//"));
    }
}
