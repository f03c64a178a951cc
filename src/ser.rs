//! Writing constant files.
//!
//! This module provides the [`Writer`], which renders a
//! [`ConstantStore`] into the file format described in
//! [`grammar`](crate::grammar).
//!
//! ## Overview
//!
//! - **Deterministic**: constants are written in store order, one per line
//! - **Typed literals**: booleans as `TRUE`/`FALSE`, floats always carry a `.`
//!   so they read back as floats
//! - **Minimal escaping**: only `"` is escaped inside string values
//!
//! ## Usage
//!
//! Most users should use [`to_string`](crate::to_string) or
//! [`export`](crate::export):
//!
//! ```rust
//! use constfile::{to_string, ConstantStore};
//!
//! let mut store = ConstantStore::new();
//! store.set_float("RATIO", 1, None).unwrap();
//! store.set_string("QUOTE", r#"say "hi""#, Some("Greeting")).unwrap();
//!
//! assert_eq!(
//!     to_string(&store),
//!     "<?php\n\
//!      // @generated by constfile\n\
//!      define('RATIO', 1.0);\n\
//!      /** Greeting */\n\
//!      define('QUOTE', \"say \\\"hi\\\"\");\n"
//! );
//! ```

use crate::grammar::{
    DEFINED_KEYWORD, DEFINE_KEYWORD, FALSE_LITERAL, GENERATED_MARKER, HEADER, INF_LITERAL,
    NAN_LITERAL, TRUE_LITERAL,
};
use crate::{ConstantStore, ConstfileOptions, Mixed, Value};

/// Renders constants to text.
pub struct Writer {
    output: String,
    options: ConstfileOptions,
}

impl Writer {
    pub fn new(options: ConstfileOptions) -> Self {
        Writer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the header and every constant of `store`.
    pub fn write_store(&mut self, store: &ConstantStore) {
        // Roughly one short statement per constant
        self.output.reserve(store.len() * 48);
        self.write_header();
        for (name, entry) in store.iter() {
            self.write_constant(name, &entry.value, entry.description.as_deref());
        }
    }

    fn write_header(&mut self) {
        self.output.push_str(HEADER);
        self.output.push('\n');
        self.output.push_str(GENERATED_MARKER);
        self.output.push('\n');
    }

    /// Writes one statement, preceded by its description comment if any.
    pub fn write_constant(&mut self, name: &str, value: &Value, description: Option<&str>) {
        if let Some(text) = description {
            self.write_description(text);
        }
        if self.options.check_defined {
            self.output.push_str("if (!");
            self.output.push_str(DEFINED_KEYWORD);
            self.output.push('(');
            self.write_name(name);
            self.output.push_str(")) ");
        }
        self.output.push_str(DEFINE_KEYWORD);
        self.output.push('(');
        self.write_name(name);
        self.output.push_str(", ");
        self.write_value(value);
        if self.options.case_insensitive {
            self.output.push_str(", ");
            self.output.push_str(TRUE_LITERAL);
        }
        self.output.push_str(");\n");
    }

    fn write_description(&mut self, text: &str) {
        self.output.push_str("/** ");
        // A literal `*/` would end the comment early
        self.output.push_str(&text.replace("*/", "* /"));
        self.output.push_str(" */\n");
    }

    fn write_name(&mut self, name: &str) {
        self.output.push('\'');
        for ch in name.chars() {
            if ch == '\'' || ch == '\\' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push('\'');
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Boolean(b) => self.write_bool(*b),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::String(s) => self.write_string(s),
            Value::Raw(raw) => self.write_raw(raw),
        }
    }

    fn write_bool(&mut self, b: bool) {
        self.output
            .push_str(if b { TRUE_LITERAL } else { FALSE_LITERAL });
    }

    /// Shortest round-trip decimal, never in exponent form, always with a `.`.
    fn write_float(&mut self, f: f64) {
        if f.is_nan() {
            self.output.push_str(NAN_LITERAL);
        } else if f.is_infinite() {
            if f < 0.0 {
                self.output.push('-');
            }
            self.output.push_str(INF_LITERAL);
        } else {
            let text = f.to_string();
            let needs_point = !text.contains('.');
            self.output.push_str(&text);
            if needs_point {
                self.output.push_str(".0");
            }
        }
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            if ch == '"' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push('"');
    }

    /// Best effort: raw strings are written verbatim as source text.
    fn write_raw(&mut self, raw: &Mixed) {
        match raw {
            Mixed::Bool(b) => self.write_bool(*b),
            Mixed::Int(i) => self.output.push_str(&i.to_string()),
            Mixed::Float(f) => self.output.push_str(&f.to_string()),
            Mixed::Str(s) => self.output.push_str(s),
            // The store never holds raw arrays; keep the output well-formed anyway
            Mixed::Array(_) => self.output.push_str(&raw.to_string()),
        }
    }
}
