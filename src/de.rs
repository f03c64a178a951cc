//! Reading constant files.
//!
//! This module provides the [`Parser`], which turns the token stream from
//! [`Tokenizer`](crate::lexer::Tokenizer) back into constants.
//!
//! ## Overview
//!
//! The parser is a state machine over three states:
//!
//! - **Seeking**: outside any statement. A block comment becomes the pending
//!   description (a later comment replaces it). The `define` keyword starts a
//!   statement. Every other token is skipped, which is how guard clauses and
//!   case-insensitivity markers are ignored.
//! - **InStatement**: after `define`. The first string literal is the name.
//!   Exactly one `,` must follow, then a single literal value. A `-` or `+`
//!   is accepted only in front of a number, `NAN` or `INF`.
//! - **Closing**: after the value. The next token must be `)` or `,`; the
//!   constant is emitted and the parser returns to Seeking with no pending
//!   description.
//!
//! Anything else where a value belongs (arrays, parentheses, concatenation,
//! a sign in front of a string) fails with [`Error::UnrecognizedLiteral`].
//! A statement still open when the tokens run out is dropped without error.
//!
//! ## Usage
//!
//! Most users should use [`from_str`](crate::from_str) or
//! [`from_file`](crate::from_file):
//!
//! ```rust
//! use constfile::{from_str, Value};
//!
//! let store = from_str("<?php\ndefine('DEBUG', FALSE);\ndefine('RATIO', -0.5);\n").unwrap();
//! assert_eq!(store.get("DEBUG").unwrap(), &Value::Boolean(false));
//! assert_eq!(store.get("RATIO").unwrap(), &Value::Float(-0.5));
//!
//! assert!(from_str("<?php\ndefine('LIST', [1, 2]);\n").is_err());
//! ```

use crate::grammar::{DEFINE_KEYWORD, FALSE_LITERAL, INF_LITERAL, NAN_LITERAL, TRUE_LITERAL};
use crate::lexer::{SpannedToken, Token};
use crate::{ConstantStore, Error, Result, Value};
use tracing::trace;

/// A constant recovered from source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConstant {
    pub name: String,
    pub value: Value,
    pub description: Option<String>,
}

#[derive(Debug)]
enum State {
    Seeking {
        pending: Option<String>,
    },
    InStatement {
        description: Option<String>,
        name: Option<String>,
        /// The `,` between name and value has been seen
        separated: bool,
        /// `Some(true)` once an odd number of `-` signs precede the value
        sign: Option<bool>,
    },
    Closing {
        constant: ParsedConstant,
    },
}

impl Default for State {
    fn default() -> Self {
        State::Seeking { pending: None }
    }
}

/// Rebuilds constants from a token stream.
///
/// ```rust
/// use constfile::de::Parser;
/// use constfile::lexer::Tokenizer;
/// use constfile::Value;
///
/// let tokens = Tokenizer::new("/** Retries */ define('RETRIES', 3);").tokenize().unwrap();
/// let constants = Parser::new(&tokens).parse().unwrap();
///
/// assert_eq!(constants.len(), 1);
/// assert_eq!(constants[0].name, "RETRIES");
/// assert_eq!(constants[0].value, Value::Integer(3));
/// assert_eq!(constants[0].description.as_deref(), Some("Retries"));
/// ```
pub struct Parser<'t> {
    tokens: &'t [SpannedToken],
    state: State,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [SpannedToken]) -> Self {
        Parser {
            tokens,
            state: State::default(),
        }
    }

    /// Runs the state machine over every token, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedLiteral`] when a statement holds something
    /// other than a string where the name belongs, something other than a
    /// single supported literal where the value belongs, or something other
    /// than `)` or `,` right after the value.
    pub fn parse(mut self) -> Result<Vec<ParsedConstant>> {
        let mut constants = Vec::new();
        for spanned in self.tokens {
            if let Some(constant) = self.step(spanned)? {
                trace!(name = %constant.name, value = %constant.value, "parsed constant");
                constants.push(constant);
            }
        }
        match &self.state {
            State::InStatement { name, .. } => {
                trace!(name = ?name, "dropping incomplete trailing statement");
            }
            State::Closing { constant } => {
                trace!(name = %constant.name, "dropping incomplete trailing statement");
            }
            State::Seeking { .. } => {}
        }
        Ok(constants)
    }

    fn step(&mut self, spanned: &SpannedToken) -> Result<Option<ParsedConstant>> {
        let token = &spanned.token;
        match std::mem::take(&mut self.state) {
            State::Seeking { pending } => {
                self.state = match token {
                    Token::Comment(text) => State::Seeking {
                        pending: Some(text.clone()),
                    },
                    Token::Identifier(word) if word.eq_ignore_ascii_case(DEFINE_KEYWORD) => {
                        State::InStatement {
                            description: pending,
                            name: None,
                            separated: false,
                            sign: None,
                        }
                    }
                    _ => State::Seeking { pending },
                };
                Ok(None)
            }
            State::InStatement {
                description,
                name: None,
                ..
            } => {
                let name = match token {
                    Token::StringLiteral(name) => Some(name.clone()),
                    Token::Symbol(_) | Token::Comment(_) | Token::Eof => None,
                    other => return Err(unrecognized(other, spanned)),
                };
                self.state = State::InStatement {
                    description,
                    name,
                    separated: false,
                    sign: None,
                };
                Ok(None)
            }
            State::InStatement {
                description,
                name: Some(name),
                separated,
                sign,
            } => {
                let next = match (token, separated) {
                    (Token::Comment(_) | Token::Eof, _) => Some((separated, sign)),
                    (Token::Symbol(','), false) => Some((true, None)),
                    (_, false) => return Err(unrecognized(token, spanned)),
                    (Token::Symbol('-'), true) => Some((true, Some(!sign.unwrap_or(false)))),
                    (Token::Symbol('+'), true) => Some((true, Some(sign.unwrap_or(false)))),
                    _ => None,
                };
                if let Some((separated, sign)) = next {
                    self.state = State::InStatement {
                        description,
                        name: Some(name),
                        separated,
                        sign,
                    };
                    return Ok(None);
                }

                let value = literal_value(token, sign).ok_or_else(|| unrecognized(token, spanned))?;
                self.state = State::Closing {
                    constant: ParsedConstant {
                        name,
                        value,
                        description,
                    },
                };
                Ok(None)
            }
            State::Closing { constant } => match token {
                Token::Symbol(')' | ',') => Ok(Some(constant)),
                Token::Comment(_) | Token::Eof => {
                    self.state = State::Closing { constant };
                    Ok(None)
                }
                other => Err(unrecognized(other, spanned)),
            },
        }
    }
}

/// The value a literal token stands for. A sign is allowed only in front of
/// numbers; `None` means the token is not a value here.
fn literal_value(token: &Token, sign: Option<bool>) -> Option<Value> {
    let negative = sign.unwrap_or(false);
    let value = match token {
        Token::IntegerLiteral(magnitude) => signed_integer(*magnitude, negative),
        Token::FloatLiteral(f) => Value::Float(if negative { -f } else { *f }),
        Token::Identifier(word) if word.eq_ignore_ascii_case(NAN_LITERAL) => Value::Float(f64::NAN),
        Token::Identifier(word) if word.eq_ignore_ascii_case(INF_LITERAL) => {
            Value::Float(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            })
        }
        _ if sign.is_some() => return None,
        Token::StringLiteral(s) => Value::String(s.clone()),
        Token::Identifier(word) if word.eq_ignore_ascii_case(TRUE_LITERAL) => Value::Boolean(true),
        Token::Identifier(word) if word.eq_ignore_ascii_case(FALSE_LITERAL) => {
            Value::Boolean(false)
        }
        _ => return None,
    };
    Some(value)
}

/// Integers that do not fit `i64` become floats.
fn signed_integer(magnitude: u64, negative: bool) -> Value {
    const MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;
    match (i64::try_from(magnitude), negative) {
        (Ok(n), false) => Value::Integer(n),
        (Ok(n), true) => Value::Integer(-n),
        (Err(_), true) if magnitude == MIN_MAGNITUDE => Value::Integer(i64::MIN),
        (Err(_), true) => Value::Float(-(magnitude as f64)),
        (Err(_), false) => Value::Float(magnitude as f64),
    }
}

fn unrecognized(token: &Token, spanned: &SpannedToken) -> Error {
    Error::unrecognized_literal(&token.to_string(), spanned.span.line, spanned.span.column)
}

/// Applies every constant in `tokens` to `store` through its typed setters.
///
/// Returns the number of constants applied.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse_into(tokens: &[SpannedToken], store: &mut ConstantStore) -> Result<usize> {
    let constants = Parser::new(tokens).parse()?;
    let count = constants.len();
    for constant in constants {
        let description = constant.description.as_deref();
        match constant.value {
            Value::Boolean(b) => store.set_boolean(&constant.name, b, description)?,
            Value::Integer(i) => store.set_integer(&constant.name, i, description)?,
            Value::Float(f) => store.set_float(&constant.name, f, description)?,
            Value::String(s) => store.set_string(&constant.name, s, description)?,
            Value::Raw(m) => store.set_value(&constant.name, m, description)?,
        };
    }
    Ok(count)
}

/// Builds a new store from `tokens`.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(tokens: &[SpannedToken]) -> Result<ConstantStore> {
    let mut store = ConstantStore::new();
    parse_into(tokens, &mut store)?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;

    fn parse_text(input: &str) -> Result<Vec<ParsedConstant>> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Parser::new(&tokens).parse()
    }

    fn constant(name: &str, value: Value, description: Option<&str>) -> ParsedConstant {
        ParsedConstant {
            name: name.to_string(),
            value,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_each_value_kind() {
        let constants = parse_text(
            "<?php\n\
             define('B', TRUE);\n\
             define('F', FALSE);\n\
             define('I', 42);\n\
             define('N', -7);\n\
             define('R', 2.5);\n\
             define('S', \"text\");\n",
        )
        .unwrap();

        assert_eq!(
            constants,
            vec![
                constant("B", Value::Boolean(true), None),
                constant("F", Value::Boolean(false), None),
                constant("I", Value::Integer(42), None),
                constant("N", Value::Integer(-7), None),
                constant("R", Value::Float(2.5), None),
                constant("S", Value::String("text".to_string()), None),
            ]
        );
    }

    #[test]
    fn test_description_attaches_to_next_statement_only() {
        let constants = parse_text(
            "/** first */\n/** second */\ndefine('A', 1);\ndefine('B', 2);\n",
        )
        .unwrap();
        assert_eq!(constants[0], constant("A", Value::Integer(1), Some("second")));
        assert_eq!(constants[1], constant("B", Value::Integer(2), None));
    }

    #[test]
    fn test_guard_and_marker_are_skipped() {
        let constants = parse_text(
            "/** guarded */\nif (!defined('A')) define('A', \"x\", TRUE);\nif (!defined('B')) define('B', FALSE, TRUE);\n",
        )
        .unwrap();
        assert_eq!(
            constants,
            vec![
                constant("A", Value::String("x".to_string()), Some("guarded")),
                constant("B", Value::Boolean(false), None),
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_ascii_case() {
        let constants = parse_text("DEFINE('A', true); Define('B', False);").unwrap();
        assert_eq!(constants[0].value, Value::Boolean(true));
        assert_eq!(constants[1].value, Value::Boolean(false));
    }

    #[test]
    fn test_integer_edges() {
        let constants = parse_text(
            "define('MIN', -9223372036854775808);\n\
             define('MAX', 9223372036854775807);\n\
             define('BIG', 9223372036854775808);\n\
             define('POS', +5);\n\
             define('DOUBLE_NEG', - -5);\n",
        )
        .unwrap();
        assert_eq!(constants[0].value, Value::Integer(i64::MIN));
        assert_eq!(constants[1].value, Value::Integer(i64::MAX));
        assert_eq!(constants[2].value, Value::Float(9_223_372_036_854_775_808.0));
        assert_eq!(constants[3].value, Value::Integer(5));
        assert_eq!(constants[4].value, Value::Integer(5));
    }

    #[test]
    fn test_non_finite_floats() {
        let constants = parse_text("define('A', NAN); define('B', INF); define('C', -INF);").unwrap();
        assert!(constants[0].value.as_f64().unwrap().is_nan());
        assert_eq!(constants[1].value, Value::Float(f64::INFINITY));
        assert_eq!(constants[2].value, Value::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn test_unrecognized_value() {
        let err = parse_text("<?php\ndefine('A', NULL);").unwrap_err();
        match err {
            Error::UnrecognizedLiteral {
                literal,
                line,
                column,
            } => {
                assert_eq!(literal, "NULL");
                assert_eq!(line, 2);
                assert_eq!(column, 13);
            }
            other => panic!("Expected UnrecognizedLiteral, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_name() {
        let err = parse_text("define(FOO, 1);").unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedLiteral { ref literal, .. } if literal == "FOO"
        ));
    }

    fn unrecognized_literal(input: &str) -> String {
        match parse_text(input).unwrap_err() {
            Error::UnrecognizedLiteral { literal, .. } => literal,
            other => panic!("Expected UnrecognizedLiteral, got {:?}", other),
        }
    }

    #[test]
    fn test_array_value_is_rejected() {
        assert_eq!(unrecognized_literal("define('LIST', [1, 2, 3]);"), "[");
        assert_eq!(unrecognized_literal("define('LIST', array(1, 2));"), "array");
    }

    #[test]
    fn test_expression_value_is_rejected() {
        assert_eq!(unrecognized_literal("define('A', (\"x\" . \"y\"));"), "(");
        assert_eq!(unrecognized_literal("define('A', \"x\" . \"y\");"), ".");
        assert_eq!(unrecognized_literal("define('A', 1 + 2);"), "+");
    }

    #[test]
    fn test_sign_only_before_numbers() {
        assert_eq!(unrecognized_literal("define('B', -\"neg\");"), "\"neg\"");
        assert_eq!(unrecognized_literal("define('B', -TRUE);"), "TRUE");
        assert_eq!(unrecognized_literal("define('B', -);"), ")");

        let constants = parse_text("define('N', -NAN); define('I', +INF);").unwrap();
        assert!(constants[0].value.as_f64().unwrap().is_nan());
        assert_eq!(constants[1].value, Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_separator_is_required_once() {
        assert_eq!(unrecognized_literal("define('A' 1);"), "1");
        assert_eq!(unrecognized_literal("define('A',, 1);"), ",");
    }

    #[test]
    fn test_comments_around_value_are_skipped() {
        let constants = parse_text("define('A', /* one */ 1 /* done */);").unwrap();
        assert_eq!(constants, vec![constant("A", Value::Integer(1), None)]);
    }

    #[test]
    fn test_incomplete_trailing_statement_is_dropped() {
        let constants = parse_text("define('A', 1);\ndefine('B',").unwrap();
        assert_eq!(constants, vec![constant("A", Value::Integer(1), None)]);

        let constants = parse_text("define('A', 1);\ndefine(").unwrap();
        assert_eq!(constants.len(), 1);

        let constants = parse_text("define('A', 1);\ndefine('B', 2").unwrap();
        assert_eq!(constants.len(), 1);
    }

    #[test]
    fn test_defined_is_not_a_statement_start() {
        let constants = parse_text("defined('A');").unwrap();
        assert!(constants.is_empty());
    }

    #[test]
    fn test_parse_into_applies_setters_in_order() {
        let tokens = Tokenizer::new("define('B', 1); define('A', 2); define('B', 3);")
            .tokenize()
            .unwrap();
        let mut store = ConstantStore::new();
        assert_eq!(parse_into(&tokens, &mut store).unwrap(), 3);

        let names: Vec<&str> = store.all_values().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(store.get("B").unwrap(), &Value::Integer(3));
    }
}
