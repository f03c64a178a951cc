//! Tokenizer for constant files.
//!
//! Handles the subset of tokens that appear in generated (or hand-written,
//! same-shaped) files: the `<?php` open tag, block comments, identifiers,
//! single- and double-quoted strings, integer and float literals, and single
//! character symbols. Whitespace and line comments (`//`, `#`) are discarded.
//!
//! The tokenizer never rejects a character: anything it does not know becomes
//! a [`Token::Symbol`]. It only fails on an unterminated string or block
//! comment.
//!
//! ```rust
//! use constfile::lexer::{Token, Tokenizer};
//!
//! let tokens: Vec<Token> = Tokenizer::new("define('A', -1.5);")
//!     .tokenize()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.token)
//!     .collect();
//!
//! assert_eq!(tokens, vec![
//!     Token::Identifier("define".to_string()),
//!     Token::Symbol('('),
//!     Token::StringLiteral("A".to_string()),
//!     Token::Symbol(','),
//!     Token::Symbol('-'),
//!     Token::FloatLiteral(1.5),
//!     Token::Symbol(')'),
//!     Token::Symbol(';'),
//!     Token::Eof,
//! ]);
//! ```

use crate::{Error, Result};
use std::fmt;

/// Token kinds produced by [`Tokenizer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<?php`
    OpenTag,
    /// Block comment text, trimmed, without the extra `*` of a doc comment
    Comment(String),
    Identifier(String),
    /// Unescaped string contents
    StringLiteral(String),
    /// Unsigned magnitude; signs are separate symbols
    IntegerLiteral(u64),
    FloatLiteral(f64),
    Symbol(char),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenTag => write!(f, "<?php"),
            Token::Comment(text) => write!(f, "/* {} */", text),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::IntegerLiteral(n) => write!(f, "{}", n),
            Token::FloatLiteral(n) => write!(f, "{:?}", n),
            Token::Symbol(c) => write!(f, "{}", c),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Position in source text for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token with source position
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Tokenizer over constant file source text
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The last token is always [`Token::Eof`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for an unterminated string or block comment.
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_line_comments();

            if self.is_at_end() {
                tokens.push(SpannedToken {
                    token: Token::Eof,
                    span: self.current_span(),
                });
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    // ── Character helpers ──────────────────────────────────

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn starts_with_ignore_case(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, expected)| match self.peek_ahead(i) {
                Some(c) => c.eq_ignore_ascii_case(&expected),
                None => false,
            })
    }

    // ── Whitespace & line comments ─────────────────────────

    fn skip_whitespace_and_line_comments(&mut self) {
        loop {
            while let Some(ch) = self.peek() {
                if ch.is_whitespace() {
                    self.advance();
                } else {
                    break;
                }
            }

            let line_comment = match (self.peek(), self.peek_ahead(1)) {
                (Some('/'), Some('/')) => true,
                (Some('#'), _) => true,
                _ => false,
            };
            if line_comment {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            break;
        }
    }

    // ── Main dispatch ──────────────────────────────────────

    fn next_token(&mut self) -> Result<SpannedToken> {
        let span = self.current_span();
        let Some(ch) = self.peek() else {
            return Ok(SpannedToken {
                token: Token::Eof,
                span,
            });
        };

        match ch {
            '<' if self.starts_with_ignore_case("<?php") => {
                for _ in 0.."<?php".len() {
                    self.advance();
                }
                Ok(SpannedToken {
                    token: Token::OpenTag,
                    span,
                })
            }
            '/' if self.peek_ahead(1) == Some('*') => self.read_block_comment(span),
            '\'' | '"' => self.read_string(ch, span),
            c if c.is_ascii_digit() => self.read_number(span),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(span)
            }
            c if c.is_alphabetic() || c == '_' => self.read_identifier(span),
            c => {
                self.advance();
                Ok(SpannedToken {
                    token: Token::Symbol(c),
                    span,
                })
            }
        }
    }

    // ── Block comments ─────────────────────────────────────

    fn read_block_comment(&mut self, span: Span) -> Result<SpannedToken> {
        self.advance(); // consume '/'
        self.advance(); // consume '*'
        let start = self.position;

        loop {
            match self.peek() {
                None => {
                    return Err(Error::syntax(
                        span.line,
                        span.column,
                        "unterminated block comment",
                    ));
                }
                Some('*') if self.peek_ahead(1) == Some('/') => break,
                Some(_) => {
                    self.advance();
                }
            }
        }

        let inner: String = self.input[start..self.position].iter().collect();
        self.advance(); // consume '*'
        self.advance(); // consume '/'

        Ok(SpannedToken {
            token: Token::Comment(comment_text(&inner)),
            span,
        })
    }

    // ── String literals ────────────────────────────────────

    /// Single-quoted strings unescape `\'` and `\\`; double-quoted strings
    /// unescape `\"` only. Any other backslash is kept as written.
    fn read_string(&mut self, quote: char, span: Span) -> Result<SpannedToken> {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    return Err(Error::syntax(
                        span.line,
                        span.column,
                        "unterminated string",
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.peek() {
                    Some(next) if next == quote => {
                        self.advance();
                        value.push(next);
                    }
                    Some('\\') if quote == '\'' => {
                        self.advance();
                        value.push('\\');
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
            }
        }

        Ok(SpannedToken {
            token: Token::StringLiteral(value),
            span,
        })
    }

    // ── Numbers ────────────────────────────────────────────

    fn read_number(&mut self, span: Span) -> Result<SpannedToken> {
        let start = self.position;
        let mut is_float = false;

        self.consume_digits();

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.consume_digits();
        } else if self.peek() == Some('.') && self.position > start {
            // `1.` is a float with an empty fraction
            let after_dot = self.peek_ahead(1);
            if !after_dot.is_some_and(|c| c.is_alphabetic() || c == '_') {
                is_float = true;
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = usize::from(matches!(self.peek_ahead(1), Some('+') | Some('-')));
            if self
                .peek_ahead(1 + sign)
                .is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                for _ in 0..=sign {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        let text: String = self.input[start..self.position].iter().collect();

        let token = if is_float {
            Token::FloatLiteral(self.parse_float(&text, span)?)
        } else {
            match text.parse::<u64>() {
                Ok(n) => Token::IntegerLiteral(n),
                // Magnitudes beyond u64 are read as floats
                Err(_) => Token::FloatLiteral(self.parse_float(&text, span)?),
            }
        };

        Ok(SpannedToken { token, span })
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn parse_float(&self, text: &str, span: Span) -> Result<f64> {
        text.parse::<f64>().map_err(|_| {
            Error::syntax(
                span.line,
                span.column,
                &format!("invalid number '{}'", text),
            )
        })
    }

    // ── Identifiers ────────────────────────────────────────

    fn read_identifier(&mut self, span: Span) -> Result<SpannedToken> {
        let start = self.position;

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        Ok(SpannedToken {
            token: Token::Identifier(text),
            span,
        })
    }
}

/// Trims each line and drops one leading `*`, so both `/** text */` and the
/// multi-line ` * text` layout give plain text. Blank edge lines are removed.
fn comment_text(inner: &str) -> String {
    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
