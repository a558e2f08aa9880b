//! Lexer (tokenizer) for feedmei source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed directly
//! by the interpreter. There is no parser: the token sequence *is* the
//! program, and nothing is ever skipped, so the lexemes concatenate back to
//! the original text.

use super::token::{punctuation_table, SourceLocation, Token, TokenKind};
use log::debug;
use std::fmt;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The source holds more characters than the configured limit allows
    SourceTooLarge { length: usize, limit: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::SourceTooLarge { length, limit } => write!(
                f,
                "Source too large: {} characters, limit is {}",
                length, limit
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Scan one token starting at `start`.
///
/// Returns the token and how many characters *beyond the first* it consumed;
/// zero for everything but multi-character numbers and identifiers.
///
/// # Panics
///
/// Panics if `start` is out of bounds for `input`.
pub fn scan_token(input: &[char], start: usize, location: SourceLocation) -> (Token, usize) {
    let ch = input[start];

    if let Some(&kind) = punctuation_table().get(&ch) {
        return (Token::new(kind, ch.to_string(), location), 0);
    }

    let kind = if ch.is_ascii_digit() {
        TokenKind::Number
    } else if ch.is_ascii_alphabetic() {
        // Reserved letters were already claimed by the table above, but only
        // at the start of a token; inside an identifier they are plain letters.
        TokenKind::Identifier
    } else {
        return (Token::new(TokenKind::Unknown, ch.to_string(), location), 0);
    };

    let extra = input[start + 1..]
        .iter()
        .take_while(|c| match kind {
            TokenKind::Number => c.is_ascii_digit(),
            _ => c.is_ascii_alphanumeric(),
        })
        .count();
    let lexeme: String = input[start..=start + extra].iter().collect();
    (Token::new(kind, lexeme, location), extra)
}

/// Lexer for feedmei source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    limit: Option<usize>,
}

impl Lexer {
    /// Create a new lexer with no limit on source length.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            limit: None,
        }
    }

    /// Create a lexer that refuses sources longer than `limit` characters.
    pub fn with_limit(input: &str, limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::new(input)
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        if let Some(limit) = self.limit {
            if self.input.len() > limit {
                return Err(LexError::SourceTooLarge {
                    length: self.input.len(),
                    limit,
                });
            }
        }

        let mut tokens = Vec::with_capacity(self.input.len());
        while !self.is_at_end() {
            let (token, extra) =
                scan_token(&self.input, self.position, self.current_location());
            for _ in 0..=extra {
                self.advance();
            }
            tokens.push(token);
        }

        debug!(
            "scanned {} characters into {} tokens",
            self.input.len(),
            tokens.len()
        );
        Ok(tokens)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Convenience wrapper: tokenize `source` under an optional length limit.
pub fn tokenize(source: &str, limit: Option<usize>) -> Result<Vec<Token>, LexError> {
    Lexer::with_limit(source, limit).tokenize()
}
