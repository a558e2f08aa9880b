//! Operand grammar shared by the movement, arithmetic and loop instructions.
//!
//! ```text
//! op ( N        literal N
//! op ( $ N      value of cell N
//! op            no argument
//! ```
//!
//! Only the tokens directly after the instruction are inspected; the closing
//! `)` is never required and, like the other argument tokens, executes as a
//! no-op when the cursor reaches it.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::lexer::{Token, TokenKind};
use std::io::{BufRead, Write};

/// Parse a number token as a cell value.
pub(crate) fn literal_value(token: &Token) -> Result<i32, RuntimeError> {
    token
        .lexeme
        .parse::<i32>()
        .map_err(|_| RuntimeError::IntegerOverflow {
            operation: format!("literal {}", token.lexeme),
            location: token.location,
        })
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// The `(N` / `($N` argument of the instruction under the cursor, if any.
    pub(crate) fn argument(&self) -> Result<Option<i32>, RuntimeError> {
        if self.cursor.peek_kind(1) != Some(TokenKind::LeftParen) {
            return Ok(None);
        }

        match self.cursor.peek(2) {
            Some(token) if token.kind == TokenKind::Number => literal_value(token).map(Some),
            Some(mention) if mention.kind == TokenKind::MentionCell => {
                if let Some(value) = self.mentioned_cell(3)? {
                    return Ok(Some(value));
                }
                let found = match self.cursor.peek(3) {
                    Some(token) => token.to_string(),
                    None => "end of program".to_string(),
                };
                Err(RuntimeError::MalformedArgument {
                    message: format!("expected a cell index after '$', found {}", found),
                    location: mention.location,
                })
            }
            _ => Ok(None),
        }
    }

    /// Value of the cell whose index is the number token `offset` places
    /// ahead, or `None` when that token is not a number.
    pub(crate) fn mentioned_cell(&self, offset: usize) -> Result<Option<i32>, RuntimeError> {
        let Some(token) = self.cursor.peek(offset) else {
            return Ok(None);
        };
        if token.kind != TokenKind::Number {
            return Ok(None);
        }

        let capacity = self.tape.capacity();
        // Indices too long to parse are certainly off the tape
        let index = token.lexeme.parse::<i64>().unwrap_or(i64::MAX);
        let out_of_range = RuntimeError::OutOfRangeCell {
            index,
            capacity,
            location: token.location,
        };
        let index = usize::try_from(index).map_err(|_| out_of_range.clone())?;
        self.tape.get(index).map(Some).map_err(|_| out_of_range)
    }
}
