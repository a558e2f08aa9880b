//! Conditionals: `{(A) op B` ... `}`
//!
//! The header is positional. Counting from the `{` token:
//!
//! ```text
//! +2  first operand   number, or `$` number
//! +5  comparison      g l e G L n
//! +7  second operand  number, or `$` number
//! ```
//!
//! so `{(5) g 3` and `{($0)g 3` are both well formed. When the comparison
//! holds, execution resumes after the next newline (the body lives on the
//! following lines). When it fails, execution resumes after the next `}`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::operands::literal_value;
use crate::lexer::{SourceLocation, TokenKind};
use log::trace;
use std::io::{BufRead, Write};

const FIRST_OPERAND: usize = 2;
const OPERATOR: usize = 5;
const SECOND_OPERAND: usize = 7;

/// Compare `lhs` and `rhs` with a comparison token kind.
///
/// Kinds that are not comparisons never hold.
pub fn evaluate(operator: TokenKind, lhs: i32, rhs: i32) -> bool {
    match operator {
        TokenKind::Greater => lhs > rhs,
        TokenKind::Less => lhs < rhs,
        TokenKind::Equal => lhs == rhs,
        TokenKind::GreaterOrEqual => lhs >= rhs,
        TokenKind::LessOrEqual => lhs <= rhs,
        TokenKind::NotEqual => lhs != rhs,
        _ => false,
    }
}

/// The operands and operator of an evaluated `{` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub lhs: i32,
    pub operator: TokenKind,
    pub rhs: i32,
}

impl Comparison {
    pub fn holds(&self) -> bool {
        evaluate(self.operator, self.lhs, self.rhs)
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub(crate) fn execute_if(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        let lhs = self.condition_operand(FIRST_OPERAND, location)?;
        let operator = self
            .cursor
            .peek_kind(OPERATOR)
            .ok_or_else(|| malformed("program ends before the comparison operator", location))?;
        let rhs = self.condition_operand(SECOND_OPERAND, location)?;

        let comparison = Comparison { lhs, operator, rhs };
        self.comparison = Some(comparison);

        let holds = comparison.holds();
        trace!("{} {} {} is {} at {}", lhs, operator, rhs, holds, location);

        let (resume_at, missing) = if holds {
            (TokenKind::Newline, "no newline after a true condition")
        } else {
            (TokenKind::EndIf, "no '}' after a false condition")
        };
        let target = self
            .cursor
            .find_forward(resume_at)
            .ok_or_else(|| malformed(missing, location))?;
        // The dispatch loop advances past the target without executing it
        self.cursor.jump_to(target);
        Ok(())
    }

    fn condition_operand(
        &self,
        offset: usize,
        location: SourceLocation,
    ) -> Result<i32, RuntimeError> {
        let Some(token) = self.cursor.peek(offset) else {
            return Err(malformed("program ends inside the condition", location));
        };

        match token.kind {
            TokenKind::Number => literal_value(token),
            TokenKind::MentionCell => self.mentioned_cell(offset + 1)?.ok_or_else(|| {
                malformed(
                    &format!("expected a cell index after '$' at {}", token.location),
                    location,
                )
            }),
            _ => Err(malformed(
                &format!("expected a number or '$' operand, found {}", token),
                location,
            )),
        }
    }
}

fn malformed(message: &str, location: SourceLocation) -> RuntimeError {
    RuntimeError::MalformedConditional {
        message: message.to_string(),
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_all_comparisons() {
        assert!(evaluate(TokenKind::Greater, 5, 3));
        assert!(!evaluate(TokenKind::Greater, 3, 5));
        assert!(evaluate(TokenKind::Less, 3, 5));
        assert!(evaluate(TokenKind::Equal, 4, 4));
        assert!(evaluate(TokenKind::GreaterOrEqual, 4, 4));
        assert!(evaluate(TokenKind::LessOrEqual, -1, 4));
        assert!(evaluate(TokenKind::NotEqual, 1, 2));
        assert!(!evaluate(TokenKind::NotEqual, 2, 2));
    }

    #[test]
    fn test_non_comparison_is_false() {
        assert!(!evaluate(TokenKind::Increment, 1, 0));
        assert!(!evaluate(TokenKind::Unknown, 0, 0));
    }
}
