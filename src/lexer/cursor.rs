//! Checked positional access to a token sequence.
//!
//! The instruction set looks ahead by fixed offsets (`>(3`, `{(5) g 3`), so
//! the interpreter needs "the token N places after this one" far more often
//! than it needs a real parse. [`TokenCursor`] answers that with `Option`
//! instead of indexing, and `None` means the program ended first.

use super::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Token under the cursor, or `None` once the program has run off the end.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Token `offset` places after the cursor.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position.checked_add(offset)?)
    }

    pub fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.peek(offset).map(|t| t.kind)
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Move the cursor to an absolute position. Positions past the end are
    /// allowed and simply end the program.
    pub fn jump_to(&mut self, position: usize) {
        self.position = position;
    }

    /// Position of the first `kind` token strictly after the cursor.
    pub fn find_forward(&self, kind: TokenKind) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.position + 1)
            .find(|(_, t)| t.kind == kind)
            .map(|(i, _)| i)
    }

    /// Like [`find_forward`](Self::find_forward), but tokens inside a `;`
    /// comment (up to and including its newline) never match.
    pub fn find_forward_uncommented(&self, kind: TokenKind) -> Option<usize> {
        let mut in_comment = false;
        for (i, token) in self.tokens.iter().enumerate().skip(self.position + 1) {
            if in_comment {
                in_comment = token.kind != TokenKind::Newline;
            } else if token.kind == TokenKind::Break {
                in_comment = true;
            } else if token.kind == kind {
                return Some(i);
            }
        }
        None
    }
}
