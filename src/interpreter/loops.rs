//! Loop execution (`[` ... `]`, and the loop a newline arms).
//!
//! Only one loop is tracked at a time. Arming a loop, whether with `[` or
//! with a newline, replaces whatever loop was active, so nested brackets do
//! not nest: the inner `[` takes over and the outer loop is forgotten.
//!
//! A loop runs its body at least once. Each `]` consumes one pass while
//! passes remain; a cell-driven loop (no argument) also decrements the
//! current cell for every consumed pass. The cursor then resumes just after
//! the token that armed the loop.

use crate::interpreter::arithmetic::ArithOp;
use crate::interpreter::engine::{Flow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::lexer::SourceLocation;
use log::trace;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LoopContext {
    pub active: bool,
    /// Position of the token that armed the loop
    pub start: usize,
    /// Passes left, including the one in progress
    pub remaining: i32,
    /// No explicit count: the count came from the current cell
    pub cell_driven: bool,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Arm the loop at the cursor, taking the count from `(N`, `($N` or the
    /// current cell.
    pub(crate) fn arm_loop(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        let (remaining, cell_driven) = match self.argument()? {
            Some(count) => (count, false),
            None => (self.tape.current(), true),
        };

        self.loop_ctx = LoopContext {
            active: true,
            start: self.cursor.position(),
            remaining,
            cell_driven,
        };
        trace!(
            "loop armed at {} for {} passes{}",
            location,
            remaining,
            if cell_driven { " (cell-driven)" } else { "" }
        );
        Ok(())
    }

    pub(crate) fn end_loop(&mut self, location: SourceLocation) -> Result<Flow, RuntimeError> {
        if !self.loop_ctx.active {
            return Ok(Flow::Next);
        }
        if self.loop_ctx.remaining <= 0 {
            self.loop_ctx = LoopContext::default();
            return Ok(Flow::Next);
        }

        self.loop_ctx.remaining -= 1;
        if self.loop_ctx.cell_driven {
            self.apply_to_current(ArithOp::Sub, 1, location)?;
        }

        if self.loop_ctx.remaining > 0 {
            trace!(
                "rewinding to {} with {} passes left",
                self.loop_ctx.start,
                self.loop_ctx.remaining
            );
            // Skip advances past the arming token, so it is not re-armed
            self.cursor.jump_to(self.loop_ctx.start);
            return Ok(Flow::Skip);
        }

        self.loop_ctx = LoopContext::default();
        Ok(Flow::Next)
    }
}
