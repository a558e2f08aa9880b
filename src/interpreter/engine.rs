// Execution engine for the feedmei interpreter

use crate::interpreter::arithmetic::{checked_apply, ArithOp};
use crate::interpreter::conditional::Comparison;
use crate::interpreter::constants::STARVATION_MESSAGE;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::io::{InputReader, ReadOutcome};
use crate::interpreter::loops::LoopContext;
use crate::lexer::{SourceLocation, Token, TokenCursor, TokenKind};
use crate::memory::Tape;
use log::{debug, info};
use std::io::{BufRead, Write};

/// How a program that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ran off the end of the token sequence
    Completed,
    /// Hit `:`
    Terminated,
    /// The stomach cell went negative
    Starved,
}

/// What the dispatch loop does after one instruction
pub(crate) enum Flow {
    /// Check the stomach, then move to the next token
    Next,
    /// Move to the next token without the stomach check
    Skip,
    /// Stop the program
    Halt,
}

/// The interpreter that executes one token sequence against one tape
pub struct Interpreter<R, W> {
    /// Program and instruction pointer
    pub(crate) cursor: TokenCursor,

    pub(crate) tape: Tape,

    /// Single-level loop state; arming a new loop forgets the old one
    pub(crate) loop_ctx: LoopContext,

    /// Operands of the most recent `{`, cleared by `}`
    pub(crate) comparison: Option<Comparison>,

    /// Set by `;`, cleared by the next newline
    in_comment: bool,

    input: InputReader<R>,

    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Create an interpreter over a scanned program and a fresh tape
    pub fn new(tokens: Vec<Token>, tape: Tape, input: R, output: W) -> Self {
        Interpreter {
            cursor: TokenCursor::new(tokens),
            tape,
            loop_ctx: LoopContext::default(),
            comparison: None,
            in_comment: false,
            input: InputReader::new(input),
            output,
        }
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Operands and operator of the last `{` that has not been closed by `}`
    pub fn last_comparison(&self) -> Option<Comparison> {
        self.comparison
    }

    /// Run the program from start to finish.
    ///
    /// Output is flushed before returning, whether the run failed or not.
    pub fn run(&mut self) -> Result<Outcome, RuntimeError> {
        let outcome = self.execute_all();
        let flushed = self.output.flush();
        let outcome = outcome?;
        flushed?;
        Ok(outcome)
    }

    fn execute_all(&mut self) -> Result<Outcome, RuntimeError> {
        debug!(
            "executing {} tokens on a tape of {} cells",
            self.cursor.len(),
            self.tape.capacity()
        );

        while let Some(token) = self.cursor.current() {
            let kind = token.kind;
            let location = token.location;

            if self.in_comment {
                if kind == TokenKind::Newline {
                    self.in_comment = false;
                }
                self.cursor.advance();
                continue;
            }

            match self.execute_token(kind, location)? {
                Flow::Next => {}
                Flow::Skip => {
                    self.cursor.advance();
                    continue;
                }
                Flow::Halt => {
                    info!("program terminated at {}", location);
                    return Ok(Outcome::Terminated);
                }
            }

            if self.tape.is_starving() {
                info!(
                    "stomach cell {} went negative at {}",
                    self.tape.stomach_index(),
                    location
                );
                writeln!(self.output, "{}", STARVATION_MESSAGE)?;
                return Ok(Outcome::Starved);
            }

            self.cursor.advance();
        }

        Ok(Outcome::Completed)
    }

    /// Execute the token under the cursor
    fn execute_token(
        &mut self,
        kind: TokenKind,
        location: SourceLocation,
    ) -> Result<Flow, RuntimeError> {
        match kind {
            TokenKind::MoveLeft => {
                let distance = self.argument()?.unwrap_or(1);
                self.move_current(-i64::from(distance), location)?;
            }
            TokenKind::MoveRight => {
                let distance = self.argument()?.unwrap_or(1);
                self.move_current(i64::from(distance), location)?;
            }
            TokenKind::Increment => {
                let amount = self.argument()?.unwrap_or(1);
                self.apply_to_current(ArithOp::Add, amount, location)?;
            }
            TokenKind::Decrement => {
                let amount = self.argument()?.unwrap_or(1);
                self.apply_to_current(ArithOp::Sub, amount, location)?;
            }
            TokenKind::Multiply => {
                if let Some(factor) = self.argument()? {
                    self.apply_to_current(ArithOp::Mul, factor, location)?;
                }
            }
            TokenKind::Divide => {
                if let Some(divisor) = self.argument()? {
                    self.apply_to_current(ArithOp::Div, divisor, location)?;
                }
            }
            TokenKind::Modulo => {
                if let Some(divisor) = self.argument()? {
                    self.apply_to_current(ArithOp::Mod, divisor, location)?;
                }
            }
            TokenKind::PrintChar => {
                // putchar semantics: only the low byte reaches the output
                let byte = self.tape.current() as u8;
                self.output.write_all(&[byte])?;
            }
            TokenKind::PrintInt => {
                writeln!(self.output, "{}", self.tape.current())?;
            }
            TokenKind::Break => self.in_comment = true,
            TokenKind::Terminate => return Ok(Flow::Halt),
            TokenKind::Continue => return Ok(Flow::Skip),
            TokenKind::Newline => {
                // Every line costs one unit of food, and a newline also arms
                // a loop exactly as `[` does.
                self.tape.feed_on_stomach();
                self.arm_loop(location)?;
            }
            TokenKind::StartLoop => {
                if self
                    .cursor
                    .find_forward_uncommented(TokenKind::EndLoop)
                    .is_none()
                {
                    return Err(RuntimeError::UnterminatedLoop { location });
                }
                self.arm_loop(location)?;
            }
            TokenKind::EndLoop => return self.end_loop(location),
            TokenKind::Cleanse => {
                if self.tape.current() > 0 {
                    self.tape.set_current(0);
                }
            }
            TokenKind::ReadChar | TokenKind::ReadInt => self.read_into_current(kind, location)?,
            TokenKind::IfStart => self.execute_if(location)?,
            TokenKind::EndIf => self.comparison = None,
            TokenKind::Putch => self.putch()?,
            TokenKind::FunctionDeclaration
            | TokenKind::Identifier
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::Number
            | TokenKind::Greater
            | TokenKind::Less
            | TokenKind::Equal
            | TokenKind::GreaterOrEqual
            | TokenKind::LessOrEqual
            | TokenKind::NotEqual
            | TokenKind::MentionCell
            | TokenKind::EscapeCode
            | TokenKind::Unknown => {}
        }

        Ok(Flow::Next)
    }

    fn move_current(&mut self, delta: i64, location: SourceLocation) -> Result<(), RuntimeError> {
        self.tape
            .move_by(delta)
            .map_err(|e| RuntimeError::OutOfRangeCell {
                index: e.index,
                capacity: e.capacity,
                location,
            })
    }

    pub(crate) fn apply_to_current(
        &mut self,
        op: ArithOp,
        operand: i32,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = checked_apply(op, self.tape.current(), operand, location)?;
        self.tape.set_current(value);
        Ok(())
    }

    fn read_into_current(
        &mut self,
        kind: TokenKind,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        // Prompts written so far must be visible before we block
        self.output.flush()?;

        let read = if kind == TokenKind::ReadChar {
            self.input.read_char()?
        } else {
            self.input.read_int()?
        };

        match read {
            ReadOutcome::Value(value) => self.tape.set_current(value),
            ReadOutcome::EndOfInput => debug!(
                "end of input at {}; cell {} keeps {}",
                location,
                self.tape.current_index(),
                self.tape.current()
            ),
            ReadOutcome::Invalid(message) => {
                return Err(RuntimeError::InvalidInput { message, location });
            }
        }
        Ok(())
    }

    /// `@x` prints x's first character and skips x; `@\x` prints an escape.
    fn putch(&mut self) -> Result<(), RuntimeError> {
        let Some(next) = self.cursor.peek(1) else {
            return Ok(());
        };

        if next.kind == TokenKind::EscapeCode {
            let escaped = match self.cursor.peek(2).and_then(Token::first_char) {
                Some('n') => Some('\n'),
                Some('w') => Some(' '),
                Some('t') => Some('\t'),
                Some('\\') => Some('\\'),
                _ => None,
            };
            if let Some(ch) = escaped {
                write!(self.output, "{}", ch)?;
            }
            return Ok(());
        }

        if let Some(ch) = next.first_char() {
            // Characters decoded from a source byte go back out as that byte
            match u8::try_from(ch) {
                Ok(byte) => self.output.write_all(&[byte])?,
                Err(_) => write!(self.output, "{}", ch)?,
            }
        }
        self.cursor.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use std::io::Cursor;

    fn run(source: &str) -> (Result<Outcome, RuntimeError>, Vec<i32>, String) {
        let tokens = tokenize(source, None).unwrap();
        let tape = Tape::new(16, 0).unwrap();
        let mut interpreter = Interpreter::new(tokens, tape, Cursor::new(""), Vec::new());
        let result = interpreter.run();
        let cells = interpreter.tape().cells().to_vec();
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        (result, cells, output)
    }

    #[test]
    fn test_plain_increment_and_move() {
        let (result, cells, _) = run("+++>++>+<-");
        assert_eq!(result, Ok(Outcome::Completed));
        assert_eq!(&cells[..3], &[3, 1, 1]);
    }

    #[test]
    fn test_comment_suppresses_until_newline() {
        let (result, cells, _) = run("+(5);+++ anything\n+");
        assert_eq!(result, Ok(Outcome::Completed));
        // The newline that ends a comment is swallowed with it
        assert_eq!(cells[0], 6);
    }

    #[test]
    fn test_terminate_stops_immediately() {
        let (result, cells, _) = run("+:+++");
        assert_eq!(result, Ok(Outcome::Terminated));
        assert_eq!(cells[0], 1);
    }

    #[test]
    fn test_continue_is_a_no_op() {
        let (result, cells, _) = run("+?+");
        assert_eq!(result, Ok(Outcome::Completed));
        assert_eq!(cells[0], 2);
    }

    #[test]
    fn test_cleanse_only_clears_positive_cells() {
        let (_, cells, _) = run("+(3)#>-#");
        assert_eq!(&cells[..2], &[0, -1]);
    }

    #[test]
    fn test_putch_and_escapes() {
        let (_, _, output) = run("@H@i@\\w@\\t@\\\\@\\n");
        assert_eq!(output, "Hi \t\\\n");
    }

    #[test]
    fn test_starvation_stops_further_instructions() {
        let (result, cells, output) = run(">+(7)<-=");
        assert_eq!(result, Ok(Outcome::Starved));
        assert_eq!(output, format!("{}\n", STARVATION_MESSAGE));
        assert_eq!(cells[0], -1);
    }

    #[test]
    fn test_putch_writes_latin1_characters_as_bytes() {
        let tokens = tokenize("@\u{e9}", None).unwrap();
        let tape = Tape::new(4, 0).unwrap();
        let mut interpreter = Interpreter::new(tokens, tape, Cursor::new(""), Vec::new());
        interpreter.run().unwrap();
        assert_eq!(interpreter.into_output(), vec![0xE9]);
    }

    #[test]
    fn test_end_if_clears_the_comparison() {
        let tokens = tokenize("+(9){(5) g 3\n", None).unwrap();
        let tape = Tape::new(4, 0).unwrap();
        let mut interpreter = Interpreter::new(tokens, tape, Cursor::new(""), Vec::new());
        interpreter.run().unwrap();
        assert_eq!(
            interpreter.last_comparison(),
            Some(Comparison {
                lhs: 5,
                operator: TokenKind::Greater,
                rhs: 3
            })
        );

        let tokens = tokenize("+(9){(5) g 3\n}", None).unwrap();
        let tape = Tape::new(4, 0).unwrap();
        let mut interpreter = Interpreter::new(tokens, tape, Cursor::new(""), Vec::new());
        interpreter.run().unwrap();
        assert_eq!(interpreter.last_comparison(), None);
    }

    #[test]
    fn test_end_loop_inside_comment_does_not_close_a_loop() {
        let (result, cells, _) = run("+(9)>[+;]\n");
        assert!(matches!(result, Err(RuntimeError::UnterminatedLoop { .. })));
        assert_eq!(cells[1], 0);
    }

    #[test]
    fn test_move_off_tape_fails() {
        let (result, _, _) = run("<");
        assert!(matches!(
            result,
            Err(RuntimeError::OutOfRangeCell { index: -1, capacity: 16, .. })
        ));
    }
}
