//! # Introduction
//!
//! feedmei interprets a tiny tape language whose programs have to eat. The
//! source is scanned into a flat token sequence and executed directly
//! against a fixed row of integer cells. One cell, the *stomach*, loses a
//! unit of food on every line; when it goes negative the program starves.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Interpreter (+ Tape) → Output
//! ```
//!
//! 1. [`lexer`]: scans characters into [`lexer::Token`]s, greedily for
//!    numbers and identifiers.
//! 2. [`memory`]: the bounded [`memory::Tape`] with its current and stomach
//!    indices.
//! 3. [`interpreter`]: walks the tokens with an instruction pointer that
//!    jumps back for loops and forward for conditionals.
//! 4. [`runner`]: loads files and runs them one after another.
//! 5. [`config`]: tape size, source limit, stomach index and the command line.
//!
//! ## Instruction set
//!
//! ```text
//! < >        move the current cell          + - * / %   arithmetic on it
//! .  =       print as character / integer   ,  &        read character / integer
//! [ ]        loop                           #           clear a positive cell
//! { }        conditional                    $N          the value of cell N
//! @x  @\x    print x / an escape            ;           comment to end of line
//! :          stop                           ?           no-op
//! ```
//!
//! Most instructions take an optional argument written `(N` or `($N`, as in
//! `+(10)` or `>($2)`.

pub mod config;
pub mod interpreter;
pub mod lexer;
pub mod memory;
pub mod runner;
