//! feedmei execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the dispatch loop over the token sequence
//! - [`conditional`]: the comparison evaluator and the `{` header
//! - [`errors`]: runtime error types
//! - [`io`]: blocking character/integer input
//!
//! # Execution Model
//!
//! There is no tree and no bytecode. The interpreter walks the token
//! sequence with an instruction pointer, looks a few tokens ahead for
//! arguments, and jumps backward for loops or forward for conditionals.
//! After each dispatched instruction the stomach cell is checked; once it
//! is negative the program starves.

pub mod arithmetic;
pub mod conditional;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod io;
mod loops;
mod operands;

pub use conditional::{evaluate, Comparison};
pub use engine::{Interpreter, Outcome};
pub use errors::RuntimeError;
