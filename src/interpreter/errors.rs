//! Runtime error types for the feedmei interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur while a token sequence executes (as opposed to lexing or file errors).
//!
//! All runtime errors are fatal for the script that raised them. Starvation
//! and `:` are deliberate program endings and are *not* errors; see
//! [`crate::interpreter::engine::Outcome`].

use crate::lexer::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The current index, or a `$` reference, left the tape
    OutOfRangeCell {
        index: i64,
        capacity: usize,
        location: SourceLocation,
    },

    /// `/` with a zero operand
    DivisionByZero { location: SourceLocation },

    /// `%` with a zero operand
    ModuloByZero { location: SourceLocation },

    /// `{` without the operand/operator layout it needs, or with no `}` or
    /// newline to continue at
    MalformedConditional {
        message: String,
        location: SourceLocation,
    },

    /// `($` not followed by a cell index
    MalformedArgument {
        message: String,
        location: SourceLocation,
    },

    /// `[` with no `]` anywhere after it
    UnterminatedLoop { location: SourceLocation },

    /// Integer overflow in arithmetic or in a numeric literal
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// `&` read something that is not an integer
    InvalidInput {
        message: String,
        location: SourceLocation,
    },

    /// Reading stdin or writing stdout failed
    Io { message: String },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::OutOfRangeCell { location, .. } => Some(location),
            RuntimeError::DivisionByZero { location } => Some(location),
            RuntimeError::ModuloByZero { location } => Some(location),
            RuntimeError::MalformedConditional { location, .. } => Some(location),
            RuntimeError::MalformedArgument { location, .. } => Some(location),
            RuntimeError::UnterminatedLoop { location } => Some(location),
            RuntimeError::IntegerOverflow { location, .. } => Some(location),
            RuntimeError::InvalidInput { location, .. } => Some(location),
            RuntimeError::Io { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::OutOfRangeCell {
                index,
                capacity,
                location,
            } => {
                write!(
                    f,
                    "Cell {} out of range at line {}, column {}: the tape has {} cells",
                    index, location.line, location.column, capacity
                )
            }
            RuntimeError::DivisionByZero { location } => {
                write!(
                    f,
                    "Division by zero at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::ModuloByZero { location } => {
                write!(
                    f,
                    "Modulo by zero at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::MalformedConditional { message, location } => {
                write!(
                    f,
                    "Malformed conditional at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            RuntimeError::MalformedArgument { message, location } => {
                write!(
                    f,
                    "Malformed argument at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            RuntimeError::UnterminatedLoop { location } => {
                write!(
                    f,
                    "Loop started at line {}, column {} is never closed",
                    location.line, location.column
                )
            }
            RuntimeError::IntegerOverflow {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at line {}, column {}",
                    operation, location.line, location.column
                )
            }
            RuntimeError::InvalidInput { message, location } => {
                write!(
                    f,
                    "Invalid input at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            RuntimeError::Io { message } => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io {
            message: err.to_string(),
        }
    }
}
