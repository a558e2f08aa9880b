//! Memory model for the interpreter
//!
//! A program sees one [`tape::Tape`] of `i32` cells, zero-filled at the start
//! of every script and dropped when the script ends. Nothing is shared
//! between scripts.
//!
//! # Capacity
//!
//! The tape has a fixed capacity chosen before the run (128 cells unless
//! configured otherwise). Moving the current index off either end is an
//! error rather than a silent read of neighbouring memory.

pub mod tape;

pub use tape::{CellOutOfRange, Tape};
