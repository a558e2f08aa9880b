//! feedmei source lexer
//!
//! This module turns source text into the flat token sequence the
//! interpreter executes:
//! - [`token`]: token kinds, the single-character instruction table, locations
//! - [`scanner`]: greedy scanning of numbers and identifiers, source limits
//! - [`cursor`]: checked look-ahead over the finished sequence
//!
//! # Reserved letters
//!
//! `f g l e G L n` are instructions, but only where a token begins. `graph`
//! scans as `g` followed by the identifier `raph`, while `abe` is one
//! identifier. This is part of the language, not something the lexer tries
//! to repair.

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::TokenCursor;
pub use scanner::{scan_token, tokenize, LexError, Lexer};
pub use token::{SourceLocation, Token, TokenKind};
