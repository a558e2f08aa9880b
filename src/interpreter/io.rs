//! Blocking input for `,` (read-char) and `&` (read-int).
//!
//! Both instructions skip leading ASCII whitespace first, the way a
//! `scanf(" %c")` / `scanf(" %d")` pair would. Input is read byte by byte
//! from a [`BufRead`], so anything left on a line stays available for the
//! next read.

use std::io::{self, BufRead};

/// What a single read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Value(i32),
    /// Input is exhausted; the cell keeps its value
    EndOfInput,
    /// Text that is not an integer, for `&`
    Invalid(String),
}

pub struct InputReader<R> {
    inner: R,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_char(&mut self) -> io::Result<ReadOutcome> {
        self.skip_whitespace()?;
        Ok(match self.next_byte()? {
            Some(byte) => ReadOutcome::Value(byte as i32),
            None => ReadOutcome::EndOfInput,
        })
    }

    pub fn read_int(&mut self) -> io::Result<ReadOutcome> {
        self.skip_whitespace()?;

        let mut text = String::new();
        if let Some(sign @ (b'-' | b'+')) = self.peek_byte()? {
            text.push(sign as char);
            self.inner.consume(1);
        }
        while let Some(byte) = self.peek_byte()? {
            if !byte.is_ascii_digit() {
                break;
            }
            text.push(byte as char);
            self.inner.consume(1);
        }

        if text.is_empty() {
            return Ok(match self.peek_byte()? {
                None => ReadOutcome::EndOfInput,
                Some(byte) => ReadOutcome::Invalid(format!(
                    "expected an integer, found '{}'",
                    (byte as char).escape_default()
                )),
            });
        }

        Ok(match text.parse::<i32>() {
            Ok(value) => ReadOutcome::Value(value),
            Err(_) if text == "-" || text == "+" => {
                ReadOutcome::Invalid(format!("expected digits after '{}'", text))
            }
            Err(_) => ReadOutcome::Invalid(format!("integer {} does not fit in a cell", text)),
        })
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(byte) = self.peek_byte()? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.inner.consume(1);
        }
        Ok(())
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_char_skips_whitespace() {
        let mut input = InputReader::new(Cursor::new("  \n\tAb"));
        assert_eq!(input.read_char().unwrap(), ReadOutcome::Value('A' as i32));
        assert_eq!(input.read_char().unwrap(), ReadOutcome::Value('b' as i32));
        assert_eq!(input.read_char().unwrap(), ReadOutcome::EndOfInput);
    }

    #[test]
    fn test_read_int_sequence() {
        let mut input = InputReader::new(Cursor::new("12 -7\n+3"));
        assert_eq!(input.read_int().unwrap(), ReadOutcome::Value(12));
        assert_eq!(input.read_int().unwrap(), ReadOutcome::Value(-7));
        assert_eq!(input.read_int().unwrap(), ReadOutcome::Value(3));
        assert_eq!(input.read_int().unwrap(), ReadOutcome::EndOfInput);
    }

    #[test]
    fn test_read_int_leaves_rest_of_line() {
        let mut input = InputReader::new(Cursor::new("42x"));
        assert_eq!(input.read_int().unwrap(), ReadOutcome::Value(42));
        assert_eq!(input.read_char().unwrap(), ReadOutcome::Value('x' as i32));
    }

    #[test]
    fn test_read_int_rejects_words() {
        let mut input = InputReader::new(Cursor::new("abc"));
        assert!(matches!(input.read_int().unwrap(), ReadOutcome::Invalid(_)));

        let mut input = InputReader::new(Cursor::new("99999999999"));
        assert!(matches!(input.read_int().unwrap(), ReadOutcome::Invalid(_)));
    }
}
