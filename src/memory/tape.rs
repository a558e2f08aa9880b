//! The tape: a bounded row of signed cells
//!
//! [`Tape`] owns the cells of one script run together with the two indices
//! that address them:
//! - the *current* index, moved by `<` / `>` and used by every arithmetic
//!   and I/O instruction
//! - the *stomach* index, fixed for the whole run, whose cell must never go
//!   negative
//!
//! All access is bounds-checked. Failures carry only the offending index;
//! the interpreter attaches the source location.

use std::fmt;

/// An index fell outside `0..capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOutOfRange {
    pub index: i64,
    pub capacity: usize,
}

impl fmt::Display for CellOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell {} is outside the tape (0..{})",
            self.index, self.capacity
        )
    }
}

impl std::error::Error for CellOutOfRange {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<i32>,
    current: usize,
    stomach: usize,
}

impl Tape {
    /// Create a zero-filled tape.
    ///
    /// Fails if `capacity` is zero or the stomach index does not address a cell.
    pub fn new(capacity: usize, stomach: usize) -> Result<Self, CellOutOfRange> {
        if stomach >= capacity {
            return Err(CellOutOfRange {
                index: stomach as i64,
                capacity,
            });
        }
        Ok(Self {
            cells: vec![0; capacity],
            current: 0,
            stomach,
        })
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn stomach_index(&self) -> usize {
        self.stomach
    }

    /// Move the current index by `delta` cells (negative moves left).
    pub fn move_by(&mut self, delta: i64) -> Result<(), CellOutOfRange> {
        let target = self.current as i64 + delta;
        self.check(target)?;
        self.current = target as usize;
        Ok(())
    }

    pub fn current(&self) -> i32 {
        self.cells[self.current]
    }

    pub fn set_current(&mut self, value: i32) {
        self.cells[self.current] = value;
    }

    /// Read the cell at an absolute index.
    pub fn get(&self, index: usize) -> Result<i32, CellOutOfRange> {
        self.cells.get(index).copied().ok_or(CellOutOfRange {
            index: index as i64,
            capacity: self.cells.len(),
        })
    }

    pub fn stomach(&self) -> i32 {
        self.cells[self.stomach]
    }

    /// Take one unit of food from the stomach cell.
    pub fn feed_on_stomach(&mut self) {
        let cell = &mut self.cells[self.stomach];
        *cell = cell.saturating_sub(1);
    }

    /// A negative stomach cell ends the program.
    pub fn is_starving(&self) -> bool {
        self.stomach() < 0
    }

    fn check(&self, index: i64) -> Result<(), CellOutOfRange> {
        if index < 0 || index >= self.cells.len() as i64 {
            return Err(CellOutOfRange {
                index,
                capacity: self.cells.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tape_is_zeroed() {
        let tape = Tape::new(8, 0).unwrap();
        assert_eq!(tape.cells(), &[0; 8]);
        assert_eq!(tape.current_index(), 0);
        assert!(!tape.is_starving());
    }

    #[test]
    fn test_stomach_must_be_on_tape() {
        assert_eq!(
            Tape::new(4, 4),
            Err(CellOutOfRange {
                index: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_move_bounds() {
        let mut tape = Tape::new(4, 0).unwrap();
        tape.move_by(3).unwrap();
        assert_eq!(tape.current_index(), 3);
        assert_eq!(
            tape.move_by(1),
            Err(CellOutOfRange {
                index: 4,
                capacity: 4
            })
        );
        assert_eq!(tape.current_index(), 3);
        assert!(tape.move_by(-4).is_err());
        tape.move_by(-3).unwrap();
        assert_eq!(tape.current_index(), 0);
    }

    #[test]
    fn test_starvation_tracks_stomach_cell_only() {
        let mut tape = Tape::new(4, 2).unwrap();
        tape.set_current(-5);
        assert!(!tape.is_starving());
        tape.feed_on_stomach();
        assert_eq!(tape.get(2), Ok(-1));
        assert!(tape.is_starving());
    }
}
