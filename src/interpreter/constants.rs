// Constants for the feedmei interpreter

/// Cells on the tape unless `--tape-size` says otherwise
pub const DEFAULT_TAPE_CAPACITY: usize = 128;

/// Longest source accepted unless `--source-limit` says otherwise
pub const DEFAULT_SOURCE_LIMIT: usize = 2048;

/// The cell that has to stay fed
pub const DEFAULT_STOMACH_INDEX: usize = 0;

/// Printed on the program's output when the stomach cell goes negative
pub const STARVATION_MESSAGE: &str = "The program died of starvation :(";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_STARVED: i32 = 1;
/// Any script or configuration error
pub const EXIT_ERROR: i32 = 2;
