//! Basic types representing size and point information on the terminal.

use std::fmt::{self, Display, Formatter};

/// Represents the size of a 2-dimensional space expressed as _rows_ and _columns_.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    /// Creates a size of (`rows`, `cols`).
    pub const fn new(rows: u32, cols: u32) -> Size {
        Size { rows, cols }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rows, self.cols)
    }
}

/// Represent a point in a 2-dimensional space expressed as _row_ and _column_, both
/// of which are `0`-based.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Point {
    pub row: u32,
    pub col: u32,
}

impl Point {
    /// Creates a point of (`row`, `col`).
    pub const fn new(row: u32, col: u32) -> Point {
        Point { row, col }
    }
}
