//! Viewport and scrolling.
//!
//! The viewport is the portion of the document visible on the display, defined
//! by a row offset and a column offset into the rendered text. Scrolling keeps the
//! cursor inside the viewport with a fixed margin of rows and columns reserved
//! below and to the right of it.
//!
//! The command line scrolls horizontally on its own, independent of the text.

use crate::size::Size;

pub struct Viewport {
    /// Number of rows available for text.
    rows: usize,

    /// Number of columns available for text and the command line.
    cols: usize,

    /// Number of rows and columns reserved beyond the cursor.
    margin: usize,

    row_off: usize,
    col_off: usize,
    cmd_off: usize,
}

impl Viewport {
    /// Number of rows below the text occupied by the status and command lines.
    const FIXED_LINES: u32 = 2;

    /// Creates a viewport that fits a terminal of `size`, reserving an additional
    /// row when `debug` is `true`.
    pub fn new(size: Size, margin: usize, debug: bool) -> Viewport {
        let mut this = Viewport {
            rows: 0,
            cols: 0,
            margin,
            row_off: 0,
            col_off: 0,
            cmd_off: 0,
        };
        this.resize(size, debug);
        this
    }

    /// Fits the viewport to a terminal of `size` while keeping its offsets.
    pub fn resize(&mut self, size: Size, debug: bool) {
        let fixed = Self::FIXED_LINES + if debug { 1 } else { 0 };
        self.rows = size.rows.saturating_sub(fixed) as usize;
        self.cols = size.cols as usize;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_off(&self) -> usize {
        self.row_off
    }

    pub fn col_off(&self) -> usize {
        self.col_off
    }

    pub fn cmd_off(&self) -> usize {
        self.cmd_off
    }

    /// Adjusts offsets such that rendered column `x` of row `y` is visible and
    /// outside the margin.
    pub fn scroll_to(&mut self, x: usize, y: usize) {
        let rows = self.rows.saturating_sub(self.margin).max(1);
        if y < self.row_off {
            self.row_off = y;
        }
        if y >= self.row_off + rows {
            self.row_off = y - rows + 1;
        }

        let cols = self.cols.saturating_sub(self.margin).max(1);
        if x < self.col_off {
            self.col_off = x;
        }
        if x >= self.col_off + cols {
            self.col_off = x - cols + 1;
        }
    }

    /// Adjusts the command line offset such that column `x` of the command line is
    /// visible, leaving room for the prompt character.
    pub fn scroll_prompt(&mut self, x: usize) {
        let cols = self.cols.saturating_sub(1).max(1);
        if x < self.cmd_off {
            self.cmd_off = x;
        }
        if x >= self.cmd_off + cols {
            self.cmd_off = x - cols + 1;
        }
    }

    pub fn reset_prompt(&mut self) {
        self.cmd_off = 0;
    }
}
