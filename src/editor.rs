//! Editor.
//!
//! An [`Editor`] couples a [`Document`] with a cursor, a mark and a clipboard, and
//! implements the structural edits and cursor motions available to the user.
//!
//! Cursor columns come in two flavors. The raw column `cx` indexes the characters
//! stored in a row, whereas the rendered column `rx` indexes the characters shown
//! on the display once tabs have been expanded. The target column `tx` is the
//! rendered column the cursor was last placed at horizontally, which allows
//! vertical motion to preserve the visual column across rows with different tab
//! layouts.

use crate::clip::Clipboard;
use crate::document::Document;
use tracing::debug;

/// The position of the cursor.
#[derive(Copy, Clone, Default, Debug)]
pub struct Cursor {
    /// Raw column.
    pub cx: usize,

    /// Row index.
    pub cy: usize,

    /// Rendered column derived from `cx`, refreshed by
    /// [`update_rx`](Editor::update_rx).
    pub rx: usize,

    /// Target rendered column used by vertical motion.
    pub tx: usize,
}

/// A saved cursor position that serves as one end of a cut region.
#[derive(Copy, Clone, Default, Debug)]
pub struct Mark {
    pub x: usize,
    pub y: usize,
}

pub struct Editor {
    doc: Document,
    cursor: Cursor,
    mark: Mark,
    clipboard: Clipboard,
}

impl Editor {
    pub fn new(doc: Document, clipboard: Clipboard) -> Editor {
        Editor {
            doc,
            cursor: Cursor::default(),
            mark: Mark::default(),
            clipboard,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn mark(&self) -> &Mark {
        &self.mark
    }

    /// Places the cursor at (`cx`, `cy`) and makes its rendered column the target
    /// column for subsequent vertical motion.
    pub fn set_pos(&mut self, cx: usize, cy: usize) {
        self.cursor.cx = cx;
        self.cursor.cy = cy;
        self.cursor.tx = self.doc.get(cy).map_or(0, |row| row.to_rendered(cx));
    }

    /// Recalculates the rendered column of the cursor.
    pub fn update_rx(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        self.cursor.rx = self.doc.get(cy).map_or(0, |row| row.to_rendered(cx));
    }

    /// Pulls the raw column of the cursor back to the end of its row if it lies
    /// beyond.
    pub fn clamp(&mut self) {
        let len = self.row_len(self.cursor.cy);
        if self.cursor.cx > len {
            self.cursor.cx = len;
        }
    }

    fn row_len(&self, cy: usize) -> usize {
        self.doc.get(cy).map_or(0, |row| row.len())
    }

    fn last_row(&self) -> usize {
        self.doc.row_count().saturating_sub(1)
    }

    /// Materializes a single empty row if the document has none.
    fn ensure_row(&mut self) {
        if self.doc.is_empty() {
            self.doc.insert(0, "");
        }
    }

    /// Inserts `c` at the cursor, or splits the line without autoindent if `c` is
    /// `\n`.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.split_line(false);
        } else {
            self.ensure_row();
            let Cursor { cx, cy, .. } = self.cursor;
            self.doc.insert_char(cy, cx, c);
            self.set_pos(cx + 1, cy);
        }
    }

    /// Splits the cursor row at the cursor and moves to the start of the following
    /// row, optionally indenting that row to match the nearest non-blank row above.
    ///
    /// At column `0` an empty row is inserted above instead, so the cursor stays
    /// with the text of its row.
    pub fn split_line(&mut self, autoindent: bool) {
        self.ensure_row();
        let Cursor { cx, cy, .. } = self.cursor;
        if cx == 0 {
            self.doc.insert(cy, "");
        } else {
            let tail = self.doc.truncate(cy, cx);
            self.doc.insert(cy + 1, &tail);
        }
        self.set_pos(0, cy + 1);
        if autoindent {
            self.autoindent();
        }
    }

    /// Raises the indentation of the cursor row to that of the nearest row above
    /// that is not blank.
    fn autoindent(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        let target = (0..cy)
            .rev()
            .filter_map(|i| self.doc.get(i))
            // rows holding only spaces and tabs carry no indent to copy
            .find(|row| !row.is_blank())
            .map_or(0, |row| row.indent());
        let indent = self.doc.indent(cy);
        if target > indent {
            self.doc.set_indent(cy, target);
            self.set_pos(cx + target - indent, cy);
        }
    }

    /// Deletes the character before the cursor, joining the cursor row onto the
    /// previous row when at column `0`.
    pub fn delete_left(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if cx > 0 {
            self.doc.remove(cy, cx - 1, 1);
            self.set_pos(cx - 1, cy);
        } else if cy > 0 {
            let join_x = self.row_len(cy - 1);
            if let Some(text) = self.doc.delete(cy) {
                self.doc.append(cy - 1, &text);
            }
            self.set_pos(join_x, cy - 1);
        }
    }

    /// Deletes the character under the cursor, joining the next row onto the cursor
    /// row when at the end of the row.
    pub fn delete_right(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if let Some(len) = self.doc.get(cy).map(|row| row.len()) {
            if cx < len {
                self.doc.remove(cy, cx, 1);
            } else if cy < self.last_row() {
                if let Some(text) = self.doc.delete(cy + 1) {
                    self.doc.append(cy, &text);
                }
            }
        }
    }

    pub fn set_mark(&mut self) {
        self.mark = Mark {
            x: self.cursor.cx,
            y: self.cursor.cy,
        };
    }

    /// Cuts the region between the mark and the cursor into the clipboard, leaving
    /// the cursor at the start of the region.
    ///
    /// Returns `false` if the region is empty, in which case nothing changes.
    pub fn cut_region(&mut self) -> bool {
        if self.doc.is_empty() {
            return false;
        }

        // Mark may be stale following edits made after it was set.
        let last = self.last_row();
        let my = self.mark.y.min(last);
        let mark = (my, self.mark.x.min(self.row_len(my)));
        let cursor = (self.cursor.cy, self.cursor.cx);
        let ((sy, sx), (ey, ex)) = if mark < cursor {
            (mark, cursor)
        } else if cursor < mark {
            (cursor, mark)
        } else {
            return false;
        };

        let text = if sx == 0 && sy == 0 && ey == last && ex == self.row_len(last) {
            let mut cut = Vec::new();
            while let Some(text) = self.doc.delete(0) {
                cut.push(text);
            }
            cut.join("\n")
        } else if sy == ey {
            self.doc.remove(sy, sx, ex - sx).unwrap_or_default()
        } else {
            let mut cut = Vec::new();
            let start_deleted = sx == 0;
            if start_deleted {
                cut.push(self.doc.delete(sy).unwrap_or_default());
            } else {
                cut.push(self.doc.truncate(sy, sx));
            }

            // Rows following the start row shift up into this position as they are
            // removed, ending with the end row.
            let next = if start_deleted { sy } else { sy + 1 };
            for _ in sy + 1..ey {
                cut.push(self.doc.delete(next).unwrap_or_default());
            }
            if start_deleted {
                cut.push(self.doc.remove(next, 0, ex).unwrap_or_default());
            } else {
                let tail = self.doc.truncate(next, ex);
                self.doc.append(sy, &tail);
                cut.push(self.doc.delete(next).unwrap_or_default());
            }
            cut.join("\n")
        };

        debug!(start = ?(sy, sx), end = ?(ey, ex), len = text.len(), "region cut");
        self.set_pos(sx, sy);
        self.clipboard.set_text(text);
        true
    }

    /// Inserts the content of the clipboard at the cursor one character at a time,
    /// such that embedded newlines split lines without autoindent.
    pub fn paste(&mut self) {
        let text = self.clipboard.text().to_string();
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Inserts an empty row below the cursor row, moves to it and applies
    /// autoindent.
    pub fn open_line_below(&mut self) {
        self.ensure_row();
        let cy = self.cursor.cy;
        self.doc.insert(cy + 1, "");
        self.set_pos(0, cy + 1);
        self.autoindent();
    }

    /// Moves the cursor to row `cy`, choosing the raw column that occupies the
    /// greater of the target and current rendered columns.
    fn move_vertical(&mut self, cy: usize) {
        if !self.doc.is_empty() {
            self.update_rx();
            self.cursor.cy = cy.min(self.last_row());
            let Cursor { cy, rx, tx, .. } = self.cursor;
            self.cursor.cx = self.doc.get(cy).map_or(0, |row| row.to_raw(tx.max(rx)));
        }
    }

    pub fn move_up(&mut self) {
        self.move_vertical(self.cursor.cy.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.move_vertical(self.cursor.cy + 1);
    }

    pub fn move_left(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if cx > 0 {
            self.set_pos(cx - 1, cy);
        } else if cy > 0 {
            self.set_pos(self.row_len(cy - 1), cy - 1);
        }
    }

    pub fn move_right(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if let Some(len) = self.doc.get(cy).map(|row| row.len()) {
            if cx < len {
                self.set_pos(cx + 1, cy);
            } else if cy < self.last_row() {
                self.set_pos(0, cy + 1);
            }
        }
    }

    pub fn move_start(&mut self) {
        self.set_pos(0, self.cursor.cy);
    }

    pub fn move_end(&mut self) {
        let cy = self.cursor.cy;
        if let Some(len) = self.doc.get(cy).map(|row| row.len()) {
            self.set_pos(len, cy);
        }
    }

    pub fn move_top(&mut self) {
        self.move_vertical(0);
    }

    pub fn move_bottom(&mut self) {
        self.move_vertical(self.last_row());
    }

    /// Moves to the first row of the page starting at `top` and then `rows` rows
    /// further up.
    pub fn move_page_up(&mut self, top: usize, rows: usize) {
        self.move_vertical(top);
        for _ in 0..rows {
            self.move_up();
        }
    }

    /// Moves to the last row of the page starting at `top` and then `rows` rows
    /// further down.
    pub fn move_page_down(&mut self, top: usize, rows: usize) {
        self.move_vertical(top + rows.saturating_sub(1));
        for _ in 0..rows {
            self.move_down();
        }
    }

    /// Returns the character at (`cx`, `cy`), which is `\n` at the end of a row and
    /// `NUL` beyond the last row.
    fn char_at(&self, cx: usize, cy: usize) -> char {
        match self.doc.get(cy) {
            Some(row) => row.raw().get(cx).copied().unwrap_or('\n'),
            None => '\0',
        }
    }

    /// Returns the character preceding the cursor, or `NUL` at the start of the
    /// document.
    fn char_before(&self) -> char {
        let Cursor { cx, cy, .. } = self.cursor;
        if cx > 0 {
            self.char_at(cx - 1, cy)
        } else if cy > 0 {
            self.char_at(self.row_len(cy - 1), cy - 1)
        } else {
            '\0'
        }
    }

    fn at_end(&self) -> bool {
        let Cursor { cx, cy, .. } = self.cursor;
        self.doc.is_empty() || (cy >= self.last_row() && cx >= self.row_len(cy))
    }

    /// Moves forward past non-letters and then past letters.
    pub fn move_forward_word(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        let mut c = self.char_at(cx, cy);
        while !c.is_ascii_alphabetic() && !self.at_end() {
            self.move_right();
            c = self.char_at(self.cursor.cx, self.cursor.cy);
        }
        while c.is_ascii_alphabetic() {
            self.move_right();
            c = self.char_at(self.cursor.cx, self.cursor.cy);
        }
    }

    /// Moves backward past non-letters and then past letters.
    pub fn move_backward_word(&mut self) {
        let mut c = self.char_before();
        while !c.is_ascii_alphabetic() && c != '\0' {
            self.move_left();
            c = self.char_before();
        }
        while c.is_ascii_alphabetic() {
            self.move_left();
            c = self.char_before();
        }
    }
}
