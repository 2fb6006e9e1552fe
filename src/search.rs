//! Text searching.
//!
//! Searching is literal and case-sensitive, and operates on the rendered form of
//! rows so that matches line up with what is shown on the display. A search never
//! wraps around the ends of the document.

use crate::document::Document;
use crate::editor::Cursor;
use std::collections::HashMap;

/// A term-oriented pattern-matching algorithm implemented using the Boyer-Moore
/// algorithm.
pub struct Pattern {
    pattern: Vec<char>,

    /// Bad character shift table maps characters in `pattern` to their rightmost
    /// position.
    bc_shift: HashMap<char, usize>,

    /// Good suffix shift table determines how far to shift based on position in
    /// `pattern`.
    gs_shift: Vec<usize>,
}

/// Represents a pattern match, where the first value is the _starting_ position and
/// the second value is the _ending_ position, exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Match(pub usize, pub usize);

impl Pattern {
    pub fn new(term: &[char]) -> Pattern {
        let pattern = term.to_vec();
        let bc_shift = Self::build_bc_shift(&pattern);
        let gs_shift = Self::build_gs_shift(&pattern);
        Pattern {
            pattern,
            bc_shift,
            gs_shift,
        }
    }

    fn build_bc_shift(pattern: &[char]) -> HashMap<char, usize> {
        let len = pattern.len();
        pattern
            .iter()
            .enumerate()
            .take(len.saturating_sub(1))
            .map(|(i, c)| (*c, i))
            .collect()
    }

    fn build_gs_shift(pattern: &[char]) -> Vec<usize> {
        let len = pattern.len();
        if len > 0 {
            let mut gs_shift = vec![len; len];
            let mut border = vec![0; len + 1];
            border[len] = len + 1;
            let mut i = len;
            let mut j = len + 1;
            while i > 0 {
                while j <= len && pattern[i - 1] != pattern[j - 1] {
                    if gs_shift[j - 1] == len {
                        gs_shift[j - 1] = j - i;
                    }
                    j = border[j];
                }
                i -= 1;
                j -= 1;
                border[i] = j;
            }
            j = border[0];
            for i in 0..len {
                if gs_shift[i] == len {
                    gs_shift[i] = j;
                }
                if i == j {
                    j = border[j];
                }
            }
            gs_shift
        } else {
            vec![]
        }
    }

    /// Returns the first match in `text` that starts at or after `pos`.
    pub fn find(&self, text: &[char], pos: usize) -> Option<Match> {
        let len = self.pattern.len();
        if len > 0 && pos + len <= text.len() {
            // Since Boyer-Moore searches backwards relative to pattern, this is the
            // position in text at which searching should stop, otherwise pattern
            // would extend beyond end of text.
            let stop_pos = text.len() - len;

            let mut pos = pos;
            while pos <= stop_pos {
                // Pattern matching occurs right-to-left, so keep matching characters
                // until pattern is exhausted or mismatch occurs.
                let mut i = len;
                while i > 0 && self.pattern[i - 1] == text[pos + i - 1] {
                    i -= 1;
                }
                if i == 0 {
                    return Some(Match(pos, pos + len));
                } else {
                    let bc = text[pos + i - 1];
                    let bc_shift = if let Some(&p) = self.bc_shift.get(&bc) {
                        // Shift distance must be at least 1.
                        (i - 1).saturating_sub(p).max(1)
                    } else {
                        // Bad character does not exist in pattern, so shift past
                        // remaining characters in pattern.
                        i
                    };
                    let gs_shift = self.gs_shift[i - 1];
                    pos += bc_shift.max(gs_shift);
                }
            }
            None
        } else {
            None
        }
    }

    /// Returns the last match in `text` that starts at or before `pos`.
    pub fn rfind(&self, text: &[char], pos: usize) -> Option<Match> {
        let len = self.pattern.len();
        if len > 0 && len <= text.len() {
            let start = pos.min(text.len() - len);
            (0..=start)
                .rev()
                .find(|&p| text[p..p + len] == self.pattern[..])
                .map(|p| Match(p, p + len))
        } else {
            None
        }
    }
}

/// A match located on a single row, expressed in rendered columns.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Span {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

/// Returns the first match of `query` following the cursor, scanning toward the
/// end of `doc`.
///
/// On the cursor row, only matches starting beyond the rendered column of the
/// cursor are considered, so that repeating a search moves past the current match.
pub fn search_forward(doc: &Document, cursor: &Cursor, query: &[char]) -> Option<Span> {
    let pattern = Pattern::new(query);
    doc.rows()
        .iter()
        .enumerate()
        .skip(cursor.cy)
        .find_map(|(i, row)| {
            let pos = if i == cursor.cy { cursor.rx + 1 } else { 0 };
            pattern
                .find(row.rendered(), pos)
                .map(|Match(start, end)| Span { row: i, start, end })
        })
}

/// Returns the last match of `query` preceding the cursor, scanning toward the
/// start of `doc`.
///
/// On the cursor row, only matches starting before the rendered column of the
/// cursor are considered, and the row is skipped entirely when the cursor is at
/// column `0`.
pub fn search_backward(doc: &Document, cursor: &Cursor, query: &[char]) -> Option<Span> {
    let pattern = Pattern::new(query);
    let rows = doc.rows();
    (0..=cursor.cy.min(rows.len()))
        .rev()
        .filter(|&i| !(i == cursor.cy && cursor.cx == 0))
        .filter_map(|i| rows.get(i).map(|row| (i, row)))
        .find_map(|(i, row)| {
            let pos = if i == cursor.cy {
                cursor.rx.saturating_sub(1)
            } else {
                usize::MAX
            };
            pattern
                .rfind(row.rendered(), pos)
                .map(|Match(start, end)| Span { row: i, start, end })
        })
}
