//! A single row of text.

use crate::coord;
use crate::highlight::{self, Highlight};
use crate::syntax::Syntax;

/// A row owns its raw characters along with two derived forms: the rendered
/// characters, in which tabs are expanded, and one highlight tag per rendered
/// character.
///
/// Every change to the raw characters regenerates both derived forms together, so
/// `rendered` and `tags` always have the same length and never lag behind `raw`.
#[derive(Debug)]
pub struct Row {
    raw: Vec<char>,
    rendered: Vec<char>,
    tags: Vec<Highlight>,
}

impl Row {
    pub fn new(raw: Vec<char>, syntax: Option<&Syntax>) -> Row {
        let mut this = Row {
            raw,
            rendered: Vec::new(),
            tags: Vec::new(),
        };
        this.update(syntax);
        this
    }

    pub fn from_text(text: &str, syntax: Option<&Syntax>) -> Row {
        Self::new(text.chars().collect(), syntax)
    }

    pub fn raw(&self) -> &[char] {
        &self.raw
    }

    pub fn rendered(&self) -> &[char] {
        &self.rendered
    }

    pub fn tags(&self) -> &[Highlight] {
        &self.tags
    }

    /// Returns the number of raw characters.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    /// Returns the raw characters as a string.
    pub fn text(&self) -> String {
        self.raw.iter().collect()
    }

    /// Returns the rendered column corresponding to raw column `cx`.
    pub fn to_rendered(&self, cx: usize) -> usize {
        coord::raw_to_rendered(&self.raw, cx)
    }

    /// Returns the raw column of the character occupying rendered column `rx`.
    pub fn to_raw(&self, rx: usize) -> usize {
        coord::rendered_to_raw(&self.raw, rx)
    }

    /// Returns the number of leading tab characters.
    pub fn indent(&self) -> usize {
        self.raw.iter().take_while(|&&c| c == '\t').count()
    }

    /// Returns `true` if the row is empty or contains only spaces and tabs.
    pub fn is_blank(&self) -> bool {
        self.raw.iter().all(|&c| c == ' ' || c == '\t')
    }

    /// Inserts `c` at `at`, or at the end of the row if `at` is out of range.
    pub(crate) fn insert(&mut self, at: usize, c: char, syntax: Option<&Syntax>) {
        let at = if at > self.raw.len() {
            self.raw.len()
        } else {
            at
        };
        self.raw.insert(at, c);
        self.update(syntax);
    }

    pub(crate) fn append(&mut self, cs: &[char], syntax: Option<&Syntax>) {
        self.raw.extend_from_slice(cs);
        self.update(syntax);
    }

    /// Removes and returns `len` characters starting at `at`.
    ///
    /// Returns `None` without changing the row if `len` is `0` or the range extends
    /// beyond the end of the row.
    pub(crate) fn remove(
        &mut self,
        at: usize,
        len: usize,
        syntax: Option<&Syntax>,
    ) -> Option<Vec<char>> {
        if len == 0 || at + len > self.raw.len() {
            None
        } else {
            let cs = self.raw.drain(at..at + len).collect();
            self.update(syntax);
            Some(cs)
        }
    }

    /// Replaces the leading tabs with `indent` tabs.
    pub(crate) fn set_indent(&mut self, indent: usize, syntax: Option<&Syntax>) {
        let cur = self.indent();
        self.raw.splice(0..cur, std::iter::repeat_n('\t', indent));
        self.update(syntax);
    }

    /// Removes trailing whitespace, including vertical tabs, returning `true` if the
    /// row changed.
    pub(crate) fn trim_end(&mut self, syntax: Option<&Syntax>) -> bool {
        let len = self
            .raw
            .iter()
            .rposition(|c| !matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c' | '\x0b'))
            .map_or(0, |n| n + 1);
        if len < self.raw.len() {
            self.raw.truncate(len);
            self.update(syntax);
            true
        } else {
            false
        }
    }

    /// Regenerates tags only, which is necessary when the syntax changes.
    pub(crate) fn rehighlight(&mut self, syntax: Option<&Syntax>) {
        self.tags = highlight::highlight(&self.rendered, syntax);
    }

    fn update(&mut self, syntax: Option<&Syntax>) {
        self.rendered = coord::expand(&self.raw);
        self.tags = highlight::highlight(&self.rendered, syntax);
    }
}
