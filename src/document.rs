//! The row store.
//!
//! A [`Document`] is an ordered sequence of [`Row`]s together with the file path
//! it is associated with, the syntax selected from that path, and a flag that
//! tracks unsaved changes.
//!
//! All mutations of row content go through the document so that the selected
//! syntax is applied when rows regenerate their derived forms, and so that every
//! change marks the document as dirty.

use crate::error::Result;
use crate::io;
use crate::row::Row;
use crate::syntax::{Registry, Syntax, SyntaxRef};
use tracing::{debug, info};

pub struct Document {
    rows: Vec<Row>,
    dirty: bool,
    path: Option<String>,
    syntax: Option<SyntaxRef>,
}

impl Document {
    /// Returns an empty document with no rows and no path.
    pub fn new() -> Document {
        Document {
            rows: Vec::new(),
            dirty: false,
            path: None,
            syntax: None,
        }
    }

    /// Returns a document containing `lines`, which is not associated with a path.
    pub fn with_lines<T: AsRef<str>>(lines: &[T]) -> Document {
        let mut doc = Document::new();
        for line in lines {
            doc.rows.push(Row::from_text(line.as_ref(), None));
        }
        doc
    }

    /// Loads the file at `path`, selecting a syntax from `registry` based on the
    /// extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the file cannot be read.
    pub fn load(path: &str, registry: &Registry) -> Result<Document> {
        let lines = io::read_file(path)?;
        let mut doc = Document::with_lines(&lines);
        doc.set_path(path, registry);
        doc.dirty = false;
        info!(path, rows = doc.rows.len(), "document loaded");
        Ok(doc)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_deref()
    }

    /// Inserts a new row containing `text` at `at`, returning a reference to the
    /// row, or `None` if `at` is beyond the number of rows.
    pub fn insert(&mut self, at: usize, text: &str) -> Option<&Row> {
        if at > self.rows.len() {
            None
        } else {
            let row = Row::from_text(text, self.syntax.as_deref());
            self.rows.insert(at, row);
            self.dirty = true;
            self.rows.get(at)
        }
    }

    /// Removes the row at `at`, returning its raw text, or `None` if `at` is out of
    /// range.
    pub fn delete(&mut self, at: usize) -> Option<String> {
        if at < self.rows.len() {
            let row = self.rows.remove(at);
            self.dirty = true;
            Some(row.text())
        } else {
            None
        }
    }

    /// Inserts `c` into the row at `row` before raw column `at`.
    pub fn insert_char(&mut self, row: usize, at: usize, c: char) {
        let syntax = self.syntax.as_deref();
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(at, c, syntax);
            self.dirty = true;
        }
    }

    /// Appends `text` to the end of the row at `row`.
    pub fn append(&mut self, row: usize, text: &str) {
        let syntax = self.syntax.as_deref();
        if let Some(r) = self.rows.get_mut(row) {
            let cs = text.chars().collect::<Vec<_>>();
            r.append(&cs, syntax);
            self.dirty = true;
        }
    }

    /// Removes `len` raw characters starting at `at` from the row at `row`, returning
    /// the removed text.
    ///
    /// Returns `None` and leaves the row unchanged if `len` is `0` or the range is
    /// not contained in the row.
    pub fn remove(&mut self, row: usize, at: usize, len: usize) -> Option<String> {
        let syntax = self.syntax.as_deref();
        let removed = self
            .rows
            .get_mut(row)
            .and_then(|r| r.remove(at, len, syntax))
            .map(|cs| cs.iter().collect::<String>());
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Removes all raw characters from `at` to the end of the row at `row`, returning
    /// the removed text, which is empty if nothing was removed.
    pub fn truncate(&mut self, row: usize, at: usize) -> String {
        let len = self.rows.get(row).map_or(0, |r| r.len());
        if at < len {
            self.remove(row, at, len - at).unwrap_or_default()
        } else {
            String::new()
        }
    }

    /// Returns the number of leading tabs in the row at `row`.
    pub fn indent(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.indent())
    }

    /// Replaces the leading tabs in the row at `row` with `indent` tabs.
    pub fn set_indent(&mut self, row: usize, indent: usize) {
        let syntax = self.syntax.as_deref();
        if let Some(r) = self.rows.get_mut(row) {
            r.set_indent(indent, syntax);
            self.dirty = true;
        }
    }

    /// Associates the document with `path` and reselects the syntax from `registry`,
    /// rehighlighting every row.
    pub fn set_path(&mut self, path: &str, registry: &Registry) {
        self.path = Some(path.to_string());
        self.syntax = registry.find_for_path(path);
        debug!(
            path,
            syntax = self.syntax.as_ref().map_or("none", |s| s.name.as_str()),
            "syntax selected"
        );
        let syntax = self.syntax.as_deref();
        for row in self.rows.iter_mut() {
            row.rehighlight(syntax);
        }
    }

    /// Removes trailing whitespace from every row.
    pub fn trim_trailing_whitespace(&mut self) {
        let syntax = self.syntax.as_deref();
        for row in self.rows.iter_mut() {
            if row.trim_end(syntax) {
                self.dirty = true;
            }
        }
    }

    /// Returns the persisted form of the document, in which every row is followed by
    /// a single newline.
    pub fn contents(&self) -> String {
        self.rows.iter().fold(String::new(), |mut out, row| {
            out.push_str(&row.text());
            out.push('\n');
            out
        })
    }

    /// Trims trailing whitespace and writes the document to its path, returning the
    /// number of bytes written, or `None` if the document has no path.
    ///
    /// The document is only marked clean once the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the document could not be written.
    pub fn save(&mut self) -> Option<Result<usize>> {
        self.trim_trailing_whitespace();
        let path = self.path.clone()?;
        let result = io::write_file(&path, &self.contents());
        if let Ok(n) = result {
            self.dirty = false;
            info!(path = %path, bytes = n, "document saved");
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::process;

    fn texts(doc: &Document) -> Vec<String> {
        doc.rows().iter().map(|r| r.text()).collect()
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut doc = Document::with_lines(&["a"]);
        assert!(doc.insert(2, "x").is_none());
        assert!(!doc.is_dirty());
        assert_eq!(doc.insert(1, "b").map(|r| r.text()), Some("b".to_string()));
        assert_eq!(doc.insert(0, "z").map(|r| r.text()), Some("z".to_string()));
        assert_eq!(texts(&doc), vec!["z", "a", "b"]);
        assert!(doc.is_dirty());
    }

    #[test]
    fn delete_returns_text_and_marks_dirty() {
        let mut doc = Document::with_lines(&["foo", "bar"]);
        assert_eq!(doc.delete(1), Some("bar".to_string()));
        assert!(doc.is_dirty());
        assert_eq!(doc.delete(1), None);
        assert_eq!(texts(&doc), vec!["foo"]);
    }

    #[test]
    fn row_edits() {
        let mut doc = Document::with_lines(&["foo"]);
        doc.insert_char(0, 3, '!');
        doc.append(0, "bar");
        assert_eq!(texts(&doc), vec!["foo!bar"]);
        assert_eq!(doc.remove(0, 1, 2), Some("oo".to_string()));
        assert_eq!(doc.remove(0, 4, 2), None);
        assert_eq!(doc.truncate(0, 2), "bar");
        assert_eq!(doc.truncate(0, 2), "");
        assert_eq!(texts(&doc), vec!["f!"]);
    }

    #[test]
    fn set_path_selects_syntax() {
        let registry = Registry::default();
        let mut doc = Document::with_lines(&["int x;"]);
        assert!(doc.syntax().is_none());
        doc.set_path("foo.c", &registry);
        assert_eq!(doc.syntax().map(|s| s.name.as_str()), Some("c"));
        assert_ne!(doc.get(0).unwrap().tags()[0], crate::highlight::Highlight::Normal);

        doc.set_path("foo.txt", &registry);
        assert!(doc.syntax().is_none());
        assert!(doc.get(0).unwrap().tags().iter().all(|t| *t == Default::default()));
    }

    #[test]
    fn contents_terminates_every_row() {
        let doc = Document::with_lines(&["a", "", "b"]);
        assert_eq!(doc.contents(), "a\n\nb\n");
        assert_eq!(Document::new().contents(), "");
    }

    #[test]
    fn save_without_path() {
        let mut doc = Document::with_lines(&["a "]);
        assert!(doc.save().is_none());
    }

    #[test]
    fn save_trims_and_writes() {
        let path = env::temp_dir()
            .join(format!("hed-doc-{}.c", process::id()))
            .display()
            .to_string();
        let registry = Registry::default();
        let mut doc = Document::with_lines(&["int x;  ", "\t", "y"]);
        doc.set_path(&path, &registry);
        doc.insert(3, "z");
        assert!(doc.is_dirty());

        let n = doc.save().unwrap().unwrap();
        assert_eq!(n, 12);
        assert!(!doc.is_dirty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "int x;\n\ny\nz\n");

        let loaded = Document::load(&path, &registry).unwrap();
        assert_eq!(texts(&loaded), vec!["int x;", "", "y", "z"]);
        assert!(!loaded.is_dirty());
        assert_eq!(loaded.syntax().map(|s| s.name.as_str()), Some("c"));
        fs::remove_file(&path).unwrap();
    }
    #[test]
    fn failed_save_stays_dirty() {
        let path = env::temp_dir()
            .join(format!("hed-missing-{}", process::id()))
            .join("x.c")
            .display()
            .to_string();
        let mut doc = Document::with_lines(&["a"]);
        doc.set_path(&path, &Registry::default());
        doc.insert(1, "b");
        assert!(doc.is_dirty());

        assert!(matches!(doc.save(), Some(Err(_))));
        assert!(doc.is_dirty());
        assert_eq!(texts(&doc), vec!["a", "b"]);
    }
}
