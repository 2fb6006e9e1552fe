//! Editing environment.
//!
//! The [`Environment`] is the single owner of all state mutated in response to
//! keys: the editor and its document, the current mode, the command line, the
//! transient echo message, the viewport, and the search highlight. Editing
//! operations receive it by mutable reference, and rendering reads it between
//! keys.

use crate::command::{self, Command};
use crate::config::ConfigurationRef;
use crate::editor::Editor;
use crate::mode::Mode;
use crate::op::Action;
use crate::prompt::Prompt;
use crate::search::{self, Span};
use crate::size::Size;
use crate::viewport::Viewport;
use tracing::{debug, info, warn};

/// A transient message shown on the command line until the next render.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Echo {
    Info(String),
    Error(String),
}

pub struct Environment {
    config: ConfigurationRef,
    editor: Editor,
    mode: Mode,
    prompt: Prompt,
    echo: Option<Echo>,
    viewport: Viewport,

    /// Highlighted match of the most recent search step.
    span: Option<Span>,

    /// Query submitted by the most recent search, used when repeating a search.
    last_search: Vec<char>,

    /// Number of quit attempts still to be refused while the document is dirty.
    quit_count: u32,
}

impl Environment {
    const HELP_TEXT: &str = "HELP: alt-s save, ` quit";

    /// Creates an environment in normal mode for `editor` that fits a terminal of
    /// `size`.
    pub fn new(editor: Editor, size: Size, config: ConfigurationRef) -> Environment {
        let viewport = Viewport::new(size, config.settings.scroll_margin, config.settings.debug);
        let quit_count = config.settings.quit_presses;
        Environment {
            config,
            editor,
            mode: Mode::Normal,
            prompt: Prompt::new(),
            echo: Some(Echo::Info(Self::HELP_TEXT.to_string())),
            viewport,
            span: None,
            last_search: Vec::new(),
            quit_count,
        }
    }

    pub fn config(&self) -> &ConfigurationRef {
        &self.config
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut Prompt {
        &mut self.prompt
    }

    pub fn echo(&self) -> Option<&Echo> {
        self.echo.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    /// Switches to `mode`, clearing the command line when entering command or
    /// search mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode.is_prompt() {
            self.prompt.clear();
            self.viewport.reset_prompt();
        }
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "mode changed");
        }
        self.mode = mode;
    }

    /// Sets an informational echo message.
    ///
    /// Messages are dropped while the command line is being edited, as the command
    /// line shows the buffer instead.
    pub fn set_info<T: ToString + ?Sized>(&mut self, text: &T) {
        if !self.mode.is_prompt() {
            self.echo = Some(Echo::Info(text.to_string()));
        }
    }

    /// Sets an error echo message, subject to the same rules as
    /// [`set_info`](Self::set_info).
    pub fn set_error<T: ToString + ?Sized>(&mut self, text: &T) {
        if !self.mode.is_prompt() {
            self.echo = Some(Echo::Error(text.to_string()));
        }
    }

    pub fn clear_echo(&mut self) {
        self.echo = None;
    }

    /// Fits the viewport to a terminal of `size`.
    pub fn resize(&mut self, size: Size) {
        debug!(size = %size, "terminal resized");
        self.viewport.resize(size, self.config.settings.debug);
    }

    /// Attempts to exit, which is refused while the document has unsaved changes
    /// until the quit key has been pressed enough times in succession.
    pub fn quit(&mut self) -> Option<Action> {
        if self.editor.doc().is_dirty() && self.quit_count > 0 {
            let text = format!(
                "file has unsaved changes: press ` {} more times to quit",
                self.quit_count
            );
            self.set_error(&text);
            self.quit_count -= 1;
            Action::hold()
        } else {
            Action::quit()
        }
    }

    /// Saves the document, echoing the outcome.
    pub fn save(&mut self) {
        match self.editor.doc_mut().save() {
            None => self.set_error("no filename"),
            Some(Ok(n)) => self.set_info(&format!("{n} bytes written")),
            Some(Err(e)) => {
                warn!(error = %e, "save failed");
                self.set_error(&e);
            }
        }
    }

    /// Searches for `query` in the given direction starting from the cursor.
    ///
    /// A match becomes the highlighted span and is scrolled into view. The cursor
    /// moves to the start of the match only if `move_cursor` is `true`. An empty
    /// query clears the highlight without searching.
    fn search(&mut self, query: &[char], forward: bool, move_cursor: bool) {
        if query.is_empty() {
            self.span = None;
            return;
        }

        self.editor.update_rx();
        let doc = self.editor.doc();
        let cursor = self.editor.cursor();
        let found = if forward {
            search::search_forward(doc, cursor, query)
        } else {
            search::search_backward(doc, cursor, query)
        };

        if let Some(span) = found {
            if move_cursor {
                let cx = doc.get(span.row).map_or(0, |row| row.to_raw(span.start));
                self.editor.set_pos(cx, span.row);
            }
            self.viewport.scroll_to(span.end, span.row);
            self.span = Some(span);
        } else {
            self.span = None;
            if forward {
                self.set_error("search reached end of document");
            } else {
                self.set_error("search reached start of document");
            }
        }
    }

    /// Repeats the most recently submitted search in the given direction.
    pub fn repeat_search(&mut self, forward: bool) {
        if self.last_search.is_empty() {
            self.set_error("empty previous search");
        } else {
            let query = self.last_search.clone();
            self.search(&query, forward, true);
        }
    }

    /// Inserts `c` into the command line, searching incrementally in search mode.
    pub fn prompt_insert(&mut self, c: char) {
        self.prompt.insert(c);
        self.search_incremental();
    }

    /// Deletes the character before the command cursor, returning to normal mode
    /// if the command line is already empty.
    pub fn prompt_delete_left(&mut self) {
        if !self.prompt.delete_left() && self.prompt.is_empty() {
            self.set_mode(Mode::Normal);
        }
        self.search_incremental();
    }

    fn search_incremental(&mut self) {
        if self.mode == Mode::Search {
            let query = self.prompt.buf().to_vec();
            self.search(&query, true, false);
        }
    }

    /// Returns to normal mode and interprets the command line as a command or a
    /// search query, depending on the mode it was entered in.
    pub fn submit_prompt(&mut self) -> Option<Action> {
        let mode = self.mode;
        let text = self.prompt.text();
        self.set_mode(Mode::Normal);
        match mode {
            Mode::Command => self.execute(&text),
            Mode::Search => {
                self.last_search = text.chars().collect();
                let query = self.last_search.clone();
                self.search(&query, true, true);
                Action::hold()
            }
            _ => None,
        }
    }

    fn execute(&mut self, text: &str) -> Option<Action> {
        match command::parse(text) {
            Ok(Command::Quit) => self.quit(),
            Ok(Command::Path(path)) => {
                info!(path = %path, "path changed");
                let registry = &self.config.registry;
                self.editor.doc_mut().set_path(&path, registry);
                Action::hold()
            }
            Err(text) => {
                self.set_error(&text);
                Action::hold()
            }
        }
    }

    /// Completes the handling of a key, where `action` is the outcome of the
    /// operation, if any.
    ///
    /// Unless the operation asked to hold state, the quit countdown is restarted and
    /// the search highlight is removed.
    pub fn after_action(&mut self, action: Option<Action>) {
        self.editor.clamp();
        if action != Some(Action::Hold) {
            self.quit_count = self.config.settings.quit_presses;
            self.span = None;
        }
    }

    /// Brings the viewport in line with the cursor prior to rendering.
    ///
    /// The text viewport only follows the cursor outside of command and search
    /// modes, whereas the command line always follows its own cursor.
    pub fn prepare_render(&mut self) {
        if !self.mode.is_prompt() {
            self.editor.update_rx();
            let cursor = self.editor.cursor();
            let (rx, cy) = (cursor.rx, cursor.cy);
            self.viewport.scroll_to(rx, cy);
        }
        self.viewport.scroll_prompt(self.prompt.pos());
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::clip::Clipboard;
    use crate::config::Configuration;
    use crate::document::Document;

    pub fn env_with(lines: &[&str]) -> Environment {
        let editor = Editor::new(Document::with_lines(lines), Clipboard::new(false));
        Environment::new(editor, Size::new(24, 80), Configuration::default().to_ref())
    }

    fn type_prompt(env: &mut Environment, text: &str) {
        for c in text.chars() {
            env.prompt_insert(c);
        }
    }

    #[test]
    fn initial_state() {
        let env = env_with(&[]);
        assert_eq!(env.mode(), Mode::Normal);
        assert_eq!(env.echo(), Some(&Echo::Info("HELP: alt-s save, ` quit".to_string())));
        assert_eq!(env.viewport().rows(), 22);
    }

    #[test]
    fn quit_clean_document() {
        let mut env = env_with(&["foo"]);
        assert_eq!(env.quit(), Some(Action::Quit));
    }

    #[test]
    fn quit_dirty_document_needs_confirmation() {
        let mut env = env_with(&["foo"]);
        env.editor_mut().insert_char('x');

        let action = env.quit();
        assert_eq!(action, Some(Action::Hold));
        assert_eq!(
            env.echo(),
            Some(&Echo::Error("file has unsaved changes: press ` 2 more times to quit".to_string()))
        );
        env.after_action(action);

        let action = env.quit();
        assert_eq!(action, Some(Action::Hold));
        assert_eq!(
            env.echo(),
            Some(&Echo::Error("file has unsaved changes: press ` 1 more times to quit".to_string()))
        );
        env.after_action(action);
        assert_eq!(env.quit(), Some(Action::Quit));
    }

    #[test]
    fn other_actions_restart_quit_countdown() {
        let mut env = env_with(&["foo"]);
        env.editor_mut().insert_char('x');
        let action = env.quit();
        env.after_action(action);
        env.after_action(None);
        env.quit();
        assert_eq!(
            env.echo(),
            Some(&Echo::Error("file has unsaved changes: press ` 2 more times to quit".to_string()))
        );
    }

    #[test]
    fn save_without_path() {
        let mut env = env_with(&["foo"]);
        env.save();
        assert_eq!(env.echo(), Some(&Echo::Error("no filename".to_string())));
    }

    #[test]
    fn failed_save_echoes_error() {
        let path = std::env::temp_dir()
            .join(format!("hed-missing-env-{}", std::process::id()))
            .join("x.c");
        let mut env = env_with(&["foo"]);
        env.set_mode(Mode::Command);
        type_prompt(&mut env, &format!("path {}", path.display()));
        env.submit_prompt();
        env.editor_mut().insert_char('x');
        env.save();
        assert!(matches!(env.echo(), Some(Echo::Error(_))));
        assert!(env.editor().doc().is_dirty());
    }

    #[test]
    fn entering_prompt_clears_it() {
        let mut env = env_with(&["foo"]);
        env.set_mode(Mode::Command);
        type_prompt(&mut env, "abc");
        env.set_mode(Mode::Normal);
        env.set_mode(Mode::Search);
        assert!(env.prompt().is_empty());
        assert_eq!(env.prompt().pos(), 0);
    }

    #[test]
    fn incremental_search_leaves_cursor() {
        let mut env = env_with(&["foobar", "barbaz"]);
        env.set_mode(Mode::Search);
        type_prompt(&mut env, "baz");
        assert_eq!(env.span(), Some(&Span { row: 1, start: 3, end: 6 }));
        assert_eq!(env.editor().cursor().cy, 0);

        // Failure is not echoed while the command line is shown.
        env.prompt_insert('!');
        assert!(env.span().is_none());
        assert_eq!(env.echo().cloned(), Some(Echo::Info(Environment::HELP_TEXT.to_string())));
    }

    #[test]
    fn submitted_search_moves_cursor_and_repeats() {
        let mut env = env_with(&["foobar", "barbaz"]);
        env.set_mode(Mode::Search);
        type_prompt(&mut env, "bar");
        let action = env.submit_prompt();
        assert_eq!(action, Some(Action::Hold));
        assert_eq!(env.mode(), Mode::Normal);
        assert_eq!(env.span(), Some(&Span { row: 0, start: 3, end: 6 }));
        assert_eq!(env.editor().cursor().cx, 3);
        env.after_action(action);
        assert!(env.span().is_some());

        env.repeat_search(true);
        assert_eq!(env.span(), Some(&Span { row: 1, start: 0, end: 3 }));
        assert_eq!((env.editor().cursor().cx, env.editor().cursor().cy), (0, 1));

        env.repeat_search(true);
        assert!(env.span().is_none());
        assert_eq!(env.echo(), Some(&Echo::Error("search reached end of document".to_string())));

        env.repeat_search(false);
        assert_eq!(env.span(), Some(&Span { row: 0, start: 3, end: 6 }));
    }

    #[test]
    fn repeat_without_previous_search() {
        let mut env = env_with(&["foo"]);
        env.repeat_search(false);
        assert_eq!(env.echo(), Some(&Echo::Error("empty previous search".to_string())));
    }

    #[test]
    fn after_action_resets_highlight() {
        let mut env = env_with(&["foobar"]);
        env.set_mode(Mode::Search);
        type_prompt(&mut env, "bar");
        env.after_action(Some(Action::Hold));
        assert!(env.span().is_some());
        env.after_action(None);
        assert!(env.span().is_none());
    }

    #[test]
    fn backspace_on_empty_prompt_returns_to_normal() {
        let mut env = env_with(&["foo"]);
        env.set_mode(Mode::Command);
        env.prompt_insert('q');
        env.prompt_delete_left();
        assert_eq!(env.mode(), Mode::Command);
        env.prompt_delete_left();
        assert_eq!(env.mode(), Mode::Normal);
    }

    #[test]
    fn commands() {
        let mut env = env_with(&["int x;"]);
        env.set_mode(Mode::Command);
        type_prompt(&mut env, "path foo.c");
        assert_eq!(env.submit_prompt(), Some(Action::Hold));
        assert_eq!(env.editor().doc().path(), Some("foo.c"));
        assert_eq!(env.editor().doc().syntax().map(|s| s.name.as_str()), Some("c"));

        env.set_mode(Mode::Command);
        type_prompt(&mut env, "fly");
        env.submit_prompt();
        assert_eq!(env.echo(), Some(&Echo::Error("unknown command 'fly'".to_string())));

        env.set_mode(Mode::Command);
        type_prompt(&mut env, "quit");
        assert_eq!(env.submit_prompt(), Some(Action::Quit));
    }

    #[test]
    fn prepare_render_follows_cursor() {
        let lines = (0..100).map(|n| n.to_string()).collect::<Vec<_>>();
        let lines = lines.iter().map(|s| s.as_str()).collect::<Vec<_>>();
        let mut env = env_with(&lines);
        env.editor_mut().move_bottom();
        env.prepare_render();
        // 22 text rows less a margin of 5 leaves 17 rows above the cursor row.
        assert_eq!(env.viewport().row_off(), 99 - 17 + 1);
    }
}
