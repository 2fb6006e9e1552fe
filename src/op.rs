//! Editing operations.
//!
//! A collection of functions intended to be associated with canonical names of
//! editing operations. These functions serve as the glue between a sequence of
//! [`Key`](crate::key::Key)s and its respective action in the context of the
//! editing experience.
//!
//! See [`Bindings`](crate::bind::Bindings) for further details on binding keys at
//! runtime.

use crate::env::Environment;
use crate::mode::Mode;
use std::collections::HashMap;

/// A function type that implements an editing operation.
pub type OpFn = fn(&mut Environment) -> Option<Action>;

/// Map of editing operation names to editing functions.
pub type OpMap = HashMap<&'static str, OpFn>;

/// An action returned by an [`OpFn`] that is meant to be carried out by the
/// controller orchestrating calls to such functions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Action {
    /// Terminate the editing session.
    Quit,

    /// Keep the quit countdown and search highlight as they are, which is the case
    /// for exit attempts and for steps taken while searching or entering commands.
    Hold,
}

impl Action {
    pub fn quit() -> Option<Action> {
        Some(Action::Quit)
    }

    pub fn hold() -> Option<Action> {
        Some(Action::Hold)
    }
}

/// Operation: `enter-insert`
fn enter_insert(env: &mut Environment) -> Option<Action> {
    env.set_mode(Mode::Insert);
    None
}

/// Operation: `enter-normal`
fn enter_normal(env: &mut Environment) -> Option<Action> {
    env.set_mode(Mode::Normal);
    None
}

/// Operation: `enter-command`
fn enter_command(env: &mut Environment) -> Option<Action> {
    env.set_mode(Mode::Command);
    None
}

/// Operation: `enter-search`
fn enter_search(env: &mut Environment) -> Option<Action> {
    env.set_mode(Mode::Search);
    None
}

/// Operation: `move-left`
fn move_left(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_left();
    None
}

/// Operation: `move-right`
fn move_right(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_right();
    None
}

/// Operation: `move-up`
fn move_up(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_up();
    None
}

/// Operation: `move-down`
fn move_down(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_down();
    None
}

/// Operation: `move-start`
fn move_start(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_start();
    None
}

/// Operation: `move-end`
fn move_end(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_end();
    None
}

/// Operation: `move-top`
fn move_top(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_top();
    None
}

/// Operation: `move-bottom`
fn move_bottom(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_bottom();
    None
}

/// Operation: `move-page-up`
fn move_page_up(env: &mut Environment) -> Option<Action> {
    let (top, rows) = (env.viewport().row_off(), env.viewport().rows());
    env.editor_mut().move_page_up(top, rows);
    None
}

/// Operation: `move-page-down`
fn move_page_down(env: &mut Environment) -> Option<Action> {
    let (top, rows) = (env.viewport().row_off(), env.viewport().rows());
    env.editor_mut().move_page_down(top, rows);
    None
}

/// Operation: `move-forward-word`
fn move_forward_word(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_forward_word();
    None
}

/// Operation: `move-backward-word`
fn move_backward_word(env: &mut Environment) -> Option<Action> {
    env.editor_mut().move_backward_word();
    None
}

/// Operation: `set-mark`
fn set_mark(env: &mut Environment) -> Option<Action> {
    env.editor_mut().set_mark();
    None
}

/// Operation: `cut`
fn cut(env: &mut Environment) -> Option<Action> {
    env.editor_mut().cut_region();
    None
}

/// Operation: `paste`
fn paste(env: &mut Environment) -> Option<Action> {
    env.editor_mut().paste();
    None
}

/// Operation: `open-line-below`
fn open_line_below(env: &mut Environment) -> Option<Action> {
    env.editor_mut().open_line_below();
    env.set_mode(Mode::Insert);
    None
}

/// Operation: `insert-line`
fn insert_line(env: &mut Environment) -> Option<Action> {
    env.editor_mut().split_line(true);
    None
}

/// Operation: `insert-tab`
fn insert_tab(env: &mut Environment) -> Option<Action> {
    env.editor_mut().insert_char('\t');
    None
}

/// Operation: `delete-left`
fn delete_left(env: &mut Environment) -> Option<Action> {
    env.editor_mut().delete_left();
    None
}

/// Operation: `delete-right`
fn delete_right(env: &mut Environment) -> Option<Action> {
    env.editor_mut().delete_right();
    None
}

/// Operation: `search-next`
fn search_next(env: &mut Environment) -> Option<Action> {
    env.repeat_search(true);
    Action::hold()
}

/// Operation: `search-prev`
fn search_prev(env: &mut Environment) -> Option<Action> {
    env.repeat_search(false);
    Action::hold()
}

/// Operation: `save-file`
fn save_file(env: &mut Environment) -> Option<Action> {
    env.save();
    None
}

/// Operation: `quit`
fn quit(env: &mut Environment) -> Option<Action> {
    env.quit()
}

/// Operation: `nop`
fn nop(_: &mut Environment) -> Option<Action> {
    None
}

/// Operation: `prompt-submit`
fn prompt_submit(env: &mut Environment) -> Option<Action> {
    env.submit_prompt()
}

/// Operation: `prompt-cancel`
fn prompt_cancel(env: &mut Environment) -> Option<Action> {
    env.set_mode(Mode::Normal);
    None
}

/// Operation: `prompt-delete-left`
fn prompt_delete_left(env: &mut Environment) -> Option<Action> {
    env.prompt_delete_left();
    Action::hold()
}

/// Operation: `prompt-move-left`
fn prompt_move_left(env: &mut Environment) -> Option<Action> {
    env.prompt_mut().move_left();
    Action::hold()
}

/// Operation: `prompt-move-right`
fn prompt_move_right(env: &mut Environment) -> Option<Action> {
    env.prompt_mut().move_right();
    Action::hold()
}

/// Operation: `prompt-move-start`
fn prompt_move_start(env: &mut Environment) -> Option<Action> {
    env.prompt_mut().move_start();
    Action::hold()
}

/// Operation: `prompt-move-end`
fn prompt_move_end(env: &mut Environment) -> Option<Action> {
    env.prompt_mut().move_end();
    Action::hold()
}

/// Predefined mapping of editing operations to editing functions.
pub const OP_MAPPINGS: [(&str, OpFn, &str); 36] = [
    // --- modes ---
    ("enter-insert", enter_insert, "switch to insert mode"),
    ("enter-normal", enter_normal, "switch to normal mode"),
    ("enter-command", enter_command, "switch to command mode"),
    ("enter-search", enter_search, "switch to search mode"),
    // --- navigation ---
    ("move-left", move_left, "move cursor left one character"),
    ("move-right", move_right, "move cursor right one character"),
    ("move-up", move_up, "move cursor up one row"),
    ("move-down", move_down, "move cursor down one row"),
    ("move-start", move_start, "move cursor to start of row"),
    ("move-end", move_end, "move cursor to end of row"),
    ("move-top", move_top, "move cursor to first row"),
    ("move-bottom", move_bottom, "move cursor to last row"),
    ("move-page-up", move_page_up, "move cursor up one page"),
    ("move-page-down", move_page_down, "move cursor down one page"),
    ("move-forward-word", move_forward_word, "move cursor to end of next word"),
    ("move-backward-word", move_backward_word, "move cursor to start of previous word"),
    // --- editing ---
    ("set-mark", set_mark, "set mark at cursor"),
    ("cut", cut, "cut text between mark and cursor"),
    ("paste", paste, "insert clipboard text at cursor"),
    ("open-line-below", open_line_below, "open row below cursor and switch to insert mode"),
    ("insert-line", insert_line, "split row at cursor with autoindent"),
    ("insert-tab", insert_tab, "insert tab at cursor"),
    ("delete-left", delete_left, "delete character before cursor"),
    ("delete-right", delete_right, "delete character at cursor"),
    // --- search ---
    ("search-next", search_next, "repeat previous search forward"),
    ("search-prev", search_prev, "repeat previous search backward"),
    // --- file and session ---
    ("save-file", save_file, "save document"),
    ("quit", quit, "exit editor, confirming unsaved changes"),
    ("nop", nop, "do nothing"),
    // --- command line ---
    ("prompt-submit", prompt_submit, "run command or search"),
    ("prompt-cancel", prompt_cancel, "discard command line and switch to normal mode"),
    ("prompt-delete-left", prompt_delete_left, "delete character before command cursor"),
    ("prompt-move-left", prompt_move_left, "move command cursor left"),
    ("prompt-move-right", prompt_move_right, "move command cursor right"),
    ("prompt-move-start", prompt_move_start, "move command cursor to start"),
    ("prompt-move-end", prompt_move_end, "move command cursor to end"),
];

pub fn init_op_map() -> OpMap {
    let mut op_map = OpMap::new();
    for (op, op_fn, _) in OP_MAPPINGS {
        op_map.insert(op, op_fn);
    }
    op_map
}
