//! Key bindings.
//!
//! Every [`Mode`] has its own table of key sequences. A key sequence is written as
//! key names separated by `:`, such as `g:g`, where each name is either one of the
//! names in [`KEY_MAPPINGS`](crate::key::KEY_MAPPINGS), a single printable
//! character, or `alt-` followed by a single printable character.

use crate::error::{Error, Result};
use crate::key::{self, Key, KeyMap};
use crate::mode::Mode;
use crate::op::{self, OpFn, OpMap};
use std::collections::{HashMap, HashSet};

/// Map of [`Key`] sequences to editing operations.
type BindMap = HashMap<Vec<Key>, &'static str>;

/// Set of [`Key`] sequence prefixes.
type Prefixes = HashSet<Vec<Key>>;

/// Bindings of a single mode.
#[derive(Default)]
struct Table {
    bind_map: BindMap,
    bind_prefixes: Prefixes,
}

/// A mapping of [`Key`] sequences to editing functions for each [`Mode`].
pub struct Bindings {
    key_map: KeyMap,
    op_map: OpMap,
    tables: HashMap<Mode, Table>,
}

impl Bindings {
    /// Creates the default key bindings.
    pub fn new() -> Bindings {
        let mut this = Bindings {
            key_map: key::init_key_map(),
            op_map: op::init_op_map(),
            tables: Mode::ALL.into_iter().map(|mode| (mode, Table::default())).collect(),
        };

        for (mode, key_seq, op) in Self::DEFAULT_BINDINGS {
            this.bind(mode, key_seq, op).unwrap_or_else(|e| panic!("{e}: default bindings failed"));
        }
        this
    }

    /// Binds the key sequence `key_seq` to the editing operation `op` in `mode`.
    ///
    /// A successful bind will override an existing binding with an identical key
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if either of `key_seq` or `op` do not match the name of
    /// known keys or editing operations, respectively.
    pub fn bind(&mut self, mode: Mode, key_seq: &str, op: &str) -> Result<()> {
        let keys = self.to_keys(key_seq)?;
        let op = self
            .op_map
            .get_key_value(op)
            .map(|(op, _)| *op)
            .ok_or_else(|| Error::invalid_op(op))?;
        let table = self.tables.entry(mode).or_default();
        for n in 1..keys.len() {
            table.bind_prefixes.insert(keys[0..n].to_vec());
        }
        table.bind_map.insert(keys, op);
        Ok(())
    }

    /// Converts the key sequence `key_seq` to a vector of [`Key`]s.
    fn to_keys(&self, key_seq: &str) -> Result<Vec<Key>> {
        key_seq
            .split(':')
            .map(|name| key::parse(name, &self.key_map).ok_or_else(|| Error::invalid_key(name)))
            .collect()
    }

    /// Returns the function pointer bound to `keys` in `mode`, otherwise `None`.
    pub fn find(&self, mode: Mode, keys: &[Key]) -> Option<OpFn> {
        self.tables
            .get(&mode)
            .and_then(|table| table.bind_map.get(keys))
            .and_then(|op| self.op_map.get(op))
            .copied()
    }

    /// Returns `true` if `keys` is a prefix of at least one key sequence bound in
    /// `mode`.
    pub fn is_prefix(&self, mode: Mode, keys: &[Key]) -> bool {
        self.tables
            .get(&mode)
            .is_some_and(|table| table.bind_prefixes.contains(keys))
    }

    /// Returns the key sequences bound in `mode` along with their operations.
    pub fn bindings(&self, mode: Mode) -> HashMap<Vec<Key>, String> {
        self.tables
            .get(&mode)
            .map(|table| {
                table
                    .bind_map
                    .iter()
                    .map(|(keys, op)| (keys.clone(), op.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Default mapping of keys to editing operations.
    const DEFAULT_BINDINGS: [(Mode, &'static str, &'static str); 53] = [
        // --- normal: modes ---
        (Mode::Normal, "i", "enter-insert"),
        (Mode::Normal, "/", "enter-search"),
        (Mode::Normal, "alt-m", "enter-command"),
        // --- normal: navigation ---
        (Mode::Normal, "left", "move-left"),
        (Mode::Normal, "h", "move-left"),
        (Mode::Normal, "right", "move-right"),
        (Mode::Normal, "l", "move-right"),
        (Mode::Normal, "up", "move-up"),
        (Mode::Normal, "k", "move-up"),
        (Mode::Normal, "down", "move-down"),
        (Mode::Normal, "j", "move-down"),
        (Mode::Normal, "o", "move-forward-word"),
        (Mode::Normal, "n", "move-backward-word"),
        (Mode::Normal, "a", "move-start"),
        (Mode::Normal, ";", "move-end"),
        (Mode::Normal, "g:g", "move-top"),
        (Mode::Normal, "G", "move-bottom"),
        (Mode::Normal, "ctrl-r", "move-page-up"),
        (Mode::Normal, "ctrl-f", "move-page-down"),
        // --- normal: editing ---
        (Mode::Normal, "d", "set-mark"),
        (Mode::Normal, "f", "cut"),
        (Mode::Normal, "c", "paste"),
        (Mode::Normal, ",", "open-line-below"),
        (Mode::Normal, "w", "delete-right"),
        // --- normal: search, file and session ---
        (Mode::Normal, "b", "search-next"),
        (Mode::Normal, "B", "search-prev"),
        (Mode::Normal, "alt-s", "save-file"),
        (Mode::Normal, "`", "quit"),
        (Mode::Normal, "bksp", "nop"),
        (Mode::Normal, "ret", "nop"),
        (Mode::Normal, "esc", "nop"),
        // --- insert ---
        (Mode::Insert, "bksp", "delete-left"),
        (Mode::Insert, "ret", "insert-line"),
        (Mode::Insert, "tab", "insert-tab"),
        (Mode::Insert, "left", "move-left"),
        (Mode::Insert, "right", "move-right"),
        (Mode::Insert, "up", "move-up"),
        (Mode::Insert, "down", "move-down"),
        (Mode::Insert, "esc", "enter-normal"),
        // --- command ---
        (Mode::Command, "ret", "prompt-submit"),
        (Mode::Command, "bksp", "prompt-delete-left"),
        (Mode::Command, "ctrl-h", "prompt-move-left"),
        (Mode::Command, "ctrl-l", "prompt-move-right"),
        (Mode::Command, "alt-left", "prompt-move-start"),
        (Mode::Command, "alt-right", "prompt-move-end"),
        (Mode::Command, "esc", "prompt-cancel"),
        // --- search ---
        (Mode::Search, "ret", "prompt-submit"),
        (Mode::Search, "bksp", "prompt-delete-left"),
        (Mode::Search, "ctrl-h", "prompt-move-left"),
        (Mode::Search, "ctrl-l", "prompt-move-right"),
        (Mode::Search, "alt-left", "prompt-move-start"),
        (Mode::Search, "alt-right", "prompt-move-end"),
        (Mode::Search, "esc", "prompt-cancel"),
    ];
}
