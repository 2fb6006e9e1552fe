//! A collection of functions related to help.

#![allow(unused_must_use, reason = "infallible calls to write!()")]

use crate::bind::Bindings;
use crate::key::Key;
use crate::mode::Mode;
use crate::op::OP_MAPPINGS;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

/// Returns a formatted list of available editing operations along with their
/// descriptions.
pub fn ops_content() -> String {
    const HEADER_OP: &str = "[Operation]";
    const HEADER_DESC: &str = "[Description]";

    // Calculate maximum width of operation names to align output.
    let ops = prepare_ops();
    let op_width = ops.keys().map(|op| op.len()).max().unwrap_or(HEADER_OP.len());

    let mut out = String::new();
    writeln!(out, "{HEADER_OP:<op_width$}   {HEADER_DESC}");
    for (op, desc) in ops {
        writeln!(out, "{op:<op_width$}   {desc}");
    }
    out
}

fn prepare_ops() -> BTreeMap<&'static str, &'static str> {
    OP_MAPPINGS.iter().map(|(op, _, desc)| (*op, *desc)).collect()
}

/// Returns a TOML-formatted list of key bindings for every mode, which is suitable
/// for inclusion in a configuration file.
pub fn bindings_content(bindings: &Bindings) -> String {
    let mut out = String::new();
    for (n, mode) in Mode::ALL.into_iter().enumerate() {
        if n > 0 {
            writeln!(out);
        }
        writeln!(out, "[bindings.{mode}]");
        for (key_seq, op) in prepare_bindings(&bindings.bindings(mode)) {
            // Debug formatting yields quoted and escaped TOML basic strings.
            writeln!(out, "{key_seq:?} = {op:?}");
        }
    }
    out
}

fn prepare_bindings(bindings: &HashMap<Vec<Key>, String>) -> BTreeMap<String, String> {
    bindings
        .iter()
        .map(|(keys, op)| (key_seq_name(keys), op.to_string()))
        .collect()
}

/// Returns the configuration form of `keys`, in which key names are separated by `:`.
fn key_seq_name(keys: &[Key]) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(":")
}
