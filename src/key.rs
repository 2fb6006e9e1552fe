//! Keyboard reader.

use crate::error::Result;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Bytes, Read, Stdin};
use std::str::from_utf8;
use tracing::trace;

/// The set of keys recognized by [`Keyboard`]s.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    None,
    Control(u8),
    Char(char),
    Alt(char),
    Backspace,
    Delete,
    Up(Alt),
    Down(Alt),
    Right(Alt),
    Left(Alt),
    Home,
    End,
    PageUp,
    PageDown,
}

/// Represents the state of the _ALT_ key for arrow [`Key`]s.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Alt {
    Off,
    On,
}

pub const ESC: Key = Key::Control(27);
pub const RET: Key = Key::Control(13);
pub const TAB: Key = Key::Control(9);

impl Key {
    /// Returns the character to insert for this key, which is only possible for
    /// printable ASCII characters.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if (' '..='~').contains(c) => Some(*c),
            _ => None,
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::None => write!(f, "none"),
            Key::Control(27) => write!(f, "esc"),
            Key::Control(13) => write!(f, "ret"),
            Key::Control(9) => write!(f, "tab"),
            Key::Control(b @ 1..=26) => write!(f, "ctrl-{}", (b'a' + b - 1) as char),
            Key::Control(b) => write!(f, "ctrl-{}", (b'@' + (b & 0x1f)) as char),
            Key::Char(' ') => write!(f, "space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Alt(c) => write!(f, "alt-{c}"),
            Key::Backspace => write!(f, "bksp"),
            Key::Delete => write!(f, "del"),
            Key::Up(alt) => write!(f, "{}up", alt_prefix(alt)),
            Key::Down(alt) => write!(f, "{}down", alt_prefix(alt)),
            Key::Right(alt) => write!(f, "{}right", alt_prefix(alt)),
            Key::Left(alt) => write!(f, "{}left", alt_prefix(alt)),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pg_up"),
            Key::PageDown => write!(f, "pg_down"),
        }
    }
}

fn alt_prefix(alt: &Alt) -> &'static str {
    match alt {
        Alt::On => "alt-",
        Alt::Off => "",
    }
}

/// Mapping of key names to [`Key`]s.
///
/// Printable characters stand for themselves and `alt-` followed by a single
/// character is recognized without being listed here, see [`parse`].
pub const KEY_MAPPINGS: [(&str, Key); 49] = [
    ("esc", ESC),
    ("ret", RET),
    ("tab", TAB),
    ("space", Key::Char(' ')),
    ("bksp", Key::Backspace),
    ("del", Key::Delete),
    ("up", Key::Up(Alt::Off)),
    ("down", Key::Down(Alt::Off)),
    ("right", Key::Right(Alt::Off)),
    ("left", Key::Left(Alt::Off)),
    ("alt-up", Key::Up(Alt::On)),
    ("alt-down", Key::Down(Alt::On)),
    ("alt-right", Key::Right(Alt::On)),
    ("alt-left", Key::Left(Alt::On)),
    ("home", Key::Home),
    ("end", Key::End),
    ("pg_up", Key::PageUp),
    ("pg_down", Key::PageDown),
    ("ctrl-@", Key::Control(0)),
    ("ctrl-a", Key::Control(1)),
    ("ctrl-b", Key::Control(2)),
    ("ctrl-c", Key::Control(3)),
    ("ctrl-d", Key::Control(4)),
    ("ctrl-e", Key::Control(5)),
    ("ctrl-f", Key::Control(6)),
    ("ctrl-g", Key::Control(7)),
    ("ctrl-h", Key::Control(8)),
    ("ctrl-i", Key::Control(9)),
    ("ctrl-j", Key::Control(10)),
    ("ctrl-k", Key::Control(11)),
    ("ctrl-l", Key::Control(12)),
    ("ctrl-m", Key::Control(13)),
    ("ctrl-n", Key::Control(14)),
    ("ctrl-o", Key::Control(15)),
    ("ctrl-p", Key::Control(16)),
    ("ctrl-q", Key::Control(17)),
    ("ctrl-r", Key::Control(18)),
    ("ctrl-s", Key::Control(19)),
    ("ctrl-t", Key::Control(20)),
    ("ctrl-u", Key::Control(21)),
    ("ctrl-v", Key::Control(22)),
    ("ctrl-w", Key::Control(23)),
    ("ctrl-x", Key::Control(24)),
    ("ctrl-y", Key::Control(25)),
    ("ctrl-z", Key::Control(26)),
    ("ctrl-\\", Key::Control(28)),
    ("ctrl-]", Key::Control(29)),
    ("ctrl-^", Key::Control(30)),
    ("ctrl-_", Key::Control(31)),
];

pub type KeyMap = HashMap<&'static str, Key>;

pub fn init_key_map() -> KeyMap {
    KEY_MAPPINGS.iter().copied().collect()
}

/// Returns the key corresponding to `name`, which is either a name found in
/// `key_map`, a single printable character, or `alt-` followed by a single printable
/// character.
pub fn parse(name: &str, key_map: &KeyMap) -> Option<Key> {
    fn single(s: &str) -> Option<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if (' '..='~').contains(&c) => Some(c),
            _ => None,
        }
    }

    key_map.get(name).copied().or_else(|| match name.strip_prefix("alt-") {
        Some(suffix) => single(suffix).map(Key::Alt),
        None => single(name).map(Key::Char),
    })
}

/// A source of [`Key`]s.
///
/// A value of [`Key::None`] indicates that no key was available, giving the caller
/// an opportunity to perform other work before asking again.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// A keyboard that reads bytes from the terminal and produces corresponding [`Key`]s.
pub struct Keyboard {
    term: Bytes<Stdin>,
}

impl Keyboard {
    /// Creates a new keyboard reader.
    pub fn new() -> Keyboard {
        Keyboard {
            term: io::stdin().bytes(),
        }
    }

    fn next(&mut self) -> Result<Option<u8>> {
        Ok(self.term.next().transpose()?)
    }

    /// Reads the next key.
    ///
    /// Reads one or more bytes from the underlying terminal and returns the corresponding [`Key`].
    ///
    /// A value of [`Key::None`] will be returned under any of the following conditions:
    ///
    /// - no bytes are available to read after waiting for `1/10` second
    /// - a byte or sequence of bytes is unrecognized
    /// - a byte or sequence of bytes is malformed, such as a `UTF-8` character
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if an I/O error occurred while reading bytes from the underlying terminal.
    pub fn read(&mut self) -> Result<Key> {
        let key = match self.next()? {
            Some(27) => self.read_escape()?,
            Some(b @ 0..=31) => Key::Control(b),
            Some(b @ 32..=126) => Key::Char(b as char),
            Some(127) => Key::Backspace,
            Some(b) => self.read_unicode(b)?,
            None => Key::None,
        };
        if key != Key::None {
            trace!(target: "hed::key", key = %key);
        }
        Ok(key)
    }

    /// Reads a sequence of bytes prefixed with `ESC`.
    ///
    /// In most cases, this reads an ANSI escape sequence. However, it may produce
    /// [`Key::Control(27)`] itself if no further bytes are read, [`Key::Alt`] if a
    /// printable character follows, or [`Key::None`] if the sequence is unrecognized.
    fn read_escape(&mut self) -> Result<Key> {
        let key = match self.next()? {
            Some(27) => self.read_escape()?,
            Some(b'[') => self.read_ansi()?,
            Some(b'O') => match self.next()? {
                Some(b) => map_xterm(b, 1),
                None => Key::Alt('O'),
            },
            Some(b @ 32..=126) => Key::Alt(b as char),
            None => ESC,
            _ => Key::None,
        };
        Ok(key)
    }

    /// Reads a sequence of bytes prefixed with `ESC [`.
    ///
    /// Note that this function will interpret the most common sequences only. If the
    /// sequence is unrecognized or malformed, then [`Key::None`] is returned.
    fn read_ansi(&mut self) -> Result<Key> {
        // Optional key code or key modifier depending on trailing byte, which
        // indicates either VT or xterm sequence.
        let (key_code, next_b) = match self.next()? {
            Some(b @ b'0'..=b'9') => {
                let (n, next_b) = self.read_number(b)?;
                (n.max(1), next_b)
            }
            b => (1, b),
        };

        // Optional key modifier, which is bitmask.
        let (key_mod, next_b) = match next_b {
            Some(b';') => match self.next()? {
                Some(b @ b'0'..=b'9') => {
                    let (n, next_b) = self.read_number(b)?;
                    (n.max(1), next_b)
                }
                b => (1, b),
            },
            b => (1, b),
        };

        let key = match next_b {
            Some(b'~') => map_vt(key_code),
            Some(b) => map_xterm(b, key_mod),
            None => Key::None,
        };
        Ok(key)
    }

    /// Reads a number with a maximum of 2 digits whose first digit is `b`.
    ///
    /// Returns a tuple containing the number itself and the next byte read from the terminal.
    fn read_number(&mut self, b: u8) -> Result<(u8, Option<u8>)> {
        let n = b - b'0';
        let result = match self.next()? {
            Some(b @ b'0'..=b'9') => (n * 10 + (b - b'0'), self.next()?),
            b => (n, b),
        };
        Ok(result)
    }

    /// Reads a `UTF-8` sequence of bytes where `b` if the first byte.
    ///
    /// `UTF-8` encoding is strictly limited to 2-4 bytes, so anything outside this range
    /// is considered malformed, yielding [`Key::None`].
    fn read_unicode(&mut self, b: u8) -> Result<Key> {
        let n = b.leading_ones() as usize;
        let key = if n < 2 || n > 4 {
            Key::None
        } else {
            let mut buf = [0; 4];
            buf[0] = b;
            for i in 1..n {
                if let Some(b) = self.next()? {
                    buf[i] = b;
                } else {
                    // Expected number of bytes not read, so assumed to be malformed.
                    return Ok(Key::None);
                }
            }
            from_utf8(&buf[..n])
                .ok()
                .and_then(|s| s.chars().next())
                .map_or(Key::None, Key::Char)
        };
        Ok(key)
    }
}

impl KeySource for Keyboard {
    fn next_key(&mut self) -> Result<Key> {
        self.read()
    }
}

/// Returns the key corresponding to the VT-style key code, or [`Key::None`] if
/// unrecognized.
fn map_vt(key_code: u8) -> Key {
    match key_code {
        1 | 7 => Key::Home,
        3 => Key::Delete,
        4 | 8 => Key::End,
        5 => Key::PageUp,
        6 => Key::PageDown,
        _ => Key::None,
    }
}

/// Returns the key corresponding to the xterm-style key code and key modifier, or
/// [`Key::None`] if unrecognized.
fn map_xterm(key_code: u8, key_mod: u8) -> Key {
    match (key_code, modifier(key_mod)) {
        (b'A', alt) => Key::Up(alt),
        (b'B', alt) => Key::Down(alt),
        (b'C', alt) => Key::Right(alt),
        (b'D', alt) => Key::Left(alt),
        (b'F', _) => Key::End,
        (b'H', _) => Key::Home,
        _ => Key::None,
    }
}

// Bitmask for the ALT key modifier per ANSI standard.
const MOD_ALT_MASK: u8 = 0x02;

/// Returns the state of the _ALT_ key based on the given bitmask.
fn modifier(key_mod: u8) -> Alt {
    // Per ANSI standard, all key modifiers default to 1, hence the reason for
    // substraction before applying the bitmask.
    if (key_mod - 1) & MOD_ALT_MASK != 0 {
        Alt::On
    } else {
        Alt::Off
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// A key source that replays a fixed sequence of keys, followed by an endless
    /// supply of [`Key::None`].
    pub struct ScriptedKeys {
        keys: Vec<Key>,
    }

    impl ScriptedKeys {
        pub fn new(keys: &[Key]) -> ScriptedKeys {
            let mut keys = keys.to_vec();
            keys.reverse();
            ScriptedKeys { keys }
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self) -> Result<Key> {
            Ok(self.keys.pop().unwrap_or(Key::None))
        }
    }

    #[test]
    fn key_names_round_trip() {
        let key_map = init_key_map();
        for (name, key) in KEY_MAPPINGS {
            assert_eq!(parse(name, &key_map), Some(key));
        }
        // Aliases of control characters display with their preferred names.
        for name in ["esc", "ret", "tab", "bksp", "alt-left", "ctrl-f", "ctrl-_", "pg_up"] {
            assert_eq!(parse(name, &key_map).unwrap().to_string(), name);
        }
    }

    #[test]
    fn parse_single_chars() {
        let key_map = init_key_map();
        assert_eq!(parse("g", &key_map), Some(Key::Char('g')));
        assert_eq!(parse("`", &key_map), Some(Key::Char('`')));
        assert_eq!(parse("alt-m", &key_map), Some(Key::Alt('m')));
        assert_eq!(parse("alt-", &key_map), None);
        assert_eq!(parse("gg", &key_map), None);
        assert_eq!(parse("hyper-x", &key_map), None);
    }

    #[test]
    fn printable_keys() {
        assert_eq!(Key::Char('a').printable(), Some('a'));
        assert_eq!(Key::Char('~').printable(), Some('~'));
        assert_eq!(Key::Char('é').printable(), None);
        assert_eq!(TAB.printable(), None);
        assert_eq!(Key::Alt('a').printable(), None);
    }

    #[test]
    fn modifiers() {
        assert_eq!(map_xterm(b'D', 3), Key::Left(Alt::On));
        assert_eq!(map_xterm(b'C', 1), Key::Right(Alt::Off));
        assert_eq!(map_xterm(b'A', 5), Key::Up(Alt::Off));
        assert_eq!(map_vt(3), Key::Delete);
        assert_eq!(map_vt(2), Key::None);
    }
}
