//! Editing modes.

use std::fmt::{self, Display, Formatter};

/// The mode governing how keys are interpreted and how the command line is
/// rendered.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Command,
    Search,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Normal, Mode::Insert, Mode::Command, Mode::Search];

    /// Returns the name used for the mode in configuration and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Command => "command",
            Mode::Search => "search",
        }
    }

    /// Returns the mode whose name is `name`.
    pub fn from_name(name: &str) -> Option<Mode> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// Returns the marker shown in the status line.
    pub fn marker(&self) -> char {
        match self {
            Mode::Normal => 'N',
            Mode::Insert => 'I',
            Mode::Command => 'C',
            Mode::Search => 'S',
        }
    }

    /// Returns `true` if keys are edited into the command line rather than the
    /// document.
    pub fn is_prompt(&self) -> bool {
        matches!(self, Mode::Command | Mode::Search)
    }

    /// Returns the character that precedes the command line in prompt modes.
    pub fn prompt_char(&self) -> Option<char> {
        match self {
            Mode::Command => Some(':'),
            Mode::Search => Some('/'),
            _ => None,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(Mode::from_name("visual"), None);
    }

    #[test]
    fn prompt_modes() {
        assert!(!Mode::Normal.is_prompt());
        assert!(!Mode::Insert.is_prompt());
        assert_eq!(Mode::Command.prompt_char(), Some(':'));
        assert_eq!(Mode::Search.prompt_char(), Some('/'));
        assert_eq!(Mode::Insert.marker(), 'I');
    }
}
