//! Text colors.

// colors follow the ANSI 8-bit standard. see article on Wikipedia.
// https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit

/// A pair of foreground and background colors.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Color {
    pub fg: u8,
    pub bg: u8,
}

impl Color {
    pub fn new(fg: u8, bg: u8) -> Color {
        Color { fg, bg }
    }
}

// predefined colors

pub const BLACK: u8 = 0;
pub const RED: u8 = 1;
pub const GREEN: u8 = 2;
pub const YELLOW: u8 = 3;
pub const BLUE: u8 = 4;
pub const MAGENTA: u8 = 5;
pub const WHITE: u8 = 7;
