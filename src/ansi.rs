//! A collection of functions that produce ANSI control sequences used in the
//! rendering of terminal output.
//!
//! Of particular note, ANSI sequences related to cursor positioning are `1`-based,
//! so functions in this module that accept *row* and *column* are presumed to be
//! `0`-based and silently add `1` to values.

use crate::color::Color;
use crate::size::Point;

pub fn enter_alt_screen() -> &'static str {
    "\x1b[?1049h"
}

pub fn exit_alt_screen() -> &'static str {
    "\x1b[?1049l"
}

pub fn clear_screen() -> &'static str {
    "\x1b[2J\x1b[H"
}

pub fn show_cursor() -> &'static str {
    "\x1b[?25h"
}

pub fn hide_cursor() -> &'static str {
    "\x1b[?25l"
}

pub fn home() -> &'static str {
    "\x1b[H"
}

pub fn set_cursor(p: Point) -> String {
    format!("\x1b[{};{}H", p.row + 1, p.col + 1)
}

pub fn set_color_fg(fg: u8) -> String {
    format!("\x1b[38;5;{fg}m")
}

pub fn set_color_bg(bg: u8) -> String {
    format!("\x1b[48;5;{bg}m")
}

pub fn default_fg() -> &'static str {
    "\x1b[39m"
}

pub fn default_bg() -> &'static str {
    "\x1b[49m"
}

/// Sets bold text in `color`.
pub fn set_style(color: Color) -> String {
    format!("\x1b[1;38;5;{};48;5;{}m", color.fg, color.bg)
}

pub fn inverse() -> &'static str {
    "\x1b[7m"
}

pub fn reset() -> &'static str {
    "\x1b[m"
}

pub fn clear_line() -> &'static str {
    "\x1b[K"
}

pub fn new_line() -> &'static str {
    "\r\n"
}
