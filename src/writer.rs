//! A buffered abstraction over standard output that sends content to the terminal
//! in a structured way.

use crate::ansi;
use crate::error::Result;
use crate::render::Instruction;
use std::io::{self, Write};

pub struct Writer {
    out: String,
}

impl Writer {
    pub fn new() -> Writer {
        Writer { out: String::new() }
    }

    /// Sends buffered changes to standard output in a single write.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the write to standard output failed.
    pub fn send(&mut self) -> Result<()> {
        if self.out.len() > 0 {
            let mut stdout = io::stdout();
            stdout.write_all(self.out.as_bytes())?;
            stdout.flush()?;
            self.out.clear();
        }
        Ok(())
    }

    /// Appends the encoding of `instrs` to the buffer.
    pub fn write_all(&mut self, instrs: &[Instruction]) -> &mut Writer {
        for instr in instrs {
            self.write(instr);
        }
        self
    }

    pub fn write(&mut self, instr: &Instruction) -> &mut Writer {
        match instr {
            Instruction::HideCursor => self.out.push_str(ansi::hide_cursor()),
            Instruction::ShowCursor => self.out.push_str(ansi::show_cursor()),
            Instruction::Home => self.out.push_str(ansi::home()),
            Instruction::SetCursor(p) => self.out.push_str(&ansi::set_cursor(*p)),
            Instruction::Text(text) => self.out.push_str(text),
            Instruction::Glyph(c) => {
                self.out.push_str(ansi::inverse());
                self.out.push(*c);
                self.out.push_str(ansi::reset());
            }
            Instruction::SetFg(fg) => self.out.push_str(&ansi::set_color_fg(*fg)),
            Instruction::DefaultFg => self.out.push_str(ansi::default_fg()),
            Instruction::SetBg(bg) => self.out.push_str(&ansi::set_color_bg(*bg)),
            Instruction::DefaultBg => self.out.push_str(ansi::default_bg()),
            Instruction::SetStyle(color) => self.out.push_str(&ansi::set_style(*color)),
            Instruction::Reset => self.out.push_str(ansi::reset()),
            Instruction::ClearLine => self.out.push_str(ansi::clear_line()),
            Instruction::NewLine => self.out.push_str(ansi::new_line()),
        }
        self
    }

    #[cfg(test)]
    fn buffer(&self) -> &str {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Point;

    #[test]
    fn encode_instructions() {
        let mut writer = Writer::new();
        writer.write_all(&[
            Instruction::HideCursor,
            Instruction::Home,
            Instruction::SetFg(3),
            Instruction::Text("int".to_string()),
            Instruction::DefaultFg,
            Instruction::Glyph('A'),
            Instruction::ClearLine,
            Instruction::NewLine,
            Instruction::SetCursor(Point::new(0, 2)),
            Instruction::ShowCursor,
        ]);
        assert_eq!(
            writer.buffer(),
            "\x1b[?25l\x1b[H\x1b[38;5;3mint\x1b[39m\x1b[7mA\x1b[m\x1b[K\r\n\x1b[1;3H\x1b[?25h"
        );
    }
}
