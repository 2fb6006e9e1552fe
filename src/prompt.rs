//! The command line buffer used in command and search modes.

pub struct Prompt {
    buf: Vec<char>,
    pos: usize,
}

impl Prompt {
    pub fn new() -> Prompt {
        Prompt {
            buf: Vec::new(),
            pos: 0,
        }
    }

    pub fn buf(&self) -> &[char] {
        &self.buf
    }

    /// Returns the position of the cursor in the buffer.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn text(&self) -> String {
        self.buf.iter().collect()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.buf.insert(self.pos, c);
        self.pos += 1;
    }

    /// Deletes the character before the cursor, returning `false` if the cursor is
    /// at the start of the buffer.
    pub fn delete_left(&mut self) -> bool {
        if self.pos > 0 {
            self.pos -= 1;
            self.buf.remove(self.pos);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.pos = 0;
    }

    pub fn move_end(&mut self) {
        self.pos = self.buf.len();
    }
}
