//! A clipboard that holds the most recent cut region.
//!
//! The _local_ register is the source of every paste. When mirroring is enabled,
//! each cut is also copied to the _global_ clipboard provided by the OS so that
//! text can be pasted into other applications.

use arboard::Clipboard as GlobalClipboard;
use tracing::debug;

pub struct Clipboard {
    local: String,
    mirror: bool,
}

impl Clipboard {
    /// Creates an empty clipboard, where `mirror` indicates that text should also be
    /// copied to the global clipboard.
    pub fn new(mirror: bool) -> Clipboard {
        Clipboard {
            local: String::new(),
            mirror,
        }
    }

    /// Replaces the content of the clipboard with `text`.
    pub fn set_text(&mut self, text: String) {
        if self.mirror {
            // OS-specific clipboards behave in different ways, so recommendation
            // is to create new instance prior to each access. Note that operations
            // could fail, possibly because of OS limitations or nuances, so
            // quietly ignore.
            if let Err(e) =
                GlobalClipboard::new().and_then(|mut clip| clip.set_text(text.clone()))
            {
                debug!(error = %e, "global clipboard unavailable");
            }
        }
        self.local = text;
    }

    /// Returns the content of the local register.
    pub fn text(&self) -> &str {
        &self.local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_overwrites_register() {
        let mut clip = Clipboard::new(false);
        assert_eq!(clip.text(), "");
        clip.set_text("foo\nbar".to_string());
        assert_eq!(clip.text(), "foo\nbar");
        clip.set_text("baz".to_string());
        assert_eq!(clip.text(), "baz");
    }
}
