//! Main controller.

use crate::config::ConfigurationRef;
use crate::env::Environment;
use crate::error::Result;
use crate::key::{ESC, Key, KeySource};
use crate::mode::Mode;
use crate::op::Action;
use crate::render;
use crate::term;
use crate::writer::Writer;
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// The primary control point for coordinating user interaction and editing operations.
pub struct Controller<K: KeySource> {
    keys: K,
    config: ConfigurationRef,
    env: Environment,
    writer: Writer,
    context: Context,
}

/// Execution context of [`Controller`] that manages state.
struct Context {
    /// An optional time capturing the last terminal size change event.
    term_changed: Option<Instant>,

    /// A sequence of keys resulting from continuations.
    key_seq: Vec<Key>,

    /// Indicates that the display must be drawn before reading the next key.
    refresh: bool,
}

impl Context {
    fn new() -> Context {
        Context {
            term_changed: None,
            key_seq: Vec::new(),
            refresh: true,
        }
    }
}

/// Wrapper used only for formatting [`Key`] sequences.
struct KeySeq<'a>(&'a [Key]);

impl fmt::Display for KeySeq<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_seq = self
            .0
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{key_seq}")
    }
}

impl<K: KeySource> Controller<K> {
    /// Number of milliseconds controller waits before resizing the viewport after it
    /// notices a change.
    const TERM_CHANGE_DELAY: u128 = 100;

    pub fn new(keys: K, env: Environment) -> Controller<K> {
        let config = env.config().clone();
        Controller {
            keys,
            config,
            env,
            writer: Writer::new(),
            context: Context::new(),
        }
    }

    /// Runs the main processing loop.
    ///
    /// This loop orchestrates the entire editing experience, drawing the display and
    /// then reading [keys](Key) and calling their corresponding editing functions
    /// until instructed to quit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.context.refresh {
                self.draw()?;
                self.context.refresh = false;
            }

            let key = self.keys.next_key()?;
            if key == Key::None {
                self.poll_resize()?;
            } else {
                self.context.refresh = true;
                if let Some(Action::Quit) = self.process(key) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Draws the display, after which the echo message is discarded.
    fn draw(&mut self) -> Result<()> {
        self.env.prepare_render();
        let instrs = render::render(&self.env);
        self.writer.write_all(&instrs).send()?;
        self.env.clear_echo();
        Ok(())
    }

    /// Detects a change in terminal size and resizes the viewport, but not
    /// immediately. In practice, a rapid series of change events could be detected
    /// because human movement is significantly slower.
    fn poll_resize(&mut self) -> Result<()> {
        self.context.term_changed = if term::size_changed() {
            // Restart clock when change is detected.
            Some(Instant::now())
        } else if let Some(time) = self.context.term_changed.take() {
            if time.elapsed().as_millis() > Self::TERM_CHANGE_DELAY {
                // Resize once delay period expires.
                self.env.resize(term::size()?);
                self.context.refresh = true;
                None
            } else {
                // Keep waiting.
                Some(time)
            }
        } else {
            None
        };
        Ok(())
    }

    /// Handles `key` in the current mode, returning the action of the editing
    /// operation it completes, if any.
    ///
    /// A key that forms a prefix of a bound key sequence is held until the sequence
    /// is complete or broken.
    fn process(&mut self, key: Key) -> Option<Action> {
        let mode = self.env.mode();
        self.context.key_seq.push(key);
        let action = if let Some(op_fn) = self.config.bindings.find(mode, &self.context.key_seq) {
            self.context.key_seq.clear();
            op_fn(&mut self.env)
        } else if self.config.bindings.is_prefix(mode, &self.context.key_seq) {
            return None;
        } else {
            let key_seq = std::mem::take(&mut self.context.key_seq);
            self.process_unbound(mode, &key_seq)
        };
        self.env.after_action(action);
        action
    }

    /// Handles a key sequence that is not bound in `mode`.
    ///
    /// A single printable key is inserted into the document in insert mode and into
    /// the command line in command and search modes. Anything else is reported as an
    /// error, except in command and search modes where it is ignored, and except
    /// for an unfinished sequence cancelled with `ESC` in normal mode.
    fn process_unbound(&mut self, mode: Mode, key_seq: &[Key]) -> Option<Action> {
        let printable = match key_seq {
            [key] => key.printable(),
            _ => None,
        };
        match (mode, printable) {
            (Mode::Insert, Some(c)) => {
                self.env.editor_mut().insert_char(c);
                None
            }
            (Mode::Insert, None) => {
                let text = format!("non-printable key '{}' in insert mode", KeySeq(key_seq));
                self.env.set_error(&text);
                None
            }
            (Mode::Command | Mode::Search, Some(c)) => {
                self.env.prompt_insert(c);
                Action::hold()
            }
            (Mode::Command | Mode::Search, None) => Action::hold(),
            (Mode::Normal, _) => {
                if key_seq.len() > 1 && key_seq.last() == Some(&ESC) {
                    debug!(keys = %KeySeq(key_seq), "key sequence cancelled");
                } else {
                    let text = format!("invalid key '{}' in normal mode", KeySeq(key_seq));
                    self.env.set_error(&text);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clipboard;
    use crate::config::Configuration;
    use crate::document::Document;
    use crate::editor::Editor;
    use crate::env::Echo;
    use crate::key::tests::ScriptedKeys;
    use crate::key::{Alt, RET, TAB};
    use crate::size::Size;

    fn controller(lines: &[&str]) -> Controller<ScriptedKeys> {
        let editor = Editor::new(Document::with_lines(lines), Clipboard::new(false));
        let env = Environment::new(editor, Size::new(24, 80), Configuration::default().to_ref());
        Controller::new(ScriptedKeys::new(&[]), env)
    }

    fn press(ctl: &mut Controller<ScriptedKeys>, keys: &[Key]) -> Option<Action> {
        let mut action = None;
        for key in keys {
            action = ctl.process(*key);
        }
        action
    }

    fn chars(s: &str) -> Vec<Key> {
        s.chars().map(Key::Char).collect()
    }

    fn texts(ctl: &Controller<ScriptedKeys>) -> Vec<String> {
        ctl.env.editor().doc().rows().iter().map(|row| row.text()).collect()
    }

    #[test]
    fn insert_mode_typing() {
        let mut ctl = controller(&[]);
        press(&mut ctl, &chars("ihi"));
        press(&mut ctl, &[RET, TAB, Key::Char('x'), ESC]);
        assert_eq!(texts(&ctl), vec!["hi", "\tx"]);
        assert_eq!(ctl.env.mode(), Mode::Normal);
    }

    #[test]
    fn autoindent_on_return() {
        let mut ctl = controller(&["\tfoo"]);
        press(&mut ctl, &[Key::Char(';'), Key::Char('i'), RET, Key::Char('x')]);
        assert_eq!(texts(&ctl), vec!["\tfoo", "\tx"]);
    }

    #[test]
    fn normal_mode_errors() {
        let mut ctl = controller(&["foo"]);
        press(&mut ctl, &[Key::Char('z')]);
        assert_eq!(
            ctl.env.echo(),
            Some(&Echo::Error("invalid key 'z' in normal mode".to_string()))
        );
        press(&mut ctl, &[Key::Char('g'), Key::Char('x')]);
        assert_eq!(
            ctl.env.echo(),
            Some(&Echo::Error("invalid key 'g x' in normal mode".to_string()))
        );
        assert_eq!(texts(&ctl), vec!["foo"]);
    }

    #[test]
    fn cancelled_sequence_is_silent() {
        let mut ctl = controller(&["foo", "bar"]);
        ctl.env.clear_echo();
        press(&mut ctl, &[Key::Char('G'), Key::Char('g'), ESC]);
        assert!(ctl.env.echo().is_none());
        assert_eq!(ctl.env.editor().cursor().cy, 1);
        press(&mut ctl, &chars("gg"));
        assert_eq!(ctl.env.editor().cursor().cy, 0);
    }

    #[test]
    fn insert_mode_rejects_control_keys() {
        let mut ctl = controller(&["foo"]);
        press(&mut ctl, &[Key::Char('i'), Key::Control(1)]);
        assert_eq!(
            ctl.env.echo(),
            Some(&Echo::Error("non-printable key 'ctrl-a' in insert mode".to_string()))
        );
        assert_eq!(texts(&ctl), vec!["foo"]);
    }

    #[test]
    fn command_line_editing() {
        let mut ctl = controller(&["int x;"]);
        press(&mut ctl, &[Key::Alt('m')]);
        assert_eq!(ctl.env.mode(), Mode::Command);
        press(&mut ctl, &chars("pth a.c"));
        press(&mut ctl, &[Key::Left(Alt::On), Key::Control(12)]);
        press(&mut ctl, &[Key::Char('a'), Key::Right(Alt::On), Key::Control(1)]);
        assert_eq!(ctl.env.prompt().text(), "path a.c");
        press(&mut ctl, &[RET]);
        assert_eq!(ctl.env.mode(), Mode::Normal);
        assert_eq!(ctl.env.editor().doc().path(), Some("a.c"));
    }

    #[test]
    fn search_and_repeat() {
        let mut ctl = controller(&["foobar", "barbaz"]);
        press(&mut ctl, &chars("/bar"));
        assert_eq!(ctl.env.mode(), Mode::Search);
        assert!(ctl.env.span().is_some());
        press(&mut ctl, &[RET]);
        assert_eq!(ctl.env.editor().cursor().cx, 3);
        assert!(ctl.env.span().is_some());
        press(&mut ctl, &chars("b"));
        assert_eq!(ctl.env.editor().cursor().cy, 1);
        press(&mut ctl, &chars("l"));
        assert!(ctl.env.span().is_none());
    }

    #[test]
    fn escape_cancels_prompt() {
        let mut ctl = controller(&["foobar"]);
        press(&mut ctl, &chars("/bar"));
        press(&mut ctl, &[ESC]);
        assert_eq!(ctl.env.mode(), Mode::Normal);
        assert!(ctl.env.span().is_none());
        assert_eq!(ctl.env.editor().cursor().cx, 0);
    }

    #[test]
    fn quit_flow() {
        let mut ctl = controller(&["foo"]);
        assert_eq!(press(&mut ctl, &chars("`")), Some(Action::Quit));

        let mut ctl = controller(&["foo"]);
        press(&mut ctl, &chars("wl"));
        assert_eq!(press(&mut ctl, &chars("`")), Some(Action::Hold));
        assert_eq!(press(&mut ctl, &chars("`")), Some(Action::Hold));
        assert_eq!(press(&mut ctl, &chars("`")), Some(Action::Quit));
    }

    #[test]
    fn quit_command() {
        let mut ctl = controller(&["foo"]);
        press(&mut ctl, &[Key::Alt('m')]);
        press(&mut ctl, &chars("quit"));
        assert_eq!(press(&mut ctl, &[RET]), Some(Action::Quit));
    }

    #[test]
    fn cut_and_paste() {
        let mut ctl = controller(&["abc", "def", "ghi"]);
        press(&mut ctl, &chars("ld"));
        press(&mut ctl, &chars("jjlf"));
        assert_eq!(texts(&ctl), vec!["ai"]);
        press(&mut ctl, &chars("c"));
        assert_eq!(texts(&ctl), vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn open_line_below_enters_insert() {
        let mut ctl = controller(&["\tfoo", "bar"]);
        press(&mut ctl, &chars(",x"));
        assert_eq!(ctl.env.mode(), Mode::Insert);
        assert_eq!(texts(&ctl), vec!["\tfoo", "\tx", "bar"]);
    }
}
