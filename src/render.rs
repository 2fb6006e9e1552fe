//! Rendering of the display.
//!
//! [`render`] turns the state of an [`Environment`] into a sequence of
//! [`Instruction`]s covering the entire display: the visible text rows, the status
//! line, the command line, and optionally a debug line. Rendering never changes the
//! environment; the instructions are handed to a [`Writer`](crate::writer::Writer)
//! that encodes them for the terminal.

use crate::color::Color;
use crate::env::{Echo, Environment};
use crate::row::Row;
use crate::size::Point;

/// A single step in drawing the display.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Instruction {
    HideCursor,
    ShowCursor,

    /// Moves the cursor to the top-left corner.
    Home,

    SetCursor(Point),
    Text(String),

    /// Draws a control character as an inverse glyph, which also resets all colors.
    Glyph(char),

    SetFg(u8),
    DefaultFg,
    SetBg(u8),
    DefaultBg,

    /// Sets bold text in `Color`.
    SetStyle(Color),

    /// Resets all colors and attributes.
    Reset,

    /// Clears from the cursor to the end of the line.
    ClearLine,

    NewLine,
}

/// Accumulates instructions, merging adjacent text.
struct Canvas {
    out: Vec<Instruction>,
}

impl Canvas {
    fn new() -> Canvas {
        Canvas { out: Vec::new() }
    }

    fn push(&mut self, instr: Instruction) {
        self.out.push(instr);
    }

    fn write(&mut self, c: char) {
        if let Some(Instruction::Text(text)) = self.out.last_mut() {
            text.push(c);
        } else {
            self.out.push(Instruction::Text(c.to_string()));
        }
    }

    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write(c);
        }
    }
}

const WELCOME: &str = concat!("hed editor -- version ", env!("CARGO_PKG_VERSION"));

/// Returns the instructions that draw the entire display for `env`.
pub fn render(env: &Environment) -> Vec<Instruction> {
    let mut canvas = Canvas::new();
    canvas.push(Instruction::HideCursor);
    canvas.push(Instruction::Home);
    draw_rows(env, &mut canvas);
    draw_status(env, &mut canvas);
    draw_command_line(env, &mut canvas);
    if env.config().settings.debug {
        draw_debug(env, &mut canvas);
    }
    canvas.push(Instruction::SetCursor(cursor_point(env)));
    canvas.push(Instruction::ShowCursor);
    canvas.out
}

fn draw_rows(env: &Environment, canvas: &mut Canvas) {
    let view = env.viewport();
    let doc = env.editor().doc();
    for y in 0..view.rows() {
        let row_index = y + view.row_off();
        if let Some(row) = doc.get(row_index) {
            draw_row(env, canvas, row_index, row);
        } else if doc.is_empty() && y == view.rows() / 3 && env.config().settings.welcome {
            draw_welcome(view.cols(), canvas);
        } else {
            canvas.write('~');
        }
        canvas.push(Instruction::ClearLine);
        if y + 1 < view.rows() {
            canvas.push(Instruction::NewLine);
        }
    }
}

fn draw_welcome(cols: usize, canvas: &mut Canvas) {
    let len = WELCOME.len().min(cols);
    let mut padding = (cols - len) / 2;
    if padding > 0 {
        canvas.write('~');
        padding -= 1;
    }
    canvas.write_str(&" ".repeat(padding));
    canvas.write_str(&WELCOME[..len]);
}

/// Draws the visible portion of a single row, switching colors as highlight tags
/// change and marking the search highlight with a background color.
fn draw_row(env: &Environment, canvas: &mut Canvas, row_index: usize, row: &Row) {
    let view = env.viewport();
    let theme = &env.config().theme;
    let span = env.span().filter(|span| span.row == row_index);
    let col_off = view.col_off();
    let (text, tags) = (row.rendered(), row.tags());
    let len = row.rendered_len().saturating_sub(col_off).min(view.cols());

    let mut fg: Option<u8> = None;
    let mut selected = false;

    // Span end is exclusive, so the position just beyond the last visible
    // character is also visited to close the highlight.
    for i in 0..=len {
        let col = i + col_off;
        if let Some(span) = span {
            if col == span.start {
                canvas.push(Instruction::SetBg(theme.select_bg));
                selected = true;
            }
            if col == span.end {
                canvas.push(Instruction::DefaultBg);
                selected = false;
            }
        }
        if i == len {
            break;
        }

        let c = text[col];
        if c.is_ascii_control() {
            let sym = if (c as u32) <= 26 {
                (b'@' + c as u8) as char
            } else {
                '?'
            };
            canvas.push(Instruction::Glyph(sym));
            if let Some(fg) = fg {
                canvas.push(Instruction::SetFg(fg));
            }
            if selected {
                canvas.push(Instruction::SetBg(theme.select_bg));
            }
        } else {
            let tag_fg = theme.fg_of(tags.get(col).copied().unwrap_or_default());
            if tag_fg != fg {
                fg = tag_fg;
                canvas.push(match fg {
                    Some(fg) => Instruction::SetFg(fg),
                    None => Instruction::DefaultFg,
                });
            }
            canvas.write(c);
        }
    }
    canvas.push(Instruction::DefaultFg);
    if selected {
        canvas.push(Instruction::DefaultBg);
    }
}

/// Draws the status line, with the dirty and mode markers along with the path on
/// the left, and the syntax and cursor row on the right.
fn draw_status(env: &Environment, canvas: &mut Canvas) {
    let cols = env.viewport().cols();
    let doc = env.editor().doc();
    let left = format!(
        "[{}{}] {:.20}",
        if doc.is_dirty() { '*' } else { '-' },
        env.mode().marker(),
        doc.path().unwrap_or("[No name]")
    );
    let right = format!(
        "{} {}/{}",
        doc.syntax().map_or("none", |syntax| syntax.name.as_str()),
        env.editor().cursor().cy + 1,
        doc.row_count()
    );

    canvas.push(Instruction::NewLine);
    canvas.push(Instruction::SetStyle(env.config().theme.status_color(env.mode())));
    let left = left.chars().take(cols).collect::<String>();
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    canvas.write_str(&left);
    if left_len + right_len <= cols {
        canvas.write_str(&" ".repeat(cols - left_len - right_len));
        canvas.write_str(&right);
    } else {
        canvas.write_str(&" ".repeat(cols - left_len));
    }
    canvas.push(Instruction::Reset);
}

/// Draws the command line, which shows the buffer in command and search modes and
/// the echo message otherwise.
fn draw_command_line(env: &Environment, canvas: &mut Canvas) {
    let cols = env.viewport().cols();
    canvas.push(Instruction::NewLine);
    canvas.push(Instruction::ClearLine);
    if let Some(prompt_char) = env.mode().prompt_char() {
        canvas.write(prompt_char);
        let text = env
            .prompt()
            .buf()
            .iter()
            .skip(env.viewport().cmd_off())
            .take(cols.saturating_sub(1))
            .collect::<String>();
        canvas.write_str(&text);
    } else {
        match env.echo() {
            Some(Echo::Info(text)) => {
                canvas.write_str(&text.chars().take(cols).collect::<String>());
            }
            Some(Echo::Error(text)) => {
                canvas.push(Instruction::SetStyle(env.config().theme.error_color()));
                canvas.write_str(&text.chars().take(cols).collect::<String>());
                canvas.push(Instruction::Reset);
            }
            None => (),
        }
    }
}

fn draw_debug(env: &Environment, canvas: &mut Canvas) {
    let cursor = env.editor().cursor();
    let doc = env.editor().doc();
    let mark = env.editor().mark();
    let prompt = env.prompt();
    let info = format!(
        "cmdx: {}, cmdoff: {}, len(cmd): {}, rows: {}, cx = {}, cy: {}, cx (calc): {}, \
         rx: {}, tx: {}, mark: {},{}",
        prompt.pos(),
        env.viewport().cmd_off(),
        prompt.buf().len(),
        doc.row_count(),
        cursor.cx,
        cursor.cy,
        doc.get(cursor.cy).map_or(0, |row| row.to_raw(cursor.rx)),
        cursor.rx,
        cursor.tx,
        mark.x,
        mark.y
    );
    canvas.push(Instruction::NewLine);
    canvas.write_str(&info.chars().take(env.viewport().cols()).collect::<String>());
    canvas.push(Instruction::ClearLine);
}

/// Returns the position of the terminal cursor, which is on the command line in
/// command and search modes.
fn cursor_point(env: &Environment) -> Point {
    let view = env.viewport();
    if env.mode().is_prompt() {
        let col = env.prompt().pos().saturating_sub(view.cmd_off()) + 1;
        Point::new(view.rows() as u32 + 1, col as u32)
    } else {
        let cursor = env.editor().cursor();
        Point::new(
            cursor.cy.saturating_sub(view.row_off()) as u32,
            cursor.rx.saturating_sub(view.col_off()) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::tests::env_with;
    use crate::clip::Clipboard;
    use crate::config::Configuration;
    use crate::document::Document;
    use crate::editor::Editor;
    use crate::mode::Mode;
    use crate::size::Size;
    use Instruction::*;

    fn text(s: &str) -> Instruction {
        Text(s.to_string())
    }

    /// Returns the instructions that draw text row `y`.
    fn row_instrs(instrs: &[Instruction], y: usize) -> Vec<Instruction> {
        instrs[2..]
            .split(|instr| *instr == NewLine)
            .nth(y)
            .map(|row| row.to_vec())
            .unwrap_or_default()
    }

    /// Returns the instructions following the last `n` newlines.
    fn line_from_end(instrs: &[Instruction], n: usize) -> Vec<Instruction> {
        let lines = instrs.split(|instr| *instr == NewLine).collect::<Vec<_>>();
        lines[lines.len() - 1 - n].to_vec()
    }

    #[test]
    fn frame_structure() {
        let mut env = env_with(&["foo"]);
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(instrs[0], HideCursor);
        assert_eq!(instrs[1], Home);
        assert_eq!(instrs[instrs.len() - 1], ShowCursor);
        assert_eq!(instrs[instrs.len() - 2], SetCursor(Point::new(0, 0)));
        // 22 text rows, status line and command line.
        assert_eq!(instrs.iter().filter(|instr| **instr == NewLine).count(), 23);
    }

    #[test]
    fn rows_beyond_document() {
        let mut env = env_with(&["foo"]);
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(row_instrs(&instrs, 0), vec![text("foo"), DefaultFg, ClearLine]);
        assert_eq!(row_instrs(&instrs, 1), vec![text("~"), ClearLine]);
    }

    #[test]
    fn welcome_banner_on_empty_document() {
        let mut env = env_with(&[]);
        env.prepare_render();
        let instrs = render(&env);
        let banner = row_instrs(&instrs, 22 / 3);
        match &banner[0] {
            Text(s) => {
                assert!(s.starts_with('~'));
                assert!(s.trim_start_matches(['~', ' ']).starts_with("hed editor"));
                assert_eq!(s.len(), (80 - WELCOME.len()) / 2 + WELCOME.len());
            }
            _ => panic!("expected banner text"),
        }
    }

    #[test]
    fn highlighted_row() {
        let mut env = env_with(&["int x = 1;"]);
        env.set_mode(Mode::Command);
        for c in "path a.c".chars() {
            env.prompt_insert(c);
        }
        env.submit_prompt();
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            row_instrs(&instrs, 0),
            vec![
                SetFg(3),
                text("int"),
                DefaultFg,
                text(" x = "),
                SetFg(1),
                text("1"),
                DefaultFg,
                text(";"),
                DefaultFg,
                ClearLine
            ]
        );
    }

    #[test]
    fn control_chars_as_glyphs() {
        let mut env = env_with(&["a\u{1}b\u{7f}"]);
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            row_instrs(&instrs, 0),
            vec![text("a"), Glyph('A'), text("b"), Glyph('?'), DefaultFg, ClearLine]
        );
    }

    #[test]
    fn glyph_keeps_string_color() {
        let mut env = env_with(&["\"a\u{1}b\""]);
        env.set_mode(Mode::Command);
        for c in "path a.c".chars() {
            env.prompt_insert(c);
        }
        env.submit_prompt();
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            row_instrs(&instrs, 0),
            vec![
                SetFg(5),
                text("\"a"),
                Glyph('A'),
                SetFg(5),
                text("b\""),
                DefaultFg,
                ClearLine
            ]
        );
    }

    #[test]
    fn glyph_keeps_search_background() {
        let mut env = env_with(&["xa\u{1}by"]);
        env.set_mode(Mode::Search);
        for c in "a\u{1}b".chars() {
            env.prompt_insert(c);
        }
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            row_instrs(&instrs, 0),
            vec![
                text("x"),
                SetBg(4),
                text("a"),
                Glyph('A'),
                SetBg(4),
                text("b"),
                DefaultBg,
                text("y"),
                DefaultFg,
                ClearLine
            ]
        );
    }

    #[test]
    fn search_span_marked() {
        let mut env = env_with(&["foobar"]);
        env.set_mode(Mode::Search);
        for c in "bar".chars() {
            env.prompt_insert(c);
        }
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            row_instrs(&instrs, 0),
            vec![text("foo"), SetBg(4), text("bar"), DefaultBg, DefaultFg, ClearLine]
        );
        // Cursor sits on the command line after the prompt character and query.
        assert_eq!(instrs[instrs.len() - 2], SetCursor(Point::new(23, 4)));
        assert_eq!(line_from_end(&instrs, 0)[..2], [ClearLine, text("/bar")]);
    }

    #[test]
    fn status_line() {
        let mut env = env_with(&["foo", "bar"]);
        env.editor_mut().move_down();
        env.editor_mut().insert_char('x');
        env.set_mode(Mode::Insert);
        env.prepare_render();
        let instrs = render(&env);
        let status = line_from_end(&instrs, 1);
        assert_eq!(status[0], SetStyle(Color::new(0, 7)));
        match &status[1] {
            Text(s) => {
                assert_eq!(s.len(), 80);
                assert!(s.starts_with("[*I] [No name]"));
                assert!(s.ends_with("none 2/2"));
            }
            _ => panic!("expected status text"),
        }
        assert_eq!(status[2], Reset);
    }

    #[test]
    fn debug_line_shows_mark() {
        let mut config = Configuration::default();
        config.settings.debug = true;
        let editor = Editor::new(Document::with_lines(&["foo", "bar"]), Clipboard::new(false));
        let mut env = Environment::new(editor, Size::new(24, 120), config.to_ref());
        env.editor_mut().set_pos(1, 1);
        env.editor_mut().set_mark();
        env.editor_mut().set_pos(2, 0);
        env.prepare_render();
        let instrs = render(&env);
        match &line_from_end(&instrs, 0)[0] {
            Text(s) => {
                assert!(s.starts_with("cmdx: 0, cmdoff: 0, len(cmd): 0, rows: 2, cx = 2, cy: 0"));
                assert!(s.ends_with("mark: 1,1"));
            }
            _ => panic!("expected debug text"),
        }
    }

    #[test]
    fn error_echo() {
        let mut env = env_with(&["foo"]);
        env.set_error("no filename");
        env.prepare_render();
        let instrs = render(&env);
        assert_eq!(
            line_from_end(&instrs, 0)[..4],
            [ClearLine, SetStyle(Color::new(7, 1)), text("no filename"), Reset]
        );
    }

    #[test]
    fn horizontal_scroll() {
        let long = "x".repeat(100);
        let mut env = env_with(&[long.as_str()]);
        env.editor_mut().move_end();
        env.prepare_render();
        let instrs = render(&env);
        // 80 columns less a margin of 5 leaves the cursor at column 74.
        assert_eq!(instrs[instrs.len() - 2], SetCursor(Point::new(0, 74)));
        assert_eq!(row_instrs(&instrs, 0)[0], text(&"x".repeat(100 - 26)));
    }
}
