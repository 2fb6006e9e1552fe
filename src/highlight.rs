//! Syntax highlighting of rendered rows.
//!
//! Highlighting is deliberately simple: every rendered row is scanned from scratch,
//! left to right, and each character is assigned a [`Highlight`] tag. There is no
//! state carried between rows, so multi-line comments and strings are not
//! recognized.

use crate::syntax::Syntax;

/// The semantic class of a rendered character.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Number,
    String,
    Comment,
    Keyword,
    Type,
    Const,
}

/// Characters other than whitespace and `NUL` that separate words.
const SEPARATORS: &str = ",.()+-/*=~%<>[];";

/// Returns `true` if `c` separates words.
pub fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\0' || SEPARATORS.contains(c)
}

/// Returns highlight tags for `rendered`, one per character, using `syntax` to
/// classify characters.
///
/// If `syntax` is `None`, every character is tagged as [`Highlight::Normal`].
pub fn highlight(rendered: &[char], syntax: Option<&Syntax>) -> Vec<Highlight> {
    let mut tags = vec![Highlight::Normal; rendered.len()];
    if let Some(syntax) = syntax {
        Scanner::new(rendered, &mut tags, syntax).scan();
    }
    tags
}

/// State of a single left-to-right pass over a row.
struct Scanner<'a> {
    text: &'a [char],
    tags: &'a mut [Highlight],
    syntax: &'a Syntax,

    /// Indicates that the previous character was a separator, which is `true` at
    /// the start of a row.
    prev_sep: bool,

    /// The quote character that opened the string in progress, if any.
    quote: Option<char>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a [char], tags: &'a mut [Highlight], syntax: &'a Syntax) -> Scanner<'a> {
        Scanner {
            text,
            tags,
            syntax,
            prev_sep: true,
            quote: None,
        }
    }

    /// Returns the character at `i`, or `NUL` beyond the end of the row so that a
    /// word ending the row is followed by a separator.
    #[inline(always)]
    fn char_at(&self, i: usize) -> char {
        self.text.get(i).copied().unwrap_or('\0')
    }

    fn scan(&mut self) {
        let len = self.text.len();
        let mut i = 0;
        while i < len {
            let c = self.text[i];
            let prev_tag = if i > 0 {
                self.tags[i - 1]
            } else {
                Highlight::Normal
            };

            if self.quote.is_none() && self.starts_comment(i) {
                self.tags[i..].fill(Highlight::Comment);
                break;
            }

            if self.syntax.strings {
                if let Some(quote) = self.quote {
                    self.tags[i] = Highlight::String;
                    if c == '\\' && i + 1 < len {
                        self.tags[i + 1] = Highlight::String;
                        i += 2;
                        continue;
                    }
                    if c == quote {
                        self.quote = None;
                    }
                    i += 1;
                    self.prev_sep = true;
                    continue;
                } else if c == '"' || c == '\'' {
                    self.quote = Some(c);
                    self.tags[i] = Highlight::String;
                    i += 1;
                    continue;
                }
            }

            if self.syntax.numbers
                && ((c.is_ascii_digit() && (self.prev_sep || prev_tag == Highlight::Number))
                    || (c == '.' && prev_tag == Highlight::Number))
            {
                self.tags[i] = Highlight::Number;
                i += 1;
                self.prev_sep = false;
                continue;
            }

            if self.prev_sep {
                let syntax = self.syntax;
                let n = self
                    .match_word(i, &syntax.keywords, Highlight::Keyword)
                    .or_else(|| self.match_word(i, &syntax.types, Highlight::Type))
                    .or_else(|| self.match_word(i, &syntax.consts, Highlight::Const));
                if let Some(n) = n {
                    i += n;
                    self.prev_sep = false;
                    continue;
                }
            }

            self.prev_sep = is_separator(c);
            i += 1;
        }
    }

    /// Returns `true` if the comment marker of the syntax starts at `i`.
    fn starts_comment(&self, i: usize) -> bool {
        match self.syntax.comment.as_deref() {
            Some(marker) if marker.len() > 0 => marker
                .chars()
                .enumerate()
                .all(|(n, c)| self.text.get(i + n) == Some(&c)),
            _ => false,
        }
    }

    /// Tries to match the first word in `words` that starts at `i` and is followed
    /// by a separator, tagging it with `tag` and returning its length if found.
    fn match_word(&mut self, i: usize, words: &[String], tag: Highlight) -> Option<usize> {
        let found = words.iter().find_map(|word| {
            let n = word.chars().count();
            let matched = n > 0
                && word
                    .chars()
                    .enumerate()
                    .all(|(k, c)| self.text.get(i + k) == Some(&c))
                && is_separator(self.char_at(i + n));
            if matched { Some(n) } else { None }
        });
        if let Some(n) = found {
            self.tags[i..i + n].fill(tag);
        }
        found
    }
}
