//! Conversions between raw and rendered columns of a row.
//!
//! A raw column is an index into the characters stored for a row, whereas a rendered
//! column is an index into the characters displayed for that row once tabs have been
//! expanded to the next tab stop. Both kinds of columns are `0`-based.

/// Fixed interval of columns at which tab stops occur.
pub const TAB_STOP: usize = 4;

/// Returns the rendered width reached after advancing one character `c` from
/// rendered column `rx`.
#[inline(always)]
fn advance(rx: usize, c: char) -> usize {
    if c == '\t' {
        rx + TAB_STOP - (rx % TAB_STOP)
    } else {
        rx + 1
    }
}

/// Returns the rendered form of `raw` in which every tab is replaced with enough
/// spaces to reach the next multiple of [`TAB_STOP`].
pub fn expand(raw: &[char]) -> Vec<char> {
    let mut rendered = Vec::with_capacity(raw.len());
    for &c in raw {
        if c == '\t' {
            rendered.push(' ');
            while rendered.len() % TAB_STOP != 0 {
                rendered.push(' ');
            }
        } else {
            rendered.push(c);
        }
    }
    rendered
}

/// Returns the rendered column corresponding to raw column `cx` in `raw`.
///
/// Values of `cx` beyond the end of `raw` are treated as the end of `raw`.
pub fn raw_to_rendered(raw: &[char], cx: usize) -> usize {
    raw.iter().take(cx).fold(0, |rx, &c| advance(rx, c))
}

/// Returns the raw column of the character in `raw` that occupies rendered column
/// `rx`.
///
/// The walk stops at the first character whose rendered span _exceeds_ `rx`, so a
/// column falling in the middle of an expanded tab maps to the tab itself. If `rx`
/// lies beyond the rendered end of `raw`, then `raw.len()` is returned.
pub fn rendered_to_raw(raw: &[char], rx: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, &c) in raw.iter().enumerate() {
        cur_rx = advance(cur_rx, c);
        if cur_rx > rx {
            return cx;
        }
    }
    raw.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn expand_tab_to_next_stop() {
        let rendered = expand(&chars("a\tb"));
        assert_eq!(rendered.iter().collect::<String>(), "a   b");
        assert_eq!(rendered.len(), 5);
    }

    #[test]
    fn expand_tab_on_stop_boundary() {
        // A tab that starts exactly on a tab stop expands to a full stop.
        let rendered = expand(&chars("abcd\tx\t"));
        assert_eq!(rendered.iter().collect::<String>(), "abcd    x   ");
    }

    #[test]
    fn expand_without_tabs_is_identity() {
        let raw = chars("int main(void)");
        assert_eq!(expand(&raw), raw);
    }

    #[test]
    fn rendered_length_never_shorter() {
        for text in ["", "\t", "\t\t", "a\tb\tc", "plain", "    \tx"] {
            let raw = chars(text);
            let rendered = expand(&raw);
            assert!(rendered.len() >= raw.len());
            assert_eq!(rendered.len() == raw.len(), !text.contains('\t'));
            assert_eq!(raw_to_rendered(&raw, raw.len()), rendered.len());
        }
    }

    #[test]
    fn raw_to_rendered_across_tabs() {
        let raw = chars("\tab\tc");
        assert_eq!(raw_to_rendered(&raw, 0), 0);
        assert_eq!(raw_to_rendered(&raw, 1), 4);
        assert_eq!(raw_to_rendered(&raw, 2), 5);
        assert_eq!(raw_to_rendered(&raw, 3), 6);
        assert_eq!(raw_to_rendered(&raw, 4), 8);
        assert_eq!(raw_to_rendered(&raw, 5), 9);
        assert_eq!(raw_to_rendered(&raw, 100), 9);
    }

    #[test]
    fn rendered_to_raw_inside_tab() {
        let raw = chars("a\tb");
        // Columns 1..4 are all occupied by the tab at raw column 1.
        assert_eq!(rendered_to_raw(&raw, 0), 0);
        assert_eq!(rendered_to_raw(&raw, 1), 1);
        assert_eq!(rendered_to_raw(&raw, 2), 1);
        assert_eq!(rendered_to_raw(&raw, 3), 1);
        assert_eq!(rendered_to_raw(&raw, 4), 2);
        assert_eq!(rendered_to_raw(&raw, 5), 3);
        assert_eq!(rendered_to_raw(&raw, 50), 3);
    }

    #[test]
    fn round_trip_through_rendered_columns() {
        for text in ["", "abc", "\t", "a\tb", "\t\tx\ty", "ab\t\tcd\t"] {
            let raw = chars(text);
            for cx in 0..=raw.len() {
                assert_eq!(rendered_to_raw(&raw, raw_to_rendered(&raw, cx)), cx);
            }
        }
    }
}
