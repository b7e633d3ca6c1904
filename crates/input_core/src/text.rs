//! Single-line text utilities.

use memchr::memchr2;
use std::borrow::Cow;

/// How line breaks in pasted or typed text are flattened into a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakPolicy {
    /// Each `\r\n`, `\n`, or lone `\r` becomes one space.
    #[default]
    Space,
    /// Line breaks are removed.
    Strip,
}

/// Flatten line breaks in `s` according to `policy`.
///
/// Returns a `Cow::Borrowed` if the string contains no line breaks (fast path).
///
/// # Examples
///
/// ```
/// use input_core::{LineBreakPolicy, flatten_line_breaks};
///
/// assert_eq!(flatten_line_breaks("hello", LineBreakPolicy::Space), "hello");
/// assert_eq!(flatten_line_breaks("a\r\nb\nc", LineBreakPolicy::Space), "a b c");
/// assert_eq!(flatten_line_breaks("a\r\nb\nc", LineBreakPolicy::Strip), "abc");
/// ```
pub fn flatten_line_breaks(s: &str, policy: LineBreakPolicy) -> Cow<'_, str> {
    if memchr2(b'\r', b'\n', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' | '\n' => {
                if ch == '\r' && it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                if policy == LineBreakPolicy::Space {
                    out.push(' ');
                }
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_breaks_borrows() {
        assert!(matches!(
            flatten_line_breaks("plain", LineBreakPolicy::Space),
            Cow::Borrowed("plain")
        ));
    }

    #[test]
    fn space_policy_collapses_each_break_sequence() {
        let p = LineBreakPolicy::Space;
        assert_eq!(flatten_line_breaks("a\nb", p), "a b");
        assert_eq!(flatten_line_breaks("a\r\nb", p), "a b");
        assert_eq!(flatten_line_breaks("a\rb", p), "a b");
        assert_eq!(flatten_line_breaks("a\n\nb", p), "a  b");
        assert_eq!(flatten_line_breaks("\r\n", p), " ");
    }

    #[test]
    fn strip_policy_removes_breaks() {
        let p = LineBreakPolicy::Strip;
        assert_eq!(flatten_line_breaks("foo\nbar", p), "foobar");
        assert_eq!(flatten_line_breaks("a\r\nb\rc", p), "abc");
        assert_eq!(flatten_line_breaks("\n\r", p), "");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(
            flatten_line_breaks("€\n😀", LineBreakPolicy::Space),
            "€ 😀"
        );
    }
}
