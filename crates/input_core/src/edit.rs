//! Edit interception: derive the next logical value from an input intent and
//! the current selection.
//!
//! The kernel never mutates the rendered content. It computes the spliced
//! value and the caret offset the value implies, and the owner re-renders.

use crate::offset::position_to_offset;
use crate::selection::OffsetRange;
use crate::text::{LineBreakPolicy, flatten_line_breaks};
use crate::traits::EditableSurface;
use std::borrow::Cow;
use tools::utf16::{byte_offset_ceil, byte_offset_floor, utf16_len, utf16_offset_of_byte};

/// A low-level input intent delivered to a focused field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldInput {
    /// A key press that produces one character.
    Char(char),
    /// Text committed in one piece by the host (e.g. a composed string).
    Text(String),
    Backspace,
    Delete,
    /// The commit key. Never changes the value.
    Enter,
    /// A paste; `None` when the clipboard had no plain-text payload.
    Paste(Option<String>),
}

/// The result of splicing an input into the current value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub value: String,
    /// Caret offset in `value`, in UTF-16 code units.
    pub caret: usize,
    /// The span of the old value that was replaced, after clamping.
    pub replaced: OffsetRange,
    /// `false` when the splice left the value untouched.
    pub changed: bool,
}

/// What the interceptor decided for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intercept {
    /// The commit key was pressed.
    Commit,
    /// No live selection inside the field; the input is left to the host.
    Unfocused,
    Edit(Edit),
}

/// Splice `input` into `text` over `range` (UTF-16 offsets).
///
/// A collapsed `range` is first widened by one unit to the left for
/// `Backspace` and to the right for `Delete`. Offsets are clamped to the
/// text, and a span that cuts through a surrogate pair is widened to the
/// whole character. A collapsed insertion point inside a pair moves to the
/// start of that character. Returns `None` for [`FieldInput::Enter`].
pub fn compute_edit(
    text: &str,
    range: OffsetRange,
    input: &FieldInput,
    line_breaks: LineBreakPolicy,
) -> Option<Edit> {
    let mut start = range.start;
    let mut end = range.end;
    if range.is_empty() {
        match input {
            FieldInput::Backspace => start = start.saturating_sub(1),
            FieldInput::Delete => end = end.saturating_add(1),
            _ => {}
        }
    }

    let mut buf = [0u8; 4];
    let inserted: Cow<'_, str> = match input {
        FieldInput::Enter => return None,
        FieldInput::Backspace | FieldInput::Delete => Cow::Borrowed(""),
        FieldInput::Char(c) => flatten_line_breaks(c.encode_utf8(&mut buf), line_breaks),
        FieldInput::Text(t) => flatten_line_breaks(t, line_breaks),
        FieldInput::Paste(payload) => match payload {
            Some(p) => flatten_line_breaks(p, line_breaks),
            None => Cow::Borrowed(""),
        },
    };

    // An insertion point never widens: inside a surrogate pair it snaps to
    // the start of the character instead of swallowing it.
    let start_byte = byte_offset_floor(text, start);
    let end_byte = if start == end {
        start_byte
    } else {
        byte_offset_ceil(text, end).max(start_byte)
    };

    let mut value = String::with_capacity(text.len() - (end_byte - start_byte) + inserted.len());
    value.push_str(&text[..start_byte]);
    value.push_str(&inserted);
    value.push_str(&text[end_byte..]);

    let start_units = utf16_offset_of_byte(text, start_byte);
    let end_units = utf16_offset_of_byte(text, end_byte);
    Some(Edit {
        caret: start_units + utf16_len(&inserted),
        replaced: OffsetRange::new(start_units, end_units),
        changed: start_byte != end_byte || !inserted.is_empty(),
        value,
    })
}

/// Read the live selection from `surface` and compute the edit for `input`.
///
/// Without a selection the field is not focused and every input, the
/// commit key included, is left to the host.
pub fn intercept<S: EditableSurface + ?Sized>(
    surface: &S,
    input: &FieldInput,
    line_breaks: LineBreakPolicy,
) -> Intercept {
    let Some(selection) = surface.selection() else {
        return Intercept::Unfocused;
    };
    if *input == FieldInput::Enter {
        return Intercept::Commit;
    }
    let (Some(anchor), Some(focus)) = (
        position_to_offset(surface, selection.anchor),
        position_to_offset(surface, selection.focus),
    ) else {
        return Intercept::Unfocused;
    };

    let text = surface.flattened_text();
    let range = OffsetRange::new(anchor, focus);
    log::trace!(
        target: "input_core.edit",
        "intercept {input:?} over {}..{} of {} units",
        range.start,
        range.end,
        utf16_len(&text)
    );

    match compute_edit(&text, range, input, line_breaks) {
        Some(edit) => Intercept::Edit(edit),
        None => Intercept::Commit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeTree, Shape::*};

    fn edit_at(text: &str, caret: usize, input: FieldInput) -> Edit {
        compute_edit(text, OffsetRange::caret(caret), &input, LineBreakPolicy::Space).unwrap()
    }

    #[test]
    fn backspace_at_end() {
        let e = edit_at("hello", 5, FieldInput::Backspace);
        assert_eq!(e.value, "hell");
        assert_eq!(e.caret, 4);
        assert!(e.changed);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let e = edit_at("hello", 0, FieldInput::Backspace);
        assert_eq!(e.value, "hello");
        assert_eq!(e.caret, 0);
        assert!(!e.changed);
    }

    #[test]
    fn delete_at_start() {
        let e = edit_at("hello", 0, FieldInput::Delete);
        assert_eq!(e.value, "ello");
        assert_eq!(e.caret, 0);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let e = edit_at("hello", 5, FieldInput::Delete);
        assert_eq!(e.value, "hello");
        assert_eq!(e.caret, 5);
        assert!(!e.changed);
    }

    #[test]
    fn typing_inserts_at_caret() {
        let e = edit_at("ab", 1, FieldInput::Char('X'));
        assert_eq!(e.value, "aXb");
        assert_eq!(e.caret, 2);
    }

    #[test]
    fn paste_flattens_line_breaks_before_measuring() {
        let e = edit_at("", 0, FieldInput::Paste(Some("foo\nbar".into())));
        assert_eq!(e.value, "foo bar");
        assert_eq!(e.caret, 7);

        let e = edit_at("<>", 1, FieldInput::Paste(Some("a\r\nb\nc".into())));
        assert_eq!(e.value, "<a b c>");
        assert_eq!(e.caret, 6);

        let strip = compute_edit(
            "",
            OffsetRange::caret(0),
            &FieldInput::Paste(Some("foo\nbar".into())),
            LineBreakPolicy::Strip,
        )
        .unwrap();
        assert_eq!(strip.value, "foobar");
        assert_eq!(strip.caret, 6);
    }

    #[test]
    fn empty_paste_deletes_selection_only() {
        let e = compute_edit(
            "hello",
            OffsetRange::new(1, 3),
            &FieldInput::Paste(None),
            LineBreakPolicy::Space,
        )
        .unwrap();
        assert_eq!(e.value, "hlo");
        assert_eq!(e.caret, 1);

        let e = edit_at("hello", 2, FieldInput::Paste(None));
        assert!(!e.changed);
    }

    #[test]
    fn range_removal_ignores_key_direction() {
        for input in [FieldInput::Backspace, FieldInput::Delete] {
            let e = compute_edit("abcdef", OffsetRange::new(4, 1), &input, LineBreakPolicy::Space)
                .unwrap();
            assert_eq!(e.value, "aef");
            assert_eq!(e.caret, 1);
            assert_eq!(e.replaced, OffsetRange::new(1, 4));
        }
    }

    #[test]
    fn typing_replaces_selection() {
        let e = compute_edit(
            "abcdef",
            OffsetRange::new(1, 4),
            &FieldInput::Char('Z'),
            LineBreakPolicy::Space,
        )
        .unwrap();
        assert_eq!(e.value, "aZef");
        assert_eq!(e.caret, 2);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let e = compute_edit(
            "abc",
            OffsetRange::new(2, 40),
            &FieldInput::Char('!'),
            LineBreakPolicy::Space,
        )
        .unwrap();
        assert_eq!(e.value, "ab!");
        assert_eq!(e.caret, 3);

        let e = edit_at("abc", 90, FieldInput::Char('!'));
        assert_eq!(e.value, "abc!");
        assert_eq!(e.caret, 4);
    }

    #[test]
    fn surrogate_pairs_are_removed_whole() {
        // '😀' occupies units 1..3
        let e = edit_at("a😀b", 3, FieldInput::Backspace);
        assert_eq!(e.value, "ab");
        assert_eq!(e.caret, 1);

        let e = edit_at("a😀b", 1, FieldInput::Delete);
        assert_eq!(e.value, "ab");
        assert_eq!(e.caret, 1);
    }

    #[test]
    fn insertion_inside_surrogate_pair_keeps_the_character() {
        let e = edit_at("a😀b", 2, FieldInput::Char('X'));
        assert_eq!(e.value, "aX😀b");
        assert_eq!(e.caret, 2);
        assert_eq!(e.replaced, OffsetRange::caret(1));
        assert!(e.changed);

        let e = edit_at("a😀b", 2, FieldInput::Paste(Some("12".into())));
        assert_eq!(e.value, "a12😀b");
        assert_eq!(e.caret, 3);

        let e = edit_at("a😀b", 2, FieldInput::Paste(None));
        assert_eq!(e.value, "a😀b");
        assert!(!e.changed);
    }

    #[test]
    fn enter_is_not_an_edit() {
        assert_eq!(
            compute_edit("abc", OffsetRange::caret(1), &FieldInput::Enter, LineBreakPolicy::Space),
            None
        );
    }

    #[test]
    fn intercept_reads_selection_from_tree() {
        let mut tree = FakeTree::build(vec![Leaf("he"), Group(vec![Leaf("llo")])]);
        tree.place_caret(5);
        let Intercept::Edit(e) = intercept(&tree, &FieldInput::Backspace, LineBreakPolicy::Space)
        else {
            panic!("expected an edit");
        };
        assert_eq!(e.value, "hell");
        assert_eq!(e.caret, 4);
    }

    #[test]
    fn intercept_uses_ordered_range_for_backwards_selection() {
        let mut tree = FakeTree::build(vec![Leaf("he"), Group(vec![Leaf("llo")])]);
        tree.select(4, 1);
        let Intercept::Edit(e) = intercept(&tree, &FieldInput::Char('-'), LineBreakPolicy::Space)
        else {
            panic!("expected an edit");
        };
        assert_eq!(e.value, "h-o");
        assert_eq!(e.caret, 2);
    }

    #[test]
    fn intercept_without_selection_is_unfocused() {
        let tree = FakeTree::build(vec![Leaf("abc")]);
        assert_eq!(
            intercept(&tree, &FieldInput::Char('x'), LineBreakPolicy::Space),
            Intercept::Unfocused
        );
        assert_eq!(
            intercept(&tree, &FieldInput::Enter, LineBreakPolicy::Space),
            Intercept::Unfocused
        );
    }

    #[test]
    fn enter_commits_only_with_a_selection() {
        let mut tree = FakeTree::build(vec![Leaf("abc")]);
        tree.place_caret(1);
        assert_eq!(
            intercept(&tree, &FieldInput::Enter, LineBreakPolicy::Space),
            Intercept::Commit
        );
    }
}
