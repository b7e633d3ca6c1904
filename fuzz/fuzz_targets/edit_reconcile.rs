#![no_main]

use content_tree::{FieldConfig, MonospaceMeasure, Node, SpanStyle, StyledField, fragment, span, text};
use input_core::{ContentTree, FieldInput};
use libfuzzer_sys::fuzz_target;

/// One span per character so every edit crosses leaf boundaries.
fn per_char(value: &str) -> Node {
    fragment(
        value
            .chars()
            .map(|c| span(SpanStyle::default(), vec![text(c.to_string())]))
            .collect(),
    )
}

fuzz_target!(|data: &[u8]| {
    let mut field = StyledField::new(MonospaceMeasure::default(), FieldConfig::new());
    field.render(&per_char("seed"));
    field.document_mut().focus();

    for chunk in data.chunks(2) {
        let [op, arg] = match chunk {
            [op, arg] => [*op, *arg],
            [op] => [*op, 0],
            _ => return,
        };
        match op % 8 {
            0 => {
                field.apply(FieldInput::Backspace, per_char);
            }
            1 => {
                field.apply(FieldInput::Delete, per_char);
            }
            2 => {
                field.apply(FieldInput::Char(char::from(b'a' + arg % 26)), per_char);
            }
            3 => {
                let paste = if arg % 2 == 0 { "x\r\ny" } else { "😀\n" };
                field.apply(FieldInput::Paste(Some(paste.into())), per_char);
            }
            4 => {
                field.apply(FieldInput::Enter, per_char);
            }
            5 => field.document_mut().set_caret(usize::from(arg)),
            6 => field
                .document_mut()
                .set_selection_offsets(usize::from(arg / 16), usize::from(arg % 16)),
            _ => field.document_mut().move_caret_left(arg % 2 == 0),
        }

        let doc = field.document();
        let len = doc.flattened_len();
        let caret = doc.caret_offset();
        assert!(caret.is_some_and(|c| c <= len));
        assert!(!doc.flattened_text().contains(['\n', '\r']));
    }
});
