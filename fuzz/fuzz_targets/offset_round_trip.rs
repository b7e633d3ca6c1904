#![no_main]

use content_tree::{Document, FieldGeometry, MonospaceMeasure, Node, SpanStyle, fragment, span, text};
use input_core::{ContentTree, offset_to_position, position_to_offset};
use libfuzzer_sys::fuzz_target;

/// Build a tree from the input: `[` opens a span, `]` closes one, `|` splits
/// a leaf, everything else is text.
fn tree_from(input: &str) -> Node {
    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];
    let mut leaf = String::new();
    for c in input.chars() {
        match c {
            '[' | ']' | '|' => {
                if let Some(top) = stack.last_mut() {
                    top.push(text(std::mem::take(&mut leaf)));
                }
                if c == '[' {
                    stack.push(Vec::new());
                } else if c == ']' && stack.len() > 1 {
                    if let Some(children) = stack.pop() {
                        if let Some(top) = stack.last_mut() {
                            top.push(span(SpanStyle::default(), children));
                        }
                    }
                }
            }
            _ => leaf.push(c),
        }
    }
    while let Some(mut children) = stack.pop() {
        children.push(text(std::mem::take(&mut leaf)));
        match stack.last_mut() {
            Some(top) => top.push(span(SpanStyle::default(), children)),
            None => return fragment(children),
        }
    }
    fragment(Vec::new())
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let content = tree_from(input);
    let mut doc = Document::new(MonospaceMeasure::default(), FieldGeometry::default());
    doc.render(&content);

    let len = doc.flattened_len();
    assert_eq!(doc.flattened_text(), content.flattened_text());
    for offset in 0..=len + 1 {
        let position = offset_to_position(&doc, offset);
        assert_eq!(position_to_offset(&doc, position), Some(offset.min(len)));
    }
});
