//! Token colouring for the demo's expression field.

use content_tree::{Node, SpanStyle, fragment, span, text};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Number,
    Ident,
    Operator,
    Paren,
    Space,
    Other,
}

fn classify(c: char) -> TokenKind {
    match c {
        '0'..='9' | '.' => TokenKind::Number,
        c if c.is_alphabetic() || c == '_' => TokenKind::Ident,
        '+' | '-' | '*' | '/' | '%' | '^' | '=' | '<' | '>' | '!' | '&' | '|' => {
            TokenKind::Operator
        }
        '(' | ')' | '[' | ']' | ',' => TokenKind::Paren,
        c if c.is_whitespace() => TokenKind::Space,
        _ => TokenKind::Other,
    }
}

fn style_for(kind: TokenKind) -> Option<SpanStyle> {
    match kind {
        TokenKind::Number => Some(SpanStyle::color(0x1a, 0x5f, 0xb4).with_class("number")),
        TokenKind::Ident => Some(SpanStyle::color(0x26, 0x26, 0x26).with_class("ident")),
        TokenKind::Operator => Some(SpanStyle::color(0xc0, 0x1c, 0x28).with_class("operator")),
        TokenKind::Paren => Some(SpanStyle::color(0x77, 0x76, 0x7b)),
        TokenKind::Other => Some(SpanStyle::color(0xe0, 0x1b, 0x24).underlined()),
        TokenKind::Space => None,
    }
}

fn push_token(children: &mut Vec<Node>, kind: TokenKind, token: &str) {
    match style_for(kind) {
        Some(style) => children.push(span(style, vec![text(token)])),
        None => children.push(text(token)),
    }
}

/// Split `value` into runs of one token kind, one span per run.
///
/// Identifiers may contain digits after their first character. Whitespace
/// stays unstyled. The flattened text always equals `value`.
pub fn highlight_expression(value: &str) -> Node {
    let mut children = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (i, c) in value.char_indices() {
        let mut kind = classify(c);
        if kind == TokenKind::Number && current == Some(TokenKind::Ident) {
            kind = TokenKind::Ident;
        }
        // Parens never merge so each gets its own span.
        let merges = current == Some(kind) && kind != TokenKind::Paren;
        if let Some(prev) = current
            && !merges
        {
            push_token(&mut children, prev, &value[start..i]);
            start = i;
        }
        current = Some(kind);
    }
    if let Some(kind) = current {
        push_token(&mut children, kind, &value[start..]);
    }
    fragment(children)
}

/// Content for a field that shows its value as-is.
pub fn plain(value: &str) -> Node {
    text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(node: &Node) -> Vec<String> {
        node.children().iter().map(Node::flattened_text).collect()
    }

    #[test]
    fn splits_into_token_runs() {
        let node = highlight_expression("sum(a1, 42) * 2");
        assert_eq!(node.flattened_text(), "sum(a1, 42) * 2");
        assert_eq!(
            runs(&node),
            vec!["sum", "(", "a1", ",", " ", "42", ")", " ", "*", " ", "2"]
        );
    }

    #[test]
    fn whitespace_is_unstyled() {
        let node = highlight_expression("a  b");
        assert_eq!(node.children()[1], text("  "));
    }

    #[test]
    fn unknown_characters_are_underlined() {
        let node = highlight_expression("a#");
        match &node.children()[1] {
            Node::Span { style, .. } => assert!(style.underline),
            other => panic!("expected span, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_has_no_children() {
        assert!(highlight_expression("").children().is_empty());
        assert_eq!(plain("x"), text("x"));
    }
}
