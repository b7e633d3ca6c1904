/// Colour as `(r, g, b, a)`.
pub type Rgba = (u8, u8, u8, u8);

/// Visual style a [`Node::Span`] applies to everything below it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    pub color: Option<Rgba>,
    pub underline: bool,
    pub class: Option<String>,
}

impl SpanStyle {
    pub fn color(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Some((r, g, b, 255)),
            ..Self::default()
        }
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// `self` applied on top of an inherited `parent` style.
    pub fn inherit(&self, parent: &SpanStyle) -> SpanStyle {
        SpanStyle {
            color: self.color.or(parent.color),
            underline: self.underline || parent.underline,
            class: self.class.clone().or_else(|| parent.class.clone()),
        }
    }
}

/// Caller-supplied content: the visual representation of a field's value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Fragment { children: Vec<Node> },
    Span { style: SpanStyle, children: Vec<Node> },
    Text { text: String },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Fragment { children } | Node::Span { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Fragment { children } | Node::Span { children, .. } => Some(children),
            Node::Text { .. } => None,
        }
    }

    /// Concatenated text of all leaves in document order.
    pub fn flattened_text(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text } => out.push_str(text),
                _ => {
                    for c in node.children() {
                        walk(c, out);
                    }
                }
            }
        }

        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}

/// A text leaf.
pub fn text(text: impl Into<String>) -> Node {
    Node::Text { text: text.into() }
}

/// A styled container.
pub fn span(style: SpanStyle, children: Vec<Node>) -> Node {
    Node::Span { style, children }
}

/// An unstyled container.
pub fn fragment(children: Vec<Node>) -> Node {
    Node::Fragment { children }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_text_walks_in_document_order() {
        let node = fragment(vec![
            text("let "),
            span(SpanStyle::color(200, 0, 0), vec![text("x"), span(SpanStyle::default(), vec![])]),
            text(" = 1"),
        ]);
        assert_eq!(node.flattened_text(), "let x = 1");
    }

    #[test]
    fn inherit_prefers_own_values() {
        let parent = SpanStyle::color(1, 2, 3).underlined().with_class("kw");
        let child = SpanStyle::color(9, 9, 9);
        let merged = child.inherit(&parent);
        assert_eq!(merged.color, Some((9, 9, 9, 255)));
        assert!(merged.underline);
        assert_eq!(merged.class.as_deref(), Some("kw"));
    }

    #[test]
    fn text_has_no_children() {
        let mut leaf = text("a");
        assert!(leaf.children().is_empty());
        assert!(leaf.children_mut().is_none());
    }
}
