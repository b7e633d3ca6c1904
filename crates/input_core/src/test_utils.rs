//! Minimal arena-backed surface for exercising the kernel without a renderer.

use crate::selection::{SelectionRange, TreePosition};
use crate::traits::{ContentTree, EditableSurface, NodeKind, Rect};

pub(crate) enum Shape {
    Leaf(&'static str),
    Group(Vec<Shape>),
}

enum FakeNode {
    Text(String),
    Container(Vec<usize>),
}

/// Every code unit is `unit_width` px wide; the viewport starts at x = 0.
pub(crate) struct FakeTree {
    nodes: Vec<FakeNode>,
    root: usize,
    pub selection: Option<SelectionRange<usize>>,
    pub scroll_left: f32,
    pub viewport_width: f32,
    pub unit_width: f32,
}

impl FakeTree {
    pub fn build(children: Vec<Shape>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
            selection: None,
            scroll_left: 0.0,
            viewport_width: 100.0,
            unit_width: 10.0,
        };
        tree.root = tree.push(Shape::Group(children));
        tree
    }

    fn push(&mut self, shape: Shape) -> usize {
        match shape {
            Shape::Leaf(text) => {
                self.nodes.push(FakeNode::Text(text.to_string()));
                self.nodes.len() - 1
            }
            Shape::Group(children) => {
                let ids = children.into_iter().map(|c| self.push(c)).collect();
                self.nodes.push(FakeNode::Container(ids));
                self.nodes.len() - 1
            }
        }
    }

    pub fn leaf_with_text(&self, text: &str) -> usize {
        self.nodes
            .iter()
            .position(|n| matches!(n, FakeNode::Text(t) if t == text))
            .unwrap()
    }

    /// Collapse the selection at a flat offset.
    pub fn place_caret(&mut self, offset: usize) {
        let position = crate::offset::offset_to_position(&*self, offset);
        self.selection = Some(SelectionRange::collapsed(position));
    }

    pub fn select(&mut self, anchor: usize, focus: usize) {
        let anchor = crate::offset::offset_to_position(&*self, anchor);
        let focus = crate::offset::offset_to_position(&*self, focus);
        self.selection = Some(SelectionRange::new(anchor, focus));
    }

    pub fn caret_offset(&self) -> Option<usize> {
        let sel = self.selection?;
        crate::offset::position_to_offset(self, sel.focus)
    }
}

impl ContentTree for FakeTree {
    type Node = usize;

    fn root(&self) -> usize {
        self.root
    }

    fn kind(&self, node: usize) -> NodeKind {
        match self.nodes[node] {
            FakeNode::Text(_) => NodeKind::Text,
            FakeNode::Container(_) => NodeKind::Container,
        }
    }

    fn children(&self, node: usize) -> &[usize] {
        match &self.nodes[node] {
            FakeNode::Text(_) => &[],
            FakeNode::Container(children) => children,
        }
    }

    fn text(&self, node: usize) -> Option<&str> {
        match &self.nodes[node] {
            FakeNode::Text(t) => Some(t),
            FakeNode::Container(_) => None,
        }
    }
}

impl EditableSurface for FakeTree {
    fn selection(&self) -> Option<SelectionRange<usize>> {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange<usize>) {
        self.selection = Some(range);
    }

    fn measure_position(&self, position: TreePosition<usize>) -> Option<Rect> {
        let offset = crate::offset::position_to_offset(self, position)?;
        let x = offset as f32 * self.unit_width - self.scroll_left;
        Some(Rect::new(x, 0.0, 0.0, 16.0))
    }

    fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, 16.0)
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, scroll_left: f32) {
        self.scroll_left = scroll_left;
    }
}
