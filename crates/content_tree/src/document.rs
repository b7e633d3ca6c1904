//! The rendered side of a field: an arena built from caller content, plus
//! the selection, scroll offset and box geometry a host keeps for it.
//!
//! Node ids are arena indices assigned in document order on every render,
//! so they are only meaningful until the next [`Document::render`].

use crate::measure::{TextMeasure, nearest_stop};
use crate::types::{Node, SpanStyle};
use input_core::{
    ContentTree, EditableSurface, NodeKind, OffsetRange, Rect, SelectionRange, TreePosition,
    offset_to_position, position_to_offset,
};
use tools::utf16::{byte_offset_ceil, byte_offset_floor, utf16_len, utf16_offset_of_byte};

pub type NodeId = u32;

/// Handle to a rendered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const ROOT: Id = Id(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Box of the field in px.
///
/// `width` is the content box; the padding is added on both sides, the way
/// an inline-block with `box-sizing: content-box` lays out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub padding_left: f32,
    pub padding_right: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 162.0,
            height: 20.0,
            padding_left: 4.0,
            padding_right: 4.0,
        }
    }
}

impl FieldGeometry {
    /// Width of the whole box including padding.
    pub fn outer_width(&self) -> f32 {
        self.padding_left + self.width + self.padding_right
    }
}

#[derive(Debug)]
enum RenderedKind {
    Container,
    Text(String),
}

#[derive(Debug)]
struct Rendered {
    kind: RenderedKind,
    /// Style in effect at this node, inherited styles already applied.
    style: SpanStyle,
    children: Vec<Id>,
}

/// A field's rendered content together with its live selection and scroll.
#[derive(Debug)]
pub struct Document<M> {
    nodes: Vec<Rendered>,
    selection: Option<SelectionRange<Id>>,
    scroll_left: f32,
    geometry: FieldGeometry,
    measurer: M,
}

impl<M: TextMeasure> Document<M> {
    pub fn new(measurer: M, geometry: FieldGeometry) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            selection: None,
            scroll_left: 0.0,
            geometry,
            measurer,
        };
        doc.build(&[]);
        doc
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Replace the rendered content with `content`.
    ///
    /// A live selection survives as flat offsets, clamped to the new length.
    /// The scroll offset is clamped to the new content width.
    pub fn render(&mut self, content: &Node) {
        let kept = self.selection_offsets_directed();
        self.build(std::slice::from_ref(content));
        log::trace!(
            target: "content_tree.document",
            "rendered {} nodes, {} units",
            self.nodes.len(),
            self.flattened_len()
        );

        if let Some((anchor, focus)) = kept {
            self.set_selection_offsets(anchor, focus);
        }
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll_left());
    }

    fn build(&mut self, content: &[Node]) {
        self.nodes.clear();
        self.nodes.push(Rendered {
            kind: RenderedKind::Container,
            style: SpanStyle::default(),
            children: Vec::new(),
        });
        let root_style = SpanStyle::default();
        let children = content
            .iter()
            .map(|c| self.push(c, &root_style))
            .collect();
        self.nodes[Id::ROOT.index()].children = children;
    }

    /// Push `node` and its subtree in pre-order so ids follow document order.
    fn push(&mut self, node: &Node, inherited: &SpanStyle) -> Id {
        let id = Id(self.nodes.len() as NodeId);
        let (kind, style) = match node {
            Node::Text { text } => (RenderedKind::Text(text.clone()), inherited.clone()),
            Node::Fragment { .. } => (RenderedKind::Container, inherited.clone()),
            Node::Span { style, .. } => (RenderedKind::Container, style.inherit(inherited)),
        };
        self.nodes.push(Rendered {
            kind,
            style: style.clone(),
            children: Vec::new(),
        });

        let children: Vec<Id> = node
            .children()
            .iter()
            .map(|c| self.push(c, &style))
            .collect();
        self.nodes[id.index()].children = children;
        id
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn geometry(&self) -> FieldGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: FieldGeometry) {
        self.geometry = geometry;
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll_left());
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Style in effect at `id`.
    pub fn style(&self, id: Id) -> Option<&SpanStyle> {
        self.nodes.get(id.index()).map(|n| &n.style)
    }

    /// Text leaves with their effective style, in document order.
    pub fn text_runs(&self) -> impl Iterator<Item = (Id, &str, &SpanStyle)> {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match &n.kind {
            RenderedKind::Text(t) => Some((Id(i as NodeId), t.as_str(), &n.style)),
            RenderedKind::Container => None,
        })
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Width of all content in px.
    pub fn content_width(&self) -> f32 {
        self.text_runs()
            .map(|(_, t, s)| self.measurer.measure(t, s))
            .sum()
    }

    /// Largest scroll offset the content allows.
    pub fn max_scroll_left(&self) -> f32 {
        (self.content_width() - self.geometry.width).max(0.0)
    }

    /// x of the caret stop at flat `offset`, relative to the start of the
    /// content (no padding, no scroll).
    pub fn caret_x(&self, offset: usize) -> f32 {
        let mut remaining = offset;
        let mut x = 0.0;
        for (_, text, style) in self.text_runs() {
            let len = utf16_len(text);
            if remaining > len {
                x += self.measurer.measure(text, style);
                remaining -= len;
            } else {
                let end = byte_offset_floor(text, remaining);
                x += self.measurer.measure(&text[..end], style);
                break;
            }
        }
        x
    }

    /// Convert a content-relative x to a viewport x.
    pub fn to_viewport_x(&self, content_x: f32) -> f32 {
        self.geometry.x + self.geometry.padding_left + content_x - self.scroll_left
    }

    /// Caret box of the focus position, in viewport coordinates.
    pub fn caret_rect(&self) -> Option<Rect> {
        let focus = self.selection?.focus;
        self.measure_position(focus)
    }

    /// Caret stops: each flat offset at a character boundary with its x.
    fn caret_stops(&self) -> Vec<(usize, f32)> {
        let mut stops = vec![(0, 0.0)];
        let mut base_units = 0;
        let mut base_x = 0.0;
        for (_, text, style) in self.text_runs() {
            let mut units = base_units;
            for (i, ch) in text.char_indices() {
                let end = i + ch.len_utf8();
                units += ch.len_utf16();
                stops.push((units, base_x + self.measurer.measure(&text[..end], style)));
            }
            base_units = units;
            base_x += self.measurer.measure(text, style);
        }
        stops
    }

    // =========================================================================
    // Host selection behaviour
    // =========================================================================

    pub fn is_focused(&self) -> bool {
        self.selection.is_some()
    }

    /// Focus the field, placing the caret at the end if nothing was selected.
    pub fn focus(&mut self) {
        if self.selection.is_none() {
            self.set_caret(self.flattened_len());
        }
    }

    pub fn blur(&mut self) {
        self.selection = None;
    }

    /// `(anchor, focus)` as flat offsets.
    pub fn selection_offsets_directed(&self) -> Option<(usize, usize)> {
        let selection = self.selection?;
        let anchor = position_to_offset(self, selection.anchor)?;
        let focus = position_to_offset(self, selection.focus)?;
        Some((anchor, focus))
    }

    pub fn caret_offset(&self) -> Option<usize> {
        self.selection_offsets_directed().map(|(_, focus)| focus)
    }

    /// Select from `anchor` to `focus`. Offsets are clamped to the content
    /// and snapped down to character boundaries.
    pub fn set_selection_offsets(&mut self, anchor: usize, focus: usize) {
        let text = self.flattened_text();
        let anchor = offset_to_position(&*self, snap_to_char(&text, anchor));
        let focus = offset_to_position(&*self, snap_to_char(&text, focus));
        self.selection = Some(SelectionRange::new(anchor, focus));
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection_offsets(offset, offset);
    }

    pub fn select_all(&mut self) {
        self.set_selection_offsets(0, self.flattened_len());
    }

    pub fn move_caret_left(&mut self, extend: bool) {
        let Some((anchor, focus)) = self.selection_offsets_directed() else {
            return;
        };
        if !extend && anchor != focus {
            self.set_caret(anchor.min(focus));
            return;
        }
        let text = self.flattened_text();
        self.move_focus(anchor, prev_boundary(&text, focus), extend);
    }

    pub fn move_caret_right(&mut self, extend: bool) {
        let Some((anchor, focus)) = self.selection_offsets_directed() else {
            return;
        };
        if !extend && anchor != focus {
            self.set_caret(anchor.max(focus));
            return;
        }
        let text = self.flattened_text();
        self.move_focus(anchor, next_boundary(&text, focus), extend);
    }

    pub fn move_caret_home(&mut self, extend: bool) {
        if let Some((anchor, _)) = self.selection_offsets_directed() {
            self.move_focus(anchor, 0, extend);
        }
    }

    pub fn move_caret_end(&mut self, extend: bool) {
        if let Some((anchor, _)) = self.selection_offsets_directed() {
            self.move_focus(anchor, self.flattened_len(), extend);
        }
    }

    /// Place the caret at the stop nearest to viewport `x`. Focuses the
    /// field if needed.
    pub fn set_caret_from_x(&mut self, x: f32, extend: bool) {
        let content_x = x - self.geometry.x - self.geometry.padding_left + self.scroll_left;
        let stops = self.caret_stops();
        let xs: Vec<f32> = stops.iter().map(|&(_, x)| x).collect();
        let offset = stops[nearest_stop(&xs, content_x)].0;

        match self.selection_offsets_directed() {
            Some((anchor, _)) if extend => self.set_selection_offsets(anchor, offset),
            _ => self.set_caret(offset),
        }
    }

    /// Text covered by the selection, empty when collapsed or unfocused.
    pub fn selected_text(&self) -> String {
        let Some((anchor, focus)) = self.selection_offsets_directed() else {
            return String::new();
        };
        let range = OffsetRange::new(anchor, focus);
        let text = self.flattened_text();
        let start = byte_offset_floor(&text, range.start);
        let end = byte_offset_ceil(&text, range.end);
        text[start..end].to_string()
    }

    /// Scroll either way until the focus boundary is inside the content box.
    /// Hosts do this after navigation; edits only ever scroll right.
    pub fn scroll_focus_into_view(&mut self) {
        let Some(focus) = self.caret_offset() else {
            return;
        };
        let x = self.caret_x(focus);
        let width = self.geometry.width;
        if x < self.scroll_left {
            self.set_scroll_left(x);
        } else if x > self.scroll_left + width {
            self.set_scroll_left(x - width);
        }
    }

    fn move_focus(&mut self, anchor: usize, focus: usize, extend: bool) {
        if extend {
            self.set_selection_offsets(anchor, focus);
        } else {
            self.set_caret(focus);
        }
    }
}

fn snap_to_char(text: &str, units: usize) -> usize {
    utf16_offset_of_byte(text, byte_offset_floor(text, units))
}

fn prev_boundary(text: &str, units: usize) -> usize {
    let byte = byte_offset_floor(text, units);
    match text[..byte].chars().next_back() {
        Some(c) => utf16_offset_of_byte(text, byte) - c.len_utf16(),
        None => 0,
    }
}

fn next_boundary(text: &str, units: usize) -> usize {
    let byte = byte_offset_floor(text, units);
    let here = utf16_offset_of_byte(text, byte);
    match text[byte..].chars().next() {
        Some(c) => here + c.len_utf16(),
        None => here,
    }
}

impl<M> ContentTree for Document<M> {
    type Node = Id;

    fn root(&self) -> Id {
        Id::ROOT
    }

    fn kind(&self, node: Id) -> NodeKind {
        match self.nodes.get(node.index()).map(|n| &n.kind) {
            Some(RenderedKind::Text(_)) => NodeKind::Text,
            _ => NodeKind::Container,
        }
    }

    fn children(&self, node: Id) -> &[Id] {
        self.nodes
            .get(node.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn text(&self, node: Id) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            RenderedKind::Text(t) => Some(t),
            RenderedKind::Container => None,
        }
    }
}

impl<M: TextMeasure> EditableSurface for Document<M> {
    fn selection(&self) -> Option<SelectionRange<Id>> {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange<Id>) {
        self.selection = Some(range);
    }

    fn measure_position(&self, position: TreePosition<Id>) -> Option<Rect> {
        let offset = position_to_offset(self, position)?;
        let style = self.style(position.node).cloned().unwrap_or_default();
        let x = self.to_viewport_x(self.caret_x(offset));
        Some(Rect::new(
            x,
            self.geometry.y,
            0.0,
            self.measurer.line_height(&style),
        ))
    }

    fn viewport_rect(&self) -> Rect {
        let g = self.geometry;
        Rect::new(g.x, g.y, g.outer_width(), g.height)
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, scroll_left: f32) {
        self.scroll_left = scroll_left.clamp(0.0, self.max_scroll_left());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasure;
    use crate::types::{fragment, span, text};

    fn doc(content: &Node) -> Document<MonospaceMeasure> {
        let mut doc = Document::new(MonospaceMeasure::new(10.0), FieldGeometry::default());
        doc.render(content);
        doc
    }

    fn hello() -> Node {
        fragment(vec![
            span(SpanStyle::color(255, 0, 0), vec![text("he")]),
            span(SpanStyle::color(0, 0, 255), vec![text("llo")]),
            text("!"),
        ])
    }

    #[test]
    fn ids_follow_document_order() {
        let doc = doc(&hello());
        let leaves: Vec<_> = doc.text_runs().map(|(id, t, _)| (id, t)).collect();
        assert_eq!(leaves, vec![(Id(3), "he"), (Id(5), "llo"), (Id(6), "!")]);
        assert_eq!(doc.flattened_text(), "hello!");
        assert_eq!(doc.node_count(), 7);
    }

    #[test]
    fn span_styles_are_inherited_by_leaves() {
        let doc = doc(&span(
            SpanStyle::color(1, 2, 3).underlined(),
            vec![span(SpanStyle::color(4, 5, 6), vec![text("x")])],
        ));
        let (_, _, style) = doc.text_runs().next().unwrap();
        assert_eq!(style.color, Some((4, 5, 6, 255)));
        assert!(style.underline);
    }

    #[test]
    fn unknown_ids_are_empty_containers() {
        let doc = doc(&hello());
        assert_eq!(doc.kind(Id(99)), NodeKind::Container);
        assert!(doc.children(Id(99)).is_empty());
        assert_eq!(doc.text(Id(99)), None);
    }

    #[test]
    fn selection_survives_rerender_by_offset() {
        let mut doc = doc(&text("hello!"));
        doc.set_selection_offsets(1, 4);
        doc.render(&hello());
        assert_eq!(doc.selection_offsets_directed(), Some((1, 4)));

        doc.render(&text("hi"));
        assert_eq!(doc.selection_offsets_directed(), Some((1, 2)));
    }

    #[test]
    fn caret_x_spans_leaves() {
        let doc = doc(&hello());
        assert_eq!(doc.caret_x(0), 0.0);
        assert_eq!(doc.caret_x(2), 20.0);
        assert_eq!(doc.caret_x(4), 40.0);
        assert_eq!(doc.caret_x(6), 60.0);
        assert_eq!(doc.caret_x(60), 60.0);
    }

    #[test]
    fn measure_position_includes_padding_and_scroll() {
        let mut doc = doc(&text("x".repeat(30)));
        let rect = doc.measure_position(TreePosition::new(Id(1), 3)).unwrap();
        assert_eq!(rect.x, 34.0);

        doc.set_scroll_left(10.0);
        let rect = doc.measure_position(TreePosition::new(Id(1), 3)).unwrap();
        assert_eq!(rect.x, 24.0);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut doc = doc(&text("x".repeat(20)));
        // 200px of content in a 162px content box.
        doc.set_scroll_left(500.0);
        assert_eq!(doc.scroll_left(), 38.0);
        doc.set_scroll_left(-3.0);
        assert_eq!(doc.scroll_left(), 0.0);

        doc.set_scroll_left(38.0);
        doc.render(&text("short"));
        assert_eq!(doc.scroll_left(), 0.0);
    }

    #[test]
    fn arrows_collapse_then_move() {
        let mut doc = doc(&hello());
        doc.set_selection_offsets(1, 4);
        doc.move_caret_left(false);
        assert_eq!(doc.caret_offset(), Some(1));
        doc.move_caret_left(false);
        assert_eq!(doc.caret_offset(), Some(0));
        doc.move_caret_left(false);
        assert_eq!(doc.caret_offset(), Some(0));

        doc.set_selection_offsets(1, 4);
        doc.move_caret_right(false);
        assert_eq!(doc.caret_offset(), Some(4));
        doc.move_caret_right(true);
        assert_eq!(doc.selection_offsets_directed(), Some((4, 5)));
        doc.move_caret_end(true);
        assert_eq!(doc.selection_offsets_directed(), Some((4, 6)));
        doc.move_caret_home(false);
        assert_eq!(doc.selection_offsets_directed(), Some((0, 0)));
    }

    #[test]
    fn arrows_step_over_surrogate_pairs() {
        let mut doc = doc(&text("a😀b"));
        doc.set_caret(1);
        doc.move_caret_right(false);
        assert_eq!(doc.caret_offset(), Some(3));
        doc.move_caret_left(false);
        assert_eq!(doc.caret_offset(), Some(1));
    }

    #[test]
    fn caret_from_x_snaps_to_nearest_stop() {
        let mut doc = doc(&hello());
        // Content starts at x = 4 (padding).
        doc.set_caret_from_x(4.0 + 26.0, false);
        assert_eq!(doc.caret_offset(), Some(3));
        doc.set_caret_from_x(4.0 + 24.0, false);
        assert_eq!(doc.caret_offset(), Some(2));
        doc.set_caret_from_x(1000.0, true);
        assert_eq!(doc.selection_offsets_directed(), Some((2, 6)));
        doc.set_caret_from_x(-50.0, false);
        assert_eq!(doc.caret_offset(), Some(0));
    }

    #[test]
    fn selected_text_follows_offsets() {
        let mut doc = doc(&hello());
        assert_eq!(doc.selected_text(), "");
        doc.set_selection_offsets(5, 1);
        assert_eq!(doc.selected_text(), "ello");
        doc.set_caret(3);
        assert_eq!(doc.selected_text(), "");
    }

    #[test]
    fn navigation_scrolls_both_ways() {
        let mut doc = doc(&text("x".repeat(30)));
        doc.set_caret(30);
        doc.scroll_focus_into_view();
        assert_eq!(doc.scroll_left(), 138.0);

        doc.set_caret(5);
        doc.scroll_focus_into_view();
        assert_eq!(doc.scroll_left(), 50.0);

        doc.set_caret(10);
        doc.scroll_focus_into_view();
        assert_eq!(doc.scroll_left(), 50.0);
    }

    #[test]
    fn focus_places_caret_at_end_and_blur_clears() {
        let mut doc = doc(&hello());
        assert!(!doc.is_focused());
        doc.focus();
        assert_eq!(doc.caret_offset(), Some(6));
        doc.blur();
        assert_eq!(doc.caret_offset(), None);
    }

    #[test]
    fn empty_document_focuses_at_root() {
        let mut doc = Document::new(MonospaceMeasure::default(), FieldGeometry::default());
        doc.focus();
        assert_eq!(
            doc.selection().map(|s| s.focus),
            Some(TreePosition::new(Id::ROOT, 0))
        );
        assert_eq!(doc.caret_rect().map(|r| r.x), Some(4.0));
    }

    #[test]
    fn selection_offsets_snap_out_of_surrogate_pairs() {
        let mut doc = doc(&fragment(vec![text("a😀"), text("b")]));
        doc.set_caret(2);
        assert_eq!(doc.caret_offset(), Some(1));

        doc.set_selection_offsets(4, 2);
        assert_eq!(doc.selection_offsets_directed(), Some((4, 1)));

        doc.set_caret(40);
        assert_eq!(doc.caret_offset(), Some(4));
    }
}
