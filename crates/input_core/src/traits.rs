//! Host capability traits.
//!
//! The kernel never touches a concrete node tree or selection object. A host
//! (an in-memory document, a GUI toolkit adapter, a test fake) exposes its
//! rendered content through [`ContentTree`] and its live selection, geometry
//! and scroll state through [`EditableSurface`].
//!
//! # Design Principles
//!
//! - Node handles are small `Copy` values chosen by the host
//! - All lengths and offsets are UTF-16 code units
//! - Geometry is only needed for keeping the caret scrolled into view

use crate::selection::{SelectionRange, TreePosition};
use std::fmt;

/// What a node contributes to the flattened text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A leaf holding text. Its text is part of the flattened text.
    Text,
    /// A node that only groups children. It contributes no text itself.
    Container,
}

/// A rectangle in px, relative to whatever origin the host uses consistently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Read-only traversal of a rendered content tree.
pub trait ContentTree {
    /// Opaque node handle.
    type Node: Copy + Eq + fmt::Debug;

    /// The editable root. Its children are the rendered content.
    fn root(&self) -> Self::Node;

    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Children in document order. Text leaves have none.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Text of a leaf, `None` for containers.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Length of a leaf in UTF-16 code units (0 for containers).
    #[inline]
    fn text_len(&self, node: Self::Node) -> usize {
        self.text(node).map(tools::utf16::utf16_len).unwrap_or(0)
    }

    /// Concatenation of all leaf texts in document order.
    fn flattened_text(&self) -> String {
        let mut out = String::new();
        crate::offset::push_subtree_text(self, self.root(), &mut out);
        out
    }

    /// Length of [`ContentTree::flattened_text`] in UTF-16 code units.
    fn flattened_len(&self) -> usize {
        crate::offset::subtree_len(self, self.root())
    }
}

/// A rendered tree that also owns a live selection and a horizontally
/// scrollable viewport.
pub trait EditableSurface: ContentTree {
    // =========================================================================
    // Selection
    // =========================================================================

    /// The active selection, or `None` if there is none inside this field.
    fn selection(&self) -> Option<SelectionRange<Self::Node>>;

    /// Install `range` as the active selection.
    fn set_selection(&mut self, range: SelectionRange<Self::Node>);

    // =========================================================================
    // Geometry & Scroll
    // =========================================================================

    /// Bounding box of a collapsed range at `position`, in the same
    /// coordinate space as [`EditableSurface::viewport_rect`].
    ///
    /// Returns `None` when the host cannot measure (e.g. nothing laid out yet).
    fn measure_position(&self, position: TreePosition<Self::Node>) -> Option<Rect>;

    /// The field's visible box.
    fn viewport_rect(&self) -> Rect;

    fn scroll_left(&self) -> f32;

    fn set_scroll_left(&mut self, scroll_left: f32);
}
