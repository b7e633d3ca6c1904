//! Selection boundary points and flat offset ranges.

/// A boundary point inside a content tree.
///
/// For a text leaf, `offset` counts UTF-16 code units into its text. For a
/// container, `offset` is a child index: the point sits before that child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreePosition<N> {
    pub node: N,
    pub offset: usize,
}

impl<N> TreePosition<N> {
    #[inline]
    pub const fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A live selection as a pair of boundary points.
///
/// `anchor` is where the selection started, `focus` where it ends (the
/// caret). They are not ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange<N> {
    pub anchor: TreePosition<N>,
    pub focus: TreePosition<N>,
}

impl<N: Copy + Eq> SelectionRange<N> {
    #[inline]
    pub fn new(anchor: TreePosition<N>, focus: TreePosition<N>) -> Self {
        Self { anchor, focus }
    }

    /// A pure caret at `position`.
    #[inline]
    pub fn collapsed(position: TreePosition<N>) -> Self {
        Self {
            anchor: position,
            focus: position,
        }
    }

    /// Returns `true` if both boundary points are identical.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// A flat span of the logical value, in UTF-16 code units.
///
/// The range is always normalized such that `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl OffsetRange {
    /// Create a new range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns `true` if the range is empty (a caret).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}
