//! Offset translation between flat caret offsets and tree boundary points.
//!
//! Both directions walk the tree in document order and only count text
//! leaves; containers are recursed into but never counted themselves.

use crate::selection::TreePosition;
use crate::traits::{ContentTree, NodeKind};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Resolve a flat `offset` to a boundary point inside `tree`.
///
/// The walk keeps a remaining budget. A leaf shorter than the budget is
/// consumed whole; the first leaf that can absorb the rest holds the
/// position, so an offset that falls exactly between two leaves resolves to
/// the end of the earlier one. Offset 0 resolves to the start of the root.
/// Offsets past the end clamp to the end of the last leaf, or to the start
/// of the root when the tree has no leaves.
pub fn offset_to_position<T: ContentTree + ?Sized>(
    tree: &T,
    offset: usize,
) -> TreePosition<T::Node> {
    let mut budget = offset;
    let mut last_leaf = None;
    if let Some(position) = descend(tree, tree.root(), &mut budget, &mut last_leaf) {
        return position;
    }
    match last_leaf {
        Some(leaf) => TreePosition::new(leaf, tree.text_len(leaf)),
        None => TreePosition::new(tree.root(), 0),
    }
}

fn descend<T: ContentTree + ?Sized>(
    tree: &T,
    node: T::Node,
    budget: &mut usize,
    last_leaf: &mut Option<T::Node>,
) -> Option<TreePosition<T::Node>> {
    if *budget == 0 {
        return Some(TreePosition::new(node, 0));
    }
    match tree.kind(node) {
        NodeKind::Text => {
            let len = tree.text_len(node);
            *last_leaf = Some(node);
            if len < *budget {
                *budget -= len;
                None
            } else {
                Some(TreePosition::new(node, *budget))
            }
        }
        NodeKind::Container => {
            for &child in tree.children(node) {
                if let Some(position) = descend(tree, child, budget, last_leaf) {
                    return Some(position);
                }
            }
            None
        }
    }
}

/// Flat offset of a boundary point: the text length from the start of the
/// tree up to `position`.
///
/// Returns `None` if `position.node` is not part of `tree` (e.g. the host
/// selection sits in another field). Local offsets past the end of a node
/// are clamped to it.
pub fn position_to_offset<T: ContentTree + ?Sized>(
    tree: &T,
    position: TreePosition<T::Node>,
) -> Option<usize> {
    let mut acc = 0usize;
    accumulate(tree, tree.root(), position, &mut acc).then_some(acc)
}

fn accumulate<T: ContentTree + ?Sized>(
    tree: &T,
    node: T::Node,
    target: TreePosition<T::Node>,
    acc: &mut usize,
) -> bool {
    if node == target.node {
        match tree.kind(node) {
            NodeKind::Text => *acc += target.offset.min(tree.text_len(node)),
            NodeKind::Container => {
                for &child in tree.children(node).iter().take(target.offset) {
                    *acc += subtree_len(tree, child);
                }
            }
        }
        return true;
    }
    match tree.kind(node) {
        NodeKind::Text => {
            *acc += tree.text_len(node);
            false
        }
        NodeKind::Container => tree
            .children(node)
            .iter()
            .any(|&child| accumulate(tree, child, target, acc)),
    }
}

/// Text length of everything under `node`, in UTF-16 code units.
pub fn subtree_len<T: ContentTree + ?Sized>(tree: &T, node: T::Node) -> usize {
    match tree.kind(node) {
        NodeKind::Text => tree.text_len(node),
        NodeKind::Container => tree
            .children(node)
            .iter()
            .map(|&child| subtree_len(tree, child))
            .sum(),
    }
}

pub(crate) fn push_subtree_text<T: ContentTree + ?Sized>(tree: &T, node: T::Node, out: &mut String) {
    match tree.kind(node) {
        NodeKind::Text => out.push_str(tree.text(node).unwrap_or("")),
        NodeKind::Container => {
            for &child in tree.children(node) {
                push_subtree_text(tree, child, out);
            }
        }
    }
}

/// Structural fingerprint of the rendered content: leaf texts and nesting.
///
/// Two renders with the same fingerprint display the same text in the same
/// shape, so the caret does not need to be re-applied.
pub fn content_fingerprint<T: ContentTree + ?Sized>(tree: &T) -> u64 {
    fn walk<T: ContentTree + ?Sized>(tree: &T, node: T::Node, hasher: &mut DefaultHasher) {
        let kind = tree.kind(node);
        kind.hash(hasher);
        match kind {
            NodeKind::Text => tree.text(node).unwrap_or("").hash(hasher),
            NodeKind::Container => {
                let children = tree.children(node);
                children.len().hash(hasher);
                for &child in children {
                    walk(tree, child, hasher);
                }
            }
        }
    }

    let mut hasher = DefaultHasher::new();
    walk(tree, tree.root(), &mut hasher);
    hasher.finish()
}
