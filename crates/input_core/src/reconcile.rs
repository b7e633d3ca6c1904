//! Caret reconciliation after the owner re-rendered the field.

use crate::offset::offset_to_position;
use crate::selection::{SelectionRange, TreePosition};
use crate::state::CaretState;
use crate::traits::EditableSurface;

/// Extra px scrolled past the caret when it overflows the right edge.
pub const DEFAULT_SCROLL_MARGIN: f32 = 2.0;

/// What a reconciliation pass applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconciled<N> {
    /// The caret's flat offset in the new content.
    pub offset: usize,
    /// The boundary point the selection was collapsed to.
    pub position: TreePosition<N>,
    /// How far the viewport was scrolled right (0 if it was not).
    pub scrolled_by: f32,
}

/// Re-apply the caret to freshly rendered content.
///
/// Shifts the retained caret offset by the length delta since the last
/// recorded length, resolves it to a boundary point, installs it as a
/// collapsed selection, and scrolls right if the caret is past the
/// viewport's right edge. Only ever scrolls right.
pub fn reconcile<S: EditableSurface + ?Sized>(
    surface: &mut S,
    state: &mut CaretState,
    scroll_margin: f32,
) -> Reconciled<S::Node> {
    let new_length = surface.flattened_len();
    let offset = state.target_for(new_length);
    log::debug!(
        target: "input_core.reconcile",
        "caret {} (recorded len {}) -> {} of {}",
        state.caret_offset,
        state.prior_length,
        offset,
        new_length
    );
    state.prior_length = new_length;
    state.caret_offset = offset;

    let position = offset_to_position(&*surface, offset);
    surface.set_selection(SelectionRange::collapsed(position));
    let scrolled_by = reveal_caret(surface, position, scroll_margin);

    Reconciled {
        offset,
        position,
        scrolled_by,
    }
}

/// Scroll right so the caret at `position` is inside the viewport.
///
/// Returns how far the surface actually scrolled, which is less than the
/// requested adjustment when the host clamps its scroll range.
pub fn reveal_caret<S: EditableSurface + ?Sized>(
    surface: &mut S,
    position: TreePosition<S::Node>,
    scroll_margin: f32,
) -> f32 {
    let Some(caret) = surface.measure_position(position) else {
        return 0.0;
    };
    let overflow = caret.right() - surface.viewport_rect().right();
    if overflow <= 0.0 {
        return 0.0;
    }
    let before = surface.scroll_left();
    let by = overflow + scroll_margin;
    log::debug!(target: "input_core.reconcile", "scroll right by {by}");
    surface.set_scroll_left(before + by);
    surface.scroll_left() - before
}
