//! # input_core
//!
//! UI-agnostic caret and edit reconciliation for styled single-line fields.
//!
//! A styled field shows caller-supplied content (coloured spans, tokens)
//! as the rendering of a plain-text value, yet behaves like a normal text
//! input. This crate is the kernel that makes that work:
//! - [`offset_to_position`] / [`position_to_offset`]: translate between a flat
//!   caret offset and a boundary point inside a tree of nested nodes
//! - [`intercept`] / [`compute_edit`]: derive the next value from an input
//!   intent and the live selection
//! - [`reconcile`]: re-apply the caret after the owner re-rendered content
//! - [`StyledInput`]: the retained state and callbacks tying these together
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any graphics framework (egui, wgpu, etc.)
//! - A concrete node tree or selection implementation
//!
//! Hosts implement [`ContentTree`] and [`EditableSurface`]. All offsets are
//! UTF-16 code units.
//!
//! ## Integration
//!
//! ```ignore
//! let mut field = StyledInput::new(FieldOptions::default(), callbacks, |_| {});
//! // after every render of the host tree:
//! field.after_render(&mut surface);
//! // for every input while focused:
//! let resp = field.handle_input(&surface, FieldInput::Char('a'));
//! if resp.suppress_default { /* swallow the platform event */ }
//! ```

mod edit;
mod field;
mod offset;
mod reconcile;
mod selection;
mod state;
pub mod style;
mod text;
mod traits;

#[cfg(test)]
mod test_utils;

pub use edit::{Edit, FieldInput, Intercept, compute_edit, intercept};
pub use field::{Callbacks, FieldOptions, InputResponse, StyledInput};
pub use offset::{content_fingerprint, offset_to_position, position_to_offset, subtree_len};
pub use reconcile::{DEFAULT_SCROLL_MARGIN, Reconciled, reconcile, reveal_caret};
pub use selection::{OffsetRange, SelectionRange, TreePosition};
pub use state::CaretState;
pub use text::{LineBreakPolicy, flatten_line_breaks};
pub use traits::{ContentTree, EditableSurface, NodeKind, Rect};
