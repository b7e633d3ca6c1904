//! Content model and rendered document for styled input fields.
//!
//! Callers describe what a field shows as a small [`Node`] tree of text
//! leaves and styled spans. A [`Document`] renders that tree into an arena
//! and implements the kernel's host traits over it, so [`StyledField`] can
//! run the full edit, render, reconcile cycle without a GUI.

mod document;
mod field;
mod measure;
mod types;

pub use document::{Document, FieldGeometry, Id, NodeId};
pub use field::{FieldConfig, PlainField, StyledField};
pub use measure::{MonospaceMeasure, TextMeasure, nearest_stop};
pub use types::{Node, Rgba, SpanStyle, fragment, span, text};
