//! The field component core: retained caret state, options and callbacks,
//! wired to the edit interceptor and the caret reconciler.
//!
//! Every input goes through [`StyledInput::handle_input`], which records the
//! intended caret before the owner hears about the new value. Every render
//! goes through [`StyledInput::after_render`], which consumes that record.
//! Calling them in that order per input is the whole ordering contract.

use crate::edit::{FieldInput, Intercept, intercept};
use crate::offset::content_fingerprint;
use crate::reconcile::{DEFAULT_SCROLL_MARGIN, Reconciled, reconcile};
use crate::state::CaretState;
use crate::style::ensure_style_installed;
use crate::text::LineBreakPolicy;
use crate::traits::{ContentTree, EditableSurface};
use std::fmt;
use tools::utf16::utf16_len;

/// Behavioural options of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldOptions {
    /// How line breaks in pasted text are flattened.
    pub line_breaks: LineBreakPolicy,
    /// Extra px scrolled past an overflowing caret.
    pub scroll_margin: f32,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            line_breaks: LineBreakPolicy::Space,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

/// Owner callbacks.
#[derive(Default)]
pub struct Callbacks {
    on_change: Option<Box<dyn FnMut(&str)>>,
    on_enter: Option<Box<dyn FnMut()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the new value whenever an edit changes it.
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called once per commit key press.
    pub fn on_enter(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

/// What handling one input did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// The new logical value, if the input changed it.
    pub changed: Option<String>,
    /// The commit key was pressed.
    pub committed: bool,
    /// The host must not apply its own default handling for this input.
    pub suppress_default: bool,
}

impl InputResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn suppressed() -> Self {
        Self {
            suppress_default: true,
            ..Self::default()
        }
    }
}

/// A styled single-line field, independent of how content is rendered.
#[derive(Debug)]
pub struct StyledInput {
    state: CaretState,
    options: FieldOptions,
    callbacks: Callbacks,
    /// Fingerprint of the content seen by the previous render pass.
    rendered: Option<u64>,
    /// An edit was recorded and has not been reconciled yet.
    pending_edit: bool,
}

impl StyledInput {
    /// Create a field. The first field in the process installs the shared
    /// style rule through `install_style`.
    pub fn new(
        options: FieldOptions,
        callbacks: Callbacks,
        install_style: impl FnOnce(&crate::style::StyleRule),
    ) -> Self {
        ensure_style_installed(install_style);
        Self {
            state: CaretState::default(),
            options,
            callbacks,
            rendered: None,
            pending_edit: false,
        }
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn caret_state(&self) -> CaretState {
        self.state
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Handle one input against the currently rendered `surface`.
    ///
    /// Edits update the retained caret, then fire `on_change`. The commit
    /// key fires `on_enter`. Without a live selection nothing happens and
    /// the input is not suppressed.
    pub fn handle_input<S: EditableSurface + ?Sized>(
        &mut self,
        surface: &S,
        input: FieldInput,
    ) -> InputResponse {
        match intercept(surface, &input, self.options.line_breaks) {
            Intercept::Commit => {
                if let Some(on_enter) = self.callbacks.on_enter.as_mut() {
                    on_enter();
                }
                InputResponse {
                    committed: true,
                    ..InputResponse::suppressed()
                }
            }
            Intercept::Unfocused => {
                log::trace!(target: "input_core.field", "no selection, ignoring {input:?}");
                InputResponse::ignored()
            }
            Intercept::Edit(edit) if !edit.changed => InputResponse::suppressed(),
            Intercept::Edit(edit) => {
                self.state.record_edit(edit.caret, utf16_len(&edit.value));
                self.pending_edit = true;
                if let Some(on_change) = self.callbacks.on_change.as_mut() {
                    on_change(&edit.value);
                }
                InputResponse {
                    changed: Some(edit.value),
                    ..InputResponse::suppressed()
                }
            }
        }
    }

    /// Run after every render of `surface`.
    ///
    /// Reconciles the caret only when the rendered content differs from the
    /// previous pass and an edit is waiting for it. The first pass after
    /// mount only records the baseline length. Content that changed without
    /// an edit re-bases the recorded length and leaves the selection alone.
    pub fn after_render<S: EditableSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Option<Reconciled<S::Node>> {
        let fingerprint = content_fingerprint(&*surface);
        let previous = self.rendered.replace(fingerprint);

        match previous {
            None => {
                self.state = CaretState::mounted(surface.flattened_len());
                None
            }
            Some(previous) if previous == fingerprint => {
                if std::mem::take(&mut self.pending_edit) {
                    // The owner rejected the edit; the old content stands.
                    self.state.prior_length = surface.flattened_len();
                }
                None
            }
            Some(_) if !std::mem::take(&mut self.pending_edit) => {
                self.state.prior_length = surface.flattened_len();
                None
            }
            Some(_) => Some(reconcile(surface, &mut self.state, self.options.scroll_margin)),
        }
    }

    /// Whether a placeholder should be shown for `tree`.
    pub fn placeholder_visible<T: ContentTree + ?Sized>(tree: &T) -> bool {
        tree.flattened_len() == 0
    }
}
