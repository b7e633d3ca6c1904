//! Fields that own their rendered document.
//!
//! [`StyledField`] pairs the kernel's [`StyledInput`] with a [`Document`] and
//! enforces the ordering the kernel relies on: an edit is handled, the owner
//! produces new content for the new value, the content is rendered, and only
//! then is the caret reconciled.

use crate::document::{Document, FieldGeometry, Id};
use crate::measure::TextMeasure;
use crate::types::{Node, text};
use input_core::{
    Callbacks, ContentTree, FieldInput, FieldOptions, InputResponse, Reconciled, StyledInput,
};

/// Construction-time configuration of a field.
#[derive(Debug, Default)]
pub struct FieldConfig {
    pub options: FieldOptions,
    pub callbacks: Callbacks,
    pub geometry: FieldGeometry,
    /// Shown in place of the content while the content is empty.
    pub placeholder: Option<Node>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn geometry(mut self, geometry: FieldGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn placeholder(mut self, placeholder: Node) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.callbacks = self.callbacks.on_change(f);
        self
    }

    pub fn on_enter(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks = self.callbacks.on_enter(f);
        self
    }
}

/// A field showing caller-supplied styled content.
#[derive(Debug)]
pub struct StyledField<M> {
    input: StyledInput,
    document: Document<M>,
    placeholder: Option<Node>,
}

impl<M: TextMeasure> StyledField<M> {
    /// Create a field with empty content and run the mount pass.
    pub fn new(measurer: M, config: FieldConfig) -> Self {
        let FieldConfig {
            options,
            callbacks,
            geometry,
            placeholder,
        } = config;
        let mut field = Self {
            // An in-memory document has no stylesheet; the rule is only recorded.
            input: StyledInput::new(options, callbacks, |_| {}),
            document: Document::new(measurer, geometry),
            placeholder,
        };
        field.input.after_render(&mut field.document);
        field
    }

    pub fn document(&self) -> &Document<M> {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document<M> {
        &mut self.document
    }

    pub fn input(&self) -> &StyledInput {
        &self.input
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        self.input.callbacks_mut()
    }

    /// The value the rendered content currently represents.
    pub fn value(&self) -> String {
        self.document.flattened_text()
    }

    /// Render `content` and reconcile the caret if an edit is waiting.
    pub fn render(&mut self, content: &Node) -> Option<Reconciled<Id>> {
        self.document.render(content);
        self.input.after_render(&mut self.document)
    }

    /// Handle one input against the current content. The caller must
    /// [`render`](Self::render) content for `changed` before the next input.
    pub fn handle_input(&mut self, input: FieldInput) -> InputResponse {
        self.input.handle_input(&self.document, input)
    }

    /// Handle one input and, if it changed the value, render the content
    /// `highlight` produces for the new value.
    pub fn apply(&mut self, input: FieldInput, highlight: impl FnOnce(&str) -> Node) -> InputResponse {
        let response = self.handle_input(input);
        if let Some(value) = &response.changed {
            let content = highlight(value);
            self.render(&content);
        }
        response
    }

    /// The placeholder, when it should be shown.
    pub fn placeholder(&self) -> Option<&Node> {
        if StyledInput::placeholder_visible(&self.document) {
            self.placeholder.as_ref()
        } else {
            None
        }
    }
}

/// A styled field whose content is the bare value.
#[derive(Debug)]
pub struct PlainField<M> {
    inner: StyledField<M>,
}

impl<M: TextMeasure> PlainField<M> {
    pub fn new(measurer: M, config: FieldConfig, value: &str) -> Self {
        let mut inner = StyledField::new(measurer, config);
        inner.render(&text(value));
        Self { inner }
    }

    pub fn value(&self) -> String {
        self.inner.value()
    }

    /// Replace the value from outside, as an owner resetting the field would.
    pub fn set_value(&mut self, value: &str) {
        self.inner.render(&text(value));
    }

    pub fn apply(&mut self, input: FieldInput) -> InputResponse {
        self.inner.apply(input, |v| text(v))
    }

    pub fn field(&self) -> &StyledField<M> {
        &self.inner
    }

    pub fn field_mut(&mut self) -> &mut StyledField<M> {
        &mut self.inner
    }
}
