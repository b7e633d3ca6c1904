//! An egui widget hosting a [`StyledField`].
//!
//! The widget owns nothing but borrows: the field (document + kernel state),
//! the owner's value, and the owner's highlighter that turns a value into
//! styled content. Each edit runs through [`StyledField::apply`], so the new
//! content is rendered and the caret reconciled before the next event in the
//! same frame is looked at.

use crate::input::{FieldAction, actions_from_events};
use crate::text_measurer::{DEFAULT_TEXT_COLOR, EguiTextMeasurer, span_color};
use content_tree::{FieldGeometry, Node, SpanStyle, StyledField, TextMeasure};
use egui::{
    Align2, Color32, EventFilter, Id, Painter, Rect, Response, Sense, Stroke, StrokeKind, Ui,
    Widget, pos2, vec2,
};
use input_core::{FieldInput, OffsetRange};

pub const PADDING_TOP: f32 = 2.8;
pub const PADDING_BOTTOM: f32 = 2.5;
pub const BORDER_COLOR: Color32 = Color32::from_rgb(0x76, 0x76, 0x76);
pub const PLACEHOLDER_COLOR: Color32 = Color32::GRAY;

fn commit_key(id: Id) -> Id {
    id.with("styled_input_committed")
}

fn value_key(id: Id) -> Id {
    id.with("styled_input_value")
}

/// Single-line input showing `highlight(value)`.
pub struct StyledInputWidget<'a> {
    field: &'a mut StyledField<EguiTextMeasurer>,
    value: &'a mut String,
    highlight: &'a dyn Fn(&str) -> Node,
}

impl<'a> StyledInputWidget<'a> {
    pub fn new(
        field: &'a mut StyledField<EguiTextMeasurer>,
        value: &'a mut String,
        highlight: &'a dyn Fn(&str) -> Node,
    ) -> Self {
        Self {
            field,
            value,
            highlight,
        }
    }

    /// Whether the commit key was pressed in the frame that produced
    /// `response`. Reading the flag clears it, and the next frame resets it.
    pub fn committed(response: &Response) -> bool {
        let key = commit_key(response.id);
        response.ctx.data_mut(|d| {
            let hit = d.get_temp::<bool>(key).unwrap_or(false);
            d.remove::<bool>(key);
            hit
        })
    }

    fn sync_value(&mut self, ui: &Ui, id: Id) {
        let seen = ui.data(|d| d.get_temp::<String>(value_key(id)));
        if seen.as_deref() != Some(self.value.as_str()) {
            log::debug!(target: "gfx.widget", "value set by owner: {:?}", self.value);
            self.field.render(&(self.highlight)(self.value));
            ui.data_mut(|d| d.insert_temp(value_key(id), self.value.clone()));
        }
    }

    fn run_action(&mut self, ui: &Ui, response: &mut Response, action: FieldAction) {
        let doc = self.field.document_mut();
        match action {
            FieldAction::Edit(input) => return self.edit(ui, response, input),
            FieldAction::Left { extend } => doc.move_caret_left(extend),
            FieldAction::Right { extend } => doc.move_caret_right(extend),
            FieldAction::Home { extend } => doc.move_caret_home(extend),
            FieldAction::End { extend } => doc.move_caret_end(extend),
            FieldAction::SelectAll => doc.select_all(),
            FieldAction::Copy => {
                let selected = doc.selected_text();
                if !selected.is_empty() {
                    ui.ctx().copy_text(selected);
                }
            }
            FieldAction::Cut => {
                let selected = doc.selected_text();
                if !selected.is_empty() {
                    ui.ctx().copy_text(selected);
                    self.edit(ui, response, FieldInput::Delete);
                }
                return;
            }
        }
        // Navigation keeps the focus visible; edits leave scrolling to the
        // reconciler.
        self.field.document_mut().scroll_focus_into_view();
    }

    fn edit(&mut self, ui: &Ui, response: &mut Response, input: FieldInput) {
        let highlight = self.highlight;
        let result = self.field.apply(input, |v| highlight(v));
        if let Some(changed) = result.changed {
            *self.value = changed;
            ui.data_mut(|d| d.insert_temp(value_key(response.id), self.value.clone()));
            response.mark_changed();
        }
        if result.committed {
            ui.data_mut(|d| d.insert_temp(commit_key(response.id), true));
        }
    }
}

impl Widget for StyledInputWidget<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let geometry = self.field.document().geometry();
        let line_h = self
            .field
            .document()
            .measurer()
            .line_height(&SpanStyle::default());
        let size = vec2(geometry.outer_width(), line_h + PADDING_TOP + PADDING_BOTTOM);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let id = response.id;
        // The flag only describes this frame.
        ui.data_mut(|d| d.remove::<bool>(commit_key(id)));

        self.field.document_mut().set_geometry(FieldGeometry {
            x: rect.min.x,
            y: rect.min.y + PADDING_TOP,
            height: line_h,
            ..geometry
        });
        self.sync_value(ui, id);

        if response.clicked() || response.drag_started() {
            response.request_focus();
        }
        let focused = response.has_focus();
        let doc = self.field.document_mut();
        if focused && !doc.is_focused() {
            doc.focus();
        } else if !focused && doc.is_focused() {
            doc.blur();
        }

        let pointer = ui.input(|i| (i.pointer.interact_pos(), i.modifiers.shift));
        if let (Some(pos), extend) = pointer {
            if response.clicked() || response.drag_started() {
                doc.set_caret_from_x(pos.x, extend);
                doc.scroll_focus_into_view();
            } else if response.dragged() {
                doc.set_caret_from_x(pos.x, true);
                doc.scroll_focus_into_view();
            }
        }

        if focused {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    id,
                    EventFilter {
                        horizontal_arrows: true,
                        ..Default::default()
                    },
                )
            });
            let events = ui.input(|i| i.events.clone());
            for action in actions_from_events(&events) {
                self.run_action(ui, &mut response, action);
            }
        }

        paint_field(ui, rect, self.field, focused);
        response
    }
}

fn paint_field(ui: &Ui, rect: Rect, field: &StyledField<EguiTextMeasurer>, focused: bool) {
    let painter = ui.painter();
    let visuals = ui.visuals();
    painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);
    let stroke = if focused {
        visuals.selection.stroke
    } else {
        Stroke::new(1.0, BORDER_COLOR)
    };
    painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);

    let doc = field.document();
    let g = doc.geometry();
    let inner = Rect::from_min_max(
        pos2(rect.min.x + g.padding_left, rect.min.y),
        pos2((rect.max.x - g.padding_right).max(rect.min.x), rect.max.y),
    );
    let clip = painter.with_clip_rect(inner.intersect(painter.clip_rect()));
    let font_id = doc.measurer().font_id();

    if let Some(placeholder) = field.placeholder() {
        clip.text(
            pos2(doc.to_viewport_x(0.0), g.y),
            Align2::LEFT_TOP,
            placeholder.flattened_text(),
            font_id.clone(),
            PLACEHOLDER_COLOR,
        );
    }

    if focused
        && let Some((anchor, focus)) = doc.selection_offsets_directed()
        && anchor != focus
    {
        let range = OffsetRange::new(anchor, focus);
        let x0 = doc.to_viewport_x(doc.caret_x(range.start));
        let x1 = doc.to_viewport_x(doc.caret_x(range.end));
        let sel = Rect::from_min_max(pos2(x0, g.y), pos2(x1, g.y + g.height));
        clip.rect_filled(sel, 0.0, visuals.selection.bg_fill);
    }

    paint_runs(&clip, field, font_id);

    if focused && let Some(caret) = doc.caret_rect() {
        let caret_rect = Rect::from_min_size(pos2(caret.x.round(), caret.y), vec2(1.0, caret.height));
        clip.rect_filled(caret_rect, 0.0, DEFAULT_TEXT_COLOR);
    }
}

fn paint_runs(clip: &Painter, field: &StyledField<EguiTextMeasurer>, font_id: egui::FontId) {
    let doc = field.document();
    let y = doc.geometry().y;
    let mut x = 0.0;
    for (_, text, style) in doc.text_runs() {
        let width = doc.measurer().measure(text, style);
        let left = doc.to_viewport_x(x);
        let color = span_color(style);
        clip.text(pos2(left, y), Align2::LEFT_TOP, text, font_id.clone(), color);
        if style.underline {
            let baseline = y + doc.geometry().height;
            clip.line_segment(
                [pos2(left, baseline), pos2(left + width, baseline)],
                Stroke::new(1.0, color),
            );
        }
        x += width;
    }
}
