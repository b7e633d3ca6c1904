//! The demo panel: an expression field with token colouring, a plain search
//! field with a placeholder, and a list of committed expressions.

use crate::highlight::{highlight_expression, plain};
use content_tree::{FieldConfig, FieldGeometry, StyledField, text};
use egui::{CentralPanel, Context, RichText};
use gfx::{EguiTextMeasurer, StyledInputWidget};

const FONT_PX: f32 = 14.0;
const HISTORY_LIMIT: usize = 20;

pub struct Demo {
    expression: StyledField<EguiTextMeasurer>,
    expression_value: String,
    search: StyledField<EguiTextMeasurer>,
    search_value: String,
    history: Vec<String>,
}

impl Demo {
    pub fn new(ctx: &Context) -> Self {
        let expression = StyledField::new(
            EguiTextMeasurer::new(ctx, FONT_PX),
            FieldConfig::new()
                .geometry(FieldGeometry {
                    width: 320.0,
                    ..FieldGeometry::default()
                })
                .on_change(|v| log::debug!(target: "platform.demo", "expression: {v:?}")),
        );
        let search = StyledField::new(
            EguiTextMeasurer::new(ctx, FONT_PX),
            FieldConfig::new()
                .placeholder(text("Search history"))
                .on_enter(|| log::debug!(target: "platform.demo", "search submitted")),
        );
        Self {
            expression,
            expression_value: "sum(a, 42) * 2".to_string(),
            search,
            search_value: String::new(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn commit_expression(&mut self) {
        let value = self.expression_value.trim();
        if value.is_empty() {
            return;
        }
        log::info!(target: "platform.demo", "committed {value:?}");
        self.history.insert(0, value.to_string());
        self.history.truncate(HISTORY_LIMIT);
        self.expression_value.clear();
    }

    pub fn ui(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Styled input");

            ui.label("Expression (Enter to commit)");
            let response = ui.add(StyledInputWidget::new(
                &mut self.expression,
                &mut self.expression_value,
                &highlight_expression,
            ));
            if StyledInputWidget::committed(&response) {
                self.commit_expression();
            }

            ui.add_space(12.0);
            ui.label("Filter");
            ui.add(StyledInputWidget::new(
                &mut self.search,
                &mut self.search_value,
                &plain,
            ));

            ui.add_space(12.0);
            let filter = self.search_value.to_lowercase();
            for entry in self
                .history
                .iter()
                .filter(|e| e.to_lowercase().contains(&filter))
            {
                ui.label(RichText::new(entry).monospace());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::RawInput;

    fn demo() -> (Context, Demo) {
        let ctx = Context::default();
        let _ = ctx.run(RawInput::default(), |_| {});
        let demo = Demo::new(&ctx);
        (ctx, demo)
    }

    #[test]
    fn first_frame_renders_initial_values() {
        let (ctx, mut demo) = demo();
        let _ = ctx.run(RawInput::default(), |ctx| demo.ui(ctx));
        assert_eq!(demo.expression.value(), "sum(a, 42) * 2");
        assert_eq!(demo.search.value(), "");
        assert!(demo.search.placeholder().is_some());
    }

    #[test]
    fn commit_moves_value_to_history() {
        let (ctx, mut demo) = demo();
        demo.expression_value = "  1 + 1 ".to_string();
        demo.commit_expression();
        assert_eq!(demo.history(), ["1 + 1"]);
        assert!(demo.expression_value.is_empty());

        // The cleared value reaches the field on the next frame.
        let _ = ctx.run(RawInput::default(), |ctx| demo.ui(ctx));
        assert_eq!(demo.expression.value(), "");

        demo.commit_expression();
        assert_eq!(demo.history().len(), 1);
    }
}
