use std::cell::RefCell;
use std::collections::HashMap;

use content_tree::{SpanStyle, TextMeasure};
use egui::{Color32, Context, FontId};

/// Text colour used when a span does not set one.
pub const DEFAULT_TEXT_COLOR: Color32 = Color32::from_rgb(0x20, 0x20, 0x20);

/// `egui`-backed adapter for measuring field content.
pub struct EguiTextMeasurer {
    ctx: Context,
    font_px: f32,
    space_width_cache: RefCell<HashMap<u32, f32>>,
}

impl std::fmt::Debug for EguiTextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiTextMeasurer")
            .field("font_px", &self.font_px)
            .finish_non_exhaustive()
    }
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context, font_px: f32) -> Self {
        Self {
            ctx: ctx.clone(),
            font_px,
            space_width_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn font_id(&self) -> FontId {
        FontId::proportional(self.font_px)
    }

    fn space_width(&self, color: Color32) -> f32 {
        // `Color32` does not affect text metrics; cache width per font size.
        let key = self.font_px.round().max(0.0) as u32;
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        // A lone space may lay out with an empty rect; NBSP keeps its advance.
        let nbsp = "\u{00A0}";
        let w_nbsp = self.ctx.fonts(|f| {
            f.layout_no_wrap(nbsp.to_owned(), self.font_id(), color)
                .rect
                .width()
        });

        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            let w_with = self.ctx.fonts(|f| {
                f.layout_no_wrap(format!("x{nbsp}x"), self.font_id(), color)
                    .rect
                    .width()
            });
            let w_without = self.ctx.fonts(|f| {
                f.layout_no_wrap("xx".to_owned(), self.font_id(), color)
                    .rect
                    .width()
            });
            let w = (w_with - w_without).max(0.0);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                (self.font_px * 0.33).max(1.0)
            }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

/// Paint colour of `style`.
pub fn span_color(style: &SpanStyle) -> Color32 {
    match style.color {
        Some((r, g, b, a)) => Color32::from_rgba_unmultiplied(r, g, b, a),
        None => DEFAULT_TEXT_COLOR,
    }
}

impl TextMeasure for EguiTextMeasurer {
    fn measure(&self, text: &str, style: &SpanStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let color = span_color(style);
        if text.chars().all(|c| c == ' ') {
            return self.space_width(color) * text.chars().count() as f32;
        }

        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), self.font_id(), color)
                .rect
                .width()
        })
    }

    fn line_height(&self, _style: &SpanStyle) -> f32 {
        self.font_px * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> EguiTextMeasurer {
        let ctx = Context::default();
        // Fonts are only available once a pass has run.
        let _ = ctx.run(Default::default(), |_| {});
        EguiTextMeasurer::new(&ctx, 14.0)
    }

    #[test]
    fn spaces_have_width() {
        let m = measurer();
        let style = SpanStyle::default();
        let one = m.measure(" ", &style);
        assert!(one > 0.0);
        assert_eq!(m.measure("   ", &style), one * 3.0);
    }

    #[test]
    fn widths_grow_with_text() {
        let m = measurer();
        let style = SpanStyle::color(200, 0, 0);
        assert_eq!(m.measure("", &style), 0.0);
        assert!(m.measure("ab", &style) > m.measure("a", &style));
        assert_eq!(m.line_height(&style), 14.0 * 1.2);
    }
}
