//! Translation of egui input events into field actions.

use egui::{Event, Key, Modifiers};
use input_core::FieldInput;

/// One thing a focused field should do in response to an egui event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldAction {
    /// Routed through the kernel; changes the value or commits.
    Edit(FieldInput),
    Left { extend: bool },
    Right { extend: bool },
    Home { extend: bool },
    End { extend: bool },
    SelectAll,
    Copy,
    /// Copy the selection, then remove it.
    Cut,
}

fn is_line_break_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == '\n' || c == '\r')
}

fn key_action(key: Key, modifiers: Modifiers) -> Option<FieldAction> {
    let extend = modifiers.shift;
    let action = match key {
        Key::Enter => FieldAction::Edit(FieldInput::Enter),
        Key::Backspace => FieldAction::Edit(FieldInput::Backspace),
        Key::Delete => FieldAction::Edit(FieldInput::Delete),
        Key::ArrowLeft => FieldAction::Left { extend },
        Key::ArrowRight => FieldAction::Right { extend },
        Key::Home => FieldAction::Home { extend },
        Key::End => FieldAction::End { extend },
        Key::A if modifiers.command || modifiers.ctrl => FieldAction::SelectAll,
        _ => return None,
    };
    Some(action)
}

/// Map one frame's events to actions, in order.
///
/// Text events made only of line breaks are dropped: the commit key arrives
/// as its own `Key::Enter` event.
pub fn actions_from_events(events: &[Event]) -> Vec<FieldAction> {
    let mut out = Vec::new();
    for event in events {
        let action = match event {
            Event::Text(t) if is_line_break_only(t) => None,
            Event::Text(t) => {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(FieldAction::Edit(FieldInput::Char(c))),
                    (Some(_), Some(_)) => Some(FieldAction::Edit(FieldInput::Text(t.clone()))),
                    (None, _) => None,
                }
            }
            Event::Paste(t) => {
                let payload = (!t.is_empty()).then(|| t.clone());
                Some(FieldAction::Edit(FieldInput::Paste(payload)))
            }
            Event::Copy => Some(FieldAction::Copy),
            Event::Cut => Some(FieldAction::Cut),
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => key_action(*key, *modifiers),
            _ => None,
        };
        if let Some(action) = action {
            log::trace!(target: "gfx.input", "{event:?} -> {action:?}");
            out.push(action);
        }
    }
    out
}
