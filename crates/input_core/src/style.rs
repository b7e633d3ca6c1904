//! Process-wide one-time style installation.
//!
//! Fields share one style rule that hides the horizontal scrollbar of their
//! scroll container. It is installed at most once per process, no matter how
//! many fields are created, and never torn down.

use std::sync::OnceLock;

/// Class every field's scroll container carries.
pub const FIELD_CLASS: &str = "styled-input-field";

/// A single style rule: a selector and its declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: &'static str,
    pub declarations: &'static str,
}

impl StyleRule {
    /// The rule as stylesheet text.
    pub fn to_css(&self) -> String {
        format!("{}{{{}}}", self.selector, self.declarations)
    }
}

/// Hides the scrollbar of field containers.
pub const HIDDEN_SCROLLBAR: StyleRule = StyleRule {
    selector: ".styled-input-field::-webkit-scrollbar",
    declarations: "display:none",
};

static INSTALLED: OnceLock<StyleRule> = OnceLock::new();

/// Run `install` with the shared rule unless it already ran in this process.
///
/// Returns `true` if this call performed the installation.
pub fn ensure_style_installed(install: impl FnOnce(&StyleRule)) -> bool {
    let mut installed_now = false;
    INSTALLED.get_or_init(|| {
        install(&HIDDEN_SCROLLBAR);
        log::debug!(target: "input_core.style", "installed {}", HIDDEN_SCROLLBAR.to_css());
        installed_now = true;
        HIDDEN_SCROLLBAR
    });
    installed_now
}

/// The installed rule, if any field has been created yet.
pub fn installed_style() -> Option<&'static StyleRule> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_at_most_once() {
        let mut calls = 0;
        for _ in 0..3 {
            ensure_style_installed(|rule| {
                assert_eq!(*rule, HIDDEN_SCROLLBAR);
                calls += 1;
            });
        }
        // Another test in this process may have installed it first.
        assert!(calls <= 1);
        assert_eq!(installed_style(), Some(&HIDDEN_SCROLLBAR));
        assert!(!ensure_style_installed(|_| panic!("installed twice")));
    }

    #[test]
    fn rule_renders_as_css() {
        assert_eq!(
            HIDDEN_SCROLLBAR.to_css(),
            ".styled-input-field::-webkit-scrollbar{display:none}"
        );
        assert!(HIDDEN_SCROLLBAR.selector.contains(FIELD_CLASS));
    }
}
