//! Retained per-field caret state.

/// The two cells a field keeps across renders.
///
/// Both are UTF-16 code-unit counts. `caret_offset` is where the caret
/// belongs in a value of length `prior_length`; reconciliation shifts it by
/// however much the next rendered content differs from that length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretState {
    pub caret_offset: usize,
    pub prior_length: usize,
}

impl CaretState {
    /// State for a field mounted with content of `initial_length` units.
    #[inline]
    pub fn mounted(initial_length: usize) -> Self {
        Self {
            caret_offset: 0,
            prior_length: initial_length,
        }
    }

    /// Record an edit: the caller was told about a value of `value_length`
    /// units with the caret at `caret_offset`.
    #[inline]
    pub fn record_edit(&mut self, caret_offset: usize, value_length: usize) {
        self.caret_offset = caret_offset;
        self.prior_length = value_length;
    }

    /// Where the caret should land in content of `new_length` units.
    ///
    /// The result is clamped to `0..=new_length`.
    pub fn target_for(&self, new_length: usize) -> usize {
        let shifted = self.caret_offset as i64 + new_length as i64 - self.prior_length as i64;
        shifted.clamp(0, new_length as i64) as usize
    }
}
