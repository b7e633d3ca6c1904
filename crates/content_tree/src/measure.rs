use crate::types::SpanStyle;

/// Width oracle used to place carets and compute scroll extents.
pub trait TextMeasure {
    /// Width of `text` in px when rendered with `style`.
    fn measure(&self, text: &str, style: &SpanStyle) -> f32;

    /// Line height in px for `style`.
    fn line_height(&self, style: &SpanStyle) -> f32;
}

/// Fixed advance per character. Used by tests and headless hosts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMeasure {
    pub const fn new(advance: f32) -> Self {
        Self {
            advance,
            line_height: advance * 2.0,
        }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, _style: &SpanStyle) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self, _style: &SpanStyle) -> f32 {
        self.line_height
    }
}

/// Index of the caret stop nearest to `x`.
///
/// `stops` holds the x of every caret stop and must be non-decreasing.
/// Ties go to the left stop.
pub fn nearest_stop(stops: &[f32], x: f32) -> usize {
    if stops.is_empty() {
        return 0;
    }

    // Largest stop whose x <= target.
    let right = stops.partition_point(|&s| s <= x);
    if right == 0 {
        return 0;
    }
    let left = right - 1;
    if right < stops.len() && x - stops[left] > stops[right] - x {
        return right;
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_counts_chars() {
        let m = MonospaceMeasure::new(10.0);
        assert_eq!(m.measure("abc", &SpanStyle::default()), 30.0);
        assert_eq!(m.measure("€😀", &SpanStyle::default()), 20.0);
    }

    #[test]
    fn nearest_stop_snaps_to_closest() {
        let stops = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(nearest_stop(&stops, -5.0), 0);
        assert_eq!(nearest_stop(&stops, 4.0), 0);
        assert_eq!(nearest_stop(&stops, 5.0), 0);
        assert_eq!(nearest_stop(&stops, 6.0), 1);
        assert_eq!(nearest_stop(&stops, 29.0), 3);
        assert_eq!(nearest_stop(&stops, 500.0), 3);
    }

    #[test]
    fn nearest_stop_handles_empty() {
        assert_eq!(nearest_stop(&[], 12.0), 0);
    }
}
