//! Tunable constants for layout reconstruction.

use serde::{Deserialize, Serialize};

/// Default vertical distance separating two visual lines.
pub const DEFAULT_VERTICAL_THRESHOLD: f64 = 5.0;

/// Default margin trimmed from the top and bottom of a highlight quad.
pub const DEFAULT_HIGHLIGHT_MARGIN: f64 = 2.0;

/// Default bottom-edge distance under which header spans are merged.
pub const DEFAULT_HEADER_MERGE_EPSILON: f64 = 0.1;

/// Options for layout analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Words whose vertical centers differ by more than this start a new line
    pub vertical_threshold: f64,

    /// Vertical margin removed from each side of a highlight quad
    pub highlight_margin: f64,

    /// Maximum bottom-edge distance for merging adjacent header spans
    pub header_merge_epsilon: f64,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line separation threshold.
    pub fn with_vertical_threshold(mut self, threshold: f64) -> Self {
        self.vertical_threshold = threshold;
        self
    }

    /// Set the highlight margin.
    pub fn with_highlight_margin(mut self, margin: f64) -> Self {
        self.highlight_margin = margin;
        self
    }

    /// Set the header merge epsilon.
    pub fn with_header_merge_epsilon(mut self, epsilon: f64) -> Self {
        self.header_merge_epsilon = epsilon;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            highlight_margin: DEFAULT_HIGHLIGHT_MARGIN,
            header_merge_epsilon: DEFAULT_HEADER_MERGE_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_vertical_threshold(3.0)
            .with_highlight_margin(1.0)
            .with_header_merge_epsilon(0.5);

        assert_eq!(options.vertical_threshold, 3.0);
        assert_eq!(options.highlight_margin, 1.0);
        assert_eq!(options.header_merge_epsilon, 0.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: LayoutOptions = serde_json::from_str(r#"{"vertical_threshold": 4.0}"#).unwrap();
        assert_eq!(options.vertical_threshold, 4.0);
        assert_eq!(options.highlight_margin, DEFAULT_HIGHLIGHT_MARGIN);
    }
}
