//! Text measurement for chip labels.
//!
//! Shaping and rasterizing text belongs to the host. The chip container only
//! needs to know how large a single-line label will be, which it asks through
//! the [`TextMetrics`] trait.
//!
//! # Example
//!
//! ```
//! use chipflow_render::text::{MonospaceMetrics, TextMetrics};
//!
//! let metrics = MonospaceMetrics::default();
//! let size = metrics.measure("Lorem", Some(10.0));
//! assert_eq!(size.width, 25.0);
//! assert_eq!(size.height, 12.5);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Size;

/// Measures single-line labels.
pub trait TextMetrics: Send + Sync {
    /// Font size used when a label does not set one.
    fn default_font_size(&self) -> f32;

    /// Size of `text` laid out on one line at `font_size`.
    ///
    /// `None` means the inherited size, [`default_font_size`](Self::default_font_size).
    fn measure(&self, text: &str, font_size: Option<f32>) -> Size;
}

/// Fixed-advance metrics.
///
/// Every grapheme cluster advances by `font_size * advance`, and a line is
/// `font_size * line_height` tall. Empty labels keep the line height so an
/// empty chip does not collapse vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Inherited font size.
    pub font_size: f32,
    /// Horizontal advance per grapheme, as a fraction of the font size.
    pub advance: f32,
    /// Line height, as a multiple of the font size.
    pub line_height: f32,
}

impl MonospaceMetrics {
    /// Metrics with the given inherited font size and default proportions.
    pub fn with_font_size(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Number of user-perceived characters in `text`.
    pub fn grapheme_count(text: &str) -> usize {
        text.graphemes(true).count()
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            advance: 0.5,
            line_height: 1.25,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn default_font_size(&self) -> f32 {
        self.font_size
    }

    fn measure(&self, text: &str, font_size: Option<f32>) -> Size {
        let size = font_size.unwrap_or(self.font_size);
        let width = Self::grapheme_count(text) as f32 * size * self.advance;
        Size::new(width, size * self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapheme_count() {
        assert_eq!(MonospaceMetrics::grapheme_count(""), 0);
        assert_eq!(MonospaceMetrics::grapheme_count("tag"), 3);
        // e + combining acute accent is one cluster
        assert_eq!(MonospaceMetrics::grapheme_count("e\u{301}"), 1);
    }

    #[test]
    fn test_measure_inherits_font_size() {
        let metrics = MonospaceMetrics::with_font_size(20.0);
        assert_eq!(metrics.default_font_size(), 20.0);

        let size = metrics.measure("ab", None);
        assert_eq!(size.width, 20.0);
        assert_eq!(size.height, 25.0);
    }

    #[test]
    fn test_empty_label_keeps_line_height() {
        let metrics = MonospaceMetrics::with_font_size(10.0);
        let size = metrics.measure("", Some(10.0));
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 12.5);
    }
}
