//! Positioned render output.
//!
//! A host painter draws a chip view by walking its display list: one
//! [`DisplayItem`] per visible chip, in render order, with the background
//! already picked for the chip's current interaction state.

use chipflow_render::{Color, DrawState, Drawable, Rect, RoundedRect, TextMetrics};

use crate::chip::Chip;
use crate::node::ChipNode;

/// How a chip background is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayBackground {
    /// A solid rounded shape.
    Fill {
        /// Shape to fill.
        shape: RoundedRect,
        /// Fill color.
        color: Color,
    },
    /// A host image stretched over `rect`.
    Image {
        /// Image name.
        name: String,
        /// Target rectangle.
        rect: Rect,
    },
}

/// A label to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayText {
    /// Text content.
    pub text: String,
    /// Rectangle the text occupies.
    pub rect: Rect,
    /// Effective font size.
    pub font_size: f32,
    /// Text color; `None` uses the host default.
    pub color: Option<Color>,
}

/// One chip, ready to paint.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Chip the item was built from.
    pub chip: Chip,
    /// Node bounds, excluding margins.
    pub bounds: Rect,
    /// Interaction state the item is shown in.
    pub state: DrawState,
    /// Background, if any.
    pub background: Option<DisplayBackground>,
    /// Label, if the node has a text slot.
    pub text: Option<DisplayText>,
    /// Area reserved for a trailing decoration.
    pub trailing: Option<Rect>,
}

impl DisplayItem {
    pub(crate) fn new(
        node: &ChipNode,
        bounds: Rect,
        state: DrawState,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let background_rect = node.background_rect(bounds);
        let background = node.background.as_ref().and_then(|drawable| match drawable {
            Drawable::Image(name) => Some(DisplayBackground::Image {
                name: name.clone(),
                rect: background_rect,
            }),
            other => other.fill_for(state).map(|fill| DisplayBackground::Fill {
                shape: fill.shape(background_rect),
                color: fill.color,
            }),
        });

        let text = node.text.as_ref().map(|text| DisplayText {
            text: text.clone(),
            rect: node.label_rect(bounds, metrics),
            font_size: node.font_size.unwrap_or_else(|| metrics.default_font_size()),
            color: node.text_color,
        });

        Self {
            chip: node.chip().clone(),
            bounds,
            state,
            background,
            text,
            trailing: node.trailing_rect(bounds),
        }
    }

    /// Fill color of the background, if it is a solid fill.
    pub fn fill_color(&self) -> Option<Color> {
        match &self.background {
            Some(DisplayBackground::Fill { color, .. }) => Some(*color),
            _ => None,
        }
    }
}
