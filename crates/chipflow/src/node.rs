//! Materialized chip nodes.

use chipflow_render::{Color, Drawable, Rect, Size, TextMetrics};

use crate::chip::Chip;
use crate::layout::{ContentMargins, FlowItem};
use crate::resolver::LayoutChoice;

/// The visual node built for one chip during a refresh.
///
/// Nodes are rebuilt from scratch on every refresh and never outlive the
/// frame that published them. Fields are public so
/// [`ChipAdapter::on_node_ready`](crate::ChipAdapter::on_node_ready) can
/// patch them; the node's size is computed from them at layout time.
#[derive(Debug, Clone)]
pub struct ChipNode {
    chip: Chip,
    position: usize,
    /// Template the node was built from.
    pub layout: LayoutChoice,
    /// Label text; `None` when the template has no text slot.
    pub text: Option<String>,
    /// Label font size; `None` inherits the metrics' default.
    pub font_size: Option<f32>,
    /// Label color; `None` leaves it to the host.
    pub text_color: Option<Color>,
    /// Background; `None` when backgrounds are not rendered.
    pub background: Option<Drawable>,
    /// Insets of the region the background covers. Zero paints the whole
    /// node; a template content slot paints only its own area.
    pub background_insets: ContentMargins,
    /// Padding between the node edge and its contents.
    pub padding: ContentMargins,
    /// Outer margins used by the flow layout.
    pub margins: ContentMargins,
    /// Minimum size, excluding margins.
    pub min_size: Size,
    /// Width of a decoration drawn after the label.
    pub trailing_width: f32,
    /// Gap between the label and the trailing decoration.
    pub trailing_spacing: f32,
    /// Collapsed nodes take no space and cannot be clicked.
    pub visible: bool,
}

impl ChipNode {
    /// Create a bare node for `chip` at `position`.
    pub fn new(chip: Chip, position: usize, layout: LayoutChoice) -> Self {
        Self {
            chip,
            position,
            layout,
            text: None,
            font_size: None,
            text_color: None,
            background: None,
            background_insets: ContentMargins::ZERO,
            padding: ContentMargins::ZERO,
            margins: ContentMargins::ZERO,
            min_size: Size::ZERO,
            trailing_width: 0.0,
            trailing_spacing: 0.0,
            visible: true,
        }
    }

    /// The chip this node was built from.
    #[inline]
    pub fn chip(&self) -> &Chip {
        &self.chip
    }

    /// Position of the chip when the node was built.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Size of the label, zero when there is no text slot.
    pub fn label_size(&self, metrics: &dyn TextMetrics) -> Size {
        match &self.text {
            Some(text) => metrics.measure(text, self.font_size),
            None => Size::ZERO,
        }
    }

    /// Width reserved for the trailing decoration, including its gap.
    fn trailing_extent(&self) -> f32 {
        if self.trailing_width > 0.0 {
            self.trailing_spacing + self.trailing_width
        } else {
            0.0
        }
    }

    /// Node size, excluding margins.
    pub fn measure(&self, metrics: &dyn TextMetrics) -> Size {
        let label = self.label_size(metrics);
        let content = Size::new(label.width + self.trailing_extent(), label.height);
        Size::new(
            content.width + self.padding.horizontal(),
            content.height + self.padding.vertical(),
        )
        .max(self.min_size)
    }

    /// The node as a flow layout item.
    pub fn flow_item(&self, metrics: &dyn TextMetrics) -> FlowItem {
        FlowItem {
            size: self.measure(metrics),
            margins: self.margins,
            visible: self.visible,
        }
    }

    /// Where the label goes when the node occupies `bounds`.
    ///
    /// The label is centered in the padded area left of the trailing
    /// decoration.
    pub fn label_rect(&self, bounds: Rect, metrics: &dyn TextMetrics) -> Rect {
        let label = self.label_size(metrics);
        let area = bounds.inset(
            self.padding.left,
            self.padding.top,
            self.padding.right + self.trailing_extent(),
            self.padding.bottom,
        );
        let center = area.center();
        Rect::new(
            center.x - label.width / 2.0,
            center.y - label.height / 2.0,
            label.width,
            label.height,
        )
    }

    /// Where the trailing decoration goes when the node occupies `bounds`.
    pub fn trailing_rect(&self, bounds: Rect) -> Option<Rect> {
        (self.trailing_width > 0.0).then(|| {
            let area = bounds.inset(
                self.padding.left,
                self.padding.top,
                self.padding.right,
                self.padding.bottom,
            );
            Rect::new(
                area.right() - self.trailing_width,
                area.top(),
                self.trailing_width,
                area.height(),
            )
        })
    }

    /// Region covered by the background when the node occupies `bounds`.
    pub fn background_rect(&self, bounds: Rect) -> Rect {
        let m = self.background_insets;
        bounds.inset(m.left, m.top, m.right, m.bottom)
    }
}
