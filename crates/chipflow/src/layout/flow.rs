//! Flow layout for wrapping chip clouds.

use chipflow_core::logging::targets;
use chipflow_render::{Rect, Size};

use super::{ContentMargins, FlowItem};

/// Running position along the current line.
///
/// Both layout passes drive the same cursor so their wrap decisions cannot
/// drift apart.
#[derive(Debug, Clone, Copy)]
struct LineCursor {
    insets: ContentMargins,
    wrap_width: f32,
    line_width: f32,
}

impl LineCursor {
    fn new(insets: ContentMargins, wrap_width: f32) -> Self {
        Self {
            insets,
            wrap_width,
            line_width: insets.left,
        }
    }

    /// Advance past an item of outer width `w`. Returns `true` when the item
    /// starts a new line.
    fn advance(&mut self, w: f32) -> bool {
        // An item wider than the container widens the container.
        let needed = self.insets.left + w + self.insets.right;
        if needed > self.wrap_width {
            self.wrap_width = needed;
        }

        if self.line_width + w + self.insets.right > self.wrap_width {
            self.line_width = self.insets.left + w;
            true
        } else {
            self.line_width += w;
            false
        }
    }
}

/// Wrapping left-to-right layout.
///
/// The layout itself only holds the container's content insets; the items
/// are passed to each pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowLayout {
    insets: ContentMargins,
}

impl FlowLayout {
    /// Create a flow layout with no content insets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flow layout with the given content insets.
    pub fn with_insets(insets: ContentMargins) -> Self {
        Self { insets }
    }

    /// The container's content insets.
    #[inline]
    pub fn content_margins(&self) -> ContentMargins {
        self.insets
    }

    /// Set the content insets. Returns `true` if they changed.
    pub fn set_content_margins(&mut self, margins: ContentMargins) -> bool {
        if self.insets != margins {
            self.insets = margins;
            true
        } else {
            false
        }
    }

    /// Measure `items` against `available_width`.
    ///
    /// Collapsed items are skipped, except that a collapsed last item still
    /// closes the current line. An empty list yields a single empty line.
    /// When `available_width` is infinite the container is as wide as its
    /// widest line.
    pub fn measure(&self, items: &[FlowItem], available_width: f32) -> Measured {
        let mut cursor = LineCursor::new(self.insets, available_width);
        let mut lines = Vec::new();
        let mut line_height: f32 = 0.0;
        let mut widest = self.insets.left;

        for (index, item) in items.iter().enumerate() {
            let last = index + 1 == items.len();

            if !item.visible {
                if last {
                    lines.push(line_height);
                }
                continue;
            }

            let w = item.outer_width();
            let h = item.outer_height();
            line_height = line_height.max(h);

            if cursor.advance(w) {
                lines.push(line_height);
                line_height = h;
            }
            widest = widest.max(cursor.line_width);

            if last {
                lines.push(line_height);
            }
        }

        if lines.is_empty() {
            lines.push(0.0);
        }

        let width = if cursor.wrap_width.is_finite() {
            cursor.wrap_width
        } else {
            widest + self.insets.right
        };
        let height = self.insets.vertical() + lines.iter().sum::<f32>();

        tracing::trace!(
            target: targets::LAYOUT,
            items = items.len(),
            lines = lines.len(),
            width,
            height,
            "measured flow"
        );

        Measured {
            insets: self.insets,
            available_width,
            size: Size::new(width, height),
            lines,
        }
    }
}

/// Result of a measure pass.
///
/// Holds the line heights the following arrange pass needs. Arranging
/// consumes the value, so line heights never outlive their layout cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured {
    insets: ContentMargins,
    available_width: f32,
    size: Size,
    lines: Vec<f32>,
}

impl Measured {
    /// Measured container size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Measured container width, grown to fit any oversized item.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Measured container height: insets plus every line height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Height of each line, top to bottom.
    pub fn line_heights(&self) -> &[f32] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Place `items`, which must be the items that were measured.
    ///
    /// Collapsed items get `None`.
    pub fn arrange(self, items: &[FlowItem]) -> Arranged {
        // Replay measure's width growth from the same starting width.
        let mut cursor = LineCursor::new(self.insets, self.available_width);
        let mut line = 0;
        let mut line_height = self.lines.first().copied().unwrap_or(0.0);
        let mut y = self.insets.top;

        let placements = items
            .iter()
            .map(|item| {
                if !item.visible {
                    return None;
                }

                let w = item.outer_width();
                let h = item.outer_height();

                if cursor.advance(w) {
                    y += line_height;
                    line += 1;
                    line_height = match self.lines.get(line) {
                        Some(&next) => next,
                        None => {
                            debug_assert!(
                                false,
                                "arrange reached line {line} but measure produced {}",
                                self.lines.len()
                            );
                            tracing::error!(
                                target: targets::LAYOUT,
                                line,
                                measured_lines = self.lines.len(),
                                "arrange ran past measured lines, reusing last line height"
                            );
                            line_height
                        }
                    };
                }

                let right = cursor.line_width;
                let left = right - w;
                let m = item.margins;
                Some(Rect::from_edges(
                    left + m.left,
                    y + m.top,
                    right - m.right,
                    y + h - m.bottom,
                ))
            })
            .collect();

        Arranged {
            size: self.size,
            line_count: self.lines.len(),
            placements,
        }
    }
}

/// Result of an arrange pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Arranged {
    /// Container size from the measure pass.
    pub size: Size,
    /// Number of lines.
    pub line_count: usize,
    /// One entry per item, `None` for collapsed items.
    pub placements: Vec<Option<Rect>>,
}
