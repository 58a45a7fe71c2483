//! Layout of chip nodes.
//!
//! Chips are placed by a [`FlowLayout`]: left to right, wrapping onto a new
//! line whenever the running line width would overflow the container, the
//! way words wrap in a paragraph.
//!
//! Layout is two-pass. [`FlowLayout::measure`] computes the line heights and
//! the container size for an available width and returns a [`Measured`]
//! value. [`Measured::arrange`] consumes it and produces one placement per
//! item. Both passes share the same wrap arithmetic, so placements always
//! agree with the measured height.
//!
//! # Example
//!
//! ```
//! use chipflow::layout::{FlowItem, FlowLayout};
//! use chipflow_render::Size;
//!
//! let layout = FlowLayout::new();
//! let items = vec![
//!     FlowItem::new(Size::new(40.0, 20.0)),
//!     FlowItem::new(Size::new(40.0, 20.0)),
//!     FlowItem::new(Size::new(40.0, 20.0)),
//! ];
//!
//! let measured = layout.measure(&items, 100.0);
//! assert_eq!(measured.line_count(), 2);
//! assert_eq!(measured.height(), 40.0);
//!
//! let arranged = measured.arrange(&items);
//! assert_eq!(arranged.placements[2].map(|r| r.top()), Some(20.0));
//! ```

mod flow;

pub use flow::{Arranged, FlowLayout, Measured};

use chipflow_render::Size;

/// Margins or insets around a box.
///
/// Used for the container's content insets, for the outer margins of each
/// chip node and for the padding inside node templates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMargins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl ContentMargins {
    /// Create new content margins.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// No margins.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create uniform margins (same value on all sides).
    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Create symmetric margins (same horizontal and vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Size occupied by margins.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}

/// A measured box to be placed by the flow layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowItem {
    /// Size of the box, excluding margins.
    pub size: Size,
    /// Outer margins.
    pub margins: ContentMargins,
    /// Collapsed items take no space and get no placement.
    pub visible: bool,
}

impl FlowItem {
    /// A visible item with no margins.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            margins: ContentMargins::ZERO,
            visible: true,
        }
    }

    /// Set the outer margins.
    pub fn with_margins(mut self, margins: ContentMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Collapse the item.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Width including margins.
    #[inline]
    pub fn outer_width(&self) -> f32 {
        self.size.width + self.margins.horizontal()
    }

    /// Height including margins.
    #[inline]
    pub fn outer_height(&self) -> f32 {
        self.size.height + self.margins.vertical()
    }
}
