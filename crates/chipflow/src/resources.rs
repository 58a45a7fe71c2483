//! Resource ids and the resource lookup seam.
//!
//! Chips, adapters and configuration refer to colors, drawables and node
//! templates by opaque ids. The host owns the actual resources and exposes
//! them through a [`ResourceProvider`]; [`ResourceTable`] is a ready-made
//! in-memory provider.

use std::collections::HashMap;
use std::fmt;

use chipflow_render::{Color, Drawable, Size};
use serde::{Deserialize, Serialize};

use crate::error::{ChipError, ResourceKind, Result};
use crate::layout::ContentMargins;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// The raw id value.
            #[inline]
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

resource_id!(
    /// Identifies a [`NodeTemplate`].
    LayoutId
);
resource_id!(
    /// Identifies a background [`Drawable`].
    DrawableId
);
resource_id!(
    /// Identifies a [`Color`].
    ColorId
);

/// A host-defined chip node template.
///
/// Templates replace the built-in pill. They describe the node shape the
/// materializer instantiates: declared margins, inner padding, which slots
/// exist, and any fixed decoration (such as a close icon) next to the label.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTemplate {
    /// Margins declared by the template. A zero right or bottom margin is
    /// replaced by the container's chip or line spacing.
    pub margins: ContentMargins,
    /// Padding between the node edge and its label.
    pub padding: ContentMargins,
    /// Whether the template has a text slot.
    pub has_text_slot: bool,
    /// Insets of the content slot within the node, if the template has one.
    /// Backgrounds are applied to the content slot instead of the root.
    pub content_slot: Option<ContentMargins>,
    /// Font size declared on the text slot.
    pub text_size: Option<f32>,
    /// Text color declared on the text slot.
    pub text_color: Option<Color>,
    /// Minimum node size, excluding margins.
    pub min_size: Size,
    /// Width of decorations placed after the label.
    pub trailing_width: f32,
    /// Spacing between the label and the trailing decoration.
    pub trailing_spacing: f32,
}

impl Default for NodeTemplate {
    fn default() -> Self {
        Self {
            margins: ContentMargins::default(),
            padding: ContentMargins::default(),
            has_text_slot: true,
            content_slot: None,
            text_size: None,
            text_color: None,
            min_size: Size::ZERO,
            trailing_width: 0.0,
            trailing_spacing: 0.0,
        }
    }
}

impl NodeTemplate {
    /// Create a template with a text slot and nothing else.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared margins.
    pub fn with_margins(mut self, margins: ContentMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the inner padding.
    pub fn with_padding(mut self, padding: ContentMargins) -> Self {
        self.padding = padding;
        self
    }

    /// Remove the text slot.
    pub fn without_text_slot(mut self) -> Self {
        self.has_text_slot = false;
        self
    }

    /// Add a content slot inset from the node edges.
    pub fn with_content_slot(mut self, insets: ContentMargins) -> Self {
        self.content_slot = Some(insets);
        self
    }

    /// Set the text slot's font size.
    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);
        self
    }

    /// Set the text slot's color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Set the minimum node size.
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    /// Add a decoration after the label.
    pub fn with_trailing(mut self, width: f32, spacing: f32) -> Self {
        self.trailing_width = width;
        self.trailing_spacing = spacing;
        self
    }
}

/// Looks up resources by id.
///
/// Implementations return `None` for unknown ids; callers turn that into
/// [`ChipError::ResourceResolution`].
pub trait ResourceProvider: Send + Sync {
    /// Color for `id`.
    fn color(&self, id: ColorId) -> Option<Color>;

    /// Drawable for `id`.
    fn drawable(&self, id: DrawableId) -> Option<Drawable>;

    /// Node template for `id`.
    fn template(&self, id: LayoutId) -> Option<NodeTemplate>;
}

/// Resolve a color or fail with a resource error.
pub(crate) fn require_color(resources: &dyn ResourceProvider, id: ColorId) -> Result<Color> {
    resources
        .color(id)
        .ok_or_else(|| ChipError::unresolved(ResourceKind::Color, id.get()))
}

/// Resolve a drawable or fail with a resource error.
pub(crate) fn require_drawable(
    resources: &dyn ResourceProvider,
    id: DrawableId,
) -> Result<Drawable> {
    resources
        .drawable(id)
        .ok_or_else(|| ChipError::unresolved(ResourceKind::Drawable, id.get()))
}

/// Resolve a node template or fail with a resource error.
pub(crate) fn require_template(
    resources: &dyn ResourceProvider,
    id: LayoutId,
) -> Result<NodeTemplate> {
    resources
        .template(id)
        .ok_or_else(|| ChipError::unresolved(ResourceKind::Layout, id.get()))
}

/// In-memory [`ResourceProvider`].
///
/// ```
/// use chipflow::{ColorId, ResourceProvider, ResourceTable};
/// use chipflow_render::Color;
///
/// let table = ResourceTable::new().with_color(ColorId(1), Color::WHITE);
/// assert_eq!(table.color(ColorId(1)), Some(Color::WHITE));
/// assert_eq!(table.color(ColorId(2)), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    colors: HashMap<ColorId, Color>,
    drawables: HashMap<DrawableId, Drawable>,
    templates: HashMap<LayoutId, NodeTemplate>,
}

impl ResourceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color.
    pub fn with_color(mut self, id: ColorId, color: Color) -> Self {
        self.insert_color(id, color);
        self
    }

    /// Add a drawable.
    pub fn with_drawable(mut self, id: DrawableId, drawable: impl Into<Drawable>) -> Self {
        self.insert_drawable(id, drawable);
        self
    }

    /// Add a node template.
    pub fn with_template(mut self, id: LayoutId, template: NodeTemplate) -> Self {
        self.insert_template(id, template);
        self
    }

    /// Insert or replace a color.
    pub fn insert_color(&mut self, id: ColorId, color: Color) -> Option<Color> {
        self.colors.insert(id, color)
    }

    /// Insert or replace a drawable.
    pub fn insert_drawable(
        &mut self,
        id: DrawableId,
        drawable: impl Into<Drawable>,
    ) -> Option<Drawable> {
        self.drawables.insert(id, drawable.into())
    }

    /// Insert or replace a node template.
    pub fn insert_template(&mut self, id: LayoutId, template: NodeTemplate) -> Option<NodeTemplate> {
        self.templates.insert(id, template)
    }

    /// Total number of resources.
    pub fn len(&self) -> usize {
        self.colors.len() + self.drawables.len() + self.templates.len()
    }

    /// Whether the table holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for ResourceTable {
    fn color(&self, id: ColorId) -> Option<Color> {
        self.colors.get(&id).copied()
    }

    fn drawable(&self, id: DrawableId) -> Option<Drawable> {
        self.drawables.get(&id).cloned()
    }

    fn template(&self, id: LayoutId) -> Option<NodeTemplate> {
        self.templates.get(&id).cloned()
    }
}
