//! The chip data model.
//!
//! A chip is anything implementing [`ChipData`]: it has display text and may
//! override its own template, background and colors. The container holds
//! chips through [`Chip`] handles, which compare by identity. Two chips with
//! the same text are still two different chips.
//!
//! # Example
//!
//! ```
//! use chipflow::{Chip, ColorId, StyledChip, TextChip};
//!
//! let plain = Chip::new(TextChip::new("Lorem"));
//! let styled = Chip::new(StyledChip::new("Ipsum").with_background_color(ColorId(3)));
//!
//! assert_eq!(plain.text(), "Lorem");
//! assert_eq!(styled.background_color_override(), Some(ColorId(3)));
//! assert_ne!(plain, Chip::new(TextChip::new("Lorem")));
//! assert_eq!(plain, plain.clone());
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::resources::{ColorId, DrawableId, LayoutId};

/// Capabilities of a chip.
///
/// Only [`text`](Self::text) is required. Every override defaults to `None`,
/// meaning the value is inherited from the adapter or the container.
pub trait ChipData: Any + Send + Sync + fmt::Debug {
    /// Display text.
    fn text(&self) -> &str;

    /// Node template used instead of the container default.
    fn layout_override(&self) -> Option<LayoutId> {
        None
    }

    /// Background drawable used verbatim for every state.
    fn background_drawable_override(&self) -> Option<DrawableId> {
        None
    }

    /// Background color in the normal state.
    fn background_color_override(&self) -> Option<ColorId> {
        None
    }

    /// Background color in the pressed and focused states.
    fn background_color_selected_override(&self) -> Option<ColorId> {
        None
    }
}

/// A chip with text only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChip {
    text: String,
}

impl TextChip {
    /// Create a text chip.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ChipData for TextChip {
    fn text(&self) -> &str {
        &self.text
    }
}

/// A chip carrying its own visual overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledChip {
    text: String,
    layout: Option<LayoutId>,
    background: Option<DrawableId>,
    color: Option<ColorId>,
    color_selected: Option<ColorId>,
}

impl StyledChip {
    /// Create a styled chip with no overrides set.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Use a specific node template.
    pub fn with_layout(mut self, id: LayoutId) -> Self {
        self.layout = Some(id);
        self
    }

    /// Use a specific background drawable.
    pub fn with_background(mut self, id: DrawableId) -> Self {
        self.background = Some(id);
        self
    }

    /// Use a specific normal-state background color.
    pub fn with_background_color(mut self, id: ColorId) -> Self {
        self.color = Some(id);
        self
    }

    /// Use a specific selected-state background color.
    pub fn with_background_color_selected(mut self, id: ColorId) -> Self {
        self.color_selected = Some(id);
        self
    }
}

impl ChipData for StyledChip {
    fn text(&self) -> &str {
        &self.text
    }

    fn layout_override(&self) -> Option<LayoutId> {
        self.layout
    }

    fn background_drawable_override(&self) -> Option<DrawableId> {
        self.background
    }

    fn background_color_override(&self) -> Option<ColorId> {
        self.color
    }

    fn background_color_selected_override(&self) -> Option<ColorId> {
        self.color_selected
    }
}

/// Shared handle to a chip.
///
/// Cloning is cheap. Equality and hashing use the address of the shared
/// data, so a clone equals its source but an identical-looking chip built
/// separately does not.
#[derive(Clone)]
pub struct Chip(Arc<dyn ChipData>);

impl Chip {
    /// Wrap chip data in a handle.
    pub fn new(data: impl ChipData) -> Self {
        Self(Arc::new(data))
    }

    /// Wrap already shared chip data.
    pub fn from_arc(data: Arc<dyn ChipData>) -> Self {
        Self(data)
    }

    /// Whether both handles point to the same chip.
    #[inline]
    pub fn ptr_eq(&self, other: &Chip) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the concrete chip type, if it is `T`.
    pub fn downcast_ref<T: ChipData>(&self) -> Option<&T> {
        let any: &dyn Any = self.0.as_ref();
        any.downcast_ref::<T>()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl Deref for Chip {
    type Target = dyn ChipData;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for Chip {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Chip {}

impl Hash for Chip {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chip").field(&self.0).finish()
    }
}

impl From<&str> for Chip {
    fn from(text: &str) -> Self {
        Self::new(TextChip::new(text))
    }
}

impl From<String> for Chip {
    fn from(text: String) -> Self {
        Self::new(TextChip::new(text))
    }
}

impl From<TextChip> for Chip {
    fn from(chip: TextChip) -> Self {
        Self::new(chip)
    }
}

impl From<StyledChip> for Chip {
    fn from(chip: StyledChip) -> Self {
        Self::new(chip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Tag {
        name: String,
        kind: u8,
    }

    impl ChipData for Tag {
        fn text(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_identity_equality() {
        let a = Chip::from("Lorem");
        let b = Chip::from("Lorem");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let set: HashSet<Chip> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_default_overrides_are_unset() {
        let chip = Chip::from("plain");
        assert_eq!(chip.layout_override(), None);
        assert_eq!(chip.background_drawable_override(), None);
        assert_eq!(chip.background_color_override(), None);
        assert_eq!(chip.background_color_selected_override(), None);
    }

    #[test]
    fn test_styled_overrides() {
        let chip = Chip::from(
            StyledChip::new("styled")
                .with_layout(LayoutId(1))
                .with_background(DrawableId(2))
                .with_background_color(ColorId(3))
                .with_background_color_selected(ColorId(4)),
        );
        assert_eq!(chip.text(), "styled");
        assert_eq!(chip.layout_override(), Some(LayoutId(1)));
        assert_eq!(chip.background_drawable_override(), Some(DrawableId(2)));
        assert_eq!(chip.background_color_override(), Some(ColorId(3)));
        assert_eq!(chip.background_color_selected_override(), Some(ColorId(4)));
    }

    #[test]
    fn test_downcast() {
        let chip = Chip::new(Tag {
            name: "Sit amet".into(),
            kind: 3,
        });
        assert_eq!(chip.downcast_ref::<Tag>().map(|t| t.kind), Some(3));
        assert!(chip.downcast_ref::<TextChip>().is_none());
    }
}
