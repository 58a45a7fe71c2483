//! Drawables for chip backgrounds.
//!
//! A [`Drawable`] describes how a chip background is filled. It is either a
//! single rounded fill, a state list picking a fill per interaction state, or
//! an opaque image owned by the host (drawn by the host, not by chipflow).

use crate::types::{Color, Rect, RoundedRect};

/// Interaction state a drawable is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawState {
    /// No interaction.
    #[default]
    Normal,
    /// A pointer is held down on the chip.
    Pressed,
    /// The chip has keyboard focus.
    Focused,
}

/// A solid rounded-rectangle fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedFill {
    /// Fill color.
    pub color: Color,
    /// Corner radius, clamped to a pill shape when painted.
    pub corner_radius: f32,
}

impl RoundedFill {
    /// Create a rounded fill.
    pub fn new(color: Color, corner_radius: f32) -> Self {
        Self {
            color,
            corner_radius,
        }
    }

    /// Shape of this fill when painted over `rect`.
    pub fn shape(&self, rect: Rect) -> RoundedRect {
        RoundedRect::new(rect, self.corner_radius)
    }
}

/// A drawable that picks a fill based on the current [`DrawState`].
///
/// Entries are matched in insertion order and the first match wins; an entry
/// without a state is a wildcard and matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateListDrawable {
    entries: Vec<(Option<DrawState>, RoundedFill)>,
}

impl StateListDrawable {
    /// Create an empty state list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-state selector: `selected` for pressed and focused, `normal` otherwise.
    pub fn selector(normal: RoundedFill, selected: RoundedFill) -> Self {
        Self::new()
            .with_state(DrawState::Pressed, selected)
            .with_state(DrawState::Focused, selected)
            .with_default(normal)
    }

    /// Add an entry for a specific state.
    pub fn with_state(mut self, state: DrawState, fill: RoundedFill) -> Self {
        self.entries.push((Some(state), fill));
        self
    }

    /// Add a wildcard entry.
    pub fn with_default(mut self, fill: RoundedFill) -> Self {
        self.entries.push((None, fill));
        self
    }

    /// Fill used for `state`, if any entry matches.
    pub fn fill_for(&self, state: DrawState) -> Option<&RoundedFill> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.is_none_or(|s| s == state))
            .map(|(_, fill)| fill)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A chip background.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// One fill for every state.
    Fill(RoundedFill),
    /// A fill per interaction state.
    StateList(StateListDrawable),
    /// Host-owned image, referenced by name.
    Image(String),
}

impl Drawable {
    /// Fill to paint in `state`.
    ///
    /// Returns `None` for images (the host paints those) and for state lists
    /// with no matching entry.
    pub fn fill_for(&self, state: DrawState) -> Option<RoundedFill> {
        match self {
            Self::Fill(fill) => Some(*fill),
            Self::StateList(list) => list.fill_for(state).copied(),
            Self::Image(_) => None,
        }
    }

    /// Whether the appearance depends on the interaction state.
    pub fn is_stateful(&self) -> bool {
        matches!(self, Self::StateList(_))
    }
}

impl From<RoundedFill> for Drawable {
    fn from(fill: RoundedFill) -> Self {
        Self::Fill(fill)
    }
}

impl From<StateListDrawable> for Drawable {
    fn from(list: StateListDrawable) -> Self {
        Self::StateList(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(hex: &str) -> RoundedFill {
        RoundedFill::new(Color::from_hex(hex).unwrap(), 8.0)
    }

    #[test]
    fn test_selector_states() {
        let list = StateListDrawable::selector(fill("#CCCCCC"), fill("#999999"));
        assert_eq!(list.len(), 3);
        assert_eq!(list.fill_for(DrawState::Normal), Some(&fill("#CCCCCC")));
        assert_eq!(list.fill_for(DrawState::Pressed), Some(&fill("#999999")));
        assert_eq!(list.fill_for(DrawState::Focused), Some(&fill("#999999")));
    }

    #[test]
    fn test_first_match_wins() {
        let list = StateListDrawable::new()
            .with_default(fill("#000000"))
            .with_state(DrawState::Pressed, fill("#FFFFFF"));
        assert_eq!(list.fill_for(DrawState::Pressed), Some(&fill("#000000")));
    }

    #[test]
    fn test_empty_state_list() {
        let list = StateListDrawable::new();
        assert!(list.is_empty());
        assert_eq!(list.fill_for(DrawState::Normal), None);
    }

    #[test]
    fn test_drawable_fill_for() {
        let solid = Drawable::from(fill("#FF0000"));
        assert_eq!(solid.fill_for(DrawState::Pressed), Some(fill("#FF0000")));
        assert!(!solid.is_stateful());

        let image = Drawable::Image("chip_bg".into());
        assert_eq!(image.fill_for(DrawState::Normal), None);
    }
}
