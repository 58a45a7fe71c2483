//! Per-position customization hooks.
//!
//! A [`ChipAdapter`] sits between a chip's own overrides and the container
//! defaults. It is consulted for every chip on every refresh and can pick a
//! template, background or colors based on the chip's position or concrete
//! type, then patch the finished node.
//!
//! ```
//! use chipflow::{Chip, ChipAdapter, ChipNode, LayoutId};
//! use chipflow_render::Color;
//!
//! struct Striped;
//!
//! impl ChipAdapter for Striped {
//!     fn background_color(&self, position: usize, _chip: &Chip) -> Option<Color> {
//!         (position % 2 == 1).then_some(Color::from_rgb8(0xE0, 0xE0, 0xE0))
//!     }
//!
//!     fn on_node_ready(&self, node: &mut ChipNode, position: usize, _chip: &Chip) {
//!         if position == 0 {
//!             node.text_color = Some(Color::from_rgb8(0x21, 0x96, 0xF3));
//!         }
//!     }
//! }
//! ```

use chipflow_render::Color;

use crate::chip::Chip;
use crate::node::ChipNode;
use crate::resources::{DrawableId, LayoutId};

/// Hooks that customize chips by position.
///
/// Every method has a default that defers to the container, so an adapter
/// only implements what it needs. Hooks run while a refresh is composing; a
/// chip list change made from a hook is picked up by one more compose pass
/// of the same refresh.
pub trait ChipAdapter: Send + Sync {
    /// Node template for the chip at `position`.
    fn layout_id(&self, _position: usize, _chip: &Chip) -> Option<LayoutId> {
        None
    }

    /// Background drawable for the chip at `position`, used verbatim.
    fn background_drawable_id(&self, _position: usize, _chip: &Chip) -> Option<DrawableId> {
        None
    }

    /// Normal-state background color for the chip at `position`.
    fn background_color(&self, _position: usize, _chip: &Chip) -> Option<Color> {
        None
    }

    /// Pressed and focused background color for the chip at `position`.
    fn background_color_selected(&self, _position: usize, _chip: &Chip) -> Option<Color> {
        None
    }

    /// Last chance to modify a materialized node.
    fn on_node_ready(&self, _node: &mut ChipNode, _position: usize, _chip: &Chip) {}
}

/// Adapter that defers everything to the chips and the container.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapter;

impl ChipAdapter for DefaultAdapter {}
