//! Chipflow - a wrapping chip cloud container.
//!
//! Chips are small labelled items (tags, filters, recipients) laid out left
//! to right and wrapped onto new lines when the available width runs out.
//! Each chip's look is resolved from, in order of precedence, the chip
//! itself, an adapter keyed by position, and the container configuration.
//!
//! # Example
//!
//! ```
//! use chipflow::{Chip, ChipView, ChipViewConfig, StyledChip, Color};
//!
//! let view = ChipView::builder()
//!     .config(ChipViewConfig {
//!         background_color: Color::from_hex("#3F51B5").unwrap_or(Color::GRAY),
//!         ..ChipViewConfig::default()
//!     })
//!     .build()?;
//!
//! view.add("Lorem")?;
//! view.add(StyledChip::new("Ipsum"))?;
//!
//! let weak = view.downgrade();
//! view.set_on_chip_click_listener(move |chip| {
//!     if let Some(view) = weak.upgrade() {
//!         let _ = view.remove(chip);
//!     }
//! });
//!
//! let size = view.layout(320.0);
//! assert!(size.height > 0.0);
//! assert_eq!(view.display_list().len(), 2);
//! # Ok::<(), chipflow::ChipError>(())
//! ```

pub mod adapter;
pub mod chip;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod layout;
pub mod list;
pub mod materializer;
pub mod node;
pub mod resolver;
pub mod resources;
pub mod view;

pub use adapter::{ChipAdapter, DefaultAdapter};
pub use chip::{Chip, ChipData, StyledChip, TextChip};
pub use config::ChipViewConfig;
pub use dispatch::{ChipClickListener, ClickDispatcher};
pub use display::{DisplayBackground, DisplayItem, DisplayText};
pub use error::{ChipError, ResourceKind, Result};
pub use layout::{Arranged, ContentMargins, FlowItem, FlowLayout, Measured};
pub use list::{ChipList, ListChange};
pub use node::ChipNode;
pub use resolver::{LayoutChoice, OverrideSource, ResolveContext, ResolvedVisual};
pub use resources::{
    ColorId, DrawableId, LayoutId, NodeTemplate, ResourceProvider, ResourceTable,
};
pub use view::{ChipView, ChipViewBuilder, WeakChipView};

pub use chipflow_core::{ConnectionId, Signal};
pub use chipflow_render::{
    Color, DrawState, Drawable, MonospaceMetrics, Point, Rect, RoundedFill, Size,
    StateListDrawable, TextMetrics,
};
