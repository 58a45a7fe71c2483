//! Rendering value types for chipflow.
//!
//! chipflow never rasterizes anything itself. This crate holds the plain data
//! a host painter needs to draw a chip cloud:
//!
//! - [`Point`], [`Size`], [`Rect`] and [`RoundedRect`] geometry
//! - straight-alpha [`Color`] with hex parsing
//! - [`Drawable`] backgrounds, including per-state [`StateListDrawable`]s
//! - the [`TextMetrics`] trait used to size labels
//!
//! ```
//! use chipflow_render::{Color, DrawState, RoundedFill, StateListDrawable};
//!
//! let normal = RoundedFill::new(Color::from_hex("#CCCCCC").unwrap(), 16.0);
//! let selected = RoundedFill::new(Color::from_hex("#999999").unwrap(), 16.0);
//! let selector = StateListDrawable::selector(normal, selected);
//!
//! assert_eq!(selector.fill_for(DrawState::Pressed), Some(&selected));
//! ```

pub mod drawable;
pub mod text;
mod types;

pub use drawable::{DrawState, Drawable, RoundedFill, StateListDrawable};
pub use text::{MonospaceMetrics, TextMetrics};
pub use types::{Color, CornerRadii, Point, Rect, RoundedRect, Size};
