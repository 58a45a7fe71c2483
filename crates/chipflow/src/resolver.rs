//! Visual resolution.
//!
//! Decides which template and background a chip uses. Each value walks an
//! override chain and the first level that sets it wins:
//!
//! | Value | Chip | Adapter | Container | Fallback |
//! |---|---|---|---|---|
//! | template | `layout_override` | `layout_id` | `default_layout` | built-in pill |
//! | background | `background_drawable_override` | `background_drawable_id` | `default_background` | generated selector |
//! | normal color | `background_color_override` | `background_color` | `background_color` | |
//! | selected color | `background_color_selected_override` | `background_color_selected` | `background_color_selected` | |
//!
//! Colors are only consulted when no drawable was found. Resolution has no
//! side effects; unknown ids fail with
//! [`ChipError::ResourceResolution`](crate::ChipError::ResourceResolution).

use chipflow_core::logging::targets;
use chipflow_render::{Color, Drawable, RoundedFill, StateListDrawable};

use crate::adapter::ChipAdapter;
use crate::chip::Chip;
use crate::config::ChipViewConfig;
use crate::error::Result;
use crate::resources::{LayoutId, ResourceProvider, require_color, require_drawable};

/// Which node template a chip uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutChoice {
    /// The generated pill.
    BuiltIn,
    /// A host template.
    Template(LayoutId),
}

/// Which level of the override chain supplied a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideSource {
    /// The chip itself.
    Chip,
    /// The adapter.
    Adapter,
    /// The container configuration.
    Container,
    /// Built-in behavior.
    BuiltIn,
}

/// Everything the resolver decided for one chip.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVisual {
    /// Template to materialize.
    pub layout: LayoutChoice,
    /// Background for every state.
    pub background: Drawable,
    /// Where the background came from. [`OverrideSource::BuiltIn`] means a
    /// generated selector.
    pub background_source: OverrideSource,
}

/// Inputs shared by every chip of one refresh.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Per-position hooks.
    pub adapter: &'a dyn ChipAdapter,
    /// Container configuration.
    pub config: &'a ChipViewConfig,
    /// Resource lookup.
    pub resources: &'a dyn ResourceProvider,
}

/// Resolve the template and background of the chip at `position`.
pub fn resolve(chip: &Chip, position: usize, cx: &ResolveContext<'_>) -> Result<ResolvedVisual> {
    let layout = resolve_layout(chip, position, cx);
    let (background, background_source) = resolve_background(chip, position, cx)?;

    tracing::trace!(
        target: targets::RESOLVE,
        position,
        ?layout,
        ?background_source,
        "resolved chip visual"
    );

    Ok(ResolvedVisual {
        layout,
        background,
        background_source,
    })
}

/// First template set along the chain, or the built-in pill.
pub fn resolve_layout(chip: &Chip, position: usize, cx: &ResolveContext<'_>) -> LayoutChoice {
    chip.layout_override()
        .or_else(|| cx.adapter.layout_id(position, chip))
        .or(cx.config.default_layout)
        .map_or(LayoutChoice::BuiltIn, LayoutChoice::Template)
}

fn resolve_background(
    chip: &Chip,
    position: usize,
    cx: &ResolveContext<'_>,
) -> Result<(Drawable, OverrideSource)> {
    let drawable = chip
        .background_drawable_override()
        .map(|id| (id, OverrideSource::Chip))
        .or_else(|| {
            cx.adapter
                .background_drawable_id(position, chip)
                .map(|id| (id, OverrideSource::Adapter))
        })
        .or_else(|| {
            cx.config
                .default_background
                .map(|id| (id, OverrideSource::Container))
        });

    if let Some((id, source)) = drawable {
        return Ok((require_drawable(cx.resources, id)?, source));
    }

    let (normal, selected) = resolve_colors(chip, position, cx)?;
    let radius = cx.config.chip_corner_radius;
    let selector = StateListDrawable::selector(
        RoundedFill::new(normal, radius),
        RoundedFill::new(selected, radius),
    );
    Ok((selector.into(), OverrideSource::BuiltIn))
}

/// Normal and selected background colors of the chip at `position`.
pub fn resolve_colors(
    chip: &Chip,
    position: usize,
    cx: &ResolveContext<'_>,
) -> Result<(Color, Color)> {
    let normal = match chip.background_color_override() {
        Some(id) => require_color(cx.resources, id)?,
        None => cx
            .adapter
            .background_color(position, chip)
            .unwrap_or(cx.config.background_color),
    };
    let selected = match chip.background_color_selected_override() {
        Some(id) => require_color(cx.resources, id)?,
        None => cx
            .adapter
            .background_color_selected(position, chip)
            .unwrap_or(cx.config.background_color_selected),
    };
    Ok((normal, selected))
}
