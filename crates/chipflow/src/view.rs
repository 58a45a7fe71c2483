//! The chip container.
//!
//! [`ChipView`] owns a [`ChipList`], turns every chip into a node and lays
//! the nodes out in wrapping lines. Any change to the chips, the
//! configuration, the adapter or the resources triggers a full refresh: all
//! nodes are rebuilt, measured and arranged, and the result is published as
//! one frame. A failed refresh leaves the previous frame in place.
//!
//! # Example
//!
//! ```
//! use chipflow::{Chip, ChipView};
//!
//! let view = ChipView::new();
//! view.set_chip_list(["Lorem", "Ipsum dolor", "Sit amet"].map(Chip::from))?;
//! view.layout(200.0);
//!
//! let items = view.display_list();
//! assert_eq!(items.len(), 3);
//! assert_eq!(items[0].text.as_ref().map(|t| t.text.as_str()), Some("Lorem"));
//! # Ok::<(), chipflow::ChipError>(())
//! ```
//!
//! # Clicks
//!
//! A registered listener receives the clicked chip. It runs with no internal
//! lock held, so it can modify the view directly. Capture a
//! [`WeakChipView`] rather than a [`ChipView`] to avoid a reference cycle:
//!
//! ```
//! use chipflow::{Chip, ChipView};
//! use chipflow_render::Point;
//!
//! let view = ChipView::new();
//! view.set_chip_list([Chip::from("Lorem")])?;
//! view.layout(200.0);
//!
//! let weak = view.downgrade();
//! view.set_on_chip_click_listener(move |chip| {
//!     if let Some(view) = weak.upgrade() {
//!         let _ = view.remove(chip);
//!     }
//! });
//!
//! assert!(view.click_at(Point::new(5.0, 5.0)).is_some());
//! assert_eq!(view.count(), 0);
//! # Ok::<(), chipflow::ChipError>(())
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use chipflow_core::logging::targets;
use chipflow_core::{ConnectionId, PerfSpan, Property, Signal};
use chipflow_render::{
    Color, DrawState, MonospaceMetrics, Point, Rect, Size, TextMetrics,
};
use parking_lot::{Mutex, RwLock};

use crate::adapter::{ChipAdapter, DefaultAdapter};
use crate::chip::Chip;
use crate::config::ChipViewConfig;
use crate::dispatch::ClickDispatcher;
use crate::display::DisplayItem;
use crate::error::{ChipError, Result};
use crate::layout::{ContentMargins, FlowItem, FlowLayout, Measured};
use crate::list::{ChipList, ListChange};
use crate::materializer::build_nodes;
use crate::node::ChipNode;
use crate::resolver::ResolveContext;
use crate::resources::{DrawableId, LayoutId, ResourceProvider, ResourceTable};

/// One published refresh: nodes plus their placements.
struct Frame {
    generation: u64,
    nodes: Arc<[ChipNode]>,
    items: Arc<[FlowItem]>,
    placements: Vec<Option<Rect>>,
    size: Size,
    line_count: usize,
}

impl Frame {
    fn empty() -> Self {
        Self {
            generation: 0,
            nodes: Arc::from(Vec::new()),
            items: Arc::from(Vec::new()),
            placements: Vec::new(),
            size: Size::ZERO,
            line_count: 0,
        }
    }

    fn with_layout(&self, arranged: crate::layout::Arranged) -> Self {
        Self {
            generation: self.generation,
            nodes: self.nodes.clone(),
            items: self.items.clone(),
            placements: arranged.placements,
            size: arranged.size,
            line_count: arranged.line_count,
        }
    }

    fn node_at(&self, point: Point) -> Option<usize> {
        self.placements
            .iter()
            .position(|rect| rect.is_some_and(|r| r.contains(point)))
    }
}

struct ViewInner {
    chips: Arc<ChipList>,
    list_connection: ConnectionId,
    config: Property<ChipViewConfig>,
    adapter: RwLock<Arc<dyn ChipAdapter>>,
    resources: RwLock<Arc<dyn ResourceProvider>>,
    metrics: RwLock<Arc<dyn TextMetrics>>,
    layout: RwLock<FlowLayout>,
    available_width: Property<f32>,
    frame: RwLock<Arc<Frame>>,
    measured: Mutex<Option<(u64, Measured)>>,
    generation: AtomicU64,
    refreshing: AtomicBool,
    pending: AtomicBool,
    last_error: Mutex<Option<ChipError>>,
    dispatcher: ClickDispatcher,
    refreshed: Signal<usize>,
    redraw_requested: Signal<()>,
    refresh_failed: Signal<String>,
}

impl ViewInner {
    fn frame(&self) -> Arc<Frame> {
        self.frame.read().clone()
    }

    fn on_list_changed(&self, change: ListChange) {
        tracing::trace!(target: targets::VIEW, ?change, "chip list changed");
        if let Err(err) = self.refresh() {
            *self.last_error.lock() = Some(err);
        }
    }

    /// Rebuild and publish. Requests made while composing are folded into
    /// one more pass of the running refresh.
    fn refresh(&self) -> Result<()> {
        if self.refreshing.swap(true, Ordering::AcqRel) {
            self.pending.store(true, Ordering::Release);
            tracing::trace!(target: targets::VIEW, "refresh requested while composing");
            return Ok(());
        }

        let _span = PerfSpan::new("chip_view.refresh");
        let result = loop {
            self.pending.store(false, Ordering::Release);
            let result = self.compose();
            if !self.pending.load(Ordering::Acquire) {
                break result;
            }
        };
        self.refreshing.store(false, Ordering::Release);

        match result {
            Ok(count) => {
                tracing::debug!(target: targets::VIEW, count, "chip view refreshed");
                self.redraw_requested.emit(());
                self.refreshed.emit(count);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    target: targets::VIEW,
                    error = %err,
                    "chip view refresh failed, keeping previous frame"
                );
                self.refresh_failed.emit(err.to_string());
                Err(err)
            }
        }
    }

    fn compose(&self) -> Result<usize> {
        let chips = self.chips.snapshot();
        let config = self.config.get();
        let adapter = self.adapter.read().clone();
        let resources = self.resources.read().clone();
        let metrics = self.metrics.read().clone();

        let cx = ResolveContext {
            adapter: adapter.as_ref(),
            config: &config,
            resources: resources.as_ref(),
        };
        let nodes = build_nodes(&chips, &cx)?;
        let items: Vec<FlowItem> = nodes
            .iter()
            .map(|node| node.flow_item(metrics.as_ref()))
            .collect();

        let measured = self
            .layout
            .read()
            .measure(&items, self.available_width.get());
        let arranged = measured.arrange(&items);

        let count = nodes.len();
        let frame = Frame {
            generation: self.generation.fetch_add(1, Ordering::AcqRel) + 1,
            nodes: nodes.into(),
            items: items.into(),
            placements: arranged.placements,
            size: arranged.size,
            line_count: arranged.line_count,
        };
        *self.frame.write() = Arc::new(frame);
        *self.measured.lock() = None;
        self.dispatcher.cancel();
        self.dispatcher.set_focused(None);
        Ok(count)
    }

    fn measure(&self, available_width: f32) -> Size {
        self.available_width.set(available_width);
        let frame = self.frame();
        let measured = self.layout.read().measure(&frame.items, available_width);
        let size = measured.size();
        *self.measured.lock() = Some((frame.generation, measured));
        size
    }

    fn arrange(&self) {
        let frame = self.frame();
        let pending = self.measured.lock().take();
        let measured = match pending {
            Some((generation, measured)) if generation == frame.generation => measured,
            _ => self
                .layout
                .read()
                .measure(&frame.items, self.available_width.get()),
        };
        let next = frame.with_layout(measured.arrange(&frame.items));

        let mut slot = self.frame.write();
        if slot.generation == frame.generation {
            *slot = Arc::new(next);
        }
    }
}

impl Drop for ViewInner {
    fn drop(&mut self) {
        self.chips.changed().disconnect(self.list_connection);
    }
}

/// Builder for a [`ChipView`].
///
/// ```
/// use chipflow::{ChipList, ChipView, ChipViewConfig, ResourceTable};
/// use std::sync::Arc;
///
/// let list = Arc::new(ChipList::new());
/// let view = ChipView::builder()
///     .list(list.clone())
///     .config(ChipViewConfig { chip_spacing: 4.0, ..Default::default() })
///     .resources(ResourceTable::new())
///     .build()?;
///
/// list.add("Lorem".into());
/// assert_eq!(view.node_count(), 1);
/// # Ok::<(), chipflow::ChipError>(())
/// ```
pub struct ChipViewBuilder {
    list: Option<Arc<ChipList>>,
    config: ChipViewConfig,
    adapter: Arc<dyn ChipAdapter>,
    resources: Arc<dyn ResourceProvider>,
    metrics: Arc<dyn TextMetrics>,
    content_margins: ContentMargins,
    available_width: f32,
}

impl Default for ChipViewBuilder {
    fn default() -> Self {
        Self {
            list: None,
            config: ChipViewConfig::default(),
            adapter: Arc::new(DefaultAdapter),
            resources: Arc::new(ResourceTable::new()),
            metrics: Arc::new(MonospaceMetrics::default()),
            content_margins: ContentMargins::ZERO,
            available_width: f32::INFINITY,
        }
    }
}

impl ChipViewBuilder {
    /// Share an existing chip list.
    pub fn list(mut self, list: Arc<ChipList>) -> Self {
        self.list = Some(list);
        self
    }

    /// Start from `config`.
    pub fn config(mut self, config: ChipViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `adapter` for per-position hooks.
    pub fn adapter(mut self, adapter: impl ChipAdapter + 'static) -> Self {
        self.adapter = Arc::new(adapter);
        self
    }

    /// Look resources up in `resources`.
    pub fn resources(mut self, resources: impl ResourceProvider + 'static) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    /// Measure labels with `metrics`.
    pub fn metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Arc::new(metrics);
        self
    }

    /// Set the container's content insets.
    pub fn content_margins(mut self, margins: ContentMargins) -> Self {
        self.content_margins = margins;
        self
    }

    /// Width to lay out against until the host measures the view.
    pub fn available_width(mut self, width: f32) -> Self {
        self.available_width = width;
        self
    }

    /// Build the view and run its first refresh.
    pub fn build(self) -> Result<ChipView> {
        let view = self.assemble();
        view.inner.refresh()?;
        Ok(view)
    }

    fn assemble(self) -> ChipView {
        let chips = self.list.unwrap_or_default();
        chips.set_tolerates_duplicates(self.config.tolerates_duplicates);

        let inner = Arc::new_cyclic(|weak: &Weak<ViewInner>| {
            let weak = weak.clone();
            let list_connection = chips.changed().connect(move |change| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_list_changed(*change);
                }
            });

            ViewInner {
                chips: chips.clone(),
                list_connection,
                config: Property::new(self.config),
                adapter: RwLock::new(self.adapter),
                resources: RwLock::new(self.resources),
                metrics: RwLock::new(self.metrics),
                layout: RwLock::new(FlowLayout::with_insets(self.content_margins)),
                available_width: Property::new(self.available_width),
                frame: RwLock::new(Arc::new(Frame::empty())),
                measured: Mutex::new(None),
                generation: AtomicU64::new(0),
                refreshing: AtomicBool::new(false),
                pending: AtomicBool::new(false),
                last_error: Mutex::new(None),
                dispatcher: ClickDispatcher::new(),
                refreshed: Signal::new(),
                redraw_requested: Signal::new(),
                refresh_failed: Signal::new(),
            }
        });

        ChipView { inner }
    }
}

/// A container that lays chips out in wrapping lines.
///
/// `ChipView` is a cheap handle; clones share the same view.
#[derive(Clone)]
pub struct ChipView {
    inner: Arc<ViewInner>,
}

/// A non-owning [`ChipView`] handle, for use inside listeners.
#[derive(Clone)]
pub struct WeakChipView {
    inner: Weak<ViewInner>,
}

impl WeakChipView {
    /// The view, if it is still alive.
    pub fn upgrade(&self) -> Option<ChipView> {
        self.inner.upgrade().map(|inner| ChipView { inner })
    }
}

impl ChipView {
    /// An empty view with default configuration.
    pub fn new() -> Self {
        // An empty list composes to the empty frame the view starts with.
        ChipViewBuilder::default().assemble()
    }

    /// Start building a view.
    pub fn builder() -> ChipViewBuilder {
        ChipViewBuilder::default()
    }

    /// A non-owning handle to this view.
    pub fn downgrade(&self) -> WeakChipView {
        WeakChipView {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // -------------------------------------------------------------------------
    // Chips
    // -------------------------------------------------------------------------

    /// The shared chip list.
    pub fn chips(&self) -> Arc<ChipList> {
        self.inner.chips.clone()
    }

    /// Copy of the current chips, in order.
    pub fn chip_list(&self) -> Vec<Chip> {
        self.inner.chips.snapshot()
    }

    /// Replace every chip and refresh.
    pub fn set_chip_list(&self, chips: impl IntoIterator<Item = Chip>) -> Result<()> {
        self.mutate(|list| list.set_chips(chips))
    }

    /// Append a chip and refresh.
    ///
    /// Returns `Ok(false)` when the chip is already present and duplicates
    /// are not tolerated; nothing is refreshed in that case.
    pub fn add(&self, chip: impl Into<Chip>) -> Result<bool> {
        let chip = chip.into();
        self.mutate(|list| list.add(chip))
    }

    /// Remove the first occurrence of `chip` and refresh.
    ///
    /// Returns `Ok(false)` when the chip is absent; nothing is refreshed in
    /// that case.
    pub fn remove(&self, chip: &Chip) -> Result<bool> {
        self.mutate(|list| list.remove(chip))
    }

    /// Number of chips.
    pub fn count(&self) -> usize {
        self.inner.chips.count()
    }

    fn mutate<R>(&self, f: impl FnOnce(&ChipList) -> R) -> Result<R> {
        self.inner.last_error.lock().take();
        let result = f(&self.inner.chips);
        let error = self.inner.last_error.lock().take();
        match error {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    // -------------------------------------------------------------------------
    // Refresh
    // -------------------------------------------------------------------------

    /// Rebuild every node and lay them out again.
    ///
    /// On failure the previously published nodes stay in place and the
    /// error is also reported on [`refresh_failed`](Self::refresh_failed).
    pub fn refresh(&self) -> Result<()> {
        self.inner.refresh()
    }

    /// Whether a refresh is composing right now.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.load(Ordering::Acquire)
    }

    /// Emitted with the node count after every successful refresh.
    pub fn refreshed(&self) -> &Signal<usize> {
        &self.inner.refreshed
    }

    /// Emitted whenever the view needs repainting.
    pub fn redraw_requested(&self) -> &Signal<()> {
        &self.inner.redraw_requested
    }

    /// Emitted with the error message when a refresh fails.
    pub fn refresh_failed(&self) -> &Signal<String> {
        &self.inner.refresh_failed
    }

    // -------------------------------------------------------------------------
    // Collaborators
    // -------------------------------------------------------------------------

    /// Replace the adapter and refresh.
    pub fn set_adapter(&self, adapter: impl ChipAdapter + 'static) -> Result<()> {
        *self.inner.adapter.write() = Arc::new(adapter);
        self.inner.refresh()
    }

    /// Replace the resource provider and refresh.
    pub fn set_resources(&self, resources: impl ResourceProvider + 'static) -> Result<()> {
        *self.inner.resources.write() = Arc::new(resources);
        self.inner.refresh()
    }

    /// Replace the text metrics and refresh.
    pub fn set_text_metrics(&self, metrics: impl TextMetrics + 'static) -> Result<()> {
        *self.inner.metrics.write() = Arc::new(metrics);
        self.inner.refresh()
    }

    // -------------------------------------------------------------------------
    // Host layout
    // -------------------------------------------------------------------------

    /// Measure the published nodes against `available_width`.
    ///
    /// Returns the size the view wants. The width grows past
    /// `available_width` when a single chip is wider than that.
    pub fn measure(&self, available_width: f32) -> Size {
        self.inner.measure(available_width)
    }

    /// Place the published nodes using the last measurement.
    pub fn arrange(&self) {
        self.inner.arrange();
    }

    /// Measure and arrange in one step.
    pub fn layout(&self, available_width: f32) -> Size {
        let size = self.measure(available_width);
        self.arrange();
        size
    }

    /// Last width the view was measured against.
    pub fn available_width(&self) -> f32 {
        self.inner.available_width.get()
    }

    /// Container padding around the chips.
    pub fn content_margins(&self) -> ContentMargins {
        self.inner.layout.read().content_margins()
    }

    /// Set the container padding and lay out again.
    pub fn set_content_margins(&self, margins: ContentMargins) {
        let changed = self.inner.layout.write().set_content_margins(margins);
        if changed {
            self.layout(self.available_width());
            self.inner.redraw_requested.emit(());
        }
    }

    /// Size from the last layout.
    pub fn size(&self) -> Size {
        self.inner.frame().size
    }

    /// Number of lines from the last layout.
    pub fn line_count(&self) -> usize {
        self.inner.frame().line_count
    }

    /// Number of published nodes.
    pub fn node_count(&self) -> usize {
        self.inner.frame().nodes.len()
    }

    /// The published nodes, in render order.
    pub fn nodes(&self) -> Arc<[ChipNode]> {
        self.inner.frame().nodes.clone()
    }

    /// Placement of each published node; `None` for collapsed nodes.
    pub fn placements(&self) -> Vec<Option<Rect>> {
        self.inner.frame().placements.clone()
    }

    /// Everything a painter needs, in render order.
    pub fn display_list(&self) -> Vec<DisplayItem> {
        let frame = self.inner.frame();
        let metrics = self.inner.metrics.read().clone();
        let pressed = self.inner.dispatcher.pressed_index();
        let focused = self.inner.dispatcher.focused_index();

        frame
            .nodes
            .iter()
            .zip(&frame.placements)
            .enumerate()
            .filter_map(|(index, (node, placement))| {
                let bounds = (*placement)?;
                let state = if pressed == Some(index) {
                    DrawState::Pressed
                } else if focused == Some(index) {
                    DrawState::Focused
                } else {
                    DrawState::Normal
                };
                Some(DisplayItem::new(node, bounds, state, metrics.as_ref()))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Register the click listener, replacing any previous one.
    pub fn set_on_chip_click_listener<F>(&self, listener: F)
    where
        F: Fn(&Chip) + Send + Sync + 'static,
    {
        self.inner.dispatcher.set_listener(Some(Arc::new(listener)));
    }

    /// Remove the click listener.
    pub fn clear_on_chip_click_listener(&self) {
        self.inner.dispatcher.set_listener(None);
    }

    /// Index of the node under `point`.
    pub fn node_at(&self, point: Point) -> Option<usize> {
        self.inner.frame().node_at(point)
    }

    /// Chip under `point`.
    pub fn chip_at(&self, point: Point) -> Option<Chip> {
        let frame = self.inner.frame();
        frame
            .node_at(point)
            .map(|index| frame.nodes[index].chip().clone())
    }

    /// Press the pointer at `point`. Returns `true` if it hit a chip.
    pub fn press_at(&self, point: Point) -> bool {
        let frame = self.inner.frame();
        let Some(index) = frame.node_at(point) else {
            return false;
        };
        self.inner
            .dispatcher
            .press(index, frame.nodes[index].chip().clone());
        drop(frame);
        self.inner.redraw_requested.emit(());
        true
    }

    /// Release the pointer at `point`.
    ///
    /// Completes a click when released over the pressed chip and returns
    /// that chip.
    pub fn release_at(&self, point: Point) -> Option<Chip> {
        if self.inner.dispatcher.pressed_index().is_none() {
            return None;
        }
        let index = self.node_at(point);
        // The pressed look ends before the listener runs.
        self.inner.redraw_requested.emit(());
        self.inner.dispatcher.release(index)
    }

    /// Abandon the current press without clicking.
    pub fn cancel_press(&self) {
        if self.inner.dispatcher.cancel() {
            self.inner.redraw_requested.emit(());
        }
    }

    /// Click the chip under `point` and return it.
    pub fn click_at(&self, point: Point) -> Option<Chip> {
        let chip = self.chip_at(point)?;
        self.inner.dispatcher.click(&chip);
        Some(chip)
    }

    /// Click the chip at node `index` and return it.
    pub fn click(&self, index: usize) -> Option<Chip> {
        let chip = self.inner.frame().nodes.get(index)?.chip().clone();
        self.inner.dispatcher.click(&chip);
        Some(chip)
    }

    /// Move focus to node `index`, or clear it.
    pub fn set_focused(&self, index: Option<usize>) {
        if self.inner.dispatcher.set_focused(index) {
            self.inner.redraw_requested.emit(());
        }
    }

    /// Index of the focused node.
    pub fn focused(&self) -> Option<usize> {
        self.inner.dispatcher.focused_index()
    }

    /// Index of the pressed node.
    pub fn pressed(&self) -> Option<usize> {
        self.inner.dispatcher.pressed_index()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Copy of the configuration.
    pub fn config(&self) -> ChipViewConfig {
        self.inner.config.get()
    }

    /// Replace the whole configuration.
    pub fn set_config(&self, config: ChipViewConfig) -> Result<()> {
        self.update_config(|c| *c = config)
    }

    /// Load the configuration from a TOML file and apply it.
    pub fn load_config(&self, path: impl AsRef<Path>) -> Result<()> {
        let config = ChipViewConfig::load(path)?;
        self.set_config(config)
    }

    fn update_config(&self, f: impl FnOnce(&mut ChipViewConfig)) -> Result<()> {
        let before = self.inner.config.get();
        if !self.inner.config.update(f) {
            return Ok(());
        }
        let after = self.inner.config.get();
        self.inner
            .chips
            .set_tolerates_duplicates(after.tolerates_duplicates);

        if before.affects_visuals(&after) {
            self.inner.refresh()
        } else {
            Ok(())
        }
    }

    /// Horizontal gap after each chip.
    pub fn chip_spacing(&self) -> f32 {
        self.inner.config.with(|c| c.chip_spacing)
    }

    /// Set the horizontal gap after each chip.
    pub fn set_chip_spacing(&self, spacing: f32) -> Result<()> {
        self.update_config(|c| c.chip_spacing = spacing)
    }

    /// Vertical gap below each chip.
    pub fn line_spacing(&self) -> f32 {
        self.inner.config.with(|c| c.line_spacing)
    }

    /// Set the vertical gap below each chip.
    pub fn set_line_spacing(&self, spacing: f32) -> Result<()> {
        self.update_config(|c| c.line_spacing = spacing)
    }

    /// Top and bottom padding of the built-in pill.
    pub fn chip_padding(&self) -> f32 {
        self.inner.config.with(|c| c.chip_padding)
    }

    /// Set the top and bottom padding of the built-in pill.
    pub fn set_chip_padding(&self, padding: f32) -> Result<()> {
        self.update_config(|c| c.chip_padding = padding)
    }

    /// Left and right padding of the built-in pill.
    pub fn chip_side_padding(&self) -> f32 {
        self.inner.config.with(|c| c.chip_side_padding)
    }

    /// Set the left and right padding of the built-in pill.
    pub fn set_chip_side_padding(&self, padding: f32) -> Result<()> {
        self.update_config(|c| c.chip_side_padding = padding)
    }

    /// Corner radius of generated backgrounds.
    pub fn chip_corner_radius(&self) -> f32 {
        self.inner.config.with(|c| c.chip_corner_radius)
    }

    /// Set the corner radius of generated backgrounds.
    pub fn set_chip_corner_radius(&self, radius: f32) -> Result<()> {
        self.update_config(|c| c.chip_corner_radius = radius)
    }

    /// Label font size, `None` when inherited.
    pub fn chip_text_size(&self) -> Option<f32> {
        self.inner.config.with(|c| c.chip_text_size)
    }

    /// Set the label font size; `None` inherits.
    pub fn set_chip_text_size(&self, size: Option<f32>) -> Result<()> {
        self.update_config(|c| c.chip_text_size = size)
    }

    /// Container-wide node template.
    pub fn chip_layout(&self) -> Option<LayoutId> {
        self.inner.config.with(|c| c.default_layout)
    }

    /// Set the container-wide node template.
    pub fn set_chip_layout(&self, layout: Option<LayoutId>) -> Result<()> {
        self.update_config(|c| c.default_layout = layout)
    }

    /// Container-wide background drawable.
    pub fn chip_background(&self) -> Option<DrawableId> {
        self.inner.config.with(|c| c.default_background)
    }

    /// Set the container-wide background drawable.
    pub fn set_chip_background(&self, background: Option<DrawableId>) -> Result<()> {
        self.update_config(|c| c.default_background = background)
    }

    /// Normal-state background color.
    pub fn chip_background_color(&self) -> Color {
        self.inner.config.with(|c| c.background_color)
    }

    /// Set the normal-state background color.
    pub fn set_chip_background_color(&self, color: Color) -> Result<()> {
        self.update_config(|c| c.background_color = color)
    }

    /// Pressed and focused background color.
    pub fn chip_background_color_selected(&self) -> Color {
        self.inner.config.with(|c| c.background_color_selected)
    }

    /// Set the pressed and focused background color.
    pub fn set_chip_background_color_selected(&self, color: Color) -> Result<()> {
        self.update_config(|c| c.background_color_selected = color)
    }

    /// Whether the same chip may be added twice.
    pub fn tolerates_duplicates(&self) -> bool {
        self.inner.config.with(|c| c.tolerates_duplicates)
    }

    /// Allow or reject duplicate chips. Does not refresh.
    pub fn set_tolerates_duplicates(&self, tolerates: bool) -> Result<()> {
        self.update_config(|c| c.tolerates_duplicates = tolerates)
    }

    /// Whether chip backgrounds are drawn.
    pub fn renders_background(&self) -> bool {
        self.inner.config.with(|c| c.renders_background)
    }

    /// Turn chip backgrounds on or off.
    pub fn set_renders_background(&self, renders: bool) -> Result<()> {
        self.update_config(|c| c.renders_background = renders)
    }
}

impl Default for ChipView {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChipView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let frame = self.inner.frame();
        f.debug_struct("ChipView")
            .field("count", &self.count())
            .field("nodes", &frame.nodes.len())
            .field("size", &frame.size)
            .field("lines", &frame.line_count)
            .finish()
    }
}

static_assertions::assert_impl_all!(ChipView: Send, Sync);
static_assertions::assert_impl_all!(WeakChipView: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::StyledChip;
    use crate::resources::ColorId;
    use std::sync::atomic::AtomicUsize;

    fn counter<T: 'static>(signal: &Signal<T>) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_new_view_is_empty() {
        let view = ChipView::new();
        assert_eq!(view.count(), 0);
        assert_eq!(view.node_count(), 0);
        assert!(view.display_list().is_empty());
        assert_eq!(view.layout(100.0).height, 0.0);
        assert_eq!(view.line_count(), 1);
    }

    #[test]
    fn test_add_refreshes() {
        let view = ChipView::new();
        let refreshed = counter(view.refreshed());

        assert!(view.add("Lorem").unwrap());
        assert_eq!(view.node_count(), 1);
        assert_eq!(refreshed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_identical_setter_does_not_refresh() {
        let view = ChipView::new();
        view.add("Lorem").unwrap();
        let refreshed = counter(view.refreshed());

        view.set_chip_spacing(view.chip_spacing()).unwrap();
        assert_eq!(refreshed.load(Ordering::SeqCst), 0);
        view.set_chip_spacing(2.0).unwrap();
        assert_eq!(refreshed.load(Ordering::SeqCst), 1);
        assert_eq!(view.nodes()[0].margins.right, 2.0);
    }

    #[test]
    fn test_duplicate_policy_setter_skips_refresh() {
        let view = ChipView::new();
        let refreshed = counter(view.refreshed());
        view.set_tolerates_duplicates(true).unwrap();
        assert_eq!(refreshed.load(Ordering::SeqCst), 0);
        assert!(view.chips().tolerates_duplicates());

        let chip = Chip::from("A");
        view.add(chip.clone()).unwrap();
        assert!(view.add(chip).unwrap());
        assert_eq!(view.count(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_frame() {
        let view = ChipView::new();
        view.set_chip_list([Chip::from("A"), Chip::from("B")]).unwrap();
        let failed = counter(view.refresh_failed());

        let bad = Chip::from(StyledChip::new("bad").with_background_color(ColorId(9)));
        let err = view.add(bad).unwrap_err();
        assert!(err.is_resource_error());
        assert_eq!(view.count(), 3);
        assert_eq!(view.node_count(), 2);
        assert_eq!(failed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_measure_then_arrange() {
        let view = ChipView::builder()
            .config(ChipViewConfig {
                chip_text_size: Some(10.0),
                ..ChipViewConfig::default()
            })
            .build()
            .unwrap();
        // Each pill: 5 * 5 + 40 = 65 wide, 12.5 + 12 = 24.5 tall; with margins 73 x 32.5.
        view.set_chip_list(["Lorem", "Ipsum", "Dolor"].map(Chip::from))
            .unwrap();

        let size = view.measure(150.0);
        assert_eq!(size, Size::new(150.0, 65.0));
        view.arrange();
        assert_eq!(view.line_count(), 2);

        let placements = view.placements();
        assert_eq!(placements[0], Some(Rect::new(0.0, 0.0, 65.0, 24.5)));
        assert_eq!(placements[1], Some(Rect::new(73.0, 0.0, 65.0, 24.5)));
        assert_eq!(placements[2], Some(Rect::new(0.0, 32.5, 65.0, 24.5)));
    }

    #[test]
    fn test_content_margins_relayout() {
        let view = ChipView::new();
        view.add("A").unwrap();
        view.layout(100.0);
        let before = view.placements()[0].unwrap();

        view.set_content_margins(ContentMargins::uniform(10.0));
        let after = view.placements()[0].unwrap();
        assert_eq!(after.left(), before.left() + 10.0);
        assert_eq!(after.top(), before.top() + 10.0);
    }

    #[test]
    fn test_press_shows_selected_fill() {
        let view = ChipView::new();
        view.add("A").unwrap();
        view.layout(200.0);

        assert!(view.press_at(Point::new(1.0, 1.0)));
        let items = view.display_list();
        assert_eq!(items[0].state, DrawState::Pressed);
        assert_eq!(items[0].fill_color(), Some(view.chip_background_color_selected()));

        view.cancel_press();
        assert_eq!(view.display_list()[0].fill_color(), Some(view.chip_background_color()));
    }

    #[test]
    fn test_focus_uses_selected_fill() {
        let view = ChipView::new();
        view.add("A").unwrap();
        view.layout(200.0);
        view.set_focused(Some(0));
        assert_eq!(view.display_list()[0].state, DrawState::Focused);
        assert_eq!(
            view.display_list()[0].fill_color(),
            Some(view.chip_background_color_selected())
        );
    }

    #[test]
    fn test_refresh_clears_focus() {
        let view = ChipView::new();
        let [a, b] = ["A", "B"].map(Chip::from);
        view.set_chip_list([a, b.clone()]).unwrap();
        view.layout(200.0);
        view.set_focused(Some(1));
        assert!(view.remove(&b).unwrap());
        assert_eq!(view.focused(), None);
        assert!(view.display_list().iter().all(|item| item.state == DrawState::Normal));
    }

    #[test]
    fn test_dropping_view_disconnects_list() {
        let list = Arc::new(ChipList::new());
        let view = ChipView::builder().list(list.clone()).build().unwrap();
        assert_eq!(list.changed().connection_count(), 1);
        drop(view);
        assert_eq!(list.changed().connection_count(), 0);
        list.add("A".into());
    }
}
