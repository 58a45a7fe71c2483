//! Logging and profiling facilities for chipflow.
//!
//! chipflow uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("chipflow=debug")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`] so subsystems can be
//! filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "chipflow_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "chipflow_core::signal";
    /// Container refresh protocol target.
    pub const VIEW: &str = "chipflow::view";
    /// Flow layout engine target.
    pub const LAYOUT: &str = "chipflow::layout";
    /// Visual resolution and materialization target.
    pub const RESOLVE: &str = "chipflow::resolve";
    /// Click dispatch target.
    pub const DISPATCH: &str = "chipflow::dispatch";
    /// Performance spans target.
    pub const PERF: &str = "chipflow::perf";
}

/// A guard that traces the duration of an operation.
///
/// The span is entered on creation and exited when the guard is dropped, so
/// a subscriber with span timing enabled reports how long the scope took.
///
/// ```
/// use chipflow_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("refresh");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
