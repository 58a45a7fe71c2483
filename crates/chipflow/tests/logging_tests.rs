//! Tests that chipflow events land under the documented log targets.

use std::sync::Arc;

use chipflow::{Chip, ChipView, Point};
use chipflow_core::logging::targets;
use parking_lot::Mutex;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Records the target of every span and event it sees.
#[derive(Clone, Default)]
struct TargetLog(Arc<Mutex<Vec<String>>>);

impl TargetLog {
    fn targets(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

impl<S: tracing::Subscriber> Layer<S> for TargetLog {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        self.0.lock().push(attrs.metadata().target().to_owned());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0.lock().push(event.metadata().target().to_owned());
    }
}

#[test]
fn test_view_events_use_known_targets() {
    let log = TargetLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());

    tracing::subscriber::with_default(subscriber, || {
        let view = ChipView::new();
        view.set_chip_list(["Lorem", "Ipsum"].map(Chip::from)).unwrap();
        view.add("Lorem").unwrap();
        view.layout(400.0);
        view.set_on_chip_click_listener(|_| {});
        assert!(view.press_at(Point::new(1.0, 1.0)));
        assert_eq!(view.release_at(Point::new(1.0, 500.0)), None);
        assert!(view.click_at(Point::new(1.0, 1.0)).is_some());
    });

    let seen = log.targets();
    let known = [
        targets::SIGNAL,
        targets::VIEW,
        targets::LAYOUT,
        targets::RESOLVE,
        targets::DISPATCH,
        targets::PERF,
    ];
    for target in &seen {
        assert!(known.contains(&target.as_str()), "unexpected target {target}");
    }
    for target in known {
        assert!(seen.iter().any(|t| t == target), "nothing logged under {target}");
    }
}
