//! Click dispatch.
//!
//! The dispatcher tracks which node is pressed and owns the single click
//! listener. A click is a press and a release on the same node. The listener
//! is always invoked with no lock held, so it may freely call back into the
//! container, typically to remove the clicked chip.

use std::sync::Arc;

use chipflow_core::logging::targets;
use parking_lot::Mutex;

use crate::chip::Chip;

/// Callback invoked with the clicked chip.
pub type ChipClickListener = Arc<dyn Fn(&Chip) + Send + Sync>;

#[derive(Debug, Clone)]
struct Pressed {
    index: usize,
    chip: Chip,
}

/// Pointer state and click listener of a chip container.
#[derive(Default)]
pub struct ClickDispatcher {
    listener: Mutex<Option<ChipClickListener>>,
    pressed: Mutex<Option<Pressed>>,
    focused: Mutex<Option<usize>>,
}

impl ClickDispatcher {
    /// Create a dispatcher with no listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listener. `None` removes it.
    pub fn set_listener(&self, listener: Option<ChipClickListener>) {
        *self.listener.lock() = listener;
    }

    /// Whether a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.lock().is_some()
    }

    /// Mark the node at `index` as pressed.
    pub fn press(&self, index: usize, chip: Chip) {
        *self.pressed.lock() = Some(Pressed { index, chip });
    }

    /// Index of the pressed node.
    pub fn pressed_index(&self) -> Option<usize> {
        self.pressed.lock().as_ref().map(|p| p.index)
    }

    /// Release the pointer over the node at `index`, or outside any node.
    ///
    /// Fires the listener and returns the chip when the release completes a
    /// click on the pressed node.
    pub fn release(&self, index: Option<usize>) -> Option<Chip> {
        let pressed = self.pressed.lock().take()?;
        if index != Some(pressed.index) {
            tracing::trace!(target: targets::DISPATCH, index = pressed.index, "press cancelled");
            return None;
        }
        self.click(&pressed.chip);
        Some(pressed.chip)
    }

    /// Forget the pressed node without clicking.
    ///
    /// Returns `true` if a node was pressed.
    pub fn cancel(&self) -> bool {
        self.pressed.lock().take().is_some()
    }

    /// Give focus to the node at `index`, or clear it.
    pub fn set_focused(&self, index: Option<usize>) -> bool {
        let mut focused = self.focused.lock();
        if *focused != index {
            *focused = index;
            true
        } else {
            false
        }
    }

    /// Index of the focused node.
    pub fn focused_index(&self) -> Option<usize> {
        *self.focused.lock()
    }

    /// Invoke the listener with `chip`. Returns `false` if there is none.
    pub fn click(&self, chip: &Chip) -> bool {
        let listener = self.listener.lock().clone();
        match listener {
            Some(listener) => {
                tracing::debug!(target: targets::DISPATCH, text = chip.text(), "chip clicked");
                listener(chip);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ClickDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickDispatcher")
            .field("has_listener", &self.has_listener())
            .field("pressed", &self.pressed_index())
            .field("focused", &self.focused_index())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(dispatcher: &ClickDispatcher) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        dispatcher.set_listener(Some(Arc::new(move |_: &Chip| {
            c.fetch_add(1, Ordering::SeqCst);
        })));
        count
    }

    #[test]
    fn test_press_release_clicks() {
        let dispatcher = ClickDispatcher::new();
        let count = counting(&dispatcher);
        let chip = Chip::from("A");

        dispatcher.press(2, chip.clone());
        assert_eq!(dispatcher.pressed_index(), Some(2));
        assert_eq!(dispatcher.release(Some(2)), Some(chip));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.pressed_index(), None);
    }

    #[test]
    fn test_release_elsewhere_cancels() {
        let dispatcher = ClickDispatcher::new();
        let count = counting(&dispatcher);

        dispatcher.press(0, Chip::from("A"));
        assert_eq!(dispatcher.release(Some(1)), None);
        dispatcher.press(0, Chip::from("A"));
        assert_eq!(dispatcher.release(None), None);
        assert_eq!(dispatcher.release(Some(0)), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_last_listener_wins() {
        let dispatcher = ClickDispatcher::new();
        let first = counting(&dispatcher);
        let second = counting(&dispatcher);

        assert!(dispatcher.click(&Chip::from("A")));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        dispatcher.set_listener(None);
        assert!(!dispatcher.has_listener());
        assert!(!dispatcher.click(&Chip::from("A")));
    }

    #[test]
    fn test_listener_can_replace_itself() {
        let dispatcher = Arc::new(ClickDispatcher::new());
        let weak = Arc::downgrade(&dispatcher);
        dispatcher.set_listener(Some(Arc::new(move |_: &Chip| {
            if let Some(d) = weak.upgrade() {
                d.set_listener(None);
            }
        })));

        assert!(dispatcher.click(&Chip::from("A")));
        assert!(!dispatcher.has_listener());
    }

    #[test]
    fn test_focus() {
        let dispatcher = ClickDispatcher::new();
        assert!(dispatcher.set_focused(Some(1)));
        assert!(!dispatcher.set_focused(Some(1)));
        assert_eq!(dispatcher.focused_index(), Some(1));
        assert!(dispatcher.set_focused(None));
    }
}
