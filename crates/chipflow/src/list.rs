//! The ordered chip collection.
//!
//! [`ChipList`] stores chips in render order and announces every mutation on
//! its [`changed`](ChipList::changed) signal. The container subscribes to it
//! and rebuilds on each notification, so a list shared between a view and
//! application code keeps the view current without any polling.

use std::sync::atomic::{AtomicBool, Ordering};

use chipflow_core::Signal;
use chipflow_core::logging::targets;
use parking_lot::RwLock;

use crate::chip::Chip;

/// What a [`ChipList`] mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// The whole collection was replaced or cleared.
    Reset,
    /// A chip was appended at this index.
    Added(usize),
    /// The chip at this index was removed.
    Removed(usize),
}

/// Ordered collection of chips with a duplicate policy.
///
/// Duplicates are detected by chip identity. When duplicates are not
/// tolerated, adding a chip that is already present is a silent no-op.
///
/// ```
/// use chipflow::{Chip, ChipList};
///
/// let list = ChipList::new();
/// let chip = Chip::from("Lorem");
///
/// assert!(list.add(chip.clone()));
/// assert!(!list.add(chip.clone()));
/// assert_eq!(list.count(), 1);
///
/// list.set_tolerates_duplicates(true);
/// assert!(list.add(chip));
/// assert_eq!(list.count(), 2);
/// ```
pub struct ChipList {
    chips: RwLock<Vec<Chip>>,
    tolerates_duplicates: AtomicBool,
    changed: Signal<ListChange>,
}

impl ChipList {
    /// Create an empty list that rejects duplicates.
    pub fn new() -> Self {
        Self::with_chips(Vec::new())
    }

    /// Create a list holding `chips`.
    pub fn with_chips(chips: impl IntoIterator<Item = Chip>) -> Self {
        Self {
            chips: RwLock::new(chips.into_iter().collect()),
            tolerates_duplicates: AtomicBool::new(false),
            changed: Signal::new(),
        }
    }

    /// Signal emitted after every mutation.
    pub fn changed(&self) -> &Signal<ListChange> {
        &self.changed
    }

    /// Whether the same chip may appear more than once.
    pub fn tolerates_duplicates(&self) -> bool {
        self.tolerates_duplicates.load(Ordering::Acquire)
    }

    /// Set the duplicate policy. Existing entries are left untouched.
    pub fn set_tolerates_duplicates(&self, tolerates: bool) {
        self.tolerates_duplicates.store(tolerates, Ordering::Release);
    }

    /// Replace every chip.
    pub fn set_chips(&self, chips: impl IntoIterator<Item = Chip>) {
        *self.chips.write() = chips.into_iter().collect();
        self.changed.emit(ListChange::Reset);
    }

    /// Append a chip.
    ///
    /// Returns `false` without notifying when the chip is already present
    /// and duplicates are not tolerated.
    pub fn add(&self, chip: Chip) -> bool {
        let index = {
            let mut chips = self.chips.write();
            if !self.tolerates_duplicates() && chips.contains(&chip) {
                tracing::trace!(
                    target: targets::VIEW,
                    text = chip.text(),
                    "ignoring duplicate chip"
                );
                return false;
            }
            chips.push(chip);
            chips.len() - 1
        };
        self.changed.emit(ListChange::Added(index));
        true
    }

    /// Remove the first occurrence of `chip`.
    ///
    /// Returns `false` without notifying when the chip is absent.
    pub fn remove(&self, chip: &Chip) -> bool {
        let index = {
            let mut chips = self.chips.write();
            match chips.iter().position(|c| c == chip) {
                Some(index) => {
                    chips.remove(index);
                    index
                }
                None => return false,
            }
        };
        self.changed.emit(ListChange::Removed(index));
        true
    }

    /// Remove every chip.
    pub fn clear(&self) {
        let was_empty = {
            let mut chips = self.chips.write();
            let was_empty = chips.is_empty();
            chips.clear();
            was_empty
        };
        if !was_empty {
            self.changed.emit(ListChange::Reset);
        }
    }

    /// Number of chips.
    pub fn count(&self) -> usize {
        self.chips.read().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.chips.read().is_empty()
    }

    /// Chip at `position`.
    pub fn get(&self, position: usize) -> Option<Chip> {
        self.chips.read().get(position).cloned()
    }

    /// Whether `chip` is in the list.
    pub fn contains(&self, chip: &Chip) -> bool {
        self.chips.read().contains(chip)
    }

    /// Position of the first occurrence of `chip`.
    pub fn position(&self, chip: &Chip) -> Option<usize> {
        self.chips.read().iter().position(|c| c == chip)
    }

    /// Copy of the current chips, in order.
    pub fn snapshot(&self) -> Vec<Chip> {
        self.chips.read().clone()
    }
}

impl Default for ChipList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChipList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChipList")
            .field("count", &self.count())
            .field("tolerates_duplicates", &self.tolerates_duplicates())
            .finish()
    }
}

static_assertions::assert_impl_all!(ChipList: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(list: &ChipList) -> Arc<Mutex<Vec<ListChange>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        list.changed().connect(move |change| sink.lock().push(*change));
        log
    }

    #[test]
    fn test_insertion_order() {
        let chips: Vec<Chip> = ["A", "B", "C"].into_iter().map(Chip::from).collect();
        let list = ChipList::with_chips(chips.clone());
        assert_eq!(list.snapshot(), chips);
        assert_eq!(list.get(1), Some(chips[1].clone()));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_duplicate_add_is_silent() {
        let list = ChipList::new();
        let log = recorder(&list);
        let chip = Chip::from("A");

        assert!(list.add(chip.clone()));
        assert!(!list.add(chip));
        assert_eq!(list.count(), 1);
        assert_eq!(*log.lock(), vec![ListChange::Added(0)]);
    }

    #[test]
    fn test_equal_text_is_not_a_duplicate() {
        let list = ChipList::new();
        assert!(list.add(Chip::from("A")));
        assert!(list.add(Chip::from("A")));
        assert_eq!(list.count(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let list = ChipList::with_chips([Chip::from("A")]);
        let log = recorder(&list);

        assert!(!list.remove(&Chip::from("B")));
        assert_eq!(list.count(), 1);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_remove_first_occurrence() {
        let list = ChipList::new();
        list.set_tolerates_duplicates(true);
        let a = Chip::from("A");
        let b = Chip::from("B");
        list.add(a.clone());
        list.add(b.clone());
        list.add(a.clone());

        let log = recorder(&list);
        assert!(list.remove(&a));
        assert_eq!(list.snapshot(), vec![b, a]);
        assert_eq!(*log.lock(), vec![ListChange::Removed(0)]);
    }

    #[test]
    fn test_set_chips_and_clear() {
        let list = ChipList::new();
        let log = recorder(&list);

        list.set_chips([Chip::from("A"), Chip::from("B")]);
        assert_eq!(list.count(), 2);
        list.clear();
        assert!(list.is_empty());
        list.clear();

        assert_eq!(*log.lock(), vec![ListChange::Reset, ListChange::Reset]);
    }

    #[test]
    fn test_slot_can_read_list() {
        let list = Arc::new(ChipList::new());
        let seen = Arc::new(Mutex::new(0));
        let (weak, sink) = (Arc::downgrade(&list), seen.clone());
        list.changed().connect(move |_| {
            if let Some(list) = weak.upgrade() {
                *sink.lock() = list.count();
            }
        });

        list.add(Chip::from("A"));
        list.add(Chip::from("B"));
        assert_eq!(*seen.lock(), 2);
    }
}
