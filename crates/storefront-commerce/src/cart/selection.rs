//! Bounded, ordered option selection for one customization group.

use std::collections::VecDeque;

use crate::ids::OptionId;

/// Fixed-capacity FIFO of selected options.
///
/// Selecting into a full queue evicts the oldest selection. With capacity 1
/// this behaves like a radio button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionQueue {
    capacity: usize,
    options: VecDeque<OptionId>,
}

impl SelectionQueue {
    /// Create an empty queue. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            options: VecDeque::with_capacity(capacity),
        }
    }

    /// Select an option.
    ///
    /// Returns the evicted option, if the queue was full. Selecting an option
    /// that is already selected changes nothing.
    pub fn select(&mut self, option: OptionId) -> Option<OptionId> {
        if self.contains(&option) {
            return None;
        }
        let evicted = if self.is_full() {
            self.options.pop_front()
        } else {
            None
        };
        self.options.push_back(option);
        evicted
    }

    /// Deselect an option. Returns whether it was selected.
    pub fn deselect(&mut self, option: &OptionId) -> bool {
        let before = self.options.len();
        self.options.retain(|o| o != option);
        self.options.len() < before
    }

    /// Apply a checkbox change.
    pub fn set(&mut self, option: OptionId, checked: bool) -> Option<OptionId> {
        if checked {
            self.select(option)
        } else {
            self.deselect(&option);
            None
        }
    }

    pub fn contains(&self, option: &OptionId) -> bool {
        self.options.contains(option)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.options.len() >= self.capacity
    }

    /// Selected options, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &OptionId> {
        self.options.iter()
    }

    /// Selected options as an ordered list, oldest first.
    pub fn to_vec(&self) -> Vec<OptionId> {
        self.options.iter().cloned().collect()
    }
}
