use serde::{Deserialize, Serialize};

use crate::Card;

/// Which way a [`Selection`] cursor moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
}

/// An owned sequence with a cursor that wraps around at both ends.
///
/// The cursor is always a valid index, unless the sequence is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection<T> {
    items: Vec<T>,
    index: usize,
    start: usize,
}

/// A player's hand. The cursor marks the selected card.
pub type Hand = Selection<Card>;

impl<T> Selection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_start(items, 0)
    }

    /// Creates a selection whose cursor starts (and [resets](Self::reset)) at `start`.
    pub fn with_start(items: Vec<T>, start: usize) -> Self {
        let start = start.min(items.len().saturating_sub(1));
        Self {
            items,
            index: start,
            start,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The item under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    pub fn reset(&mut self) {
        self.index = self.start.min(self.items.len().saturating_sub(1));
    }

    /// Moves the cursor forward, wrapping to the first item after the last one.
    pub fn next(&mut self) -> Option<&T> {
        self.index = if self.index + 1 < self.items.len() {
            self.index + 1
        } else {
            0
        };
        self.current()
    }

    /// Moves the cursor back, wrapping to the last item before the first one.
    pub fn prev(&mut self) -> Option<&T> {
        self.index = if self.index > 0 {
            self.index - 1
        } else {
            self.items.len().saturating_sub(1)
        };
        self.current()
    }

    pub fn step(&mut self, direction: HorizontalDirection) -> Option<&T> {
        match direction {
            HorizontalDirection::Left => self.prev(),
            HorizontalDirection::Right => self.next(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes the item at `position`, keeping the cursor in bounds.
    pub fn remove(&mut self, position: usize) -> Option<T> {
        if position >= self.items.len() {
            return None;
        }
        let item = self.items.remove(position);
        if self.index >= self.items.len() {
            self.index = self.items.len().saturating_sub(1);
        }
        Some(item)
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a, T> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
