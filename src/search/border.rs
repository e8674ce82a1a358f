//! Priority container for the undetermined boxes.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use crate::geometry::Rectangle;

/// Total order on volumes via `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
struct Volume(f64);

impl PartialEq for Volume {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Volume {}

impl PartialOrd for Volume {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Volume {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Border boxes ordered by volume, largest first.
///
/// Boxes of equal volume come out in insertion order. Selective removal
/// (`take_where`) keeps the remaining order intact.
#[derive(Debug, Clone, Default)]
pub(crate) struct Border {
    entries: BTreeMap<(Volume, Reverse<u64>), Rectangle>,
    next_seq: u64,
}

impl Border {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rect: Rectangle) {
        let key = (Volume(rect.volume()), Reverse(self.next_seq));
        self.next_seq += 1;
        self.entries.insert(key, rect);
    }

    /// Removes and returns the largest box.
    pub fn pop_largest(&mut self) -> Option<Rectangle> {
        self.entries.pop_last().map(|(_, rect)| rect)
    }

    /// Removes and returns every box matching `pred`, largest first.
    pub fn take_where<F>(&mut self, mut pred: F) -> Vec<Rectangle>
    where
        F: FnMut(&Rectangle) -> bool,
    {
        let keys: Vec<_> = self
            .entries
            .iter()
            .rev()
            .filter(|(_, rect)| pred(rect))
            .map(|(key, _)| *key)
            .collect();
        keys.into_iter()
            .filter_map(|key| self.entries.remove(&key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Boxes in pop order.
    pub fn to_vec(&self) -> Vec<Rectangle> {
        self.entries.values().rev().cloned().collect()
    }
}
