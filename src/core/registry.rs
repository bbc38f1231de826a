//! # Route Entry Registry
//!
//! Tracks every live destination instance: which container holds it, which
//! hosted screen renders it, and when it was created.
//!
//! ```text
//! entries (presentation order == route list order)
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │ home     │ library  │ settings │ library  │
//! │ c0 / s1  │ c0 / s2  │ c1 / s3  │ c1 / s4  │
//! │ seq 0    │ seq 1    │ seq 2    │ seq 3    │
//! └──────────┴──────────┴──────────┴──────────┘
//!   root container ───┘   presented container ───┘
//! ```
//!
//! The route list is a projection of these entries, so the two can never
//! disagree. Duplicate destinations are expected; lookups resolve them by
//! `sequence`, never by position in the route list.

use crate::core::platform::{ContainerId, ScreenHandle};

/// One live destination instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry<D> {
    pub destination: D,
    pub container: ContainerId,
    pub screen: ScreenHandle,
    /// Strictly increasing across the registry's lifetime.
    pub sequence: u64,
}

#[derive(Debug)]
pub struct Registry<D> {
    entries: Vec<RouteEntry<D>>,
    next_sequence: u64,
}

impl<D> Default for Registry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Registry<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry<D>] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RouteEntry<D>> {
        self.entries.get(index)
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<RouteEntry<D>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Appends a new entry and returns it.
    pub fn record(
        &mut self,
        destination: D,
        container: ContainerId,
        screen: ScreenHandle,
    ) -> &RouteEntry<D> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(RouteEntry {
            destination,
            container,
            screen,
            sequence,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Drops every entry and records `placements` in order.
    pub fn replace_all(&mut self, placements: impl IntoIterator<Item = (D, ContainerId, ScreenHandle)>) {
        self.entries.clear();
        for (destination, container, screen) in placements {
            self.record(destination, container, screen);
        }
    }

    /// Removes up to `count` entries from the tail. Never underflows.
    pub fn truncate_tail(&mut self, count: usize) -> Vec<RouteEntry<D>> {
        let keep = self.entries.len().saturating_sub(count);
        self.entries.split_off(keep)
    }

    /// Number of entries placed in `container`.
    pub fn count_in(&self, container: ContainerId) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.container == container)
            .count()
    }

    /// Removes the most recent entry placed in `container`.
    pub fn remove_last_in(&mut self, container: ContainerId) -> Option<RouteEntry<D>> {
        let index = self
            .entries
            .iter()
            .rposition(|entry| entry.container == container)?;
        Some(self.entries.remove(index))
    }

    /// Index of the most recently created entry accepted by `predicate`.
    pub fn most_recent_where(&self, predicate: impl Fn(&RouteEntry<D>) -> bool) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| predicate(entry))
            .max_by_key(|(_, entry)| entry.sequence)
            .map(|(index, _)| index)
    }

    /// Index of the entry rendered by `screen` inside `container`.
    pub fn position_of(&self, container: ContainerId, screen: ScreenHandle) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.container == container && entry.screen == screen)
    }
}

impl<D: Clone> Registry<D> {
    /// The logical route list.
    pub fn routes(&self) -> Vec<D> {
        self.entries
            .iter()
            .map(|entry| entry.destination.clone())
            .collect()
    }
}
