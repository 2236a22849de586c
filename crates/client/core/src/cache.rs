//! Bounded, insertion-ordered store of decoded game records.
use std::collections::VecDeque;
use std::sync::Arc;

use game_core::GameRecord;

/// Records kept by default.
pub const DEFAULT_CAPACITY: usize = 25;

/// FIFO cache of [`GameRecord`]s keyed by record id.
///
/// Eviction is strictly by insertion order: reading an entry does not move
/// it. Entries are shared as `Arc`s and never mutated; inserting an id that
/// is already present appends a second entry instead of replacing the first.
#[derive(Clone, Debug)]
pub struct ResultCache {
    entries: VecDeque<Arc<GameRecord>>,
    capacity: usize,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity + 1),
            capacity: bounded_capacity,
        }
    }

    /// Appends `record`, evicting the oldest entry when over capacity.
    pub fn insert(&mut self, record: GameRecord) -> Arc<GameRecord> {
        let record = Arc::new(record);
        self.entries.push_back(Arc::clone(&record));

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!("Evicted game record {} from cache", evicted.id());
            }
        }

        record
    }

    pub fn get(&self, id: &str) -> Option<Arc<GameRecord>> {
        self.entries
            .iter()
            .find(|record| record.id() == id)
            .map(Arc::clone)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|record| record.id() == id)
    }

    /// Cached ids, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|record| record.id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
