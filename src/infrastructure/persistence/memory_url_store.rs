//! Process-local implementation of the URL store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use crate::domain::repositories::UrlStore;
use crate::error::StoreError;

/// Volatile URL store backed by a [`DashMap`].
///
/// DashMap shards the table behind reader/writer locks: lookups on any key
/// proceed in parallel, while a write holds its shard exclusively so a
/// concurrent reader sees either the state before the insert or after it.
/// [`UrlStore::save`] checks and inserts through the entry API under a single
/// shard lock, so racing saves of one code store exactly one mapping.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUrlStore {
    entries: DashMap<String, String>,
    closed: AtomicBool,
}

impl MemoryUrlStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` mappings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no mapping is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn save(&self, code: &str, long: &str) -> Result<(), StoreError> {
        self.ensure_open()?;

        match self.entries.entry(code.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict {
                code: code.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(long.to_owned());
                Ok(())
            }
        }
    }

    async fn lookup(&self, code: &str) -> Result<String, StoreError> {
        self.ensure_open()?;

        self.entries
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        self.ensure_open()?;

        Ok(self.entries.contains_key(code))
    }

    async fn close(&self) -> Result<(), StoreError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(mappings = self.entries.len(), "closing in-memory store");
            self.entries.clear();
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }
}
