//! In-memory persistence collaborator.
//!
//! Keeps every snapshot it is given. Clones share the same history, so a
//! test can hand one clone to the keeper and inspect the other.

use std::sync::Arc;

use parking_lot::Mutex;
use stones_core::error::{Result, StonesError};
use stones_core::persistence::CustodyStore;
use stones_core::registry::CustodySnapshot;

/// Thread-safe snapshot history.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    saved: Vec<CustodySnapshot>,
    failing: bool,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }

    /// Every snapshot saved so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<CustodySnapshot> {
        self.inner.lock().saved.clone()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<CustodySnapshot> {
        self.inner.lock().saved.last().cloned()
    }

    /// Number of snapshots saved.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().saved.len()
    }

    /// Whether nothing was saved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustodyStore for MemoryStore {
    fn save(&mut self, snapshot: &CustodySnapshot) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(StonesError::Persistence("memory store set to fail".to_string()));
        }
        inner.saved.push(snapshot.clone());
        Ok(())
    }
}
