//! The custody registry: stone → current holder.
//!
//! Plain owned state. The keeper owns exactly one registry and passes it by
//! reference to handlers and the validator; hosts that run on several
//! threads put the whole keeper behind one lock instead of locking here.
//!
//! Absence of an entry is a normal state ("not currently tracked").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{HolderRef, PlayerId, StoneKind, Tick};

/// Authoritative mapping from stone identity to holder.
#[derive(Debug, Clone, Default)]
pub struct CustodyRegistry {
    entries: BTreeMap<StoneKind, HolderRef>,
}

impl CustodyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current holder of `stone`.
    #[must_use]
    pub fn get(&self, stone: StoneKind) -> Option<HolderRef> {
        self.entries.get(&stone).copied()
    }

    /// Record `holder` for `stone`, replacing any previous holder.
    ///
    /// Returns the previous holder. Last writer wins.
    pub fn set(&mut self, stone: StoneKind, holder: HolderRef) -> Option<HolderRef> {
        self.entries.insert(stone, holder)
    }

    /// Stop tracking `stone`. Removing an untracked stone is a no-op.
    pub fn remove(&mut self, stone: StoneKind) -> Option<HolderRef> {
        self.entries.remove(&stone)
    }

    /// Remove `stone` only if it is still held by `holder`.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_if_held_by(&mut self, stone: StoneKind, holder: &HolderRef) -> bool {
        if self.entries.get(&stone) == Some(holder) {
            self.entries.remove(&stone);
            true
        } else {
            false
        }
    }

    /// Whether `stone` is tracked.
    #[must_use]
    pub fn contains(&self, stone: StoneKind) -> bool {
        self.entries.contains_key(&stone)
    }

    /// Number of tracked stones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stones currently recorded against `player`.
    #[must_use]
    pub fn held_by_player(&self, player: PlayerId) -> Vec<StoneKind> {
        self.entries
            .iter()
            .filter(|(_, holder)| **holder == HolderRef::Player(player))
            .map(|(stone, _)| *stone)
            .collect()
    }

    /// Point-in-time copy of every entry, in stone order.
    ///
    /// Mutating the registry afterwards never affects the returned value.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(StoneKind, HolderRef)> {
        self.entries.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Serialisable snapshot for the persistence collaborator.
    #[must_use]
    pub fn export(&self, tick: Tick) -> CustodySnapshot {
        CustodySnapshot {
            tick,
            entries: self
                .entries
                .iter()
                .map(|(stone, holder)| CustodyEntry {
                    stone: *stone,
                    holder: *holder,
                })
                .collect(),
        }
    }
}

/// One registry entry, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEntry {
    /// The stone.
    pub stone: StoneKind,
    /// Its holder at snapshot time.
    pub holder: HolderRef,
}

/// Read-only view of the whole registry at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodySnapshot {
    /// World tick the snapshot was taken at.
    pub tick: Tick,
    /// Every tracked stone.
    pub entries: Vec<CustodyEntry>,
}

impl CustodySnapshot {
    /// Holder of `stone` in this snapshot.
    #[must_use]
    pub fn holder_of(&self, stone: StoneKind) -> Option<HolderRef> {
        self.entries
            .iter()
            .find(|entry| entry.stone == stone)
            .map(|entry| entry.holder)
    }
}
