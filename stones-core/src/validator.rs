//! Periodic validation sweep.
//!
//! Events can be missed or arrive out of order, so a sweep cross-checks
//! every registry entry against the live world on a fixed cadence and prunes
//! entries whose holder no longer has the stone.
//!
//! The sweep iterates a point-in-time snapshot and removes an entry only if
//! it still names the holder that was examined, so an entry overwritten in
//! the meantime is left alone.

use tracing::debug;

use crate::identity::StoneResolver;
use crate::registry::CustodyRegistry;
use crate::types::{HolderRef, StoneKind};
use crate::world::WorldView;

/// Why an entry was pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// The player went offline or the entity no longer exists.
    HolderGone,
    /// The player is online but no longer carries the stone.
    StoneMissing,
    /// The item entity exists but is no longer that stone.
    ItemMismatch,
}

/// Result of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries examined.
    pub checked: usize,
    /// Entries removed, with the reason.
    pub pruned: Vec<(StoneKind, PruneReason)>,
}

impl SweepReport {
    /// Whether the sweep changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.pruned.is_empty()
    }
}

/// Registry auditor.
#[derive(Debug, Clone)]
pub struct Validator {
    resolver: StoneResolver,
}

impl Validator {
    /// Create a validator that recognises stones with `resolver`.
    #[must_use]
    pub fn new(resolver: StoneResolver) -> Self {
        Self { resolver }
    }

    /// Check a single entry against the world. `None` means it is valid.
    #[must_use]
    pub fn check(
        &self,
        stone: StoneKind,
        holder: &HolderRef,
        world: &dyn WorldView,
    ) -> Option<PruneReason> {
        match holder {
            HolderRef::Player(player) => {
                if !world.is_player_online(*player) {
                    return Some(PruneReason::HolderGone);
                }
                let Some(slots) = world.player_inventory(*player) else {
                    return Some(PruneReason::HolderGone);
                };
                if self.resolver.inventory_contains(&slots, stone) {
                    None
                } else {
                    Some(PruneReason::StoneMissing)
                }
            }
            HolderRef::Entity(entity) => {
                if !world.is_entity_valid(*entity) {
                    return Some(PruneReason::HolderGone);
                }
                let resolved = world
                    .entity_item(*entity)
                    .and_then(|item| self.resolver.identity_of(&item));
                if resolved == Some(stone) {
                    None
                } else {
                    Some(PruneReason::ItemMismatch)
                }
            }
        }
    }

    /// Audit every entry and prune the invalid ones.
    pub fn sweep(&self, registry: &mut CustodyRegistry, world: &dyn WorldView) -> SweepReport {
        let snapshot = registry.snapshot();
        let mut report = SweepReport {
            checked: snapshot.len(),
            pruned: Vec::new(),
        };

        for (stone, holder) in snapshot {
            let Some(reason) = self.check(stone, &holder, world) else {
                continue;
            };
            if registry.remove_if_held_by(stone, &holder) {
                debug!(stone = %stone, holder = %holder, ?reason, "Pruned stale custody entry");
                report.pruned.push((stone, reason));
            }
        }

        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(StoneResolver::default())
    }
}
