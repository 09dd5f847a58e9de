//! Event reconciliation: one handler per world mutation.
//!
//! A handler is a plain function of the event and a [`Reconciler`] (the
//! registry, the resolver and the world, borrowed for one event). It always
//! returns an [`Outcome`] and never fails, so a misbehaving event can not
//! disturb the host scheduler or sibling handlers.
//!
//! Handlers are registered per [`EventKind`] in a [`Dispatcher`]. Kinds with
//! no registered handler are ignored.

pub mod handlers;

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::events::{EventKind, WorldEvent};
use crate::identity::StoneResolver;
use crate::registry::CustodyRegistry;
use crate::types::{HolderRef, Location, PlayerId, StoneKind};
use crate::world::WorldCommands;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// A single write to the custody registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyChange {
    /// `stone` is now held by `holder`.
    Assigned {
        /// The stone.
        stone: StoneKind,
        /// Its new holder.
        holder: HolderRef,
    },
    /// `stone` is no longer tracked.
    Released {
        /// The stone.
        stone: StoneKind,
    },
}

impl CustodyChange {
    /// The stone this change concerns.
    #[must_use]
    pub fn stone(&self) -> StoneKind {
        match self {
            Self::Assigned { stone, .. } | Self::Released { stone } => *stone,
        }
    }
}

/// Verdict of one handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event does not concern a stone, or needs nothing.
    Ignored,
    /// The event is allowed and changed custody.
    Recorded(CustodyChange),
    /// Stones were ejected from a player into the world, one change per slot.
    Evicted(Vec<CustodyChange>),
    /// The event must be suppressed.
    Vetoed,
    /// The event must be suppressed; the current holder was (re)confirmed.
    VetoedConfirming(CustodyChange),
}

impl Outcome {
    /// Whether the host must cancel the mutation.
    #[must_use]
    pub fn is_vetoed(&self) -> bool {
        matches!(self, Self::Vetoed | Self::VetoedConfirming(_))
    }

    /// Registry writes performed while producing this outcome.
    #[must_use]
    pub fn changes(&self) -> &[CustodyChange] {
        match self {
            Self::Recorded(change) | Self::VetoedConfirming(change) => std::slice::from_ref(change),
            Self::Evicted(changes) => changes,
            Self::Ignored | Self::Vetoed => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Everything a handler may touch while reconciling one event.
pub struct Reconciler<'a> {
    registry: &'a mut CustodyRegistry,
    resolver: &'a StoneResolver,
    world: &'a mut dyn WorldCommands,
}

impl<'a> Reconciler<'a> {
    /// Borrow the registry, resolver and world for one event.
    pub fn new(
        registry: &'a mut CustodyRegistry,
        resolver: &'a StoneResolver,
        world: &'a mut dyn WorldCommands,
    ) -> Self {
        Self {
            registry,
            resolver,
            world,
        }
    }

    /// The identity resolver.
    #[must_use]
    pub fn resolver(&self) -> &StoneResolver {
        self.resolver
    }

    /// Read-only access to the registry.
    #[must_use]
    pub fn registry(&self) -> &CustodyRegistry {
        self.registry
    }

    /// Record `holder` for `stone`.
    pub fn assign(&mut self, stone: StoneKind, holder: HolderRef) -> CustodyChange {
        let previous = self.registry.set(stone, holder);
        debug!(stone = %stone, holder = %holder, previous = ?previous, "Custody assigned");
        CustodyChange::Assigned { stone, holder }
    }

    /// Stop tracking `stone` only if `holder` is its recorded holder.
    pub fn release_if_held_by(
        &mut self,
        stone: StoneKind,
        holder: HolderRef,
    ) -> Option<CustodyChange> {
        if !self.registry.remove_if_held_by(stone, &holder) {
            return None;
        }
        debug!(stone = %stone, previous = %holder, "Custody released");
        Some(CustodyChange::Released { stone })
    }

    /// Eject every stone in `player`'s inventory into the world at the
    /// player's location and record each new item entity as holder.
    ///
    /// Each stone-bearing slot produces its own entity and its own write.
    pub fn evict_player(&mut self, player: PlayerId) -> Vec<CustodyChange> {
        let Some(slots) = self.world.player_inventory(player) else {
            return Vec::new();
        };
        let location = self.world.player_location(player).unwrap_or_else(|| {
            warn!(player = %player, "No known location for player, ejecting at origin");
            Location::default()
        });

        let mut changes = Vec::new();
        for (slot, item) in slots.into_iter().enumerate() {
            let Some(item) = item else { continue };
            let Some(stone) = self.resolver.identity_of(&item) else {
                continue;
            };
            let Some(taken) = self.world.clear_slot(player, slot) else {
                warn!(player = %player, slot, "Stone slot emptied before eviction, skipping");
                continue;
            };
            let entity = self.world.drop_item(location, taken);
            debug!(
                stone = %stone,
                player = %player,
                slot,
                entity = %entity,
                at = %location,
                "Ejected stone from player"
            );
            changes.push(self.assign(stone, HolderRef::Entity(entity)));
        }
        changes
    }
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// A reconciliation handler.
pub type Handler = fn(&WorldEvent, &mut Reconciler<'_>) -> Outcome;

/// Routes each event to the handler registered for its kind.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    handlers: BTreeMap<EventKind, Handler>,
}

impl Dispatcher {
    /// A dispatcher with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with the standard handler for every event kind.
    #[must_use]
    pub fn with_default_handlers() -> Self {
        let mut dispatcher = Self::new();
        for kind in EventKind::ALL {
            dispatcher.register(kind, handlers::default_handler(kind));
        }
        dispatcher
    }

    /// Register (or replace) the handler for `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Whether a handler is registered for `kind`.
    #[must_use]
    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Reconcile one event.
    pub fn dispatch(&self, event: &WorldEvent, reconciler: &mut Reconciler<'_>) -> Outcome {
        let kind = event.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            trace!(?kind, "No handler registered");
            return Outcome::Ignored;
        };
        let outcome = handler(event, reconciler);
        if outcome.is_vetoed() {
            debug!(?kind, "Event vetoed");
        }
        outcome
    }
}
