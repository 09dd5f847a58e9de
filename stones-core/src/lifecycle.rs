//! Keeper lifecycle: startup, per-event dispatch, periodic tasks, shutdown.
//!
//! The [`StoneKeeper`] owns the one [`CustodyRegistry`] of the process and
//! everything that touches it. Hosts feed it events and ticks from a single
//! logical thread; multi-threaded hosts wrap the whole keeper in one lock.
//!
//! Shutdown evicts every stone from every online player *before* saving, so
//! the final snapshot already names the ejected item entities.

use tracing::{debug, info, warn};

use crate::config::{Cadence, KeeperConfig};
use crate::error::Result;
use crate::events::WorldEvent;
use crate::identity::StoneResolver;
use crate::persistence::CustodyStore;
use crate::reconcile::{CustodyChange, Dispatcher, Outcome, Reconciler};
use crate::registry::{CustodyRegistry, CustodySnapshot};
use crate::types::{HolderRef, StoneKind, Tick};
use crate::validator::{SweepReport, Validator};
use crate::world::{WorldCommands, WorldView};

/// Running counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeeperStats {
    /// Events dispatched.
    pub events: u64,
    /// Events vetoed.
    pub vetoes: u64,
    /// Registry writes made by handlers.
    pub changes: u64,
    /// Validator sweeps run.
    pub sweeps: u64,
    /// Entries pruned by the validator.
    pub pruned: u64,
    /// Successful saves.
    pub saves: u64,
    /// Failed saves.
    pub failed_saves: u64,
}

/// What a tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The validator report, if a sweep was due.
    pub sweep: Option<SweepReport>,
    /// Whether a save was attempted and succeeded.
    pub saved: bool,
}

/// What shutdown did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Players whose inventories were scanned.
    pub players_scanned: usize,
    /// One change per ejected stone.
    pub evicted: Vec<CustodyChange>,
    /// The snapshot handed to the store.
    pub snapshot: CustodySnapshot,
}

/// The custody engine.
pub struct StoneKeeper {
    config: KeeperConfig,
    registry: CustodyRegistry,
    resolver: StoneResolver,
    dispatcher: Dispatcher,
    validator: Validator,
    store: Box<dyn CustodyStore>,
    validator_cadence: Cadence,
    save_cadence: Cadence,
    last_tick: Tick,
    running: bool,
    stats: KeeperStats,
}

impl std::fmt::Debug for StoneKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoneKeeper")
            .field("registry", &self.registry)
            .field("validator_cadence", &self.validator_cadence)
            .field("save_cadence", &self.save_cadence)
            .field("last_tick", &self.last_tick)
            .field("running", &self.running)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl StoneKeeper {
    /// Start a keeper: empty registry, every handler registered, both
    /// cadences armed.
    ///
    /// # Errors
    /// Returns `StonesError::Config` if `config` fails validation.
    pub fn start(config: KeeperConfig, store: Box<dyn CustodyStore>) -> Result<Self> {
        config.validate()?;
        let resolver = StoneResolver::new(&config.identity);
        let dispatcher = Dispatcher::with_default_handlers();
        let validator_cadence = config.validator.cadence();
        let save_cadence = config.persistence.cadence();

        let running = config.general.enabled;
        if running {
            info!(
                handlers = dispatcher.len(),
                sweep_every = validator_cadence.interval_ticks,
                save_every = save_cadence.interval_ticks,
                "Stone keeper enabled"
            );
        } else {
            info!("Stone keeper disabled by configuration");
        }

        Ok(Self {
            validator: Validator::new(resolver.clone()),
            config,
            registry: CustodyRegistry::new(),
            resolver,
            dispatcher,
            store,
            validator_cadence,
            save_cadence,
            last_tick: 0,
            running,
            stats: KeeperStats::default(),
        })
    }

    /// Whether the keeper is processing events.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    /// The custody registry.
    #[must_use]
    pub fn registry(&self) -> &CustodyRegistry {
        &self.registry
    }

    /// The identity resolver.
    #[must_use]
    pub fn resolver(&self) -> &StoneResolver {
        &self.resolver
    }

    /// Handler table, for hosts that override individual rules.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Running counters.
    #[must_use]
    pub fn stats(&self) -> KeeperStats {
        self.stats
    }

    /// Last tick seen by [`Self::tick`].
    #[must_use]
    pub fn last_tick(&self) -> Tick {
        self.last_tick
    }

    /// Serialisable snapshot of the registry at the last tick.
    #[must_use]
    pub fn snapshot(&self) -> CustodySnapshot {
        self.registry.export(self.last_tick)
    }

    /// Reconcile one world event. The host must cancel the mutation when
    /// the outcome is vetoed.
    pub fn handle(&mut self, event: &WorldEvent, world: &mut dyn WorldCommands) -> Outcome {
        if !self.running {
            return Outcome::Ignored;
        }
        let outcome = {
            let mut rec = Reconciler::new(&mut self.registry, &self.resolver, world);
            self.dispatcher.dispatch(event, &mut rec)
        };
        self.stats.events += 1;
        self.stats.changes += outcome.changes().len() as u64;
        if outcome.is_vetoed() {
            self.stats.vetoes += 1;
        }
        outcome
    }

    /// Advance to `now` and run whichever periodic tasks are due.
    pub fn tick(&mut self, now: Tick, world: &dyn WorldView) -> TickReport {
        if !self.running {
            return TickReport::default();
        }
        self.last_tick = now;
        let mut report = TickReport::default();

        if self.validator_cadence.poll(now) {
            report.sweep = Some(self.sweep(world));
        }
        if self.save_cadence.poll(now) {
            match self.save() {
                Ok(()) => report.saved = true,
                Err(e) => warn!(tick = now, error = %e, "Periodic custody save failed"),
            }
        }
        report
    }

    /// Run the validator immediately.
    pub fn sweep(&mut self, world: &dyn WorldView) -> SweepReport {
        let report = self.validator.sweep(&mut self.registry, world);
        self.stats.sweeps += 1;
        self.stats.pruned += report.pruned.len() as u64;
        report
    }

    /// Hand the current snapshot to the store.
    ///
    /// # Errors
    /// Propagates the store's error.
    pub fn save(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => {
                self.stats.saves += 1;
                debug!(tick = snapshot.tick, stones = snapshot.entries.len(), "Saved custody");
                Ok(())
            }
            Err(e) => {
                self.stats.failed_saves += 1;
                Err(e)
            }
        }
    }

    /// Administrative override: force `holder` for `stone`.
    pub fn assign(&mut self, stone: StoneKind, holder: HolderRef) -> Option<HolderRef> {
        let previous = self.registry.set(stone, holder);
        info!(stone = %stone, holder = %holder, previous = ?previous, "Custody overridden");
        previous
    }

    /// Administrative override: stop tracking `stone`.
    pub fn forget(&mut self, stone: StoneKind) -> Option<HolderRef> {
        let previous = self.registry.remove(stone);
        info!(stone = %stone, previous = ?previous, "Custody forgotten");
        previous
    }

    /// Evict every stone from every online player, then save.
    ///
    /// After shutdown the keeper is inert. Calling it twice is harmless.
    ///
    /// # Errors
    /// Returns the store's error if the final save fails. Eviction has
    /// already happened by then.
    pub fn shutdown(&mut self, world: &mut dyn WorldCommands) -> Result<ShutdownReport> {
        if !self.running {
            return Ok(ShutdownReport {
                players_scanned: 0,
                evicted: Vec::new(),
                snapshot: self.snapshot(),
            });
        }
        self.running = false;

        let players = world.online_players();
        let mut evicted = Vec::new();
        {
            let mut rec = Reconciler::new(&mut self.registry, &self.resolver, world);
            for player in &players {
                evicted.extend(rec.evict_player(*player));
            }
        }
        info!(players = players.len(), stones = evicted.len(), "Evicted stones for shutdown");

        self.save()?;
        info!("Saved data.");
        info!("Stone keeper disabled");

        Ok(ShutdownReport {
            players_scanned: players.len(),
            evicted,
            snapshot: self.snapshot(),
        })
    }
}
