//! Multi-threaded host driver.
//!
//! [`SharedHost`] puts the whole [`Host`] behind one lock, so every event
//! handler and every sweep sees the registry and the world together. A
//! pickup can therefore never interleave with the validator between its
//! read and its write.
//!
//! [`SharedHost::spawn_ticker`] drives world time from a tokio interval;
//! callers on other tasks fire events through [`SharedHost::with`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use stones_core::error::Result;
use stones_core::lifecycle::ShutdownReport;
use stones_core::{Outcome, WorldEvent};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::systems::Host;

/// Cloneable handle to a host shared between tasks.
#[derive(Debug, Clone)]
pub struct SharedHost {
    inner: Arc<Mutex<Host>>,
}

impl SharedHost {
    /// Wrap a host.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self {
            inner: Arc::new(Mutex::new(host)),
        }
    }

    /// Run `f` with exclusive access to the host.
    pub fn with<R>(&self, f: impl FnOnce(&mut Host) -> R) -> R {
        let mut host = self.inner.lock();
        f(&mut host)
    }

    /// Deliver one event.
    pub fn fire(&self, event: &WorldEvent) -> Outcome {
        self.with(|host| host.fire(event))
    }

    /// Advance world time by one tick every `period`.
    ///
    /// The task runs until the keeper shuts down or the handle is aborted.
    #[must_use]
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let shared = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            info!(period = ?period, "World ticker started");
            loop {
                interval.tick().await;
                let running = shared.with(|host| {
                    host.advance(1);
                    host.keeper().is_running()
                });
                if !running {
                    debug!("Keeper stopped; ticker exiting");
                    break;
                }
            }
        })
    }

    /// Advance world time at the configured ticks per second.
    #[must_use]
    pub fn spawn_realtime_ticker(&self) -> JoinHandle<()> {
        let period = self.with(|host| host.config().tick_duration());
        self.spawn_ticker(period)
    }

    /// Current world tick.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.with(|host| host.now())
    }

    /// Shut the keeper down.
    ///
    /// # Errors
    /// Propagates a failed final save.
    pub fn shutdown(&self) -> Result<ShutdownReport> {
        self.with(Host::shutdown)
    }
}
