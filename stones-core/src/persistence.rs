//! Persistence collaborator interface.
//!
//! The keeper decides *when* to save and *what* (a [`CustodySnapshot`]);
//! the store decides how. Nothing in this crate prescribes a format.

use tracing::info;

use crate::error::Result;
use crate::registry::CustodySnapshot;

/// Destination for custody snapshots.
pub trait CustodyStore: Send {
    /// Persist one snapshot.
    ///
    /// # Errors
    /// Returns `StonesError::Persistence` (or `Io`) when the snapshot could
    /// not be stored.
    fn save(&mut self, snapshot: &CustodySnapshot) -> Result<()>;
}

/// A store that only logs. Used when the host wires no persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl CustodyStore for NullStore {
    fn save(&mut self, snapshot: &CustodySnapshot) -> Result<()> {
        info!(
            tick = snapshot.tick,
            stones = snapshot.entries.len(),
            "Custody snapshot discarded (no store configured)"
        );
        Ok(())
    }
}

impl<S: CustodyStore + ?Sized> CustodyStore for Box<S> {
    fn save(&mut self, snapshot: &CustodySnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}
