//! # Stones Core Library
//!
//! Game-agnostic custody engine for a small, fixed set of unique artifacts
//! ("stones") that move between player inventories, dropped item entities
//! and containers inside a live world.
//!
//! The engine keeps one authoritative mapping from [`StoneKind`] to its
//! current [`HolderRef`] and keeps it correct while the world fires pickup,
//! drop, despawn, transfer and disconnect events at it:
//!
//! - **Identity**: which item stacks are stones ([`identity`])
//! - **Registry**: the stone → holder mapping ([`registry`])
//! - **Reconciliation**: one handler per world event ([`reconcile`])
//! - **Validation**: a periodic sweep that prunes stale entries ([`validator`])
//! - **Lifecycle**: startup, cadences and evict-then-save shutdown ([`lifecycle`])
//!
//! The world itself is never owned here. It is reached through the
//! [`world::WorldView`] and [`world::WorldCommands`] traits, and every
//! holder reference is a plain handle that may be stale at any time.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod events;
pub mod identity;
pub mod lifecycle;
pub mod persistence;
pub mod reconcile;
pub mod registry;
pub mod types;
pub mod validator;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

pub use config::KeeperConfig;
pub use error::StonesError;
pub use events::{EventKind, WorldEvent};
pub use identity::StoneResolver;
pub use lifecycle::StoneKeeper;
pub use reconcile::{CustodyChange, Outcome};
pub use registry::{CustodyRegistry, CustodySnapshot};
pub use types::*;
pub use validator::{SweepReport, Validator};
