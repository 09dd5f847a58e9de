//! # stones-world: Host Integration for the Stones Custody Engine
//!
//! This crate provides the host side of `stones-core`: a world that owns
//! entities and inventories, turns every mutation into a
//! [`stones_core::WorldEvent`], asks the keeper for a verdict and only then
//! applies the mutation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                 Host                      │
//! │  ┌────────────┐   events   ┌───────────┐  │
//! │  │  SimWorld  │ ─────────▶ │  Keeper   │  │
//! │  │ (entities, │ ◀───────── │ (registry,│  │
//! │  │ inventories│  verdicts  │ handlers) │  │
//! │  └────────────┘            └───────────┘  │
//! │        ▲  ticks (validator, persistence)  │
//! └────────┴─────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `world`: in-memory world implementing the core's world traits
//! - `hooks`: builders turning world mutations into events
//! - `systems`: the single-threaded host: actions, veto handling, ticks
//! - `driver`: multi-threaded wrapper with a tokio ticker
//! - `store`: in-memory persistence collaborator
//! - `config`: host settings on top of the keeper config
//! - `telemetry`: tracing subscriber setup

pub mod config;
pub mod driver;
pub mod hooks;
pub mod store;
pub mod systems;
pub mod telemetry;
pub mod world;

pub use config::HostConfig;
pub use driver::SharedHost;
pub use store::MemoryStore;
pub use systems::Host;
pub use world::SimWorld;
