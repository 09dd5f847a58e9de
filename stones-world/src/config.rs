//! Host-side configuration on top of the keeper's own settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stones_core::KeeperConfig;
use stones_core::error::{Result, StonesError};

/// Settings for the simulated host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Keeper settings, under `[keeper.*]`.
    #[serde(default)]
    pub keeper: KeeperConfig,
    /// Slots in every player inventory.
    #[serde(default = "default_inventory_slots")]
    pub inventory_slots: usize,
    /// World ticks per real second.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
    /// Age at which an ordinary dropped item expires.
    #[serde(default = "default_item_lifetime")]
    pub item_lifetime_ticks: u64,
}

impl HostConfig {
    /// Load from a TOML string.
    ///
    /// # Errors
    /// Returns `StonesError::Config` if the TOML is invalid or out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| StonesError::Config(e.to_string()))?;
        config.keeper.validate()?;
        if config.ticks_per_second == 0 {
            return Err(StonesError::Config("ticks_per_second must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Real time between two world ticks.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            keeper: KeeperConfig::default(),
            inventory_slots: default_inventory_slots(),
            ticks_per_second: default_ticks_per_second(),
            item_lifetime_ticks: default_item_lifetime(),
        }
    }
}

fn default_inventory_slots() -> usize {
    36
}

fn default_ticks_per_second() -> u32 {
    20
}

fn default_item_lifetime() -> u64 {
    6000
}
