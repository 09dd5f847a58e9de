//! Configuration for the stones custody engine.
//!
//! Maps directly to `stones.toml`. Every field has a default, so an empty
//! file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StonesError};

/// Top-level keeper configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// How stone items are recognised.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Periodic validator cadence.
    #[serde(default)]
    pub validator: ValidatorConfig,
    /// Persistence cycle cadence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl KeeperConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `StonesError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| StonesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `StonesError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.validator.interval_ticks == 0 {
            return Err(StonesError::Config(
                "validator.interval_ticks must be at least 1".to_string(),
            ));
        }
        if self.persistence.interval_ticks == 0 {
            return Err(StonesError::Config(
                "persistence.interval_ticks must be at least 1".to_string(),
            ));
        }
        if self.identity.material.trim().is_empty() {
            return Err(StonesError::Config("identity.material is empty".to_string()));
        }
        if self.identity.tag_key.trim().is_empty() {
            return Err(StonesError::Config("identity.tag_key is empty".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether custody tracking is active. A disabled keeper ignores everything.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: default_log_level(),
        }
    }
}

/// Item recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Material every stone item is made of.
    #[serde(default = "default_material")]
    pub material: String,
    /// Tag key whose value names the stone kind.
    #[serde(default = "default_tag_key")]
    pub tag_key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            material: default_material(),
            tag_key: default_tag_key(),
        }
    }
}

/// Periodic validator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Tick of the first sweep.
    #[serde(default = "default_validator_delay")]
    pub initial_delay_ticks: u64,
    /// Ticks between sweeps.
    #[serde(default = "default_validator_interval")]
    pub interval_ticks: u64,
}

impl ValidatorConfig {
    /// The sweep schedule.
    #[must_use]
    pub fn cadence(&self) -> Cadence {
        Cadence::new(self.initial_delay_ticks, self.interval_ticks)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            initial_delay_ticks: default_validator_delay(),
            interval_ticks: default_validator_interval(),
        }
    }
}

/// Persistence cycle settings. The storage format belongs to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Tick of the first save.
    #[serde(default = "default_save_interval")]
    pub initial_delay_ticks: u64,
    /// Ticks between saves.
    #[serde(default = "default_save_interval")]
    pub interval_ticks: u64,
}

impl PersistenceConfig {
    /// The save schedule.
    #[must_use]
    pub fn cadence(&self) -> Cadence {
        Cadence::new(self.initial_delay_ticks, self.interval_ticks)
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            initial_delay_ticks: default_save_interval(),
            interval_ticks: default_save_interval(),
        }
    }
}

/// A repeating task measured in world ticks.
///
/// The cadence remembers when it is next due, so a host that skips tick
/// numbers still runs the task at the first tick past each boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Tick of the first run.
    pub initial_delay_ticks: u64,
    /// Ticks between runs, never zero.
    pub interval_ticks: u64,
    next_due: u64,
}

impl Cadence {
    /// Build a cadence; a zero interval is treated as every tick.
    #[must_use]
    pub fn new(initial_delay_ticks: u64, interval_ticks: u64) -> Self {
        Self {
            initial_delay_ticks,
            interval_ticks: interval_ticks.max(1),
            next_due: initial_delay_ticks,
        }
    }

    /// The first tick at which the task runs again.
    #[must_use]
    pub fn next_due(&self) -> u64 {
        self.next_due
    }

    /// Whether the task is due at `tick`, without consuming the run.
    #[must_use]
    pub fn is_due(&self, tick: u64) -> bool {
        tick >= self.next_due
    }

    /// Consume the run if one is due at `tick` and schedule the next
    /// boundary strictly after `tick`.
    pub fn poll(&mut self, tick: u64) -> bool {
        if !self.is_due(tick) {
            return false;
        }
        let elapsed = (tick - self.initial_delay_ticks) / self.interval_ticks + 1;
        self.next_due = self
            .initial_delay_ticks
            .saturating_add(elapsed.saturating_mul(self.interval_ticks));
        true
    }
}

// ---------------------------------------------------------------------------
// Default value helpers (serde requires functions)
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_material() -> String {
    "nether_star".to_string()
}

fn default_tag_key() -> String {
    "infinity_stone".to_string()
}

fn default_validator_delay() -> u64 {
    8
}

fn default_validator_interval() -> u64 {
    20
}

fn default_save_interval() -> u64 {
    6000
}
