//! Tracing subscriber setup for hosts and tests.

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `level` when set. Returns `false` if a subscriber
/// was already installed, which is expected when several tests call this.
pub fn init_tracing(level: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Install a subscriber at the keeper's configured `log_level`.
pub fn init_from_config(config: &HostConfig) -> bool {
    init_tracing(&config.keeper.general.log_level, false)
}
