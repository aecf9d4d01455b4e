//! Configuration types

use serde::Deserialize;
use std::time::Duration;

use crate::nat::NatTimeouts;
use crate::telemetry::LogConfig;

/// User-defined configuration (natgw.toml)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nat: NatConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[nat]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NatConfig {
    /// Inclusive translated-port range. Unset means take the host's
    /// ephemeral range via `config::local_port_range`.
    pub port_range: Option<(u16, u16)>,
    /// Seconds a binding must sit idle before a pressure sweep reclaims it.
    pub reclaim_idle_secs: Option<u64>,
}

impl NatConfig {
    /// Reclamation tuning from this section, defaults filled in.
    pub fn timeouts(&self) -> NatTimeouts {
        match self.reclaim_idle_secs {
            Some(secs) => NatTimeouts {
                reclaim_idle: Duration::from_secs(secs),
            },
            None => NatTimeouts::default(),
        }
    }
}
