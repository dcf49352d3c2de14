//! Room-layer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings shared by the registry and every room actor it spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsConfig {
    /// How long a room with zero connections survives before the
    /// sweeper closes it.
    pub evict_after: Duration,

    /// How often the sweeper runs.
    pub sweep_interval: Duration,

    /// Command channel size per room actor.
    pub channel_size: usize,

    /// Fixed shuffle seed for every room. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            evict_after: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
            channel_size: 64,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooms_config_default() {
        let config = RoomsConfig::default();
        assert_eq!(config.evict_after, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.channel_size, 64);
        assert!(config.seed.is_none());
    }
}
