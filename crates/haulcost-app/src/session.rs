//! Session context passed to every use case

use haulcost_domain::model::DEFAULT_OWNER;

use crate::config::Config;

/// Speed assumed when neither the owner's parameters nor the route give one
pub const FALLBACK_AVERAGE_SPEED_KMH: f64 = 60.0;

/// Identifies whose catalog records a use case may see
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub owner: String,
    pub default_average_speed_kmh: f64,
}

impl Session {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            default_average_speed_kmh: FALLBACK_AVERAGE_SPEED_KMH,
        }
    }

    /// Session for the configured owner and speed default
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.owner.clone()).with_default_speed(config.default_average_speed_kmh)
    }

    pub fn with_default_speed(mut self, speed_kmh: f64) -> Self {
        self.default_average_speed_kmh = speed_kmh;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER)
    }
}
