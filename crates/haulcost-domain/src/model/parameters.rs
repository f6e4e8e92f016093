use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "BRL".to_string()
}

/// Per-owner pricing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameters {
    pub diesel_price_per_liter: f64,
    /// Falls back to the configured default speed when absent
    #[serde(default)]
    pub average_speed_kmh: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
