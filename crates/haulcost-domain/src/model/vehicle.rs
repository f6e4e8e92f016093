//! Vehicle record

use haulcost_types::VehicleStatus;
use serde::{Deserialize, Serialize};

/// Fleet vehicle with the figures the estimator needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    /// Free-text body type (e.g. "Truck 3/4", "Van")
    pub kind: String,
    /// Maximum payload in tonnes
    pub capacity_tons: f64,
    /// Fuel efficiency
    pub km_per_liter: f64,
    /// Maintenance rate per kilometre
    #[serde(default)]
    pub cost_per_km: f64,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
