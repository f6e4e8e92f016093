//! Cost catalog records

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Per-kilometre cost such as tyres or driver per-diem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCost {
    pub id: String,
    pub name: String,
    pub rate_per_km: f64,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}

/// Monthly cost such as insurance or salaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCost {
    pub id: String,
    pub name: String,
    pub monthly_amount: f64,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}

/// Flat charge tied to a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toll {
    pub id: String,
    pub route_id: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
