use chrono::NaiveDate;
use haulcost_types::TripStatus;
use serde::{Deserialize, Serialize};

/// A planned or executed run of a vehicle over a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub route_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub weight_tons: Option<f64>,
    #[serde(default)]
    pub volume_m3: Option<f64>,
    /// Freight revenue, used for margin
    #[serde(default)]
    pub revenue: Option<f64>,
    /// One-off cost noted on the trip; not part of the estimate
    #[serde(default)]
    pub extra_cost: Option<f64>,
    #[serde(default)]
    pub extra_cost_description: Option<String>,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
