//! Shared enums for catalog records and reports

use serde::{Deserialize, Serialize};

/// Availability of a vehicle in the fleet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in use",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// Lifecycle state of a trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::InProgress => "in progress",
            TripStatus::Completed => "completed",
        }
    }
}

/// Cost efficiency grade derived from cost per kilometre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyRating {
    /// Below 2.00 per km
    High,
    /// 2.00 up to 4.00 per km
    Medium,
    /// 4.00 per km and above
    Low,
}

impl EfficiencyRating {
    /// Grade a cost per kilometre
    pub fn from_cost_per_km(cost_per_km: f64) -> Self {
        match cost_per_km {
            c if c < 2.0 => EfficiencyRating::High,
            c if c < 4.0 => EfficiencyRating::Medium,
            _ => EfficiencyRating::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyRating::High => "high",
            EfficiencyRating::Medium => "medium",
            EfficiencyRating::Low => "low",
        }
    }

    /// One-line commentary shown next to the grade
    pub fn advice(&self) -> &'static str {
        match self {
            EfficiencyRating::High => "Excellent cost-benefit for this transport simulation.",
            EfficiencyRating::Medium => "Reasonable cost; review route and vehicle choice for savings.",
            EfficiencyRating::Low => "High cost per km; consider a more efficient vehicle or route.",
        }
    }
}
